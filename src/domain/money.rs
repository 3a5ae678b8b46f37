//! Monetary types for price and share representation.
//!
//! All amounts ride the wire as decimal strings, never binary floats, so the
//! client can compare against backend-computed values without rounding drift.

use rust_decimal::Decimal;

/// Price represented as a Decimal for precision. AMM prices live in [0, 1].
pub type Price = Decimal;

/// Share quantity represented as a Decimal for precision.
pub type Shares = Decimal;

/// Tolerance for price-sum invariant checks on market snapshots.
pub const PRICE_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 6); // 0.000001
