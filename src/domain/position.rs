//! Open position rows as the backend reports them.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{AmmId, OutcomeId, PositionId};
use super::money::Shares;
use super::order::Side;

/// A user's net stake in one outcome of one market.
///
/// At most one side per (market, outcome) may hold shares at a time; the
/// backend enforces this and the conflict guard keeps the client from even
/// requesting a violation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub id: PositionId,
    /// The AMM instance the position was opened against.
    pub amm_id: AmmId,
    pub outcome_id: OutcomeId,
    pub side: Side,
    pub shares: Shares,
    pub total_cost: Decimal,
    pub current_value: Decimal,
}

impl Position {
    /// Open means shares are actually held.
    pub fn is_open(&self) -> bool {
        self.shares > Decimal::ZERO
    }

    /// Unrealized profit/loss.
    pub fn pnl(&self) -> Decimal {
        self.current_value - self.total_cost
    }

    /// Unrealized profit/loss as a percentage of cost, if cost is non-zero.
    pub fn pnl_percent(&self) -> Option<Decimal> {
        if self.total_cost.is_zero() {
            None
        } else {
            Some(self.pnl() / self.total_cost * Decimal::ONE_HUNDRED)
        }
    }
}
