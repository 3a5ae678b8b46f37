//! Backend-agnostic domain logic: market topology, positions, trades, quotes,
//! the conflict guard, and probability-series reconstruction.

mod ids;
mod market;
mod money;
mod order;
mod position;
mod quote;
mod trade;

pub mod conflict;
pub mod series;

// Core domain types
pub use ids::{AmmId, MarketId, OptionId, OutcomeId, PositionId, TradeId};
pub use market::{
    ExclusiveMarketInfo, ExclusiveOutcome, MarketStatus, MarketTopology, OptionMarketInfo,
    OutcomeKind, QuestionType, TopologyAmms,
};
pub use money::{Price, Shares, PRICE_EPSILON};
pub use order::{validate_amount, AmountType, Side, TradeSide};
pub use position::Position;
pub use quote::{BundleComponent, BundleQuote, ExclusiveQuote, OptionQuote, Quote};
pub use trade::{OutcomePrice, Trade, TradeHistory};

// Conflict guard
pub use conflict::{Conflict, ConflictCheck};
