//! Immutable, backend-authored trade history.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{OptionId, OutcomeId, TradeId};
use super::money::{Price, Shares};
use super::order::TradeSide;

/// Post-trade price of one outcome, as embedded in trade snapshots.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomePrice {
    pub outcome_id: OutcomeId,
    pub price: Price,
}

/// One executed trade from the append-only history.
///
/// Trades embed enough post-trade price state to reconstruct probability
/// series without re-querying the AMM at historical points.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub id: TradeId,
    /// Option the trade touched (per-option markets).
    #[serde(default)]
    pub option_id: Option<OptionId>,
    /// Outcome the trade touched (exclusive markets).
    #[serde(default)]
    pub outcome_id: Option<OutcomeId>,
    pub side: TradeSide,
    pub shares: Shares,
    pub gross_amount: Decimal,
    pub fee_amount: Decimal,
    pub net_amount: Decimal,
    pub price_before: Price,
    pub price_after: Price,
    /// Post-trade YES probability (per-option markets).
    #[serde(default)]
    pub price_yes_after: Option<Price>,
    /// Full post-trade outcome-price vector (exclusive markets).
    #[serde(default)]
    pub all_prices_after: Option<Vec<OutcomePrice>>,
    pub executed_at: DateTime<Utc>,
    /// Server-assigned tiebreaker for trades sharing a timestamp.
    #[serde(default)]
    pub sequence: Option<u64>,
}

/// Ordered trade log for one market plus the initial-price snapshot, when the
/// backend supplies one.
#[derive(Debug, Clone, Default)]
pub struct TradeHistory {
    pub trades: Vec<Trade>,
    pub initial_prices: Option<Vec<OutcomePrice>>,
}

impl TradeHistory {
    pub fn new(trades: Vec<Trade>, initial_prices: Option<Vec<OutcomePrice>>) -> Self {
        Self {
            trades,
            initial_prices,
        }
    }
}
