//! Request bodies and response envelopes for the AMM backend API.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{
    AmountType, MarketId, OptionId, OutcomeId, OutcomePrice, Trade, TradeHistory, TradeSide,
};

/// Body of a per-option-market quote/trade request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionOrder {
    pub side: TradeSide,
    pub amount_type: AmountType,
    pub amount: Decimal,
}

/// Body of an exclusive-market quote/trade request.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusiveOrder {
    pub outcome_id: OutcomeId,
    pub side: TradeSide,
    pub amount_type: AmountType,
    pub amount: Decimal,
}

/// Direction of a bundle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BundleType {
    BuyYes,
    BuyNo,
}

/// Body of a bundle quote/trade request. The backend allocates the amount
/// across sibling outcomes itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleOrder {
    pub market_id: MarketId,
    pub bundle_type: BundleType,
    pub target_option_id: OptionId,
    pub amount_type: AmountType,
    pub amount: Decimal,
}

/// Trade-history endpoints answer either a bare trade array or an object
/// wrapping trades with the initial-price snapshot.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HistoryResponse {
    Wrapped {
        trades: Vec<Trade>,
        #[serde(default, rename = "initialPrices")]
        initial_prices: Option<Vec<OutcomePrice>>,
    },
    Bare(Vec<Trade>),
}

impl From<HistoryResponse> for TradeHistory {
    fn from(response: HistoryResponse) -> Self {
        match response {
            HistoryResponse::Wrapped {
                trades,
                initial_prices,
            } => TradeHistory::new(trades, initial_prices),
            HistoryResponse::Bare(trades) => TradeHistory::new(trades, None),
        }
    }
}

/// Error body the backend attaches to non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct BackendErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
