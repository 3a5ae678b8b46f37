//! AMM backend trait definition.
//!
//! The pricing math lives in an external backend; this trait is the full
//! client-side view of it. Implementations must be pure consumers: every call
//! is a discrete request/response with no client-side price computation.

use async_trait::async_trait;

use crate::domain::{
    AmmId, BundleQuote, ExclusiveMarketInfo, ExclusiveQuote, MarketId, OptionMarketInfo,
    OptionQuote, Position, TradeHistory,
};
use crate::error::Result;

use super::types::{BundleOrder, ExclusiveOrder, OptionOrder};

/// Client-side contract with the external AMM backend.
///
/// Quote calls never mutate backend state; trade calls do. Position endpoints
/// reject unauthenticated sessions with an auth error; the position ledger
/// reads that back as "no positions".
#[async_trait]
pub trait AmmBackend: Send + Sync {
    /// Snapshots of every per-option AMM of a market.
    async fn option_markets(&self, market: &MarketId) -> Result<Vec<OptionMarketInfo>>;

    /// Snapshot of the shared AMM of an exclusive market.
    async fn exclusive_market(&self, market: &MarketId) -> Result<ExclusiveMarketInfo>;

    async fn option_quote(&self, amm: &AmmId, order: &OptionOrder) -> Result<OptionQuote>;

    async fn option_trade(&self, amm: &AmmId, order: &OptionOrder) -> Result<OptionQuote>;

    async fn exclusive_quote(&self, amm: &AmmId, order: &ExclusiveOrder) -> Result<ExclusiveQuote>;

    async fn exclusive_trade(&self, amm: &AmmId, order: &ExclusiveOrder) -> Result<ExclusiveQuote>;

    async fn bundle_quote(&self, order: &BundleOrder) -> Result<BundleQuote>;

    async fn bundle_trade(&self, order: &BundleOrder) -> Result<BundleQuote>;

    async fn option_positions(&self, market: &MarketId) -> Result<Vec<Position>>;

    async fn exclusive_positions(&self, market: &MarketId) -> Result<Vec<Position>>;

    async fn option_trade_history(&self, market: &MarketId) -> Result<TradeHistory>;

    async fn exclusive_trade_history(&self, market: &MarketId) -> Result<TradeHistory>;
}
