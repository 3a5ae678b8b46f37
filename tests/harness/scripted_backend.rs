//! Deterministic test double for the AMM backend.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use punter::backend::{AmmBackend, BundleOrder, ExclusiveOrder, OptionOrder};
use punter::domain::{
    AmmId, BundleComponent, BundleQuote, ExclusiveMarketInfo, ExclusiveQuote, MarketId,
    OptionMarketInfo, OptionQuote, Position, TradeHistory,
};
use punter::error::{AuthError, Error, Result};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// A scripted response: optional latency plus either a value or a backend
/// rejection message.
pub struct Scripted<T> {
    pub delay: Option<Duration>,
    pub response: std::result::Result<T, String>,
}

impl<T> Scripted<T> {
    pub fn ok(value: T) -> Self {
        Self {
            delay: None,
            response: Ok(value),
        }
    }

    pub fn delayed(value: T, delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            response: Ok(value),
        }
    }

    pub fn rejected(message: &str) -> Self {
        Self {
            delay: None,
            response: Err(message.to_string()),
        }
    }
}

/// Canned option quote distinguishable by its share count.
pub fn option_quote(shares: Decimal) -> OptionQuote {
    OptionQuote {
        shares,
        gross_amount: dec!(10),
        fee_amount: dec!(0.1),
        net_amount: dec!(9.9),
        price_yes_before: dec!(0.5),
        price_yes_after: dec!(0.52),
        q_yes_before: dec!(0),
        q_yes_after: shares,
        q_no_before: dec!(0),
        q_no_after: dec!(0),
    }
}

pub fn exclusive_quote(shares: Decimal) -> ExclusiveQuote {
    ExclusiveQuote {
        shares,
        gross_amount: dec!(10),
        fee_amount: dec!(0.1),
        net_amount: dec!(9.9),
        price_before: dec!(0.4),
        price_after: dec!(0.45),
        all_prices_before: Vec::new(),
        all_prices_after: Vec::new(),
    }
}

/// Bundle quote over the given (option, shares) components.
pub fn bundle_quote(components: &[(&str, Decimal)]) -> BundleQuote {
    let components: Vec<BundleComponent> = components
        .iter()
        .map(|(option, shares)| BundleComponent {
            option_id: option.to_string().into(),
            allocated_amount: dec!(50),
            shares: *shares,
            price_before: dec!(0.35),
            price_after: dec!(0.4),
        })
        .collect();
    let total_shares = components.iter().map(|c| c.shares).sum();
    BundleQuote {
        total_gross_amount: dec!(100),
        total_fee_amount: dec!(1),
        total_net_amount: dec!(99),
        average_price: dec!(0.55),
        total_shares,
        components,
    }
}

#[derive(Default)]
pub struct Counters {
    pub option_markets: AtomicUsize,
    pub exclusive_market: AtomicUsize,
    pub option_quote: AtomicUsize,
    pub option_trade: AtomicUsize,
    pub exclusive_quote: AtomicUsize,
    pub exclusive_trade: AtomicUsize,
    pub bundle_quote: AtomicUsize,
    pub bundle_trade: AtomicUsize,
    pub positions: AtomicUsize,
    pub history: AtomicUsize,
}

/// Scripted backend: queued responses per endpoint, canned defaults, call
/// counters, and recorded orders.
#[derive(Default)]
pub struct ScriptedBackend {
    pub option_markets: Mutex<Vec<OptionMarketInfo>>,
    pub exclusive: Mutex<Option<ExclusiveMarketInfo>>,
    pub positions: Mutex<Vec<Position>>,
    /// Position endpoints answer 401 when set (unauthenticated session).
    pub positions_denied: Mutex<bool>,
    /// Position endpoints answer 503 when set (backend outage).
    pub positions_unavailable: Mutex<bool>,
    /// Market snapshot endpoints answer 503 when set (backend outage).
    pub markets_unavailable: Mutex<bool>,
    pub history: Mutex<TradeHistory>,

    option_quotes: Mutex<VecDeque<Scripted<OptionQuote>>>,
    option_trades: Mutex<VecDeque<Scripted<OptionQuote>>>,
    exclusive_quotes: Mutex<VecDeque<Scripted<ExclusiveQuote>>>,
    bundle_quotes: Mutex<VecDeque<Scripted<BundleQuote>>>,
    bundle_trades: Mutex<VecDeque<Scripted<BundleQuote>>>,

    pub recorded_option_orders: Mutex<Vec<OptionOrder>>,
    pub recorded_exclusive_orders: Mutex<Vec<ExclusiveOrder>>,
    pub recorded_bundle_orders: Mutex<Vec<BundleOrder>>,

    pub counters: Counters,
}

impl ScriptedBackend {
    pub fn push_option_quote(&self, scripted: Scripted<OptionQuote>) {
        self.option_quotes.lock().push_back(scripted);
    }

    pub fn push_option_trade(&self, scripted: Scripted<OptionQuote>) {
        self.option_trades.lock().push_back(scripted);
    }

    pub fn push_exclusive_quote(&self, scripted: Scripted<ExclusiveQuote>) {
        self.exclusive_quotes.lock().push_back(scripted);
    }

    pub fn push_bundle_quote(&self, scripted: Scripted<BundleQuote>) {
        self.bundle_quotes.lock().push_back(scripted);
    }

    pub fn push_bundle_trade(&self, scripted: Scripted<BundleQuote>) {
        self.bundle_trades.lock().push_back(scripted);
    }

    pub fn set_positions(&self, positions: Vec<Position>) {
        *self.positions.lock() = positions;
    }

    async fn respond<T>(queue: &Mutex<VecDeque<Scripted<T>>>, default: T) -> Result<T> {
        let scripted = queue.lock().pop_front();
        match scripted {
            Some(scripted) => {
                if let Some(delay) = scripted.delay {
                    tokio::time::sleep(delay).await;
                }
                scripted.response.map_err(|message| Error::Backend {
                    status: 400,
                    message,
                })
            }
            None => Ok(default),
        }
    }
}

#[async_trait]
impl AmmBackend for ScriptedBackend {
    async fn option_markets(&self, _market: &MarketId) -> Result<Vec<OptionMarketInfo>> {
        self.counters.option_markets.fetch_add(1, Ordering::SeqCst);
        if *self.markets_unavailable.lock() {
            return Err(Error::Backend {
                status: 503,
                message: "markets unavailable".to_string(),
            });
        }
        Ok(self.option_markets.lock().clone())
    }

    async fn exclusive_market(&self, _market: &MarketId) -> Result<ExclusiveMarketInfo> {
        self.counters.exclusive_market.fetch_add(1, Ordering::SeqCst);
        if *self.markets_unavailable.lock() {
            return Err(Error::Backend {
                status: 503,
                message: "markets unavailable".to_string(),
            });
        }
        self.exclusive.lock().clone().ok_or(Error::Backend {
            status: 404,
            message: "no exclusive market".to_string(),
        })
    }

    async fn option_quote(&self, _amm: &AmmId, order: &OptionOrder) -> Result<OptionQuote> {
        self.counters.option_quote.fetch_add(1, Ordering::SeqCst);
        self.recorded_option_orders.lock().push(order.clone());
        Self::respond(&self.option_quotes, option_quote(dec!(1))).await
    }

    async fn option_trade(&self, _amm: &AmmId, order: &OptionOrder) -> Result<OptionQuote> {
        self.counters.option_trade.fetch_add(1, Ordering::SeqCst);
        self.recorded_option_orders.lock().push(order.clone());
        Self::respond(&self.option_trades, option_quote(dec!(1))).await
    }

    async fn exclusive_quote(
        &self,
        _amm: &AmmId,
        order: &ExclusiveOrder,
    ) -> Result<ExclusiveQuote> {
        self.counters.exclusive_quote.fetch_add(1, Ordering::SeqCst);
        self.recorded_exclusive_orders.lock().push(order.clone());
        Self::respond(&self.exclusive_quotes, exclusive_quote(dec!(1))).await
    }

    async fn exclusive_trade(
        &self,
        _amm: &AmmId,
        order: &ExclusiveOrder,
    ) -> Result<ExclusiveQuote> {
        self.counters.exclusive_trade.fetch_add(1, Ordering::SeqCst);
        self.recorded_exclusive_orders.lock().push(order.clone());
        Ok(exclusive_quote(order.amount))
    }

    async fn bundle_quote(&self, order: &BundleOrder) -> Result<BundleQuote> {
        self.counters.bundle_quote.fetch_add(1, Ordering::SeqCst);
        self.recorded_bundle_orders.lock().push(order.clone());
        Self::respond(&self.bundle_quotes, bundle_quote(&[("b", dec!(50))])).await
    }

    async fn bundle_trade(&self, order: &BundleOrder) -> Result<BundleQuote> {
        self.counters.bundle_trade.fetch_add(1, Ordering::SeqCst);
        self.recorded_bundle_orders.lock().push(order.clone());
        Self::respond(&self.bundle_trades, bundle_quote(&[("b", dec!(50))])).await
    }

    async fn option_positions(&self, _market: &MarketId) -> Result<Vec<Position>> {
        self.counters.positions.fetch_add(1, Ordering::SeqCst);
        if *self.positions_denied.lock() {
            return Err(AuthError::Denied { status: 401 }.into());
        }
        if *self.positions_unavailable.lock() {
            return Err(Error::Backend {
                status: 503,
                message: "positions unavailable".to_string(),
            });
        }
        Ok(self.positions.lock().clone())
    }

    async fn exclusive_positions(&self, _market: &MarketId) -> Result<Vec<Position>> {
        self.counters.positions.fetch_add(1, Ordering::SeqCst);
        if *self.positions_denied.lock() {
            return Err(AuthError::Denied { status: 401 }.into());
        }
        if *self.positions_unavailable.lock() {
            return Err(Error::Backend {
                status: 503,
                message: "positions unavailable".to_string(),
            });
        }
        Ok(self.positions.lock().clone())
    }

    async fn option_trade_history(&self, _market: &MarketId) -> Result<TradeHistory> {
        self.counters.history.fetch_add(1, Ordering::SeqCst);
        Ok(self.history.lock().clone())
    }

    async fn exclusive_trade_history(&self, _market: &MarketId) -> Result<TradeHistory> {
        self.counters.history.fetch_add(1, Ordering::SeqCst);
        Ok(self.history.lock().clone())
    }
}
