//! Quote orchestration: debounce, conflict gating, routing, staleness.
//!
//! The sole concurrency hazard in this subsystem is overlapping quote
//! requests from fast user input. Every submission bumps a request epoch;
//! work re-checks the epoch after the debounce sleep and again when the
//! backend responds, so a superseded request can never overwrite the
//! currently displayed quote or error (last-request-wins; stale responses
//! are dropped on arrival, not cancelled in flight).

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::backend::{AmmBackend, ExclusiveOrder, OptionOrder};
use crate::domain::{
    conflict, validate_amount, AmountType, Conflict, MarketTopology, OptionId, OutcomeId, Quote,
    TopologyAmms, TradeSide,
};
use crate::error::{AuthError, Error, Result};

use super::bundle::BundleComposer;
use super::cache::{ResourceKind, Snapshot, SnapshotCache};
use super::ledger::PositionLedger;
use super::state::{Panel, PanelEvent};

/// Who is trading.
#[derive(Debug, Clone, Default)]
pub struct Session {
    pub authenticated: bool,
    /// Known coin balance, when the wallet has reported one.
    pub balance: Option<Decimal>,
}

/// One quote/trade request as the user framed it.
#[derive(Debug, Clone)]
pub struct QuoteInput {
    pub outcome: OutcomeId,
    pub side: TradeSide,
    pub amount_type: AmountType,
    pub amount: Decimal,
}

/// What a submission produced.
#[derive(Debug, Clone)]
pub enum QuoteOutcome {
    /// The backend answered and this is still the current request.
    Quoted(Quote),
    /// The conflict guard blocked the request before dispatch.
    Blocked(Conflict),
    /// A newer submission superseded this one; nothing was rendered.
    Superseded,
}

/// Result of a trade execution attempt.
#[derive(Debug, Clone)]
pub enum TradeOutcome {
    Executed(Quote),
    /// A trade for this outcome is already in flight; rejected client-side.
    AlreadyPending,
}

/// Debounces input, gates on conflicts, routes to the right backend call,
/// and enforces last-request-wins on responses.
pub struct QuoteOrchestrator {
    backend: Arc<dyn AmmBackend>,
    composer: BundleComposer,
    topology: RwLock<MarketTopology>,
    ledger: Arc<PositionLedger>,
    cache: Arc<SnapshotCache>,
    session: RwLock<Session>,
    debounce: Duration,
    epoch: AtomicU64,
    panel: Mutex<Panel>,
    trading: Mutex<HashSet<OutcomeId>>,
}

impl QuoteOrchestrator {
    pub fn new(
        backend: Arc<dyn AmmBackend>,
        topology: MarketTopology,
        ledger: Arc<PositionLedger>,
        cache: Arc<SnapshotCache>,
        session: Session,
        debounce: Duration,
    ) -> Self {
        Self {
            composer: BundleComposer::new(backend.clone()),
            backend,
            topology: RwLock::new(topology),
            ledger,
            cache,
            session: RwLock::new(session),
            debounce,
            epoch: AtomicU64::new(0),
            panel: Mutex::new(Panel::default()),
            trading: Mutex::new(HashSet::new()),
        }
    }

    /// Current panel display state.
    pub fn panel(&self) -> Panel {
        self.panel.lock().clone()
    }

    pub fn topology(&self) -> MarketTopology {
        self.topology.read().clone()
    }

    pub fn set_session(&self, session: Session) {
        *self.session.write() = session;
    }

    /// Selection cleared or component torn down: any in-flight quote becomes
    /// a no-op on arrival.
    pub fn cancel(&self) {
        self.epoch.fetch_add(1, Ordering::SeqCst);
        self.panel.lock().cleared();
    }

    fn is_current(&self, epoch: u64) -> bool {
        self.epoch.load(Ordering::SeqCst) == epoch
    }

    /// Submit a quote request for the current input.
    ///
    /// Debounces for the configured window, validates, runs the conflict
    /// guard, then dispatches. Validation and conflict failures never reach
    /// the network.
    pub async fn submit(&self, input: QuoteInput) -> Result<QuoteOutcome> {
        let epoch = self.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.panel.lock().input_changed();

        tokio::time::sleep(self.debounce).await;
        if !self.is_current(epoch) {
            debug!(outcome = %input.outcome, "Quote superseded during debounce");
            return Ok(QuoteOutcome::Superseded);
        }

        let balance = self.session.read().balance;
        if let Err(e) = validate_amount(input.amount_type, input.amount, balance) {
            self.panel.lock().quote_failed(e.to_string());
            return Err(e.into());
        }

        if let Some(conflict) = self.check_conflict(&input) {
            info!(outcome = %input.outcome, %conflict, "Quote blocked by conflict guard");
            self.panel.lock().blocked(conflict.clone());
            return Ok(QuoteOutcome::Blocked(conflict));
        }

        self.panel.lock().apply(PanelEvent::QuoteDispatched);
        let result = self.route(&input, false).await;

        if !self.is_current(epoch) {
            debug!(outcome = %input.outcome, "Stale quote response dropped");
            return Ok(QuoteOutcome::Superseded);
        }

        match result {
            Ok(quote) => {
                self.panel.lock().quote_ready(quote.clone());
                Ok(QuoteOutcome::Quoted(quote))
            }
            Err(e) => {
                self.panel.lock().quote_failed(e.to_string());
                Err(e)
            }
        }
    }

    /// Execute the trade the current input describes.
    ///
    /// Requires an authenticated session. Serialized per outcome: a second
    /// submission while one is in flight is rejected client-side. On success
    /// the market cache is invalidated and snapshots and positions are
    /// unconditionally re-fetched; prices are never mutated locally.
    pub async fn execute(&self, input: QuoteInput) -> Result<TradeOutcome> {
        if !self.session.read().authenticated {
            return Err(AuthError::LoginRequired.into());
        }

        let balance = self.session.read().balance;
        validate_amount(input.amount_type, input.amount, balance)?;

        if let Some(conflict) = self.check_conflict(&input) {
            return Err(Error::Conflict(conflict));
        }

        {
            let mut trading = self.trading.lock();
            if !trading.insert(input.outcome.clone()) {
                return Ok(TradeOutcome::AlreadyPending);
            }
        }
        self.panel.lock().apply(PanelEvent::TradeDispatched);

        let result = self.route(&input, true).await;
        self.trading.lock().remove(&input.outcome);

        match result {
            Ok(fill) => {
                info!(
                    outcome = %input.outcome,
                    shares = %fill.shares(),
                    net = %fill.net_amount(),
                    "Trade executed"
                );
                // The fill is already on the books; a failed re-fetch must not
                // read back as a failed trade.
                if let Err(e) = self.refresh_after_trade().await {
                    warn!(outcome = %input.outcome, error = %e, "Post-trade refresh failed");
                }
                self.panel.lock().apply(PanelEvent::TradeSettled);
                Ok(TradeOutcome::Executed(fill))
            }
            Err(e) => {
                warn!(outcome = %input.outcome, error = %e, "Trade failed");
                self.panel.lock().apply(PanelEvent::TradeFailed);
                Err(e)
            }
        }
    }

    fn check_conflict(&self, input: &QuoteInput) -> Option<Conflict> {
        let topology = self.topology.read();
        let positions = self.ledger.open_positions();
        conflict::check(&topology, &input.outcome, input.side.side(), &positions).into_conflict()
    }

    /// Routing rule, decided up front and tagged into the quote variant:
    /// exclusive markets take the shared-AMM call; single-choice questions
    /// served by per-option AMMs realize BUY_NO as a bundle; everything else
    /// is a direct per-option-market call.
    async fn route(&self, input: &QuoteInput, execute: bool) -> Result<Quote> {
        let topology = self.topology.read().clone();
        match topology.amms() {
            TopologyAmms::Shared(exclusive) => {
                let order = ExclusiveOrder {
                    outcome_id: input.outcome.clone(),
                    side: input.side,
                    amount_type: input.amount_type,
                    amount: input.amount,
                };
                let amm = &exclusive.exclusive_market_id;
                let quote = if execute {
                    self.backend.exclusive_trade(amm, &order).await?
                } else {
                    self.backend.exclusive_quote(amm, &order).await?
                };
                Ok(Quote::Exclusive(quote))
            }
            TopologyAmms::PerOption(_)
                if topology.is_single_choice() && input.side == TradeSide::BuyNo =>
            {
                let target = OptionId::from_outcome(&input.outcome);
                let order = BundleComposer::compose(
                    topology.market_id(),
                    &target,
                    input.amount_type,
                    input.amount,
                );
                let quote = if execute {
                    self.composer.trade(&order).await?
                } else {
                    self.composer.quote(&order).await?
                };
                Ok(Quote::Bundle(quote))
            }
            TopologyAmms::PerOption(_) => {
                let amm = topology
                    .option_market(&input.outcome)
                    .ok_or_else(|| Error::UnknownOutcome {
                        outcome: input.outcome.clone(),
                    })?
                    .id
                    .clone();
                let order = OptionOrder {
                    side: input.side,
                    amount_type: input.amount_type,
                    amount: input.amount,
                };
                let quote = if execute {
                    self.backend.option_trade(&amm, &order).await?
                } else {
                    self.backend.option_quote(&amm, &order).await?
                };
                Ok(Quote::Simple(quote))
            }
        }
    }

    /// Re-fetch the AMM snapshot, served from the cache while fresh, and
    /// replace the held topology with it.
    pub async fn reload_topology(&self) -> Result<MarketTopology> {
        let market = self.topology.read().market_id().clone();

        let refreshed = if self.topology.read().is_exclusive() {
            let info = match self.cache.get(ResourceKind::ExclusiveMarket, &market) {
                Some(Snapshot::ExclusiveMarket(info)) => info,
                _ => {
                    let info = self.backend.exclusive_market(&market).await?;
                    self.cache.insert(
                        ResourceKind::ExclusiveMarket,
                        &market,
                        Snapshot::ExclusiveMarket(info.clone()),
                    );
                    info
                }
            };
            MarketTopology::shared(market.clone(), info)
        } else {
            let single_choice = self.topology.read().is_single_choice();
            let options = match self.cache.get(ResourceKind::OptionMarkets, &market) {
                Some(Snapshot::OptionMarkets(options)) => options,
                _ => {
                    let options = self.backend.option_markets(&market).await?;
                    self.cache.insert(
                        ResourceKind::OptionMarkets,
                        &market,
                        Snapshot::OptionMarkets(options.clone()),
                    );
                    options
                }
            };
            MarketTopology::per_option(market.clone(), options, single_choice)
        };

        if let Err(violations) = refreshed.verify() {
            for violation in violations {
                warn!(market = %market, %violation, "Snapshot price invariant violated");
            }
        }
        *self.topology.write() = refreshed.clone();
        Ok(refreshed)
    }

    /// Post-trade refresh: invalidate the cache, re-fetch AMM snapshots and
    /// positions. The backend owns all market state.
    async fn refresh_after_trade(&self) -> Result<()> {
        let market = self.topology.read().market_id().clone();
        self.cache.invalidate_market(&market);
        self.reload_topology().await?;
        self.ledger.refresh().await
    }
}
