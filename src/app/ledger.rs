//! Authoritative view of the user's open positions for one market, plus the
//! close-position flow.
//!
//! Positions feed the conflict guard and the close action. Close is always
//! full liquidation of the held shares; partial closes do not exist. A close
//! takes two independent confirmations, and at most one close request may be
//! in flight per position id.

use std::collections::HashSet;
use std::sync::Arc;

use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use tracing::{info, warn};

use crate::backend::{AmmBackend, ExclusiveOrder, OptionOrder};
use crate::domain::{AmountType, MarketId, Position, PositionId, Shares, TradeSide};
use crate::error::{Error, Result};

/// First confirmation of a close: names exactly what will be liquidated.
#[derive(Debug, Clone)]
pub struct CloseIntent {
    pub position_id: PositionId,
    pub shares: Shares,
    pub side: TradeSide,
}

/// Net result of the liquidation trade.
#[derive(Debug, Clone)]
pub struct CloseReceipt {
    pub position_id: PositionId,
    pub shares: Shares,
    pub net_amount: Decimal,
}

/// What came of an execute-close call.
#[derive(Debug, Clone)]
pub enum CloseOutcome {
    Executed(CloseReceipt),
    /// A close for this position id is already in flight; this call no-ops.
    AlreadyPending,
}

/// Per-market view of the user's open positions.
pub struct PositionLedger {
    backend: Arc<dyn AmmBackend>,
    market: MarketId,
    exclusive: bool,
    positions: RwLock<Vec<Position>>,
    closing: Mutex<HashSet<PositionId>>,
}

impl PositionLedger {
    pub fn new(backend: Arc<dyn AmmBackend>, market: MarketId, exclusive: bool) -> Self {
        Self {
            backend,
            market,
            exclusive,
            positions: RwLock::new(Vec::new()),
            closing: Mutex::new(HashSet::new()),
        }
    }

    /// Re-fetch positions from the backend. Called on market entry and after
    /// every successful trade.
    ///
    /// An auth rejection reads back as "no positions", silently; only trade
    /// execution demands a login.
    pub async fn refresh(&self) -> Result<()> {
        let result = if self.exclusive {
            self.backend.exclusive_positions(&self.market).await
        } else {
            self.backend.option_positions(&self.market).await
        };
        let fetched = match result {
            Ok(positions) => positions,
            Err(Error::Auth(_)) => Vec::new(),
            Err(e) => return Err(e),
        };
        let open: Vec<Position> = fetched.into_iter().filter(Position::is_open).collect();
        info!(market = %self.market, count = open.len(), "Positions refreshed");
        *self.positions.write() = open;
        Ok(())
    }

    /// Snapshot of the open positions.
    pub fn open_positions(&self) -> Vec<Position> {
        self.positions.read().clone()
    }

    pub fn position(&self, id: &PositionId) -> Option<Position> {
        self.positions.read().iter().find(|p| &p.id == id).cloned()
    }

    /// First confirmation. Resolves the position and pins the liquidation
    /// parameters: sell exactly the held shares on the held side.
    pub fn begin_close(&self, id: &PositionId) -> Result<CloseIntent> {
        let position = self.position(id).ok_or_else(|| Error::Backend {
            status: 404,
            message: format!("position {id} not found"),
        })?;
        Ok(CloseIntent {
            position_id: position.id.clone(),
            shares: position.shares,
            side: TradeSide::sell(position.side),
        })
    }

    /// Second confirmation: dispatch the liquidation.
    ///
    /// Guarded per position id; a second call while one is pending returns
    /// [`CloseOutcome::AlreadyPending`] without touching the network.
    pub async fn execute_close(&self, intent: &CloseIntent) -> Result<CloseOutcome> {
        {
            let mut closing = self.closing.lock();
            if !closing.insert(intent.position_id.clone()) {
                return Ok(CloseOutcome::AlreadyPending);
            }
        }

        let result = self.dispatch_close(intent).await;
        self.closing.lock().remove(&intent.position_id);

        match result {
            Ok(net_amount) => {
                info!(position = %intent.position_id, %net_amount, "Position closed");
                // The liquidation went through; a failed re-fetch must not
                // read back as a failed close.
                if let Err(e) = self.refresh().await {
                    warn!(position = %intent.position_id, error = %e, "Refresh after close failed");
                }
                Ok(CloseOutcome::Executed(CloseReceipt {
                    position_id: intent.position_id.clone(),
                    shares: intent.shares,
                    net_amount,
                }))
            }
            Err(e) => {
                warn!(position = %intent.position_id, error = %e, "Close failed");
                Err(e)
            }
        }
    }

    async fn dispatch_close(&self, intent: &CloseIntent) -> Result<Decimal> {
        let position = self
            .position(&intent.position_id)
            .ok_or_else(|| Error::Backend {
                status: 404,
                message: format!("position {} not found", intent.position_id),
            })?;

        if self.exclusive {
            let order = ExclusiveOrder {
                outcome_id: position.outcome_id.clone(),
                side: intent.side,
                amount_type: AmountType::Shares,
                amount: intent.shares,
            };
            let fill = self
                .backend
                .exclusive_trade(&position.amm_id, &order)
                .await?;
            Ok(fill.net_amount)
        } else {
            let order = OptionOrder {
                side: intent.side,
                amount_type: AmountType::Shares,
                amount: intent.shares,
            };
            let fill = self.backend.option_trade(&position.amm_id, &order).await?;
            Ok(fill.net_amount)
        }
    }
}
