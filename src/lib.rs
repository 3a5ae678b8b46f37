//! Punter - client-side trading engine for LMSR prediction markets.
//!
//! This crate is the interaction layer between a trading UI and an external
//! LMSR automated-market-maker backend. The AMM pricing math lives in that
//! backend; punter orchestrates quotes, enforces cross-position conflict
//! rules, decomposes "bet against" requests into bundle trades, and
//! reconstructs probability time series from trade history.
//!
//! # Architecture
//!
//! - **`domain`** - Pure types and logic: market topology, positions, trades,
//!   quotes, the conflict guard, and series reconstruction
//! - **`backend`** - The AMM backend contract (`AmmBackend`) and its reqwest
//!   implementation; every interaction is a discrete request/response
//! - **`app`** - Stateful orchestration: the quote orchestrator with its
//!   debounce and last-request-wins rules, the position ledger and close
//!   flow, the bundle composer, the snapshot cache, and the panel state
//!   machine
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Backend-agnostic types and pure logic
//! - [`error`] - Error taxonomy for the crate
//! - [`backend`] - AMM backend trait and HTTP client
//! - [`app`] - Orchestration and session state
//!
//! # Example
//!
//! ```no_run
//! use punter::app::{QuoteInput, QuoteOrchestrator};
//! use punter::domain::{AmountType, OutcomeId, TradeSide};
//! use rust_decimal_macros::dec;
//!
//! # async fn quote(orchestrator: QuoteOrchestrator) -> punter::error::Result<()> {
//! let _outcome = orchestrator.submit(QuoteInput {
//!     outcome: OutcomeId::from("outcome-1"),
//!     side: TradeSide::BuyYes,
//!     amount_type: AmountType::Coin,
//!     amount: dec!(100),
//! }).await?;
//! # Ok(())
//! # }
//! ```

pub mod app;
pub mod backend;
pub mod config;
pub mod domain;
pub mod error;
