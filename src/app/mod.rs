//! Stateful orchestration: quote routing, positions, caching, and the panel
//! state machine.

mod bundle;
mod cache;
mod ledger;
mod orchestrator;
mod state;

pub mod inspector;

pub use bundle::BundleComposer;
pub use cache::{ResourceKind, Snapshot, SnapshotCache};
pub use ledger::{CloseIntent, CloseOutcome, CloseReceipt, PositionLedger};
pub use orchestrator::{QuoteInput, QuoteOrchestrator, QuoteOutcome, Session, TradeOutcome};
pub use state::{transition, Panel, PanelEvent, PanelState};
