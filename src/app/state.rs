//! Trading-panel state machine.
//!
//! One panel drives one market's trading controls. Transitions are pure
//! functions of (state, event) so the debounce and staleness rules can be
//! tested without render plumbing.

use crate::domain::{Conflict, Quote};

/// Where the panel currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    /// Nothing selected, nothing pending.
    #[default]
    Idle,
    /// Input changed; debounce window running.
    Selecting,
    /// Quote request dispatched, awaiting the backend.
    Quoting,
    /// Trade execution in flight.
    Trading,
    /// Close-position request in flight.
    Closing,
    /// Last action failed; message on display until new input.
    Error,
}

/// Everything that moves the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelEvent {
    InputChanged,
    QuoteDispatched,
    QuoteReady,
    QuoteFailed,
    TradeDispatched,
    TradeSettled,
    TradeFailed,
    CloseDispatched,
    CloseSettled,
    CloseFailed,
    Cleared,
}

/// Pure transition function.
///
/// Illegal (state, event) pairs keep the current state: a stale completion
/// arriving after the panel moved on must be a no-op.
pub fn transition(state: PanelState, event: PanelEvent) -> PanelState {
    use PanelEvent::*;
    use PanelState::*;

    match (state, event) {
        (_, InputChanged) => Selecting,
        (_, Cleared) => Idle,
        (Selecting, QuoteDispatched) => Quoting,
        (Quoting, QuoteReady) => Selecting,
        (Selecting | Quoting, QuoteFailed) => Error,
        (Selecting | Idle, TradeDispatched) => Trading,
        (Trading, TradeSettled) => Idle,
        (Trading, TradeFailed) => Error,
        (Idle | Selecting, CloseDispatched) => Closing,
        (Closing, CloseSettled) => Idle,
        (Closing, CloseFailed) => Error,
        (current, _) => current,
    }
}

/// Panel display state: machine state plus what the user sees.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    state: PanelState,
    quote: Option<Quote>,
    message: Option<String>,
    conflict: Option<Conflict>,
}

impl Panel {
    pub fn state(&self) -> PanelState {
        self.state
    }

    pub fn quote(&self) -> Option<&Quote> {
        self.quote.as_ref()
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn conflict(&self) -> Option<&Conflict> {
        self.conflict.as_ref()
    }

    pub fn apply(&mut self, event: PanelEvent) {
        self.state = transition(self.state, event);
    }

    /// New input: previous errors vanish, the old quote stays until replaced
    /// or invalidated.
    pub fn input_changed(&mut self) {
        self.message = None;
        self.conflict = None;
        self.apply(PanelEvent::InputChanged);
    }

    pub fn quote_ready(&mut self, quote: Quote) {
        self.quote = Some(quote);
        self.message = None;
        self.conflict = None;
        self.apply(PanelEvent::QuoteReady);
    }

    /// A failure clears the quote; a stale quote is never silently kept.
    pub fn quote_failed(&mut self, message: String) {
        self.quote = None;
        self.message = Some(message);
        self.apply(PanelEvent::QuoteFailed);
    }

    /// Conflict guard blocked the request: surface the conflict instead of a
    /// quote, no network call involved.
    pub fn blocked(&mut self, conflict: Conflict) {
        self.quote = None;
        self.message = Some(conflict.to_string());
        self.conflict = Some(conflict);
        self.apply(PanelEvent::QuoteFailed);
    }

    pub fn cleared(&mut self) {
        self.quote = None;
        self.message = None;
        self.conflict = None;
        self.apply(PanelEvent::Cleared);
    }
}
