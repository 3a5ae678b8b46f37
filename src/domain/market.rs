//! Market topology: which AMM instances exist for a question, plus their
//! latest backend-owned snapshots.
//!
//! The backend AMM is the sole owner of market state. The client holds
//! read-only snapshots that are unconditionally re-fetched after every trade,
//! never mutated optimistically.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::{AmmId, MarketId, OptionId, OutcomeId};
use super::money::{Price, PRICE_EPSILON};

/// How a question is priced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionType {
    /// One option, one AMM pricing YES/NO.
    Binary,
    /// Several independent options, one AMM each.
    Multi,
    /// Mutually exclusive outcomes sharing a single AMM.
    Exclusive,
}

/// Lifecycle status of an AMM instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MarketStatus {
    Active,
    Paused,
    Resolved,
}

/// Snapshot of a per-option AMM (one independent market per outcome).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionMarketInfo {
    pub id: AmmId,
    pub option_id: OptionId,
    pub option_name: String,
    pub b: Decimal,
    pub q_yes: Decimal,
    pub q_no: Decimal,
    pub price_yes: Price,
    pub price_no: Price,
    pub status: MarketStatus,
}

impl OptionMarketInfo {
    /// Outcome key this AMM prices (per-option AMMs are keyed by option id).
    pub fn outcome_id(&self) -> OutcomeId {
        OutcomeId::from_option(&self.option_id)
    }

    /// Complementary-price invariant: priceYes + priceNo == 1.
    pub fn prices_consistent(&self) -> bool {
        let sum = self.price_yes + self.price_no;
        (sum - Decimal::ONE).abs() <= PRICE_EPSILON
    }
}

/// Kind of outcome on an exclusive market.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OutcomeKind {
    /// Maps to a selectable option on the question.
    Option,
    /// Catch-all "none of the above" outcome.
    None,
}

/// One outcome row of an exclusive market snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusiveOutcome {
    pub outcome_id: OutcomeId,
    pub option_id: Option<OptionId>,
    #[serde(rename = "type")]
    pub kind: OutcomeKind,
    pub price: Price,
    pub q: Decimal,
    #[serde(default)]
    pub option_name: Option<String>,
}

/// Snapshot of a shared AMM jointly pricing all outcomes of a single-choice
/// question. Prices sum to 1.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusiveMarketInfo {
    pub exclusive_market_id: AmmId,
    pub b: Decimal,
    pub status: MarketStatus,
    pub outcomes: Vec<ExclusiveOutcome>,
}

impl ExclusiveMarketInfo {
    /// Joint-price invariant: Σ outcome.price == 1.
    pub fn prices_consistent(&self) -> bool {
        let sum: Decimal = self.outcomes.iter().map(|o| o.price).sum();
        (sum - Decimal::ONE).abs() <= PRICE_EPSILON
    }

    pub fn outcome(&self, id: &OutcomeId) -> Option<&ExclusiveOutcome> {
        self.outcomes.iter().find(|o| &o.outcome_id == id)
    }
}

/// The AMM instances backing a market.
#[derive(Debug, Clone)]
pub enum TopologyAmms {
    /// Binary/multi questions: one independent AMM per option.
    PerOption(Vec<OptionMarketInfo>),
    /// Exclusive questions: one AMM shared by all outcomes.
    Shared(ExclusiveMarketInfo),
}

/// Static description of which AMM instances exist for a market, carrying
/// their latest snapshots.
#[derive(Debug, Clone)]
pub struct MarketTopology {
    market: MarketId,
    question_type: QuestionType,
    single_choice: bool,
    amms: TopologyAmms,
}

impl MarketTopology {
    /// Topology for a binary or multi question backed by per-option AMMs.
    ///
    /// `single_choice` marks the legacy case of a single-choice question
    /// served through per-option AMMs; betting NO there routes through a
    /// bundle trade rather than the option's own NO side.
    pub fn per_option(
        market: MarketId,
        options: Vec<OptionMarketInfo>,
        single_choice: bool,
    ) -> Self {
        let question_type = if options.len() == 1 {
            QuestionType::Binary
        } else {
            QuestionType::Multi
        };
        Self {
            market,
            question_type,
            single_choice,
            amms: TopologyAmms::PerOption(options),
        }
    }

    /// Topology for a single-choice question backed by one shared AMM.
    pub fn shared(market: MarketId, exclusive: ExclusiveMarketInfo) -> Self {
        Self {
            market,
            question_type: QuestionType::Exclusive,
            single_choice: true,
            amms: TopologyAmms::Shared(exclusive),
        }
    }

    pub fn market_id(&self) -> &MarketId {
        &self.market
    }

    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    pub fn is_exclusive(&self) -> bool {
        matches!(self.amms, TopologyAmms::Shared(_))
    }

    /// Single-choice semantics: NO on an outcome means "some other outcome
    /// wins", and YES may be held on at most one outcome.
    pub fn is_single_choice(&self) -> bool {
        self.single_choice
    }

    pub fn amms(&self) -> &TopologyAmms {
        &self.amms
    }

    /// All outcome keys of the market, in snapshot order.
    pub fn outcome_ids(&self) -> Vec<OutcomeId> {
        match &self.amms {
            TopologyAmms::PerOption(options) => {
                options.iter().map(OptionMarketInfo::outcome_id).collect()
            }
            TopologyAmms::Shared(exclusive) => exclusive
                .outcomes
                .iter()
                .map(|o| o.outcome_id.clone())
                .collect(),
        }
    }

    /// The per-option AMM pricing a given outcome, if this is a per-option
    /// topology.
    pub fn option_market(&self, outcome: &OutcomeId) -> Option<&OptionMarketInfo> {
        match &self.amms {
            TopologyAmms::PerOption(options) => {
                options.iter().find(|o| &o.outcome_id() == outcome)
            }
            TopologyAmms::Shared(_) => None,
        }
    }

    /// Sibling outcomes of `target` (everything except it).
    pub fn siblings(&self, target: &OutcomeId) -> Vec<OutcomeId> {
        self.outcome_ids()
            .into_iter()
            .filter(|o| o != target)
            .collect()
    }

    /// Check the snapshot price invariants and report each violation.
    ///
    /// Per-option AMMs must satisfy priceYes + priceNo == 1; a shared AMM
    /// must satisfy Σ price == 1. Tolerance is [`PRICE_EPSILON`].
    pub fn verify(&self) -> Result<(), Vec<String>> {
        let mut violations = Vec::new();
        match &self.amms {
            TopologyAmms::PerOption(options) => {
                for option in options {
                    if !option.prices_consistent() {
                        violations.push(format!(
                            "option market {}: priceYes {} + priceNo {} != 1",
                            option.id, option.price_yes, option.price_no
                        ));
                    }
                }
            }
            TopologyAmms::Shared(exclusive) => {
                if !exclusive.prices_consistent() {
                    let sum: Decimal = exclusive.outcomes.iter().map(|o| o.price).sum();
                    violations.push(format!(
                        "exclusive market {}: outcome prices sum to {}",
                        exclusive.exclusive_market_id, sum
                    ));
                }
            }
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }

    /// Current probability (price) of an outcome, if present in the snapshot.
    pub fn price_of(&self, outcome: &OutcomeId) -> Option<Price> {
        match &self.amms {
            TopologyAmms::PerOption(_) => self.option_market(outcome).map(|o| o.price_yes),
            TopologyAmms::Shared(exclusive) => exclusive.outcome(outcome).map(|o| o.price),
        }
    }
}
