//! Ephemeral trade previews.
//!
//! Quotes are request-scoped value objects: created per input change,
//! superseded by any newer request, never persisted. Quote and trade
//! endpoints share a response shape; executing a trade returns the same
//! structure describing what actually happened.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ids::OptionId;
use super::money::{Price, Shares};
use super::trade::OutcomePrice;

/// Quote/trade response of a per-option AMM.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionQuote {
    pub shares: Shares,
    pub gross_amount: Decimal,
    pub fee_amount: Decimal,
    pub net_amount: Decimal,
    pub price_yes_before: Price,
    pub price_yes_after: Price,
    pub q_yes_before: Decimal,
    pub q_yes_after: Decimal,
    pub q_no_before: Decimal,
    pub q_no_after: Decimal,
}

/// Quote/trade response of a shared exclusive-market AMM.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExclusiveQuote {
    pub shares: Shares,
    pub gross_amount: Decimal,
    pub fee_amount: Decimal,
    pub net_amount: Decimal,
    pub price_before: Price,
    pub price_after: Price,
    pub all_prices_before: Vec<OutcomePrice>,
    pub all_prices_after: Vec<OutcomePrice>,
}

/// One sibling leg of a bundle quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleComponent {
    pub option_id: OptionId,
    pub allocated_amount: Decimal,
    pub shares: Shares,
    pub price_before: Price,
    pub price_after: Price,
}

/// Quote/trade response of a bundle request.
///
/// The backend performs the economic allocation across sibling outcomes;
/// the client never computes per-sibling amounts itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleQuote {
    pub total_gross_amount: Decimal,
    pub total_fee_amount: Decimal,
    pub total_net_amount: Decimal,
    pub average_price: Price,
    pub total_shares: Shares,
    pub components: Vec<BundleComponent>,
}

impl BundleQuote {
    /// Sum of component share quantities.
    pub fn component_shares(&self) -> Shares {
        self.components.iter().map(|c| c.shares).sum()
    }

    pub fn contains_option(&self, option: &OptionId) -> bool {
        self.components.iter().any(|c| &c.option_id == option)
    }
}

/// A quote tagged by the route that produced it.
///
/// The variant is decided by the orchestrator's routing rule, never inferred
/// from response fields after the fact.
#[derive(Debug, Clone)]
pub enum Quote {
    /// Direct per-option-market quote.
    Simple(OptionQuote),
    /// Shared-AMM quote for one outcome of an exclusive market.
    Exclusive(ExclusiveQuote),
    /// Synthesized "bet against" purchase across sibling outcomes.
    Bundle(BundleQuote),
}

impl Quote {
    /// Total shares the quoted trade would move.
    pub fn shares(&self) -> Shares {
        match self {
            Quote::Simple(q) => q.shares,
            Quote::Exclusive(q) => q.shares,
            Quote::Bundle(q) => q.total_shares,
        }
    }

    /// Net coin amount of the quoted trade.
    pub fn net_amount(&self) -> Decimal {
        match self {
            Quote::Simple(q) => q.net_amount,
            Quote::Exclusive(q) => q.net_amount,
            Quote::Bundle(q) => q.total_net_amount,
        }
    }

    pub fn is_bundle(&self) -> bool {
        matches!(self, Quote::Bundle(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn bundle_component_shares_sum() {
        let quote = BundleQuote {
            total_gross_amount: dec!(100),
            total_fee_amount: dec!(1),
            total_net_amount: dec!(99),
            average_price: dec!(0.55),
            total_shares: dec!(180),
            components: vec![
                BundleComponent {
                    option_id: OptionId::from("b"),
                    allocated_amount: dec!(60),
                    shares: dec!(110),
                    price_before: dec!(0.5),
                    price_after: dec!(0.55),
                },
                BundleComponent {
                    option_id: OptionId::from("c"),
                    allocated_amount: dec!(40),
                    shares: dec!(70),
                    price_before: dec!(0.5),
                    price_after: dec!(0.57),
                },
            ],
        };
        assert_eq!(quote.component_shares(), dec!(180));
        assert!(quote.contains_option(&OptionId::from("b")));
        assert!(!quote.contains_option(&OptionId::from("a")));
    }

    #[test]
    fn quote_totals_by_variant() {
        let simple = Quote::Simple(OptionQuote {
            shares: dec!(42),
            gross_amount: dec!(20),
            fee_amount: dec!(0.2),
            net_amount: dec!(19.8),
            price_yes_before: dec!(0.5),
            price_yes_after: dec!(0.52),
            q_yes_before: dec!(0),
            q_yes_after: dec!(42),
            q_no_before: dec!(0),
            q_no_after: dec!(0),
        });
        assert_eq!(simple.shares(), dec!(42));
        assert_eq!(simple.net_amount(), dec!(19.8));
        assert!(!simple.is_bundle());
    }
}
