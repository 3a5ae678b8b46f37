//! Pure predicate blocking trades that would create contradictory positions.
//!
//! Evaluated before every quote and every trade dispatch, and re-evaluated
//! whenever positions refresh. No side effects.

use std::fmt;

use rust_decimal::Decimal;

use super::ids::OutcomeId;
use super::market::MarketTopology;
use super::order::Side;
use super::position::Position;

/// Why a request was blocked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Conflict {
    /// The opposite side of this outcome is already held.
    OppositeSideHeld { outcome: OutcomeId, held: Side },
    /// Single-choice market: YES is already held on a different outcome.
    ExclusiveYesHeld {
        requested: OutcomeId,
        held: OutcomeId,
    },
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Conflict::OppositeSideHeld { outcome, held } => write!(
                f,
                "already holding {held} on outcome {outcome}; close that position first"
            ),
            Conflict::ExclusiveYesHeld { held, .. } => write!(
                f,
                "already backing outcome {held} on this single-choice market"
            ),
        }
    }
}

/// Result of a conflict check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConflictCheck {
    conflict: Option<Conflict>,
}

impl ConflictCheck {
    pub fn allowed(&self) -> bool {
        self.conflict.is_none()
    }

    pub fn conflict(&self) -> Option<&Conflict> {
        self.conflict.as_ref()
    }

    pub fn into_conflict(self) -> Option<Conflict> {
        self.conflict
    }
}

/// Check whether taking `requested` on `outcome` would contradict an open
/// position.
///
/// Two rules apply:
/// - same outcome: an open position on the opposite side blocks the request;
/// - cross outcome (single-choice questions, requested YES only): an open YES
///   on any other outcome blocks the request.
///
/// NO positions are outcome-scoped only; holding NO on two different outcomes
/// of the same single-choice question is not treated as a conflict.
pub fn check(
    topology: &MarketTopology,
    outcome: &OutcomeId,
    requested: Side,
    positions: &[Position],
) -> ConflictCheck {
    let open = || positions.iter().filter(|p| p.shares > Decimal::ZERO);

    if let Some(held) = open().find(|p| &p.outcome_id == outcome && p.side == requested.opposite())
    {
        return ConflictCheck {
            conflict: Some(Conflict::OppositeSideHeld {
                outcome: outcome.clone(),
                held: held.side,
            }),
        };
    }

    if topology.is_single_choice() && requested == Side::Yes {
        if let Some(held) = open().find(|p| p.side == Side::Yes && &p.outcome_id != outcome) {
            return ConflictCheck {
                conflict: Some(Conflict::ExclusiveYesHeld {
                    requested: outcome.clone(),
                    held: held.outcome_id.clone(),
                }),
            };
        }
    }

    ConflictCheck { conflict: None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ids::{AmmId, MarketId, OptionId, PositionId};
    use crate::domain::market::{
        ExclusiveMarketInfo, ExclusiveOutcome, MarketStatus, MarketTopology, OptionMarketInfo,
        OutcomeKind,
    };
    use rust_decimal_macros::dec;

    fn exclusive_topology(outcomes: &[&str]) -> MarketTopology {
        let n = Decimal::from(outcomes.len());
        MarketTopology::shared(
            MarketId::from("m-ex"),
            ExclusiveMarketInfo {
                exclusive_market_id: AmmId::from("ex-1"),
                b: dec!(100),
                status: MarketStatus::Active,
                outcomes: outcomes
                    .iter()
                    .map(|id| ExclusiveOutcome {
                        outcome_id: OutcomeId::from(*id),
                        option_id: Some(OptionId::from(*id)),
                        kind: OutcomeKind::Option,
                        price: Decimal::ONE / n,
                        q: dec!(0),
                        option_name: None,
                    })
                    .collect(),
            },
        )
    }

    fn binary_topology() -> MarketTopology {
        MarketTopology::per_option(
            MarketId::from("m-bin"),
            vec![OptionMarketInfo {
                id: AmmId::from("amm-a"),
                option_id: OptionId::from("a"),
                option_name: "A".into(),
                b: dec!(100),
                q_yes: dec!(0),
                q_no: dec!(0),
                price_yes: dec!(0.5),
                price_no: dec!(0.5),
                status: MarketStatus::Active,
            }],
            false,
        )
    }

    fn per_option_topology(options: &[&str], single_choice: bool) -> MarketTopology {
        MarketTopology::per_option(
            MarketId::from("m-po"),
            options
                .iter()
                .map(|id| OptionMarketInfo {
                    id: AmmId::new(format!("amm-{id}")),
                    option_id: OptionId::from(*id),
                    option_name: id.to_uppercase(),
                    b: dec!(100),
                    q_yes: dec!(0),
                    q_no: dec!(0),
                    price_yes: dec!(0.5),
                    price_no: dec!(0.5),
                    status: MarketStatus::Active,
                })
                .collect(),
            single_choice,
        )
    }

    fn held(outcome: &str, side: Side, shares: Decimal) -> Position {
        Position {
            id: PositionId::new(format!("p-{outcome}")),
            amm_id: AmmId::from("ex-1"),
            outcome_id: OutcomeId::from(outcome),
            side,
            shares,
            total_cost: dec!(5),
            current_value: dec!(5),
        }
    }

    #[test]
    fn opposite_side_on_same_outcome_blocks() {
        let topo = binary_topology();
        let positions = vec![held("a", Side::Yes, dec!(10))];
        let check = check(&topo, &OutcomeId::from("a"), Side::No, &positions);
        assert_eq!(
            check.into_conflict(),
            Some(Conflict::OppositeSideHeld {
                outcome: OutcomeId::from("a"),
                held: Side::Yes,
            })
        );
    }

    #[test]
    fn same_side_on_same_outcome_is_allowed() {
        let topo = binary_topology();
        let positions = vec![held("a", Side::Yes, dec!(10))];
        assert!(check(&topo, &OutcomeId::from("a"), Side::Yes, &positions).allowed());
    }

    #[test]
    fn exclusive_yes_held_blocks_yes_elsewhere() {
        let topo = exclusive_topology(&["a", "b"]);
        let positions = vec![held("a", Side::Yes, dec!(10))];
        let check = check(&topo, &OutcomeId::from("b"), Side::Yes, &positions);
        assert_eq!(
            check.into_conflict(),
            Some(Conflict::ExclusiveYesHeld {
                requested: OutcomeId::from("b"),
                held: OutcomeId::from("a"),
            })
        );
    }

    #[test]
    fn exclusive_yes_held_blocks_no_on_same_outcome() {
        let topo = exclusive_topology(&["a", "b"]);
        let positions = vec![held("a", Side::Yes, dec!(10))];
        assert!(!check(&topo, &OutcomeId::from("a"), Side::No, &positions).allowed());
    }

    #[test]
    fn single_choice_per_option_yes_held_blocks_yes_elsewhere() {
        // Legacy single-choice questions are served by per-option AMMs but
        // carry the same "YES on at most one outcome" rule as shared markets.
        let topo = per_option_topology(&["a", "b"], true);
        let positions = vec![held("a", Side::Yes, dec!(10))];
        let check = check(&topo, &OutcomeId::from("b"), Side::Yes, &positions);
        assert_eq!(
            check.into_conflict(),
            Some(Conflict::ExclusiveYesHeld {
                requested: OutcomeId::from("b"),
                held: OutcomeId::from("a"),
            })
        );
    }

    #[test]
    fn multi_select_yes_elsewhere_is_allowed() {
        let topo = per_option_topology(&["a", "b"], false);
        let positions = vec![held("a", Side::Yes, dec!(10))];
        assert!(check(&topo, &OutcomeId::from("b"), Side::Yes, &positions).allowed());
    }

    #[test]
    fn exclusive_no_positions_are_outcome_scoped() {
        let topo = exclusive_topology(&["a", "b", "c"]);
        let positions = vec![held("a", Side::No, dec!(10))];
        // NO on a different outcome is not a cross-outcome conflict.
        assert!(check(&topo, &OutcomeId::from("b"), Side::No, &positions).allowed());
        // Neither is YES elsewhere blocked by a NO holding.
        assert!(check(&topo, &OutcomeId::from("b"), Side::Yes, &positions).allowed());
    }

    #[test]
    fn liquidated_positions_do_not_block() {
        let topo = exclusive_topology(&["a", "b"]);
        let positions = vec![held("a", Side::Yes, dec!(0))];
        assert!(check(&topo, &OutcomeId::from("b"), Side::Yes, &positions).allowed());
    }
}
