//! Probability time-series reconstruction from ordered trade history.
//!
//! Series are rebuilt purely from the append-only trade log plus an
//! initial-price snapshot; the AMM is never re-queried at historical points.
//! The same ordered trade list and snapshot always yield a byte-identical
//! series: ordering is (executed_at, sequence)-stable and all arithmetic is
//! decimal.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use rust_decimal::Decimal;

use super::ids::{OptionId, OutcomeId};
use super::money::Price;
use super::trade::{Trade, TradeHistory};

/// One chartable sample: probability in percent at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesPoint {
    pub at: DateTime<Utc>,
    pub probability: Decimal,
}

/// Convert an AMM price in [0, 1] to a percentage clamped to [0, 100].
fn percent(price: Price) -> Decimal {
    (price * Decimal::ONE_HUNDRED).clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)
}

const FIFTY: Decimal = Decimal::from_parts(50, 0, 0, false, 0);

/// Trades sorted ascending by execution time, ties broken by the
/// server-assigned sequence when present.
fn ordered(trades: &[Trade]) -> Vec<&Trade> {
    let mut sorted: Vec<&Trade> = trades.iter().collect();
    sorted.sort_by(|a, b| {
        a.executed_at
            .cmp(&b.executed_at)
            .then(a.sequence.cmp(&b.sequence))
    });
    sorted
}

/// Seed timestamp: one second before the first trade.
fn seed_time(first: &Trade) -> DateTime<Utc> {
    first.executed_at - Duration::seconds(1)
}

/// Series for a binary question: one sample per trade from its post-trade
/// YES probability, seeded at 50%.
///
/// `price_yes_after` is preferred; `price_after` is the fallback for rows
/// that predate the explicit YES field.
pub fn binary(history: &TradeHistory) -> Vec<SeriesPoint> {
    let trades = ordered(&history.trades);
    let Some(first) = trades.first() else {
        return Vec::new();
    };

    let mut points = Vec::with_capacity(trades.len() + 1);
    points.push(SeriesPoint {
        at: seed_time(first),
        probability: FIFTY,
    });
    for trade in trades {
        let price = trade.price_yes_after.unwrap_or(trade.price_after);
        points.push(SeriesPoint {
            at: trade.executed_at,
            probability: percent(price),
        });
    }
    points
}

/// Multi-series for an exclusive market: each trade carries a full post-trade
/// probability vector; outcomes absent from a given snapshot carry their last
/// known value forward, never interpolated.
///
/// Seeds come from the backend's initial-price snapshot, falling back to
/// 100/N when absent.
pub fn exclusive(
    outcomes: &[OutcomeId],
    history: &TradeHistory,
) -> BTreeMap<OutcomeId, Vec<SeriesPoint>> {
    let trades = ordered(&history.trades);
    let mut series: BTreeMap<OutcomeId, Vec<SeriesPoint>> = BTreeMap::new();
    let Some(first) = trades.first() else {
        return series;
    };

    let uniform = if outcomes.is_empty() {
        Decimal::ZERO
    } else {
        Decimal::ONE_HUNDRED / Decimal::from(outcomes.len())
    };
    let seed_at = seed_time(first);

    let mut last: BTreeMap<&OutcomeId, Decimal> = BTreeMap::new();
    for outcome in outcomes {
        let seeded = history
            .initial_prices
            .as_ref()
            .and_then(|prices| prices.iter().find(|p| &p.outcome_id == outcome))
            .map(|p| percent(p.price))
            .unwrap_or(uniform);
        last.insert(outcome, seeded);
        series.insert(
            outcome.clone(),
            vec![SeriesPoint {
                at: seed_at,
                probability: seeded,
            }],
        );
    }

    for trade in trades {
        let snapshot = trade.all_prices_after.as_deref().unwrap_or(&[]);
        for outcome in outcomes {
            if let Some(price) = snapshot.iter().find(|p| &p.outcome_id == outcome) {
                last.insert(outcome, percent(price.price));
            }
            let value = last[outcome];
            if let Some(points) = series.get_mut(outcome) {
                points.push(SeriesPoint {
                    at: trade.executed_at,
                    probability: value,
                });
            }
        }
    }
    series
}

/// Per-option series for a multi question: every option market is an
/// independent AMM, so each option's series is resolved from that option's
/// own trade list only, seeded at 50% one second before its own first trade.
pub fn multi(options: &[OptionId], history: &TradeHistory) -> BTreeMap<OptionId, Vec<SeriesPoint>> {
    let mut series = BTreeMap::new();
    for option in options {
        let own: Vec<Trade> = history
            .trades
            .iter()
            .filter(|t| t.option_id.as_ref() == Some(option))
            .cloned()
            .collect();
        let own_history = TradeHistory::new(own, None);
        series.insert(option.clone(), binary(&own_history));
    }
    series
}
