//! Shared builders for market snapshots, positions, and trades.

use chrono::{DateTime, TimeZone, Utc};
use punter::domain::{
    AmmId, ExclusiveMarketInfo, ExclusiveOutcome, MarketId, MarketStatus, MarketTopology,
    OptionId, OptionMarketInfo, OutcomeId, OutcomeKind, Position, PositionId, Side, Trade,
    TradeId, TradeSide,
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn market_id() -> MarketId {
    MarketId::from("m-1")
}

pub fn at(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
}

pub fn option_market(option: &str, price_yes: Decimal) -> OptionMarketInfo {
    OptionMarketInfo {
        id: AmmId::new(format!("amm-{option}")),
        option_id: OptionId::from(option),
        option_name: option.to_uppercase(),
        b: dec!(100),
        q_yes: dec!(0),
        q_no: dec!(0),
        price_yes,
        price_no: Decimal::ONE - price_yes,
        status: MarketStatus::Active,
    }
}

pub fn exclusive_market(prices: &[(&str, Decimal)]) -> ExclusiveMarketInfo {
    ExclusiveMarketInfo {
        exclusive_market_id: AmmId::from("ex-1"),
        b: dec!(100),
        status: MarketStatus::Active,
        outcomes: prices
            .iter()
            .map(|(id, price)| ExclusiveOutcome {
                outcome_id: OutcomeId::from(*id),
                option_id: Some(OptionId::from(*id)),
                kind: OutcomeKind::Option,
                price: *price,
                q: dec!(0),
                option_name: Some(id.to_uppercase()),
            })
            .collect(),
    }
}

/// Binary topology with one option "a" priced 50/50.
pub fn binary_topology() -> MarketTopology {
    MarketTopology::per_option(market_id(), vec![option_market("a", dec!(0.5))], false)
}

/// Multi topology over options a/b/c; `single_choice` switches on bundle
/// routing for BUY_NO.
pub fn multi_topology(single_choice: bool) -> MarketTopology {
    MarketTopology::per_option(
        market_id(),
        vec![
            option_market("a", dec!(0.4)),
            option_market("b", dec!(0.35)),
            option_market("c", dec!(0.25)),
        ],
        single_choice,
    )
}

pub fn exclusive_topology() -> MarketTopology {
    MarketTopology::shared(
        market_id(),
        exclusive_market(&[("a", dec!(0.4)), ("b", dec!(0.35)), ("c", dec!(0.25))]),
    )
}

pub fn position(outcome: &str, side: Side, shares: Decimal) -> Position {
    Position {
        id: PositionId::new(format!("pos-{outcome}-{side}")),
        amm_id: AmmId::new(format!("amm-{outcome}")),
        outcome_id: OutcomeId::from(outcome),
        side,
        shares,
        total_cost: dec!(5),
        current_value: dec!(6),
    }
}

pub fn trade(secs: i64, price_yes_after: Decimal) -> Trade {
    Trade {
        id: TradeId::new(format!("t-{secs}")),
        option_id: None,
        outcome_id: None,
        side: TradeSide::BuyYes,
        shares: dec!(10),
        gross_amount: dec!(5),
        fee_amount: dec!(0.05),
        net_amount: dec!(4.95),
        price_before: dec!(0.5),
        price_after: price_yes_after,
        price_yes_after: Some(price_yes_after),
        all_prices_after: None,
        executed_at: at(secs),
        sequence: None,
    }
}
