//! One-shot market inspector behind the binary.
//!
//! Fetches a market's AMM snapshots, the session's open positions, and the
//! trade history, then prints current prices and the reconstructed
//! probability series. Exercises the library end to end without a UI.

use std::sync::Arc;

use tracing::{info, warn};

use crate::backend::{AmmBackend, HttpBackend};
use crate::config::Config;
use crate::domain::{series, MarketId, MarketTopology, OptionId, TopologyAmms};
use crate::error::Result;

use super::ledger::PositionLedger;

/// Fetch and print everything known about one market.
pub async fn run(config: &Config, market_id: &str, exclusive: bool) -> Result<()> {
    let market = MarketId::from(market_id);
    let backend: Arc<dyn AmmBackend> = Arc::new(HttpBackend::new(
        config.network.api_url.clone(),
        config.network.api_token.clone(),
    ));

    let topology = if exclusive {
        let info = backend.exclusive_market(&market).await?;
        MarketTopology::shared(market.clone(), info)
    } else {
        let options = backend.option_markets(&market).await?;
        MarketTopology::per_option(market.clone(), options, false)
    };

    if let Err(violations) = topology.verify() {
        for violation in violations {
            warn!(market = %market, %violation, "Snapshot price invariant violated");
        }
    }

    println!("market {market}");
    match topology.amms() {
        TopologyAmms::PerOption(options) => {
            for option in options {
                println!(
                    "  {:<24} YES {:>8}  NO {:>8}  [{:?}]",
                    option.option_name, option.price_yes, option.price_no, option.status
                );
            }
        }
        TopologyAmms::Shared(info) => {
            for outcome in &info.outcomes {
                println!(
                    "  {:<24} {:>8}",
                    outcome
                        .option_name
                        .clone()
                        .unwrap_or_else(|| outcome.outcome_id.to_string()),
                    outcome.price
                );
            }
        }
    }

    let ledger = PositionLedger::new(backend.clone(), market.clone(), exclusive);
    ledger.refresh().await?;
    let positions = ledger.open_positions();
    if positions.is_empty() {
        println!("no open positions");
    } else {
        for p in &positions {
            println!(
                "  position {}: {} {} x{}  cost {}  value {}  pnl {}",
                p.id, p.side, p.outcome_id, p.shares, p.total_cost, p.current_value, p.pnl()
            );
        }
    }

    let history = if exclusive {
        backend.exclusive_trade_history(&market).await?
    } else {
        backend.option_trade_history(&market).await?
    };
    info!(market = %market, trades = history.trades.len(), "History fetched");

    match topology.amms() {
        TopologyAmms::Shared(_) => {
            let outcomes = topology.outcome_ids();
            for (outcome, points) in series::exclusive(&outcomes, &history) {
                print_series(&outcome.to_string(), &points);
            }
        }
        TopologyAmms::PerOption(options) if options.len() == 1 => {
            print_series(&options[0].option_name, &series::binary(&history));
        }
        TopologyAmms::PerOption(options) => {
            let ids: Vec<OptionId> = options.iter().map(|o| o.option_id.clone()).collect();
            let per_option = series::multi(&ids, &history);
            for option in options {
                if let Some(points) = per_option.get(&option.option_id) {
                    print_series(&option.option_name, points);
                }
            }
        }
    }

    Ok(())
}

fn print_series(label: &str, points: &[series::SeriesPoint]) {
    println!("series {label} ({} samples)", points.len());
    for point in points {
        println!("  {}  {}%", point.at.format("%Y-%m-%d %H:%M:%S"), point.probability);
    }
}
