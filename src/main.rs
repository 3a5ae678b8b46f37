use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use punter::app::inspector;
use punter::config::Config;
use tracing::error;

/// Inspect an LMSR prediction market: current prices, open positions, and
/// the reconstructed probability series.
#[derive(Parser)]
#[command(name = "punter", version)]
struct Args {
    /// Market id to inspect.
    market_id: String,

    /// Treat the market as an exclusive (single shared AMM) market.
    #[arg(long)]
    exclusive: bool,

    /// Path to the config file.
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let args = Args::parse();

    let config = match Config::load(&args.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {e}");
            return ExitCode::FAILURE;
        }
    };

    config.init_logging();

    if let Err(e) = inspector::run(&config, &args.market_id, args.exclusive).await {
        error!(error = %e, "Inspection failed");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
