//! coinbridge command line: query fee rates and priority tiers per coin.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use coinbridge_fee_rate::{FeeProviderConfig, FeeRateClient, FeeRateProvider, HttpFeeRateClient};
use coinbridge_types::{ChainFamily, Coin};
use coinbridge_utils::{init_logging, init_tracing, LogFormat};

#[derive(Parser)]
#[command(name = "coinbridge", about = "Fee rates and priority tiers for coinbridge wallets")]
struct Cli {
    /// Path to a TOML fee-provider configuration file.
    #[arg(long, env = "COINBRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    /// When omitted, only `RUST_LOG` is consulted.
    #[arg(long, env = "COINBRIDGE_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log output format: "human" or "json".
    #[arg(long, default_value = "human", env = "COINBRIDGE_LOG_FORMAT")]
    log_format: LogFormat,

    /// Subcommand.
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the current fee rate for a coin.
    #[command(name = "fee-rate")]
    FeeRate {
        /// Coin name or ticker, e.g. "bitcoin" or "ETH".
        #[arg(long)]
        coin: Coin,
    },

    /// Print the selectable priority tiers, marking the default.
    #[command(name = "priorities")]
    Priorities {
        /// Only this coin; all coins when omitted.
        #[arg(long)]
        coin: Option<Coin>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.log_level.as_deref() {
        Some(level) => init_logging(cli.log_format, level),
        None => init_tracing(),
    }

    let config = match &cli.config {
        Some(path) => {
            let config = FeeProviderConfig::from_toml_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?;
            tracing::info!("Loaded config from {}", path.display());
            config
        }
        None => FeeProviderConfig::default(),
    };

    let client: Arc<dyn FeeRateClient> = Arc::new(HttpFeeRateClient::new(config)?);

    match cli.command {
        Command::FeeRate { coin } => {
            let provider = FeeRateProvider::new(coin, client);
            let rate = provider
                .current_fee_rate()
                .await
                .with_context(|| format!("failed to fetch {coin} fee rate"))?;
            println!("{coin}: {rate} {}", unit_label(coin));
        }
        Command::Priorities { coin } => {
            let coins = coin.map(|c| vec![c]).unwrap_or_else(|| Coin::ALL.to_vec());
            for coin in coins {
                print_priorities(&FeeRateProvider::new(coin, Arc::clone(&client)));
            }
        }
    }

    Ok(())
}

fn unit_label(coin: Coin) -> &'static str {
    match coin.family() {
        ChainFamily::BitcoinLike => "sat/byte",
        ChainFamily::EthereumLike => "wei",
    }
}

fn print_priorities(provider: &FeeRateProvider) {
    let default = provider.default_priority();
    println!("{} ({}):", provider.coin(), provider.coin().code());
    for priority in provider.priority_list() {
        let marker = if priority == default { " (default)" } else { "" };
        println!("  {priority}{marker}");
    }
}
