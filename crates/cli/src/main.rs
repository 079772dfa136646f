//! Command Line Interface for the farm APR service.

mod config;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use config::{Settings, build_service, load_farm};
use dotenv::dotenv;
use farm_apr_api::{ApiServer, AppState, ServerConfig};
use farm_apr_domain::FarmConfig;
use prettytable::{Table, row};
use rust_decimal::Decimal;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "farm-apr")]
#[command(about = "APR of Auroraswap liquidity-pool staking farms", long_about = None)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the APR over HTTP
    Serve {
        /// Listen address
        #[arg(long, env = "FARM_APR_BIND", default_value = "0.0.0.0:5000")]
        bind: SocketAddr,
    },
    /// Compute the APR of one pool and print its breakdown
    Apr {
        /// Pool id (defaults to the farm's default pool)
        #[arg(short, long)]
        pool: Option<String>,
    },
    /// List configured pools
    Pools,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let farm = load_farm(&cli.settings.farm_config)?;

    match cli.command {
        Commands::Serve { bind } => {
            let service = build_service(&cli.settings, farm)?;
            let server = ApiServer::new(
                ServerConfig {
                    bind_address: bind,
                },
                AppState::new(service),
            );
            server
                .run()
                .await
                .with_context(|| format!("serving on {bind}"))?;
        }
        Commands::Apr { pool } => {
            let pool_id = pool.unwrap_or_else(|| farm.default_pool.clone());
            let service = build_service(&cli.settings, farm)?;

            println!("🔍 Computing APR for {}...", pool_id);
            let breakdown = service
                .calculate_apr(&pool_id)
                .await
                .with_context(|| format!("computing APR of {pool_id}"))?;

            let mut table = Table::new();
            table.add_row(row!["Pool", breakdown.pool_id]);
            table.add_row(row!["Block", breakdown.block_number]);
            table.add_row(row!["Weekly reward (USD)", usd(breakdown.weekly_reward_usd)]);
            table.add_row(row!["LP value (USD)", usd(breakdown.lp_total_value_usd)]);
            table.add_row(row!["LP price (USD)", usd(breakdown.lp_price_usd)]);
            table.add_row(row!["Total staked (USD)", usd(breakdown.total_staked_usd)]);
            table.add_row(row![
                "APR",
                format!("{:.2}%", breakdown.apr * Decimal::ONE_HUNDRED)
            ]);
            table.printstd();
        }
        Commands::Pools => print_pools(&farm),
    }

    Ok(())
}

fn print_pools(farm: &FarmConfig) {
    println!("📋 {} pools (chef {})", farm.name, farm.chef_address);

    let mut table = Table::new();
    table.add_row(row!["Id", "Index", "LP token", "Tokens", "Default"]);
    for pool in &farm.pools {
        let lp_token = if pool.lp_token.address.is_empty() {
            "(from chain)".to_string()
        } else {
            pool.lp_token.address.clone()
        };
        let default = if pool.id == farm.default_pool { "*" } else { "" };
        table.add_row(row![
            pool.id,
            pool.pool_index,
            lp_token,
            format!("{}/{}", pool.token_a.symbol, pool.token_b.symbol),
            default
        ]);
    }
    table.printstd();
}

fn usd(value: Decimal) -> String {
    format!("${:.2}", value)
}
