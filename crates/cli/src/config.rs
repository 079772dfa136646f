//! Runtime settings and wiring of the APR service.

use anyhow::{Context, Result, bail};
use clap::{Args, ValueEnum};
use farm_apr_api::AprService;
use farm_apr_data::providers::{COINGECKO_API_URL, CoingeckoConfig, CoingeckoProvider};
use farm_apr_domain::FarmConfig;
use farm_apr_protocols::rpc::{AURORA_RPC_URL, http_provider};
use farm_apr_protocols::{AURORASCAN_API_URL, AuroraswapReader, BalanceSource, ExplorerClient};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Where token balances and supplies are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BalanceSourceKind {
    /// ERC20 view calls over JSON-RPC.
    Rpc,
    /// Block explorer API for every read (needs `AURORASCAN_API_KEY`).
    Explorer,
    /// Reserves over RPC; LP supply and staked LP from the explorer.
    LpExplorer,
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Farm definition file
    #[arg(
        long = "config",
        env = "FARM_APR_CONFIG",
        default_value = "config/auroraswap.toml",
        global = true
    )]
    pub farm_config: PathBuf,

    /// Aurora JSON-RPC endpoint
    #[arg(long, env = "AURORA_RPC_URL", default_value = AURORA_RPC_URL, global = true)]
    pub rpc_url: String,

    /// Block explorer API endpoint
    #[arg(long, env = "AURORASCAN_API_URL", default_value = AURORASCAN_API_URL, global = true)]
    pub aurorascan_api_url: String,

    #[arg(long, env = "AURORASCAN_API_KEY", hide_env_values = true, global = true)]
    pub aurorascan_api_key: Option<String>,

    /// Price service endpoint
    #[arg(long, env = "COINGECKO_API_URL", default_value = COINGECKO_API_URL, global = true)]
    pub coingecko_api_url: String,

    #[arg(long, env = "COINGECKO_API_KEY", hide_env_values = true, global = true)]
    pub coingecko_api_key: Option<String>,

    #[arg(
        long,
        env = "BALANCE_SOURCE",
        value_enum,
        default_value_t = BalanceSourceKind::Rpc,
        global = true
    )]
    pub balance_source: BalanceSourceKind,

    /// Timeout of every upstream request, in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value_t = 15, global = true)]
    pub http_timeout_secs: u64,
}

/// Reads and validates a farm definition file.
pub fn load_farm(path: &Path) -> Result<FarmConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading farm config {}", path.display()))?;
    parse_farm(&text).with_context(|| format!("invalid farm config {}", path.display()))
}

fn parse_farm(text: &str) -> Result<FarmConfig> {
    let farm: FarmConfig = toml::from_str(text).context("parsing TOML")?;
    farm.validate()?;
    Ok(farm)
}

/// Builds the APR service with live price and chain clients.
pub fn build_service(settings: &Settings, farm: FarmConfig) -> Result<AprService> {
    if settings.http_timeout_secs == 0 {
        bail!("HTTP_TIMEOUT_SECS must be positive");
    }
    let timeout = Duration::from_secs(settings.http_timeout_secs);

    let prices = CoingeckoProvider::new(CoingeckoConfig {
        base_url: settings.coingecko_api_url.clone(),
        platform: farm.chain_platform.clone(),
        api_key: settings.coingecko_api_key.clone(),
        timeout,
    })
    .context("building price client")?;

    let balances = match settings.balance_source {
        BalanceSourceKind::Rpc => BalanceSource::Rpc,
        BalanceSourceKind::Explorer => BalanceSource::Explorer(explorer(settings, timeout)?),
        BalanceSourceKind::LpExplorer => BalanceSource::LpExplorer(explorer(settings, timeout)?),
    };

    let provider = http_provider(&settings.rpc_url, timeout).context("building RPC provider")?;
    let chain = AuroraswapReader::new(
        provider,
        &farm.chef_address,
        farm.reward_token.clone(),
        balances,
    )
    .context("building chain reader")?;

    info!(
        farm = %farm.name,
        pools = farm.pools.len(),
        rpc_url = %settings.rpc_url,
        balance_source = ?settings.balance_source,
        "APR service configured"
    );
    Ok(AprService::new(Arc::new(farm), Arc::new(prices), Arc::new(chain)))
}

fn explorer(settings: &Settings, timeout: Duration) -> Result<ExplorerClient> {
    let api_key = settings
        .aurorascan_api_key
        .clone()
        .context("AURORASCAN_API_KEY is required to read balances from the explorer")?;
    ExplorerClient::new(&settings.aurorascan_api_url, api_key, timeout)
        .context("building explorer client")
}
