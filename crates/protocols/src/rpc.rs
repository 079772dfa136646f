use ethers::providers::{Http, Provider};
use farm_apr_domain::AprError;
use reqwest::Url;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Public Aurora mainnet RPC endpoint.
pub const AURORA_RPC_URL: &str = "https://mainnet.aurora.dev";

/// Builds an HTTP JSON-RPC provider whose requests time out after `timeout`.
///
/// # Errors
/// `ChainRead` if the URL does not parse or the HTTP client cannot be built.
pub fn http_provider(url: &str, timeout: Duration) -> Result<Arc<Provider<Http>>, AprError> {
    let url = Url::parse(url).map_err(|e| AprError::ChainRead(format!("rpc url {url:?}: {e}")))?;
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| AprError::ChainRead(e.to_string()))?;
    debug!(url = %url, timeout_secs = timeout.as_secs(), "Creating RPC provider");
    Ok(Arc::new(Provider::new(Http::new_with_client(url, client))))
}
