//! CoinGecko `simple/token_price` client.

use crate::PriceProvider;
use async_trait::async_trait;
use farm_apr_domain::{AprError, PriceMap, Token, TokenPrice};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

/// Public CoinGecko API base URL.
pub const COINGECKO_API_URL: &str = "https://api.coingecko.com/api/v3";

/// Header carrying a CoinGecko pro API key.
const API_KEY_HEADER: &str = "x-cg-pro-api-key";

/// Configuration for [`CoingeckoProvider`].
#[derive(Debug, Clone)]
pub struct CoingeckoConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,
    /// Asset platform id of the chain, e.g. `aurora`.
    pub platform: String,
    pub api_key: Option<String>,
    pub timeout: Duration,
}

impl Default for CoingeckoConfig {
    fn default() -> Self {
        Self {
            base_url: COINGECKO_API_URL.to_string(),
            platform: "aurora".to_string(),
            api_key: None,
            timeout: Duration::from_secs(15),
        }
    }
}

/// One entry of the price response; other currencies are ignored.
#[derive(Debug, Deserialize)]
struct Quote {
    usd: Option<f64>,
}

/// USD prices by contract address from CoinGecko.
#[derive(Debug, Clone)]
pub struct CoingeckoProvider {
    client: reqwest::Client,
    config: CoingeckoConfig,
}

impl CoingeckoProvider {
    /// Creates a provider with its own HTTP client.
    ///
    /// # Errors
    /// Returns `UpstreamUnavailable` if the HTTP client cannot be built.
    pub fn new(config: CoingeckoConfig) -> Result<Self, AprError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AprError::UpstreamUnavailable(e.to_string()))?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/simple/token_price/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.platform
        )
    }
}

#[async_trait]
impl PriceProvider for CoingeckoProvider {
    async fn token_prices(&self, tokens: &[Token]) -> Result<PriceMap, AprError> {
        if tokens.is_empty() {
            return Err(AprError::InvalidInput("no tokens to price".to_string()));
        }
        let addresses = tokens
            .iter()
            .map(Token::address_key)
            .collect::<Vec<_>>()
            .join(",");
        debug!(addresses = %addresses, "Fetching token prices");

        let mut request = self
            .client
            .get(self.endpoint())
            .query(&[("contract_addresses", addresses.as_str()), ("vs_currencies", "usd")]);
        if let Some(key) = &self.config.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Price service request failed");
            AprError::UpstreamUnavailable(e.to_string())
        })?;
        let status = response.status();
        if !status.is_success() {
            warn!(status = %status, "Price service returned an error status");
            return Err(AprError::UpstreamUnavailable(format!("HTTP {status}")));
        }
        let body = response
            .text()
            .await
            .map_err(|e| AprError::UpstreamUnavailable(e.to_string()))?;

        parse_prices(&body, tokens)
    }
}

/// Decodes a `{address: {"usd": price}}` body and checks every requested
/// token is present.
fn parse_prices(body: &str, tokens: &[Token]) -> Result<PriceMap, AprError> {
    let quotes: HashMap<String, Quote> = serde_json::from_str(body)
        .map_err(|e| AprError::UpstreamUnavailable(format!("malformed price response: {e}")))?;
    let quotes: HashMap<String, Quote> = quotes
        .into_iter()
        .map(|(address, quote)| (address.to_lowercase(), quote))
        .collect();

    let mut prices = PriceMap::new();
    for token in tokens {
        let usd = quotes
            .get(&token.address_key())
            .and_then(|q| q.usd)
            .ok_or_else(|| AprError::MissingPrice(format!("{} ({})", token.symbol, token.address)))?;
        prices.insert(&token.address, TokenPrice::from_f64(usd)?);
    }
    debug!(count = prices.len(), "Parsed token prices");
    Ok(prices)
}
