//! Token balance and supply lookups through an Etherscan-style explorer API.

use farm_apr_domain::{Amount, AprError, Token};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Aurorascan API endpoint.
pub const AURORASCAN_API_URL: &str = "https://api.aurorascan.dev/api";

/// Envelope shared by every explorer response.
#[derive(Debug, Deserialize)]
struct ExplorerResponse {
    status: String,
    #[serde(default)]
    message: String,
    result: serde_json::Value,
}

/// Client for the `tokenbalance` and `tokensupply` explorer actions.
#[derive(Debug, Clone)]
pub struct ExplorerClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl ExplorerClient {
    /// # Errors
    /// `ChainRead` if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AprError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AprError::ChainRead(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Balance of `token` held by `holder`, divided by the token's decimals.
    pub async fn token_balance(&self, token: &Token, holder: &str) -> Result<Decimal, AprError> {
        let raw = self
            .query(&[
                ("module", "account"),
                ("action", "tokenbalance"),
                ("contractaddress", token.address.as_str()),
                ("address", holder),
                ("tag", "latest"),
            ])
            .await?;
        to_units(&raw, token)
    }

    /// Total supply of `token`, divided by the token's decimals.
    pub async fn token_supply(&self, token: &Token) -> Result<Decimal, AprError> {
        let raw = self
            .query(&[
                ("module", "stats"),
                ("action", "tokensupply"),
                ("contractaddress", token.address.as_str()),
            ])
            .await?;
        to_units(&raw, token)
    }

    async fn query(&self, params: &[(&str, &str)]) -> Result<String, AprError> {
        debug!(?params, "Explorer query");
        let response = self
            .client
            .get(&self.base_url)
            .query(params)
            .query(&[("apikey", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Explorer request failed");
                AprError::ChainRead(format!("explorer: {e}"))
            })?;
        let status = response.status();
        if !status.is_success() {
            return Err(AprError::ChainRead(format!("explorer: HTTP {status}")));
        }
        let body = response
            .text()
            .await
            .map_err(|e| AprError::ChainRead(format!("explorer: {e}")))?;
        parse_result(&body)
    }
}

/// Extracts the raw integer string from an explorer response.
fn parse_result(body: &str) -> Result<String, AprError> {
    let response: ExplorerResponse = serde_json::from_str(body)
        .map_err(|e| AprError::ChainRead(format!("explorer: malformed response: {e}")))?;
    if response.status != "1" {
        return Err(AprError::ChainRead(format!(
            "explorer: {} ({})",
            response.message, response.result
        )));
    }
    match response.result {
        serde_json::Value::String(raw) => Ok(raw),
        other => Err(AprError::ChainRead(format!(
            "explorer: unexpected result {other}"
        ))),
    }
}

fn to_units(raw: &str, token: &Token) -> Result<Decimal, AprError> {
    Amount::from_dec_str(raw, token.decimals)
        .and_then(|amount| amount.to_decimal())
        .map_err(|e| AprError::ChainRead(format!("explorer: {} amount: {e}", token.symbol)))
}
