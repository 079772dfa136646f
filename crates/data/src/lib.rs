//! Off-chain market data.
//!
//! Provides the [`PriceProvider`] abstraction over USD price services and
//! its CoinGecko implementation.

/// Price service implementations.
pub mod providers;

use async_trait::async_trait;
use farm_apr_domain::{AprError, PriceMap, Token};

/// Source of USD prices for on-chain tokens.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetches USD prices for all `tokens` in one request.
    ///
    /// # Errors
    /// `UpstreamUnavailable` if the service cannot be reached or answers with
    /// malformed data, `MissingPrice` if any requested token is not quoted.
    async fn token_prices(&self, tokens: &[Token]) -> Result<PriceMap, AprError>;
}
