//! On-chain state access.
//!
//! Read-only views over the reward chef contract and ERC20 balances, served
//! either by JSON-RPC view calls or by a block explorer API.

/// Auroraswap reward chef adapter.
pub mod auroraswap;
/// Etherscan-style block explorer client.
pub mod explorer;
/// JSON-RPC provider construction.
pub mod rpc;

pub use auroraswap::{AuroraswapReader, BalanceSource};
pub use explorer::{AURORASCAN_API_URL, ExplorerClient};

use async_trait::async_trait;
use farm_apr_domain::{AprError, PoolInfo, Token};
use rust_decimal::Decimal;

/// Read-only accessors over chain state used by the APR pipeline.
///
/// Every method is a single upstream call; any failure is reported as
/// `AprError::ChainRead` and no call is retried.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Latest known block height.
    async fn current_block_number(&self) -> Result<u64, AprError>;

    /// Protocol-wide reward emission per block, in reward token units.
    async fn reward_per_block(&self) -> Result<Decimal, AprError>;

    /// Emission multiplier over `[from_block, to_block)`.
    async fn reward_multiplier(&self, from_block: u64, to_block: u64) -> Result<Decimal, AprError>;

    /// Configuration of the pool at `pool_index`.
    async fn pool_info(&self, pool_index: u64) -> Result<PoolInfo, AprError>;

    /// Sum of allocation weights across all pools.
    async fn total_allocation_weight(&self) -> Result<Decimal, AprError>;

    /// Balance of `token` held by `holder`, in human units.
    async fn token_balance_of(&self, token: &Token, holder: &str) -> Result<Decimal, AprError>;

    /// Amount of `lp_token` staked in the reward chef, in human units.
    async fn staked_balance(&self, lp_token: &Token) -> Result<Decimal, AprError>;

    /// Total supply of `token`, in human units.
    async fn token_total_supply(&self, token: &Token) -> Result<Decimal, AprError>;
}
