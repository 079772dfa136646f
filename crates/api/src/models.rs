use farm_apr_domain::{AprBreakdown, FarmPool};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Detailed APR of one pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolAprResponse {
    pub pool: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub apr: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub weekly_reward_usd: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_staked_usd: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub lp_price_usd: Decimal,
    pub block_number: u64,
}

impl From<AprBreakdown> for PoolAprResponse {
    fn from(b: AprBreakdown) -> Self {
        Self {
            pool: b.pool_id,
            apr: b.apr,
            weekly_reward_usd: b.weekly_reward_usd,
            total_staked_usd: b.total_staked_usd,
            lp_price_usd: b.lp_price_usd,
            block_number: b.block_number,
        }
    }
}

/// Configured pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolSummary {
    pub id: String,
    pub pool_index: u64,
    pub lp_token: String,
    pub tokens: [String; 2],
}

impl From<&FarmPool> for PoolSummary {
    fn from(p: &FarmPool) -> Self {
        Self {
            id: p.id.clone(),
            pool_index: p.pool_index,
            lp_token: p.lp_token.address.clone(),
            tokens: [p.token_a.symbol.clone(), p.token_b.symbol.clone()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPoolsResponse {
    pub farm: String,
    pub default_pool: String,
    pub pools: Vec<PoolSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
