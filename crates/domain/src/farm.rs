//! Farm registry: the staking contract, its reward token and the pools
//! that can be priced, looked up by pool identifier.

use crate::error::AprError;
use crate::token::Token;
use primitive_types::H160;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One staking pool of a farm.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmPool {
    /// Identifier used in routes and lookups, e.g. `near-weth`.
    pub id: String,
    /// Index of the pool in the staking contract.
    pub pool_index: u64,
    /// LP token of the pool. An empty address is resolved from the
    /// staking contract's pool info.
    pub lp_token: Token,
    pub token_a: Token,
    pub token_b: Token,
}

impl FarmPool {
    /// Tokens whose USD price the pipeline needs, in one batch.
    #[must_use]
    pub fn price_tokens(&self, reward_token: &Token) -> Vec<Token> {
        vec![
            self.token_a.clone(),
            self.token_b.clone(),
            reward_token.clone(),
        ]
    }

    /// LP token with its address filled in from `on_chain` when the
    /// configuration leaves it empty.
    #[must_use]
    pub fn lp_token_at(&self, on_chain: &str) -> Token {
        if self.lp_token.address.is_empty() {
            Token {
                address: on_chain.to_string(),
                ..self.lp_token.clone()
            }
        } else {
            self.lp_token.clone()
        }
    }
}

/// A staking contract and the pools it distributes rewards to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FarmConfig {
    /// Protocol name, used as the prefix of response keys.
    pub name: String,
    /// Platform identifier of the chain at the price service.
    pub chain_platform: String,
    /// Staking (reward chef) contract address.
    pub chef_address: String,
    pub reward_token: Token,
    /// Pool served by the root route.
    pub default_pool: String,
    pub pools: Vec<FarmPool>,
}

impl FarmConfig {
    /// Looks up a pool by identifier.
    pub fn pool(&self, id: &str) -> Result<&FarmPool, AprError> {
        self.pools
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| AprError::UnknownPool(id.to_string()))
    }

    pub fn default_pool(&self) -> Result<&FarmPool, AprError> {
        self.pool(&self.default_pool)
    }

    /// JSON key under which the APR of `pool_id` is reported,
    /// e.g. `auroraswap_near_weth_apr`.
    #[must_use]
    pub fn response_key(&self, pool_id: &str) -> String {
        format!("{}_{}_apr", self.name, pool_id).replace('-', "_")
    }

    /// Checks addresses, pool id uniqueness and the default pool.
    pub fn validate(&self) -> Result<(), AprError> {
        check_address("chef", &self.chef_address)?;
        check_token(&self.reward_token)?;
        if self.pools.is_empty() {
            return Err(AprError::InvalidInput("farm has no pools".to_string()));
        }

        let mut seen = HashSet::new();
        for pool in &self.pools {
            if !seen.insert(pool.id.as_str()) {
                return Err(AprError::InvalidInput(format!(
                    "duplicate pool id {}",
                    pool.id
                )));
            }
            if !pool.lp_token.address.is_empty() {
                check_token(&pool.lp_token)?;
            }
            check_token(&pool.token_a)?;
            check_token(&pool.token_b)?;
        }

        self.default_pool().map(|_| ())
    }
}

fn check_token(token: &Token) -> Result<(), AprError> {
    check_address(&token.symbol, &token.address)?;
    if token.decimals > 28 {
        return Err(AprError::InvalidInput(format!(
            "{} decimals {} out of range",
            token.symbol, token.decimals
        )));
    }
    Ok(())
}

fn check_address(label: &str, address: &str) -> Result<(), AprError> {
    if address.starts_with("0x") && address.parse::<H160>().is_ok() {
        Ok(())
    } else {
        Err(AprError::InvalidInput(format!(
            "{label} address {address:?} is not a 20-byte hex address"
        )))
    }
}
