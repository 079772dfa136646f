use crate::error::AprError;
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// On-chain configuration of one staking pool, as returned by the reward
/// chef's `poolInfo(index)` view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolInfo {
    /// Address of the staked (LP) token.
    pub lp_token: String,
    /// Allocation weight of this pool.
    pub alloc_point: U256,
    pub last_reward_block: U256,
    /// Accumulated reward per share, scaled by the chef's precision factor.
    pub acc_reward_per_share: U256,
    pub deposit_fee_bp: u16,
}

impl PoolInfo {
    /// Allocation weight as a decimal for the APR arithmetic.
    pub fn alloc_weight(&self) -> Result<Decimal, AprError> {
        u256_to_decimal(self.alloc_point, "alloc point")
    }
}

/// Quantities of the two underlying tokens held by the LP contract, in human units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveAmounts {
    pub amount_a: Decimal,
    pub amount_b: Decimal,
}

impl ReserveAmounts {
    pub fn new(amount_a: Decimal, amount_b: Decimal) -> Self {
        Self { amount_a, amount_b }
    }
}

/// Converts an unscaled on-chain integer (weights, multipliers) to a decimal.
pub fn u256_to_decimal(value: U256, what: &str) -> Result<Decimal, AprError> {
    if value > U256::from(u128::MAX) {
        return Err(AprError::InvalidInput(format!("{what} {value} too large")));
    }
    i128::try_from(value.as_u128())
        .ok()
        .and_then(|v| Decimal::try_from_i128_with_scale(v, 0).ok())
        .ok_or_else(|| AprError::InvalidInput(format!("{what} {value} too large")))
}
