//! Valuation and APR calculators.
//!
//! All functions are pure: they take decimal inputs already converted to
//! human units and fail instead of producing a non-finite or negative result.

pub mod apr;
pub mod valuation;

pub use apr::{
    BLOCKS_PER_WEEK, EMISSION_CORRECTION_DIVISOR, WEEKS_PER_YEAR, annualize, weekly_reward,
};
pub use valuation::{lp_valuation, total_staked, value_pool};

use crate::error::AprError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// USD value of the LP contract holdings and of one LP token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LpValuation {
    pub total_value_usd: Decimal,
    pub price_per_lp_usd: Decimal,
}

/// USD value currently staked in a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakedValue {
    pub total_staked_usd: Decimal,
}

/// Final output of the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AprResult {
    pub pool_id: String,
    /// Decimal ratio, 0.42 = 42%.
    pub apr: Decimal,
}

/// APR together with the intermediate figures it was derived from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AprBreakdown {
    pub pool_id: String,
    pub apr: Decimal,
    pub weekly_reward_usd: Decimal,
    pub total_staked_usd: Decimal,
    pub lp_total_value_usd: Decimal,
    pub lp_price_usd: Decimal,
    pub block_number: u64,
}

impl From<&AprBreakdown> for AprResult {
    fn from(b: &AprBreakdown) -> Self {
        Self {
            pool_id: b.pool_id.clone(),
            apr: b.apr,
        }
    }
}

pub(crate) fn non_negative(value: Decimal, what: &str) -> Result<Decimal, AprError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(AprError::InvalidInput(format!("{what} is negative: {value}")));
    }
    Ok(value)
}

pub(crate) fn overflow(what: &str) -> AprError {
    AprError::InvalidInput(format!("{what} overflows"))
}
