use super::{non_negative, overflow};
use crate::error::AprError;
use rust_decimal::Decimal;

/// Blocks emitted per week at one block per second.
pub const BLOCKS_PER_WEEK: u32 = 604_800;

/// Empirical deflation applied to the weekly emission, as a divisor.
///
/// Not derivable from the chef contract's views.
pub const EMISSION_CORRECTION_DIVISOR: Decimal = Decimal::from_parts(11, 0, 0, false, 1);

pub const WEEKS_PER_YEAR: u32 = 52;

/// USD value of one week of reward emission directed to a pool.
///
/// `reward_per_block * multiplier * BLOCKS_PER_WEEK / 1.1 * pool_alloc / total_alloc * reward_price`
///
/// # Errors
/// `DivisionByZero` when the total allocation weight is zero, `InvalidInput`
/// on negative inputs or overflow.
pub fn weekly_reward(
    reward_per_block: Decimal,
    multiplier: Decimal,
    pool_alloc_weight: Decimal,
    total_alloc_weight: Decimal,
    reward_token_price: Decimal,
) -> Result<Decimal, AprError> {
    let reward_per_block = non_negative(reward_per_block, "reward per block")?;
    let multiplier = non_negative(multiplier, "multiplier")?;
    let pool_alloc_weight = non_negative(pool_alloc_weight, "pool allocation weight")?;
    let total_alloc_weight = non_negative(total_alloc_weight, "total allocation weight")?;
    let reward_token_price = non_negative(reward_token_price, "reward token price")?;
    if total_alloc_weight.is_zero() {
        return Err(AprError::DivisionByZero("total allocation weight is zero"));
    }

    let emitted = reward_per_block
        .checked_mul(multiplier)
        .and_then(|v| v.checked_mul(Decimal::from(BLOCKS_PER_WEEK)))
        .ok_or_else(|| overflow("weekly emission"))?;
    let corrected = emitted
        .checked_div(EMISSION_CORRECTION_DIVISOR)
        .ok_or_else(|| overflow("weekly emission"))?;

    corrected
        .checked_mul(pool_alloc_weight)
        .and_then(|v| v.checked_div(total_alloc_weight))
        .and_then(|v| v.checked_mul(reward_token_price))
        .ok_or_else(|| overflow("weekly reward"))
}

/// Annualizes a weekly reward against the value staked: `weekly * 52 / staked`.
///
/// # Errors
/// `DivisionByZero` when nothing is staked.
pub fn annualize(weekly_reward_usd: Decimal, total_staked_usd: Decimal) -> Result<Decimal, AprError> {
    let weekly = non_negative(weekly_reward_usd, "weekly reward")?;
    let staked = non_negative(total_staked_usd, "total staked")?;
    if staked.is_zero() {
        return Err(AprError::DivisionByZero("total staked value is zero"));
    }
    weekly
        .checked_mul(Decimal::from(WEEKS_PER_YEAR))
        .and_then(|v| v.checked_div(staked))
        .ok_or_else(|| overflow("APR"))
}
