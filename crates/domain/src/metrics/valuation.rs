use super::{LpValuation, StakedValue, non_negative, overflow};
use crate::error::AprError;
use rust_decimal::Decimal;

/// Total USD value of an LP contract's two reserves:
/// `reserve_a * price_a + reserve_b * price_b`.
pub fn value_pool(
    reserve_a: Decimal,
    price_a: Decimal,
    reserve_b: Decimal,
    price_b: Decimal,
) -> Result<Decimal, AprError> {
    let value_a = non_negative(reserve_a, "reserve A")?
        .checked_mul(non_negative(price_a, "price A")?)
        .ok_or_else(|| overflow("reserve A value"))?;
    let value_b = non_negative(reserve_b, "reserve B")?
        .checked_mul(non_negative(price_b, "price B")?)
        .ok_or_else(|| overflow("reserve B value"))?;
    value_a
        .checked_add(value_b)
        .ok_or_else(|| overflow("LP value"))
}

/// Price of one LP token given the value of the whole supply.
///
/// # Errors
/// `DivisionByZero` when the LP token has no supply.
pub fn lp_valuation(total_value: Decimal, lp_total_supply: Decimal) -> Result<LpValuation, AprError> {
    let total_value = non_negative(total_value, "LP value")?;
    let supply = non_negative(lp_total_supply, "LP total supply")?;
    if supply.is_zero() {
        return Err(AprError::DivisionByZero("LP total supply is zero"));
    }
    let price = total_value
        .checked_div(supply)
        .ok_or_else(|| overflow("LP price"))?;
    Ok(LpValuation {
        total_value_usd: total_value,
        price_per_lp_usd: price,
    })
}

/// USD value of the LP tokens staked in a pool: `lp_staked * price_per_lp`.
pub fn total_staked(valuation: &LpValuation, lp_staked: Decimal) -> Result<StakedValue, AprError> {
    let staked = non_negative(lp_staked, "staked LP amount")?
        .checked_mul(valuation.price_per_lp_usd)
        .ok_or_else(|| overflow("staked value"))?;
    Ok(StakedValue {
        total_staked_usd: staked,
    })
}
