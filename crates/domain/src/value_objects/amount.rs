use crate::error::AprError;
use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Largest exponent a `Decimal` scale can carry.
const MAX_DECIMALS: u8 = 28;

/// Raw on-chain integer amount together with its token's decimal exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount {
    pub raw: U256,
    pub decimals: u8,
}

impl Amount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Parses a base-10 raw integer string, as returned by block explorer APIs.
    pub fn from_dec_str(raw: &str, decimals: u8) -> Result<Self, AprError> {
        let raw = U256::from_dec_str(raw.trim())
            .map_err(|e| AprError::InvalidInput(format!("raw amount {raw:?}: {e:?}")))?;
        Ok(Self::new(raw, decimals))
    }

    /// Human units: `raw / 10^decimals`.
    ///
    /// The integer and fractional parts are split in `U256` first so that
    /// amounts whose raw value exceeds 96 bits still convert.
    pub fn to_decimal(&self) -> Result<Decimal, AprError> {
        if self.decimals > MAX_DECIMALS {
            return Err(AprError::InvalidInput(format!(
                "decimal exponent {} exceeds {MAX_DECIMALS}",
                self.decimals
            )));
        }
        let divisor = U256::exp10(self.decimals as usize);
        let whole = self.raw / divisor;
        let frac = self.raw % divisor;

        let whole = u128_from(whole).and_then(|w| i128::try_from(w).ok());
        let whole = whole
            .and_then(|w| Decimal::try_from_i128_with_scale(w, 0).ok())
            .ok_or_else(|| AprError::InvalidInput(format!("amount {} too large", self.raw)))?;
        // frac < 10^decimals <= 10^28, always within the 96-bit mantissa
        let frac = Decimal::try_from_i128_with_scale(frac.as_u128() as i128, self.decimals as u32)
            .map_err(|e| AprError::InvalidInput(format!("amount {}: {e}", self.raw)))?;

        whole
            .checked_add(frac)
            .ok_or_else(|| AprError::InvalidInput(format!("amount {} too large", self.raw)))
    }
}

fn u128_from(value: U256) -> Option<u128> {
    if value > U256::from(u128::MAX) {
        None
    } else {
        Some(value.as_u128())
    }
}
