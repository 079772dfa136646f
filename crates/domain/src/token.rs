use crate::error::AprError;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// ERC20 token on the target chain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    #[serde(default)]
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
}

impl Token {
    pub fn new(address: impl Into<String>, symbol: impl Into<String>, decimals: u8) -> Self {
        Self {
            address: address.into(),
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Lowercased address, the form price services key their responses by.
    #[must_use]
    pub fn address_key(&self) -> String {
        self.address.to_lowercase()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.symbol, self.address)
    }
}

/// USD price of one token at query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPrice {
    pub usd: Decimal,
}

impl TokenPrice {
    /// Validates a price; it must be non-negative.
    pub fn new(usd: Decimal) -> Result<Self, AprError> {
        if usd.is_sign_negative() && !usd.is_zero() {
            return Err(AprError::InvalidInput(format!("negative price {usd}")));
        }
        Ok(Self { usd })
    }

    /// Converts a float quote as returned by JSON price APIs.
    pub fn from_f64(usd: f64) -> Result<Self, AprError> {
        if !usd.is_finite() {
            return Err(AprError::InvalidInput(format!("non-finite price {usd}")));
        }
        let value = Decimal::from_f64(usd)
            .ok_or_else(|| AprError::InvalidInput(format!("price {usd} out of range")))?;
        Self::new(value)
    }
}

/// Token address to USD price, keyed case-insensitively.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceMap {
    prices: HashMap<String, TokenPrice>,
}

impl PriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, address: &str, price: TokenPrice) {
        self.prices.insert(address.to_lowercase(), price);
    }

    /// Price of `token`, or `MissingPrice` if the service did not quote it.
    pub fn price_of(&self, token: &Token) -> Result<Decimal, AprError> {
        self.prices
            .get(&token.address_key())
            .map(|p| p.usd)
            .ok_or_else(|| AprError::MissingPrice(format!("{} ({})", token.symbol, token.address)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl FromIterator<(String, TokenPrice)> for PriceMap {
    fn from_iter<I: IntoIterator<Item = (String, TokenPrice)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (address, price) in iter {
            map.insert(&address, price);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_price_lookup_ignores_case() {
        let near = Token::new("0xC42C30aC6Cc15faC9bD938618BcaA1a1FaE8501d", "NEAR", 24);
        let mut prices = PriceMap::new();
        prices.insert(
            "0xc42c30ac6cc15fac9bd938618bcaa1a1fae8501d",
            TokenPrice::new(dec!(5)).unwrap(),
        );

        assert_eq!(prices.price_of(&near).unwrap(), dec!(5));
    }

    #[test]
    fn test_missing_price() {
        let brl = Token::new("0x12c87331f086c3C926248f964f8702C0842Fd77F", "BRL", 18);
        let prices = PriceMap::new();

        match prices.price_of(&brl) {
            Err(AprError::MissingPrice(msg)) => assert!(msg.starts_with("BRL")),
            other => panic!("expected MissingPrice, got {other:?}"),
        }
    }

    #[test]
    fn test_price_validation() {
        assert!(TokenPrice::from_f64(f64::NAN).is_err());
        assert!(TokenPrice::from_f64(f64::INFINITY).is_err());
        assert!(TokenPrice::from_f64(-1.0).is_err());
        assert_eq!(TokenPrice::from_f64(0.1).unwrap().usd, dec!(0.1));
        assert_eq!(TokenPrice::new(Decimal::ZERO).unwrap().usd, Decimal::ZERO);
    }
}
