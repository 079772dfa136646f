//! Fake collaborators for pipeline and router tests.

use async_trait::async_trait;
use farm_apr_data::PriceProvider;
use farm_apr_domain::{
    AprError, FarmConfig, FarmPool, PoolInfo, PriceMap, Token, TokenPrice, U256,
};
use farm_apr_protocols::ChainReader;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

pub const CHEF: &str = "0x35CC71888DBb9FfB777337324a4A60fdBAA19DDE";
pub const LP: &str = "0x0000000000000000000000000000000000000abc";

pub fn farm() -> FarmConfig {
    FarmConfig {
        name: "auroraswap".to_string(),
        chain_platform: "aurora".to_string(),
        chef_address: CHEF.to_string(),
        reward_token: Token::new("0x12c87331f086c3C926248f964f8702C0842Fd77F", "BRL", 18),
        default_pool: "near-weth".to_string(),
        pools: vec![FarmPool {
            id: "near-weth".to_string(),
            pool_index: 1,
            lp_token: Token::new(LP, "NEAR-WETH", 18),
            token_a: Token::new("0xC42C30aC6Cc15faC9bD938618BcaA1a1FaE8501d", "NEAR", 24),
            token_b: Token::new("0xC9BdeEd33CD01541e1eeD10f90519d2C06Fe3feB", "WETH", 18),
        }],
    }
}

/// Price service quoting tokens by symbol.
pub struct FakePrices {
    prices: HashMap<String, Decimal>,
    unavailable: bool,
}

impl FakePrices {
    pub fn reference() -> Self {
        let prices = [("NEAR", dec!(5.00)), ("WETH", dec!(3000.00)), ("BRL", dec!(0.10))]
            .into_iter()
            .map(|(symbol, price)| (symbol.to_string(), price))
            .collect();
        Self {
            prices,
            unavailable: false,
        }
    }

    pub fn unavailable() -> Self {
        Self {
            prices: HashMap::new(),
            unavailable: true,
        }
    }

    pub fn without(mut self, symbol: &str) -> Self {
        self.prices.remove(symbol);
        self
    }
}

#[async_trait]
impl PriceProvider for FakePrices {
    async fn token_prices(&self, tokens: &[Token]) -> Result<PriceMap, AprError> {
        if self.unavailable {
            return Err(AprError::UpstreamUnavailable("HTTP 503".to_string()));
        }
        let mut map = PriceMap::new();
        for token in tokens {
            let usd = self
                .prices
                .get(&token.symbol)
                .ok_or_else(|| AprError::MissingPrice(format!("{} ({})", token.symbol, token.address)))?;
            map.insert(&token.address, TokenPrice::new(*usd)?);
        }
        Ok(map)
    }
}

/// Chain state of a single NEAR-WETH pool.
#[derive(Clone)]
pub struct FakeChain {
    pub block_number: u64,
    pub reward_per_block: Decimal,
    pub multiplier: Decimal,
    pub alloc_point: u64,
    pub total_alloc: Decimal,
    pub reserve_a: Decimal,
    pub reserve_b: Decimal,
    pub lp_supply: Decimal,
    pub lp_staked: Decimal,
    pub fail_pool_info: bool,
    pub multiplier_calls: Arc<Mutex<Vec<(u64, u64)>>>,
}

impl FakeChain {
    pub fn reference() -> Self {
        Self {
            block_number: 70_000_000,
            reward_per_block: dec!(2.0),
            multiplier: dec!(1),
            alloc_point: 100,
            total_alloc: dec!(1000),
            reserve_a: dec!(1000),
            reserve_b: dec!(2),
            lp_supply: dec!(10),
            lp_staked: dec!(5),
            fail_pool_info: false,
            multiplier_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl ChainReader for FakeChain {
    async fn current_block_number(&self) -> Result<u64, AprError> {
        Ok(self.block_number)
    }

    async fn reward_per_block(&self) -> Result<Decimal, AprError> {
        Ok(self.reward_per_block)
    }

    async fn reward_multiplier(&self, from_block: u64, to_block: u64) -> Result<Decimal, AprError> {
        self.multiplier_calls
            .lock()
            .unwrap()
            .push((from_block, to_block));
        Ok(self.multiplier)
    }

    async fn pool_info(&self, pool_index: u64) -> Result<PoolInfo, AprError> {
        if self.fail_pool_info {
            return Err(AprError::ChainRead("poolInfo: connection reset".to_string()));
        }
        assert_eq!(pool_index, 1);
        Ok(PoolInfo {
            lp_token: LP.to_string(),
            alloc_point: U256::from(self.alloc_point),
            last_reward_block: U256::from(self.block_number - 10),
            acc_reward_per_share: U256::zero(),
            deposit_fee_bp: 0,
        })
    }

    async fn total_allocation_weight(&self) -> Result<Decimal, AprError> {
        Ok(self.total_alloc)
    }

    async fn token_balance_of(&self, token: &Token, holder: &str) -> Result<Decimal, AprError> {
        match (token.symbol.as_str(), holder) {
            ("NEAR", LP) => Ok(self.reserve_a),
            ("WETH", LP) => Ok(self.reserve_b),
            _ => Err(AprError::ChainRead(format!(
                "unexpected balance query {} of {holder}",
                token.symbol
            ))),
        }
    }

    async fn staked_balance(&self, lp_token: &Token) -> Result<Decimal, AprError> {
        assert_eq!(lp_token.address, LP);
        Ok(self.lp_staked)
    }

    async fn token_total_supply(&self, token: &Token) -> Result<Decimal, AprError> {
        assert_eq!(token.symbol, "NEAR-WETH");
        Ok(self.lp_supply)
    }
}
