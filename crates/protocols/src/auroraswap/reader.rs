use super::abi::{BrlChef, Erc20};
use crate::ChainReader;
use crate::explorer::ExplorerClient;
use async_trait::async_trait;
use ethers::providers::Middleware;
use ethers::types::{Address, U256};
use farm_apr_domain::pool::u256_to_decimal;
use farm_apr_domain::{Amount, AprError, PoolInfo, Token};
use rust_decimal::Decimal;
use std::fmt::Display;
use std::sync::Arc;
use tracing::debug;

/// Where ERC20 balances and supplies are read from.
#[derive(Debug, Clone)]
pub enum BalanceSource {
    /// `balanceOf` / `totalSupply` view calls over RPC.
    Rpc,
    /// Block explorer `tokenbalance` / `tokensupply` actions for every read.
    Explorer(ExplorerClient),
    /// Reserves over RPC; LP supply and staked LP from the explorer.
    LpExplorer(ExplorerClient),
}

impl BalanceSource {
    fn for_reserves(&self) -> Option<&ExplorerClient> {
        match self {
            Self::Explorer(explorer) => Some(explorer),
            Self::Rpc | Self::LpExplorer(_) => None,
        }
    }

    fn for_lp(&self) -> Option<&ExplorerClient> {
        match self {
            Self::Explorer(explorer) | Self::LpExplorer(explorer) => Some(explorer),
            Self::Rpc => None,
        }
    }
}

/// Reads the BRL chef contract and token balances on Aurora.
#[derive(Debug, Clone)]
pub struct AuroraswapReader<M> {
    provider: Arc<M>,
    chef: BrlChef<M>,
    chef_address: String,
    reward_token: Token,
    balances: BalanceSource,
}

impl<M: Middleware + 'static> AuroraswapReader<M> {
    /// Creates a reader for the chef at `chef_address` emitting `reward_token`.
    ///
    /// # Errors
    /// `InvalidInput` if the chef address does not parse.
    pub fn new(
        provider: Arc<M>,
        chef_address: &str,
        reward_token: Token,
        balances: BalanceSource,
    ) -> Result<Self, AprError> {
        let chef = BrlChef::new(parse_address(chef_address)?, provider.clone());
        Ok(Self {
            provider,
            chef,
            chef_address: chef_address.to_string(),
            reward_token,
            balances,
        })
    }

    fn erc20(&self, token: &Token) -> Result<Erc20<M>, AprError> {
        Ok(Erc20::new(parse_address(&token.address)?, self.provider.clone()))
    }

    async fn rpc_balance_of(&self, token: &Token, holder: &str) -> Result<Decimal, AprError> {
        let raw = self
            .erc20(token)?
            .balance_of(parse_address(holder)?)
            .call()
            .await
            .map_err(|e| read_error("balanceOf", e))?;
        to_units(raw, token.decimals, "balanceOf")
    }
}

#[async_trait]
impl<M: Middleware + 'static> ChainReader for AuroraswapReader<M> {
    async fn current_block_number(&self) -> Result<u64, AprError> {
        let block = self
            .provider
            .get_block_number()
            .await
            .map_err(|e| read_error("blockNumber", e))?;
        Ok(block.as_u64())
    }

    async fn reward_per_block(&self) -> Result<Decimal, AprError> {
        let raw = self
            .chef
            .brl_per_block()
            .call()
            .await
            .map_err(|e| read_error("BRLPerBlock", e))?;
        to_units(raw, self.reward_token.decimals, "BRLPerBlock")
    }

    async fn reward_multiplier(&self, from_block: u64, to_block: u64) -> Result<Decimal, AprError> {
        let raw = self
            .chef
            .get_multiplier(U256::from(from_block), U256::from(to_block))
            .call()
            .await
            .map_err(|e| read_error("getMultiplier", e))?;
        u256_to_decimal(raw, "multiplier").map_err(|e| read_error("getMultiplier", e))
    }

    async fn pool_info(&self, pool_index: u64) -> Result<PoolInfo, AprError> {
        let fields = self
            .chef
            .pool_info(U256::from(pool_index))
            .call()
            .await
            .map_err(|e| read_error("poolInfo", e))?;
        let info = to_pool_info(fields);
        debug!(pool_index, lp_token = %info.lp_token, alloc_point = %info.alloc_point, "Read pool info");
        Ok(info)
    }

    async fn total_allocation_weight(&self) -> Result<Decimal, AprError> {
        let raw = self
            .chef
            .total_alloc_point()
            .call()
            .await
            .map_err(|e| read_error("totalAllocPoint", e))?;
        u256_to_decimal(raw, "total alloc point").map_err(|e| read_error("totalAllocPoint", e))
    }

    async fn token_balance_of(&self, token: &Token, holder: &str) -> Result<Decimal, AprError> {
        match self.balances.for_reserves() {
            Some(explorer) => explorer.token_balance(token, holder).await,
            None => self.rpc_balance_of(token, holder).await,
        }
    }

    async fn staked_balance(&self, lp_token: &Token) -> Result<Decimal, AprError> {
        match self.balances.for_lp() {
            Some(explorer) => explorer.token_balance(lp_token, &self.chef_address).await,
            None => self.rpc_balance_of(lp_token, &self.chef_address).await,
        }
    }

    async fn token_total_supply(&self, token: &Token) -> Result<Decimal, AprError> {
        match self.balances.for_lp() {
            Some(explorer) => explorer.token_supply(token).await,
            None => {
                let raw = self
                    .erc20(token)?
                    .total_supply()
                    .call()
                    .await
                    .map_err(|e| read_error("totalSupply", e))?;
                to_units(raw, token.decimals, "totalSupply")
            }
        }
    }
}

/// Maps the `poolInfo` return tuple onto [`PoolInfo`].
fn to_pool_info(fields: (Address, U256, U256, U256, u16)) -> PoolInfo {
    let (lp_token, alloc_point, last_reward_block, acc_reward_per_share, deposit_fee_bp) = fields;
    PoolInfo {
        lp_token: format!("{lp_token:?}"),
        alloc_point,
        last_reward_block,
        acc_reward_per_share,
        deposit_fee_bp,
    }
}

/// Raw contract integer in human units; an unrepresentable value is a read failure.
fn to_units(raw: U256, decimals: u8, call: &str) -> Result<Decimal, AprError> {
    Amount::new(raw, decimals)
        .to_decimal()
        .map_err(|e| read_error(call, e))
}

fn parse_address(address: &str) -> Result<Address, AprError> {
    address
        .parse::<Address>()
        .map_err(|e| AprError::InvalidInput(format!("address {address:?}: {e}")))
}

fn read_error(call: &str, err: impl Display) -> AprError {
    AprError::ChainRead(format!("{call}: {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rpc::http_provider;
    use ethers::abi::{Token as AbiToken, encode};
    use ethers::providers::{MockProvider, Provider};
    use ethers::types::{Bytes, U64};
    use rust_decimal_macros::dec;
    use std::time::Duration;

    const CHEF: &str = "0x35CC71888DBb9FfB777337324a4A60fdBAA19DDE";
    const LP: &str = "0x0000000000000000000000000000000000000abc";

    fn brl() -> Token {
        Token::new("0x12c87331f086c3C926248f964f8702C0842Fd77F", "BRL", 18)
    }

    fn near() -> Token {
        Token::new("0xC42C30aC6Cc15faC9bD938618BcaA1a1FaE8501d", "NEAR", 24)
    }

    fn lp() -> Token {
        Token::new(LP, "NEAR-WETH", 18)
    }

    fn mocked(balances: BalanceSource) -> (AuroraswapReader<Provider<MockProvider>>, MockProvider) {
        let (provider, mock) = Provider::mocked();
        let reader = AuroraswapReader::new(Arc::new(provider), CHEF, brl(), balances).unwrap();
        (reader, mock)
    }

    /// Queues one `eth_call` reply carrying the ABI-encoded `words`.
    fn reply(mock: &MockProvider, words: Vec<AbiToken>) {
        mock.push::<Bytes, _>(Bytes::from(encode(&words))).unwrap();
    }

    fn uint(value: u128) -> AbiToken {
        AbiToken::Uint(U256::from(value))
    }

    #[tokio::test]
    async fn test_reward_per_block_uses_reward_decimals() {
        let (reader, mock) = mocked(BalanceSource::Rpc);
        reply(&mock, vec![uint(2_500_000_000_000_000_000)]);

        assert_eq!(reader.reward_per_block().await.unwrap(), dec!(2.5));
    }

    #[tokio::test]
    async fn test_balance_uses_token_decimals() {
        let (reader, mock) = mocked(BalanceSource::Rpc);
        reply(&mock, vec![uint(2_500_000_000_000_000_000)]);
        assert_eq!(
            reader.token_balance_of(&near(), LP).await.unwrap(),
            dec!(0.0000025)
        );

        reply(&mock, vec![uint(10_000_000_000_000_000_000)]);
        assert_eq!(reader.token_total_supply(&lp()).await.unwrap(), dec!(10));

        reply(&mock, vec![uint(5_000_000_000_000_000_000)]);
        assert_eq!(reader.staked_balance(&lp()).await.unwrap(), dec!(5));
    }

    #[tokio::test]
    async fn test_chef_views() {
        let (reader, mock) = mocked(BalanceSource::Rpc);

        mock.push::<U64, _>(U64::from(70_000_000u64)).unwrap();
        assert_eq!(reader.current_block_number().await.unwrap(), 70_000_000);

        reply(&mock, vec![uint(1)]);
        assert_eq!(
            reader.reward_multiplier(70_000_000, 70_000_001).await.unwrap(),
            Decimal::ONE
        );

        reply(&mock, vec![uint(1000)]);
        assert_eq!(reader.total_allocation_weight().await.unwrap(), dec!(1000));

        reply(
            &mock,
            vec![
                AbiToken::Address(parse_address(LP).unwrap()),
                uint(100),
                uint(61_000_000),
                uint(12345),
                uint(50),
            ],
        );
        let info = reader.pool_info(1).await.unwrap();
        assert_eq!(info.lp_token, LP);
        assert_eq!(info.alloc_weight().unwrap(), dec!(100));
        assert_eq!(info.last_reward_block, U256::from(61_000_000u64));
        assert_eq!(info.acc_reward_per_share, U256::from(12345u64));
        assert_eq!(info.deposit_fee_bp, 50);
    }

    #[tokio::test]
    async fn test_empty_reply_is_read_error() {
        let (reader, mock) = mocked(BalanceSource::Rpc);
        mock.push::<Bytes, _>(Bytes::default()).unwrap();

        assert!(matches!(
            reader.reward_per_block().await,
            Err(AprError::ChainRead(_))
        ));
    }

    #[tokio::test]
    async fn test_unrepresentable_balance_is_read_error() {
        let (reader, mock) = mocked(BalanceSource::Rpc);
        reply(&mock, vec![AbiToken::Uint(U256::MAX)]);

        match reader.token_balance_of(&lp(), CHEF).await {
            Err(AprError::ChainRead(msg)) => assert!(msg.starts_with("balanceOf"), "{msg}"),
            other => panic!("expected ChainRead, got {other:?}"),
        }

        reply(&mock, vec![AbiToken::Uint(U256::MAX)]);
        assert!(matches!(
            reader.total_allocation_weight().await,
            Err(AprError::ChainRead(_))
        ));
    }

    #[tokio::test]
    async fn test_lp_explorer_keeps_reserves_on_rpc() {
        let explorer =
            ExplorerClient::new("http://127.0.0.1:1/api", "key", Duration::from_secs(2)).unwrap();
        let (reader, mock) = mocked(BalanceSource::LpExplorer(explorer));

        reply(&mock, vec![uint(1_000_000_000_000_000_000_000_000_000)]);
        assert_eq!(reader.token_balance_of(&near(), LP).await.unwrap(), dec!(1000));

        for result in [
            reader.token_total_supply(&lp()).await,
            reader.staked_balance(&lp()).await,
        ] {
            match result {
                Err(AprError::ChainRead(msg)) => assert!(msg.starts_with("explorer"), "{msg}"),
                other => panic!("expected explorer failure, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_balance_source_routing() {
        let explorer = ExplorerClient::new("http://127.0.0.1:1/api", "key", Duration::from_secs(1))
            .unwrap();

        assert!(BalanceSource::Rpc.for_reserves().is_none());
        assert!(BalanceSource::Rpc.for_lp().is_none());
        assert!(BalanceSource::Explorer(explorer.clone()).for_reserves().is_some());
        assert!(BalanceSource::Explorer(explorer.clone()).for_lp().is_some());
        assert!(BalanceSource::LpExplorer(explorer.clone()).for_reserves().is_none());
        assert!(BalanceSource::LpExplorer(explorer).for_lp().is_some());
    }

    #[test]
    fn test_to_pool_info() {
        let lp = parse_address("0x0000000000000000000000000000000000000abc").unwrap();
        let info = to_pool_info((
            lp,
            U256::from(100u64),
            U256::from(61_000_000u64),
            U256::from(12345u64),
            50,
        ));

        assert_eq!(info.lp_token, "0x0000000000000000000000000000000000000abc");
        assert_eq!(info.alloc_point, U256::from(100u64));
        assert_eq!(info.deposit_fee_bp, 50);
    }

    #[test]
    fn test_invalid_chef_address() {
        let provider = http_provider("http://127.0.0.1:1", Duration::from_secs(1)).unwrap();
        let reader = AuroraswapReader::new(provider, "0xnope", brl(), BalanceSource::Rpc);
        assert!(matches!(reader, Err(AprError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_unreachable_rpc() {
        let provider = http_provider("http://127.0.0.1:1", Duration::from_secs(2)).unwrap();
        let reader = AuroraswapReader::new(provider, CHEF, brl(), BalanceSource::Rpc).unwrap();

        assert!(matches!(
            reader.current_block_number().await,
            Err(AprError::ChainRead(_))
        ));
        assert!(matches!(
            reader.reward_per_block().await,
            Err(AprError::ChainRead(_))
        ));
        assert!(matches!(
            reader.token_total_supply(&brl()).await,
            Err(AprError::ChainRead(_))
        ));
    }
}
