//! APR computation pipeline.

use chrono::Utc;
use farm_apr_data::PriceProvider;
use farm_apr_domain::metrics::{annualize, lp_valuation, total_staked, value_pool, weekly_reward};
use farm_apr_domain::{AprBreakdown, AprError, FarmConfig, FarmPool, ReserveAmounts};
use farm_apr_protocols::ChainReader;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Computes the APR of a farm pool from live price and chain data.
///
/// Holds only read-only collaborators; every call runs an independent,
/// strictly sequential pipeline.
#[derive(Clone)]
pub struct AprService {
    farm: Arc<FarmConfig>,
    prices: Arc<dyn PriceProvider>,
    chain: Arc<dyn ChainReader>,
}

impl AprService {
    /// Creates a new AprService.
    pub fn new(
        farm: Arc<FarmConfig>,
        prices: Arc<dyn PriceProvider>,
        chain: Arc<dyn ChainReader>,
    ) -> Self {
        Self {
            farm,
            prices,
            chain,
        }
    }

    /// Farm this service computes APRs for.
    #[must_use]
    pub fn farm(&self) -> &FarmConfig {
        &self.farm
    }

    /// APR of the farm's default pool.
    pub async fn calculate_default_apr(&self) -> Result<AprBreakdown, AprError> {
        let pool_id = self.farm.default_pool.clone();
        self.calculate_apr(&pool_id).await
    }

    /// APR of the pool identified by `pool_id`.
    ///
    /// # Errors
    /// `UnknownPool` for an unconfigured id; otherwise the first failure of
    /// any pipeline step, with no partial result.
    pub async fn calculate_apr(&self, pool_id: &str) -> Result<AprBreakdown, AprError> {
        let pool = self.farm.pool(pool_id)?;

        let started_at = Utc::now();
        let timer = Instant::now();
        info!(pool = %pool.id, started_at = %started_at.to_rfc3339(), "calculate_apr started");

        let result = self.run(pool).await;

        let finished_at = Utc::now();
        let elapsed_ms = timer.elapsed().as_millis() as u64;
        match &result {
            Ok(breakdown) => info!(
                pool = %pool.id,
                apr = %breakdown.apr,
                finished_at = %finished_at.to_rfc3339(),
                elapsed_ms,
                "calculate_apr finished"
            ),
            Err(e) => warn!(
                pool = %pool.id,
                error = %e,
                kind = e.kind(),
                elapsed_ms,
                "calculate_apr failed"
            ),
        }
        result
    }

    async fn run(&self, pool: &FarmPool) -> Result<AprBreakdown, AprError> {
        let farm = self.farm.as_ref();

        let prices = self
            .prices
            .token_prices(&pool.price_tokens(&farm.reward_token))
            .await?;
        let price_a = prices.price_of(&pool.token_a)?;
        let price_b = prices.price_of(&pool.token_b)?;
        let reward_price = prices.price_of(&farm.reward_token)?;
        debug!(%price_a, %price_b, %reward_price, "Token prices");

        let reward_per_block = self.chain.reward_per_block().await?;
        let block_number = self.chain.current_block_number().await?;
        let multiplier = self
            .chain
            .reward_multiplier(block_number, block_number.saturating_add(1))
            .await?;
        let info = self.chain.pool_info(pool.pool_index).await?;
        let lp_token = pool.lp_token_at(&info.lp_token);
        if !info.lp_token.eq_ignore_ascii_case(&lp_token.address) {
            warn!(
                pool = %pool.id,
                configured = %lp_token.address,
                on_chain = %info.lp_token,
                "Pool index points at a different LP token"
            );
        }
        let total_alloc = self.chain.total_allocation_weight().await?;
        let weekly_reward_usd = weekly_reward(
            reward_per_block,
            multiplier,
            info.alloc_weight()?,
            total_alloc,
            reward_price,
        )?;
        debug!(
            %reward_per_block,
            %multiplier,
            alloc_point = %info.alloc_point,
            %total_alloc,
            %weekly_reward_usd,
            "Weekly reward"
        );

        let reserves = ReserveAmounts::new(
            self.chain
                .token_balance_of(&pool.token_a, &lp_token.address)
                .await?,
            self.chain
                .token_balance_of(&pool.token_b, &lp_token.address)
                .await?,
        );
        let lp_value = value_pool(reserves.amount_a, price_a, reserves.amount_b, price_b)?;

        let lp_supply = self.chain.token_total_supply(&lp_token).await?;
        let lp_staked = self.chain.staked_balance(&lp_token).await?;
        let valuation = lp_valuation(lp_value, lp_supply)?;
        let staked = total_staked(&valuation, lp_staked)?;
        debug!(
            reserve_a = %reserves.amount_a,
            reserve_b = %reserves.amount_b,
            %lp_value,
            %lp_supply,
            %lp_staked,
            total_staked = %staked.total_staked_usd,
            "Staked value"
        );

        let apr = annualize(weekly_reward_usd, staked.total_staked_usd)?;

        Ok(AprBreakdown {
            pool_id: pool.id.clone(),
            apr,
            weekly_reward_usd,
            total_staked_usd: staked.total_staked_usd,
            lp_total_value_usd: valuation.total_value_usd,
            lp_price_usd: valuation.price_per_lp_usd,
            block_number,
        })
    }
}
