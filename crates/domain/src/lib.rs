//! Core types and arithmetic for farm APR computation.
//!
//! This crate holds everything that does not touch the network:
//! - Token, price and pool state types
//! - Raw on-chain integer to human unit conversion
//! - The farm registry used to look up pools by identifier
//! - LP valuation, staked value aggregation and APR arithmetic

/// Error types.
pub mod error;
/// Farm registry.
pub mod farm;
/// Valuation and APR calculators.
pub mod metrics;
/// Staking pool state.
pub mod pool;
/// Tokens and prices.
pub mod token;
/// Value objects.
pub mod value_objects;

pub use error::AprError;
pub use farm::{FarmConfig, FarmPool};
pub use metrics::{AprBreakdown, AprResult, LpValuation, StakedValue};
pub use pool::{PoolInfo, ReserveAmounts};
pub use token::{PriceMap, Token, TokenPrice};
pub use value_objects::amount::Amount;

pub use primitive_types::U256;
