//! Auroraswap reward chef adapter.
//!
//! This module reads the BRL chef contract and pool token balances:
//! - Reward emission rate and multiplier
//! - Pool configuration and allocation weights
//! - ERC20 balances and supplies over RPC or the explorer

/// Contract bindings.
pub mod abi;
/// `ChainReader` implementation.
pub mod reader;

pub use reader::{AuroraswapReader, BalanceSource};
