//! Nullable infrastructure for deterministic testing.
//!
//! The chain client and the fee-estimation service are abstracted behind
//! the traits in `coinbridge-chain`. This crate provides test-friendly
//! implementations that:
//! - Return scripted values
//! - Fire listener callbacks only when told to
//! - Never touch the filesystem or network
//!
//! Usage: swap real clients for nullables in tests.

pub mod chain_client;
pub mod fee_client;

pub use chain_client::{sample_transaction, ClientCall, NullChainClient};
pub use fee_client::NullFeeRateClient;
