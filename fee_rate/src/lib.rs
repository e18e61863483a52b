//! Fee-rate providers for coinbridge.
//!
//! One [`FeeRateProvider`] per coin wraps a shared fee-estimation client
//! (any [`FeeRateClient`]) and exposes the current rate plus the coin's
//! selectable priority tiers. [`HttpFeeRateClient`] is the production
//! client.

pub mod config;
pub mod http;
pub mod provider;

pub use coinbridge_chain::{FeeQueryError, FeeRateClient};
pub use config::{FallbackRates, FeeProviderConfig};
pub use http::HttpFeeRateClient;
pub use provider::{declared_priorities, FeeRateProvider};
