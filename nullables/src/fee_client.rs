//! Nullable fee-rate client with fixed rates and no network.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use coinbridge_chain::{FeeQueryError, FeeRateClient};
use coinbridge_types::{Coin, FeeRate};

/// A deterministic fee-estimation client for testing.
///
/// Coins without a configured rate report [`FeeQueryError::Unsupported`].
pub struct NullFeeRateClient {
    rates: Mutex<HashMap<Coin, FeeRate>>,
    failures: Mutex<HashMap<Coin, String>>,
    queries: Mutex<Vec<Coin>>,
}

impl NullFeeRateClient {
    pub fn new() -> Self {
        Self {
            rates: Mutex::new(HashMap::new()),
            failures: Mutex::new(HashMap::new()),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn with_rate(self, coin: Coin, rate: u64) -> Self {
        self.set_rate(coin, rate);
        self
    }

    pub fn set_rate(&self, coin: Coin, rate: u64) {
        self.rates.lock().unwrap().insert(coin, FeeRate::new(rate));
    }

    /// Make queries for `coin` fail with a network error.
    pub fn fail(&self, coin: Coin, message: impl Into<String>) {
        self.failures.lock().unwrap().insert(coin, message.into());
    }

    /// Coins queried so far, in order.
    pub fn queries(&self) -> Vec<Coin> {
        self.queries.lock().unwrap().clone()
    }
}

impl Default for NullFeeRateClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FeeRateClient for NullFeeRateClient {
    async fn fee_rate(&self, coin: Coin) -> Result<FeeRate, FeeQueryError> {
        self.queries.lock().unwrap().push(coin);
        if let Some(message) = self.failures.lock().unwrap().get(&coin) {
            return Err(FeeQueryError::Network(message.clone()));
        }
        self.rates
            .lock()
            .unwrap()
            .get(&coin)
            .copied()
            .ok_or(FeeQueryError::Unsupported(coin))
    }
}
