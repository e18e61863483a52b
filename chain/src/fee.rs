use async_trait::async_trait;

use coinbridge_types::{Coin, FeeRate};

use crate::error::FeeQueryError;

/// Shared fee-estimation service, queried per coin.
#[async_trait]
pub trait FeeRateClient: Send + Sync {
    async fn fee_rate(&self, coin: Coin) -> Result<FeeRate, FeeQueryError>;
}
