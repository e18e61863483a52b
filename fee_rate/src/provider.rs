//! Per-coin fee-rate façade.

use std::sync::Arc;

use coinbridge_chain::{FeeQueryError, FeeRateClient};
use coinbridge_types::{Coin, FeeRate, FeeRatePriority};
use tracing::{debug, warn};

/// Bounds of the custom Bitcoin tier, in sat/byte.
pub const BITCOIN_CUSTOM_RANGE: std::ops::RangeInclusive<u64> = 1..=200;

/// Priority tiers a coin declares, if any.
///
/// `None` and an empty list both mean "use the default list".
pub fn declared_priorities(coin: Coin) -> Option<Vec<FeeRatePriority>> {
    use FeeRatePriority::*;

    match coin {
        Coin::Bitcoin => Some(vec![
            Low,
            Medium,
            High,
            Custom {
                value: 1,
                range: BITCOIN_CUSTOM_RANGE,
            },
        ]),
        Coin::Ethereum => Some(vec![Medium, High]),
        Coin::Dash => Some(Vec::new()),
        Coin::BitcoinCash | Coin::Litecoin => None,
    }
}

/// Fee rates and priority tiers for one coin.
///
/// Wraps the shared fee-estimation client; every query goes to the client,
/// nothing is cached.
pub struct FeeRateProvider {
    coin: Coin,
    client: Arc<dyn FeeRateClient>,
}

impl FeeRateProvider {
    pub fn new(coin: Coin, client: Arc<dyn FeeRateClient>) -> Self {
        Self { coin, client }
    }

    pub fn coin(&self) -> Coin {
        self.coin
    }

    pub async fn current_fee_rate(&self) -> Result<FeeRate, FeeQueryError> {
        self.client
            .fee_rate(self.coin)
            .await
            .inspect(|rate| debug!(coin = %self.coin, %rate, "fee rate fetched"))
            .inspect_err(|e| warn!(coin = %self.coin, error = %e, "fee rate query failed"))
    }

    /// Selectable tiers, in display order. Never empty.
    pub fn priority_list(&self) -> Vec<FeeRatePriority> {
        declared_priorities(self.coin)
            .filter(|list| !list.is_empty())
            .unwrap_or_else(FeeRatePriority::default_list)
    }

    pub fn default_priority(&self) -> FeeRatePriority {
        FeeRatePriority::Medium
    }
}

impl std::fmt::Debug for FeeRateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeeRateProvider")
            .field("coin", &self.coin)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinbridge_nullables::NullFeeRateClient;

    fn provider(coin: Coin) -> FeeRateProvider {
        FeeRateProvider::new(coin, Arc::new(NullFeeRateClient::new()))
    }

    #[test]
    fn bitcoin_offers_custom_tier() {
        let list = provider(Coin::Bitcoin).priority_list();
        assert_eq!(list.len(), 4);
        assert_eq!(
            list[3],
            FeeRatePriority::Custom {
                value: 1,
                range: 1..=200
            }
        );
    }

    #[test]
    fn ethereum_offers_medium_and_high() {
        assert_eq!(
            provider(Coin::Ethereum).priority_list(),
            vec![FeeRatePriority::Medium, FeeRatePriority::High]
        );
    }

    #[test]
    fn undeclared_and_empty_lists_fall_back() {
        for coin in [Coin::Litecoin, Coin::BitcoinCash, Coin::Dash] {
            assert_eq!(
                provider(coin).priority_list(),
                FeeRatePriority::default_list(),
                "{coin}"
            );
        }
    }

    #[test]
    fn every_list_contains_the_default() {
        for coin in Coin::ALL {
            let p = provider(coin);
            let list = p.priority_list();
            assert!(!list.is_empty());
            assert!(list.contains(&p.default_priority()), "{coin}");
        }
    }

    #[tokio::test]
    async fn current_rate_comes_from_client_for_own_coin() {
        let client = Arc::new(NullFeeRateClient::new().with_rate(Coin::Litecoin, 4));
        let p = FeeRateProvider::new(Coin::Litecoin, client.clone());
        assert_eq!(p.current_fee_rate().await.unwrap(), FeeRate::new(4));
        assert_eq!(client.queries(), vec![Coin::Litecoin]);
    }
}
