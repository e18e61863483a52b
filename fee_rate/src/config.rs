//! Fee-estimation endpoints and static fallback rates.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use coinbridge_types::{Coin, ConfigError, FeeRate};

/// Where the HTTP fee client fetches live rates from.
///
/// Every endpoint is optional. A coin whose endpoint is missing, or that
/// has no live source at all, is answered from [`FallbackRates`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeProviderConfig {
    /// Infura project id; enables live Ethereum gas prices.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infura_project_id: Option<String>,

    /// Infura project secret, sent as the basic-auth password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub infura_project_secret: Option<String>,

    /// Bitcoin Core JSON-RPC URL; enables live Bitcoin fee rates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub btc_core_rpc_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub btc_core_rpc_user: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub btc_core_rpc_password: Option<String>,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    #[serde(default)]
    pub fallback: FallbackRates,
}

/// Static per-coin rates: sat/byte for the Bitcoin family, wei for Ethereum.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FallbackRates {
    #[serde(default = "default_bitcoin_rate")]
    pub bitcoin: u64,

    #[serde(default = "default_bitcoin_cash_rate")]
    pub bitcoin_cash: u64,

    #[serde(default = "default_litecoin_rate")]
    pub litecoin: u64,

    #[serde(default = "default_dash_rate")]
    pub dash: u64,

    #[serde(default = "default_ethereum_rate")]
    pub ethereum: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_bitcoin_rate() -> u64 {
    20
}

fn default_bitcoin_cash_rate() -> u64 {
    3
}

fn default_litecoin_rate() -> u64 {
    2
}

fn default_dash_rate() -> u64 {
    1
}

fn default_ethereum_rate() -> u64 {
    // 20 gwei
    20_000_000_000
}

// ── Impl ───────────────────────────────────────────────────────────────

impl FeeProviderConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Infura mainnet endpoint, when a project id is configured.
    pub fn infura_url(&self) -> Option<String> {
        self.infura_project_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .map(|id| format!("https://mainnet.infura.io/v3/{id}"))
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}

impl Default for FeeProviderConfig {
    fn default() -> Self {
        Self {
            infura_project_id: None,
            infura_project_secret: None,
            btc_core_rpc_url: None,
            btc_core_rpc_user: None,
            btc_core_rpc_password: None,
            request_timeout_secs: default_request_timeout_secs(),
            fallback: FallbackRates::default(),
        }
    }
}

impl FallbackRates {
    pub fn rate(&self, coin: Coin) -> FeeRate {
        FeeRate::new(match coin {
            Coin::Bitcoin => self.bitcoin,
            Coin::BitcoinCash => self.bitcoin_cash,
            Coin::Litecoin => self.litecoin,
            Coin::Dash => self.dash,
            Coin::Ethereum => self.ethereum,
        })
    }
}

impl Default for FallbackRates {
    fn default() -> Self {
        Self {
            bitcoin: default_bitcoin_rate(),
            bitcoin_cash: default_bitcoin_cash_rate(),
            litecoin: default_litecoin_rate(),
            dash: default_dash_rate(),
            ethereum: default_ethereum_rate(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_round_trips_through_toml() {
        let config = FeeProviderConfig {
            btc_core_rpc_url: Some("http://127.0.0.1:8332".into()),
            btc_core_rpc_user: Some("rpc".into()),
            ..FeeProviderConfig::default()
        };
        let toml_str = config.to_toml_string().expect("serializable");
        let parsed = FeeProviderConfig::from_toml_str(&toml_str).expect("should parse");
        assert_eq!(parsed, config);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config = FeeProviderConfig::from_toml_str("").expect("empty toml should use defaults");
        assert_eq!(config, FeeProviderConfig::default());
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
        assert!(config.infura_url().is_none());
    }

    #[test]
    fn fallback_table_overrides_per_coin() {
        let config = FeeProviderConfig::from_toml_str(
            r#"
            [fallback]
            bitcoin-cash = 5
            "#,
        )
        .expect("should parse");
        assert_eq!(config.fallback.rate(Coin::BitcoinCash), FeeRate::new(5));
        assert_eq!(config.fallback.rate(Coin::Bitcoin), FeeRate::new(20));
        assert_eq!(config.fallback.rate(Coin::Ethereum), FeeRate::new(20_000_000_000));
    }

    #[test]
    fn infura_url_uses_project_id() {
        let config = FeeProviderConfig {
            infura_project_id: Some("abc123".into()),
            ..FeeProviderConfig::default()
        };
        assert_eq!(
            config.infura_url().as_deref(),
            Some("https://mainnet.infura.io/v3/abc123")
        );
    }

    #[test]
    fn empty_project_id_disables_infura() {
        let config = FeeProviderConfig {
            infura_project_id: Some(String::new()),
            ..FeeProviderConfig::default()
        };
        assert!(config.infura_url().is_none());
    }

    #[test]
    fn wrong_type_returns_parse_error() {
        let result = FeeProviderConfig::from_toml_str("request_timeout_secs = \"soon\"");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
