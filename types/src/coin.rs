//! Supported coins and the chain family each one belongs to.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::amount::UnitScale;
use crate::error::TypesError;

/// Family of chain clients sharing amount scale and confirmation rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChainFamily {
    BitcoinLike,
    EthereumLike,
}

impl ChainFamily {
    /// Confirmations after which a transaction counts as completed.
    pub const fn confirmation_threshold(&self) -> u32 {
        match self {
            Self::BitcoinLike => 6,
            Self::EthereumLike => 12,
        }
    }

    /// Minor-unit scale of the family's native asset.
    pub const fn unit_scale(&self) -> UnitScale {
        match self {
            Self::BitcoinLike => UnitScale::SATOSHI,
            Self::EthereumLike => UnitScale::WEI,
        }
    }
}

/// A coin a wallet adapter can be set up for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Coin {
    Bitcoin,
    BitcoinCash,
    Litecoin,
    Dash,
    Ethereum,
}

impl Coin {
    pub const ALL: [Coin; 5] = [
        Coin::Bitcoin,
        Coin::BitcoinCash,
        Coin::Litecoin,
        Coin::Dash,
        Coin::Ethereum,
    ];

    pub const fn family(&self) -> ChainFamily {
        match self {
            Self::Ethereum => ChainFamily::EthereumLike,
            Self::Bitcoin | Self::BitcoinCash | Self::Litecoin | Self::Dash => {
                ChainFamily::BitcoinLike
            }
        }
    }

    pub const fn unit_scale(&self) -> UnitScale {
        self.family().unit_scale()
    }

    pub const fn confirmation_threshold(&self) -> u32 {
        self.family().confirmation_threshold()
    }

    /// Configuration name (kebab-case, same as the serde form).
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Bitcoin => "bitcoin",
            Self::BitcoinCash => "bitcoin-cash",
            Self::Litecoin => "litecoin",
            Self::Dash => "dash",
            Self::Ethereum => "ethereum",
        }
    }

    /// Ticker symbol.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Bitcoin => "BTC",
            Self::BitcoinCash => "BCH",
            Self::Litecoin => "LTC",
            Self::Dash => "DASH",
            Self::Ethereum => "ETH",
        }
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Coin {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Coin::ALL
            .into_iter()
            .find(|coin| coin.as_str() == lower || coin.code().eq_ignore_ascii_case(&lower))
            .ok_or_else(|| TypesError::UnknownCoin(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitcoin_family_uses_six_confirmations() {
        for coin in [Coin::Bitcoin, Coin::BitcoinCash, Coin::Litecoin, Coin::Dash] {
            assert_eq!(coin.family(), ChainFamily::BitcoinLike);
            assert_eq!(coin.confirmation_threshold(), 6);
            assert_eq!(coin.unit_scale().decimals(), 8);
        }
    }

    #[test]
    fn ethereum_uses_wei_scale() {
        assert_eq!(Coin::Ethereum.family(), ChainFamily::EthereumLike);
        assert_eq!(Coin::Ethereum.unit_scale(), UnitScale::WEI);
    }

    #[test]
    fn parses_names_and_tickers() {
        assert_eq!("bitcoin-cash".parse::<Coin>().unwrap(), Coin::BitcoinCash);
        assert_eq!("LTC".parse::<Coin>().unwrap(), Coin::Litecoin);
        assert_eq!(" Ethereum ".parse::<Coin>().unwrap(), Coin::Ethereum);
        assert!(matches!(
            "dogecoin".parse::<Coin>(),
            Err(TypesError::UnknownCoin(_))
        ));
    }

    #[test]
    fn display_matches_serde_name() {
        for coin in Coin::ALL {
            let json = serde_json::to_string(&coin).unwrap();
            assert_eq!(json, format!("\"{coin}\""));
        }
    }
}
