use std::fmt;
use thiserror::Error;

use coinbridge_types::Coin;

/// What went wrong inside a chain client, as the client reports it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChainClientErrorKind {
    InsufficientFunds,
    InvalidAddress,
    Storage,
    Network,
    Other,
}

impl fmt::Display for ChainClientErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::InsufficientFunds => "insufficient funds",
            Self::InvalidAddress => "invalid address",
            Self::Storage => "storage failure",
            Self::Network => "network failure",
            Self::Other => "chain client error",
        })
    }
}

/// An error produced by a chain client.
///
/// Passed through the adapter verbatim; the core never reclassifies it.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct ChainClientError {
    pub kind: ChainClientErrorKind,
    pub message: String,
}

impl ChainClientError {
    pub fn new(kind: ChainClientErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn insufficient_funds(message: impl Into<String>) -> Self {
        Self::new(ChainClientErrorKind::InsufficientFunds, message)
    }

    pub fn invalid_address(message: impl Into<String>) -> Self {
        Self::new(ChainClientErrorKind::InvalidAddress, message)
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::new(ChainClientErrorKind::Storage, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ChainClientErrorKind::Network, message)
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::new(ChainClientErrorKind::Other, message)
    }
}

/// Failure of a fee-rate query against the shared fee-estimation client.
#[derive(Debug, Error)]
pub enum FeeQueryError {
    #[error("fee service request failed: {0}")]
    Network(String),

    #[error("invalid fee service response: {0}")]
    InvalidResponse(String),

    #[error("fee service returned an error: {0}")]
    Rpc(String),

    #[error("no fee source for {0}")]
    Unsupported(Coin),
}
