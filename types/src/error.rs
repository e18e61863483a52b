//! Errors raised while building domain values or loading configuration.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TypesError {
    #[error("unknown coin: {0}")]
    UnknownCoin(String),
}

/// Failure to load a TOML configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Parse(String),
}
