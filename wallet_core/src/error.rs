use std::time::Duration;

use coinbridge_chain::ChainClientError;
use coinbridge_types::Decimal;
use thiserror::Error;

/// How a blocking chain-client call ended without a result.
#[derive(Debug)]
pub(crate) enum CommandFailure {
    Client(ChainClientError),
    Timeout(Duration),
    Internal(String),
}

#[derive(Debug, Error)]
pub enum SendError {
    #[error("invalid address: {0}")]
    InvalidAddress(ChainClientError),

    #[error("invalid send amount: {0}")]
    InvalidAmount(Decimal),

    #[error(transparent)]
    Client(ChainClientError),

    #[error("send timed out after {0:?}")]
    Timeout(Duration),

    #[error("send task failed: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum FeeError {
    #[error("invalid fee estimate amount: {0}")]
    InvalidAmount(Decimal),

    #[error(transparent)]
    Client(ChainClientError),

    #[error("fee estimation timed out after {0:?}")]
    Timeout(Duration),

    #[error("fee estimation task failed: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("invalid address: {0}")]
    InvalidAddress(ChainClientError),

    #[error("address validation timed out after {0:?}")]
    Timeout(Duration),

    #[error("address validation task failed: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum ClearError {
    #[error("failed to clear wallet data: {0}")]
    Client(ChainClientError),

    #[error("clear timed out after {0:?}")]
    Timeout(Duration),

    #[error("clear task failed: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum StartError {
    #[error("failed to start chain client: {0}")]
    Client(ChainClientError),

    #[error("start timed out after {0:?}")]
    Timeout(Duration),

    #[error("start task failed: {0}")]
    Internal(String),
}

#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("failed to refresh chain client: {0}")]
    Client(ChainClientError),

    #[error("refresh timed out after {0:?}")]
    Timeout(Duration),

    #[error("refresh task failed: {0}")]
    Internal(String),
}

impl From<CommandFailure> for SendError {
    fn from(failure: CommandFailure) -> Self {
        match failure {
            CommandFailure::Client(e) => Self::Client(e),
            CommandFailure::Timeout(d) => Self::Timeout(d),
            CommandFailure::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<CommandFailure> for FeeError {
    fn from(failure: CommandFailure) -> Self {
        match failure {
            CommandFailure::Client(e) => Self::Client(e),
            CommandFailure::Timeout(d) => Self::Timeout(d),
            CommandFailure::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<CommandFailure> for ValidationError {
    fn from(failure: CommandFailure) -> Self {
        match failure {
            CommandFailure::Client(e) => Self::InvalidAddress(e),
            CommandFailure::Timeout(d) => Self::Timeout(d),
            CommandFailure::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<CommandFailure> for ClearError {
    fn from(failure: CommandFailure) -> Self {
        match failure {
            CommandFailure::Client(e) => Self::Client(e),
            CommandFailure::Timeout(d) => Self::Timeout(d),
            CommandFailure::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<CommandFailure> for StartError {
    fn from(failure: CommandFailure) -> Self {
        match failure {
            CommandFailure::Client(e) => Self::Client(e),
            CommandFailure::Timeout(d) => Self::Timeout(d),
            CommandFailure::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<CommandFailure> for RefreshError {
    fn from(failure: CommandFailure) -> Self {
        match failure {
            CommandFailure::Client(e) => Self::Client(e),
            CommandFailure::Timeout(d) => Self::Timeout(d),
            CommandFailure::Internal(msg) => Self::Internal(msg),
        }
    }
}

/// A validation failure seen while sending is reported as a send error.
impl From<ValidationError> for SendError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::InvalidAddress(e) => Self::InvalidAddress(e),
            ValidationError::Timeout(d) => Self::Timeout(d),
            ValidationError::Internal(msg) => Self::Internal(msg),
        }
    }
}
