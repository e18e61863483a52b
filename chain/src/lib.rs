//! Interfaces of the external collaborators coinbridge consumes.
//!
//! Chain clients (one per wallet and coin) and the shared fee-estimation
//! service live outside this workspace. Everything else depends only on
//! these traits; tests swap in the implementations from
//! `coinbridge-nullables`.

pub mod client;
pub mod error;
pub mod fee;

pub use client::{
    BlockInfo, ChainClient, ChainClientListener, TransactionAddressInfo, TransactionInfo,
};
pub use error::{ChainClientError, ChainClientErrorKind, FeeQueryError};
pub use fee::FeeRateClient;
