//! Fundamental types for coinbridge.
//!
//! This crate defines the domain values shared by every other crate in the
//! workspace: coins and chain families, amount scaling, transaction
//! records, adapter state and fee-rate tiers.

pub mod amount;
pub mod coin;
pub mod error;
pub mod fee;
pub mod record;
pub mod state;
pub mod time;

pub use amount::{to_display, to_minor, UnitScale};
pub use coin::{ChainFamily, Coin};
pub use error::{ConfigError, TypesError};
pub use fee::{FeeRate, FeeRatePriority};
pub use record::{TransactionAddress, TransactionBatch, TransactionRecord, TransactionStatus};
pub use state::AdapterState;
pub use time::Timestamp;

pub use rust_decimal::Decimal;
