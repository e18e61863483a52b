//! Wallet-visible transaction history.
//!
//! Records are immutable snapshots: the adapter builds them from the chain
//! client's raw transactions, hands them to subscribers and keeps no copy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::time::Timestamp;

/// One side of a transaction (an input or an output address).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionAddress {
    pub address: String,
    /// Reported by the chain client; never derived here.
    pub mine: bool,
}

/// Confidence that a transaction is final.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum TransactionStatus {
    /// No block height known yet.
    Processing,
    /// Included in a block but below the confirmation threshold.
    /// `progress` lies in `[0, 1)`.
    Verifying { progress: f64 },
    /// Confirmations reached the threshold.
    Completed,
}

impl TransactionStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Partial progress, only defined while verifying.
    pub fn progress(&self) -> Option<f64> {
        match self {
            Self::Verifying { progress } => Some(*progress),
            _ => None,
        }
    }
}

/// One row of transaction history.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    /// Unique within one chain only.
    pub transaction_hash: String,
    /// Net value in display units.
    pub amount: Decimal,
    /// [`Timestamp::UNCONFIRMED`] while pending.
    pub timestamp: Timestamp,
    pub status: TransactionStatus,
    /// Input addresses in the source transaction's order.
    pub from: Vec<TransactionAddress>,
    /// Output addresses in the source transaction's order.
    pub to: Vec<TransactionAddress>,
}

/// A batch of history changes published by an adapter.
///
/// Deletions are identified by transaction hash, never by position.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionBatch {
    /// Inserted records followed by updated records.
    pub records: Vec<TransactionRecord>,
    pub deleted: Vec<String>,
}
