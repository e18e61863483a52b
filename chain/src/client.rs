//! The chain-client contract consumed by wallet adapters.

use std::sync::Arc;

use crate::error::ChainClientError;

/// Tip of the chain client's local view.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BlockInfo {
    pub height: u64,
}

impl BlockInfo {
    pub fn new(height: u64) -> Self {
        Self { height }
    }
}

/// An input or output address as the chain client reports it.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionAddressInfo {
    pub address: String,
    pub mine: bool,
}

impl TransactionAddressInfo {
    pub fn new(address: impl Into<String>, mine: bool) -> Self {
        Self {
            address: address.into(),
            mine,
        }
    }
}

/// A raw transaction from the chain client, amounts in minor units.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TransactionInfo {
    pub transaction_hash: String,
    /// Net amount; negative for outgoing transfers.
    pub amount: i128,
    /// Absent while the transaction is unconfirmed.
    pub timestamp: Option<u64>,
    /// Absent while the transaction is not in a block.
    pub block_height: Option<u64>,
    pub from: Vec<TransactionAddressInfo>,
    pub to: Vec<TransactionAddressInfo>,
}

/// Callbacks a chain client delivers, on a thread it owns.
///
/// None of these can fail: they are push notifications with no result
/// channel.
pub trait ChainClientListener: Send + Sync {
    /// `deleted` holds transaction hashes.
    fn transactions_updated(
        &self,
        inserted: Vec<TransactionInfo>,
        updated: Vec<TransactionInfo>,
        deleted: Vec<String>,
    );

    fn balance_updated(&self, balance: i128);

    fn last_block_info_updated(&self, info: BlockInfo);

    /// Sync progress in `[0, 1]`.
    fn progress_updated(&self, progress: f64);
}

/// An already-implemented client for one blockchain.
///
/// Handles peers, validation, coin selection and signing; the adapter only
/// issues high-level commands and reads validated results. Commands block
/// the calling thread.
pub trait ChainClient: Send + Sync {
    fn start(&self) -> Result<(), ChainClientError>;

    /// Force a re-sync. Clients without one keep the default no-op.
    fn refresh(&self) -> Result<(), ChainClientError> {
        Ok(())
    }

    /// Wipe all locally synchronized state.
    fn clear(&self) -> Result<(), ChainClientError>;

    fn send(&self, address: &str, amount: i128) -> Result<(), ChainClientError>;

    /// Fee in minor units for sending `amount` minor units.
    fn fee(&self, amount: i128, sender_pays: bool) -> Result<i128, ChainClientError>;

    fn validate(&self, address: &str) -> Result<(), ChainClientError>;

    /// Spendable balance in minor units.
    fn balance(&self) -> i128;

    fn last_block_info(&self) -> Option<BlockInfo>;

    fn receive_address(&self) -> String;

    fn debug_info(&self) -> String;

    /// Install the callback sink. Replaces any previous listener.
    fn set_listener(&self, listener: Arc<dyn ChainClientListener>);
}
