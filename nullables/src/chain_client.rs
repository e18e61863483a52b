//! Nullable chain client: scripted balances, blocks and callbacks.

use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use coinbridge_chain::{
    BlockInfo, ChainClient, ChainClientError, ChainClientListener, TransactionAddressInfo,
    TransactionInfo,
};

/// One command received by the client, for assertions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClientCall {
    Start,
    Refresh,
    Clear,
    Send { address: String, amount: i128 },
    Fee { amount: i128, sender_pays: bool },
    Validate(String),
}

struct Inner {
    balance: i128,
    last_block: Option<BlockInfo>,
    receive_address: String,
    address_prefix: String,
    flat_fee: i128,
    command_delay: Option<Duration>,
    send_delay: Option<Duration>,
    sends_in_flight: usize,
    peak_sends_in_flight: usize,
    start_error: Option<ChainClientError>,
    refresh_error: Option<ChainClientError>,
    clear_error: Option<ChainClientError>,
    send_error: Option<ChainClientError>,
    calls: Vec<ClientCall>,
}

/// An in-memory chain client for testing.
///
/// Never touches a network. Callbacks fire only when a test calls one of
/// the `emit_*` methods, on the calling thread. Thread-safe so it can sit
/// behind tokio's blocking pool.
pub struct NullChainClient {
    inner: Mutex<Inner>,
    listener: Mutex<Option<Arc<dyn ChainClientListener>>>,
}

impl NullChainClient {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                balance: 0,
                last_block: None,
                receive_address: "null1receive".to_string(),
                address_prefix: String::new(),
                flat_fee: 0,
                command_delay: None,
                send_delay: None,
                sends_in_flight: 0,
                peak_sends_in_flight: 0,
                start_error: None,
                refresh_error: None,
                clear_error: None,
                send_error: None,
                calls: Vec::new(),
            }),
            listener: Mutex::new(None),
        }
    }

    // ── Scripting ───────────────────────────────────────────────────────

    pub fn set_balance(&self, balance: i128) {
        self.inner.lock().unwrap().balance = balance;
    }

    pub fn set_last_block(&self, height: Option<u64>) {
        self.inner.lock().unwrap().last_block = height.map(BlockInfo::new);
    }

    pub fn set_receive_address(&self, address: impl Into<String>) {
        self.inner.lock().unwrap().receive_address = address.into();
    }

    /// Only non-empty alphanumeric addresses with this prefix validate.
    pub fn set_address_prefix(&self, prefix: impl Into<String>) {
        self.inner.lock().unwrap().address_prefix = prefix.into();
    }

    /// Fee charged per transaction, in minor units.
    pub fn set_flat_fee(&self, fee: i128) {
        self.inner.lock().unwrap().flat_fee = fee;
    }

    /// Make every command block the calling thread this long.
    pub fn set_command_delay(&self, delay: Duration) {
        self.inner.lock().unwrap().command_delay = Some(delay);
    }

    /// Make only `send` block the calling thread this long.
    pub fn set_send_delay(&self, delay: Duration) {
        self.inner.lock().unwrap().send_delay = Some(delay);
    }

    pub fn fail_start(&self, error: ChainClientError) {
        self.inner.lock().unwrap().start_error = Some(error);
    }

    pub fn fail_refresh(&self, error: ChainClientError) {
        self.inner.lock().unwrap().refresh_error = Some(error);
    }

    pub fn fail_clear(&self, error: ChainClientError) {
        self.inner.lock().unwrap().clear_error = Some(error);
    }

    pub fn fail_send(&self, error: ChainClientError) {
        self.inner.lock().unwrap().send_error = Some(error);
    }

    // ── Callbacks ───────────────────────────────────────────────────────

    pub fn emit_progress(&self, progress: f64) {
        if let Some(listener) = self.listener() {
            listener.progress_updated(progress);
        }
    }

    /// Update the balance and notify.
    pub fn emit_balance(&self, balance: i128) {
        self.set_balance(balance);
        if let Some(listener) = self.listener() {
            listener.balance_updated(balance);
        }
    }

    /// Move the tip and notify.
    pub fn emit_block(&self, height: u64) {
        self.set_last_block(Some(height));
        if let Some(listener) = self.listener() {
            listener.last_block_info_updated(BlockInfo::new(height));
        }
    }

    pub fn emit_transactions(
        &self,
        inserted: Vec<TransactionInfo>,
        updated: Vec<TransactionInfo>,
        deleted: Vec<String>,
    ) {
        if let Some(listener) = self.listener() {
            listener.transactions_updated(inserted, updated, deleted);
        }
    }

    // ── Assertions ──────────────────────────────────────────────────────

    pub fn calls(&self) -> Vec<ClientCall> {
        self.inner.lock().unwrap().calls.clone()
    }

    /// Successful sends as `(address, minor amount)`.
    pub fn sent(&self) -> Vec<(String, i128)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                ClientCall::Send { address, amount } => Some((address, amount)),
                _ => None,
            })
            .collect()
    }

    /// Highest number of `send` calls ever running at the same time.
    pub fn peak_sends_in_flight(&self) -> usize {
        self.inner.lock().unwrap().peak_sends_in_flight
    }

    pub fn has_listener(&self) -> bool {
        self.listener.lock().unwrap().is_some()
    }

    // ── Helpers ─────────────────────────────────────────────────────────

    fn listener(&self) -> Option<Arc<dyn ChainClientListener>> {
        // Cloned out so the listener can call back into the client.
        self.listener.lock().unwrap().clone()
    }

    fn begin(&self, call: ClientCall) {
        let delay = {
            let mut inner = self.inner.lock().unwrap();
            inner.calls.push(call);
            inner.command_delay
        };
        if let Some(delay) = delay {
            thread::sleep(delay);
        }
    }

    fn is_valid(prefix: &str, address: &str) -> bool {
        !address.is_empty()
            && address.chars().all(|c| c.is_ascii_alphanumeric())
            && address.starts_with(prefix)
    }
}

impl Default for NullChainClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ChainClient for NullChainClient {
    fn start(&self) -> Result<(), ChainClientError> {
        self.begin(ClientCall::Start);
        match self.inner.lock().unwrap().start_error.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn refresh(&self) -> Result<(), ChainClientError> {
        self.begin(ClientCall::Refresh);
        match self.inner.lock().unwrap().refresh_error.clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    fn clear(&self) -> Result<(), ChainClientError> {
        self.begin(ClientCall::Clear);
        let mut inner = self.inner.lock().unwrap();
        if let Some(err) = inner.clear_error.clone() {
            return Err(err);
        }
        inner.balance = 0;
        inner.last_block = None;
        Ok(())
    }

    fn send(&self, address: &str, amount: i128) -> Result<(), ChainClientError> {
        let delay = {
            let mut inner = self.inner.lock().unwrap();
            inner.sends_in_flight += 1;
            inner.peak_sends_in_flight = inner.peak_sends_in_flight.max(inner.sends_in_flight);
            inner.send_delay
        };

        self.begin(ClientCall::Send {
            address: address.to_string(),
            amount,
        });
        if let Some(delay) = delay {
            thread::sleep(delay);
        }

        let mut inner = self.inner.lock().unwrap();
        inner.sends_in_flight -= 1;
        if let Some(err) = inner.send_error.clone() {
            return Err(err);
        }
        if !Self::is_valid(&inner.address_prefix, address) {
            return Err(ChainClientError::invalid_address(address));
        }
        let total = amount + inner.flat_fee;
        if total > inner.balance {
            return Err(ChainClientError::insufficient_funds(format!(
                "need {total}, have {}",
                inner.balance
            )));
        }
        inner.balance -= total;
        Ok(())
    }

    fn fee(&self, amount: i128, sender_pays: bool) -> Result<i128, ChainClientError> {
        self.begin(ClientCall::Fee {
            amount,
            sender_pays,
        });
        let inner = self.inner.lock().unwrap();
        let needed = if sender_pays {
            amount + inner.flat_fee
        } else {
            amount
        };
        if needed > inner.balance {
            return Err(ChainClientError::insufficient_funds(format!(
                "need {needed}, have {}",
                inner.balance
            )));
        }
        Ok(inner.flat_fee)
    }

    fn validate(&self, address: &str) -> Result<(), ChainClientError> {
        self.begin(ClientCall::Validate(address.to_string()));
        let inner = self.inner.lock().unwrap();
        if Self::is_valid(&inner.address_prefix, address) {
            Ok(())
        } else {
            Err(ChainClientError::invalid_address(address))
        }
    }

    fn balance(&self) -> i128 {
        self.inner.lock().unwrap().balance
    }

    fn last_block_info(&self) -> Option<BlockInfo> {
        self.inner.lock().unwrap().last_block
    }

    fn receive_address(&self) -> String {
        self.inner.lock().unwrap().receive_address.clone()
    }

    fn debug_info(&self) -> String {
        let inner = self.inner.lock().unwrap();
        format!(
            "null chain client: balance={} tip={:?} calls={}",
            inner.balance,
            inner.last_block.map(|b| b.height),
            inner.calls.len()
        )
    }

    fn set_listener(&self, listener: Arc<dyn ChainClientListener>) {
        *self.listener.lock().unwrap() = Some(listener);
    }
}

/// A raw transaction with one foreign input and one output of ours.
pub fn sample_transaction(hash: &str, amount: i128, block_height: Option<u64>) -> TransactionInfo {
    TransactionInfo {
        transaction_hash: hash.to_string(),
        amount,
        timestamp: block_height.map(|h| 1_600_000_000 + h * 600),
        block_height,
        from: vec![TransactionAddressInfo::new("nullSender", false)],
        to: vec![
            TransactionAddressInfo::new("null1receive", true),
            TransactionAddressInfo::new("nullChange", false),
        ],
    }
}
