//! The uniform wallet adapter façade.

use std::sync::Arc;

use coinbridge_chain::{ChainClient, ChainClientError};
use coinbridge_types::{AdapterState, Coin, Decimal, TransactionBatch, UnitScale};
use tracing::{info, warn};

use crate::channel::{EventReceiver, LatestValueReceiver};
use crate::config::AdapterConfig;
use crate::error::{
    ClearError, CommandFailure, FeeError, RefreshError, SendError, StartError, ValidationError,
};
use crate::events::{AdapterEvents, ClientCallbacks};
use crate::mapper::TransactionRecordMapper;

/// One wallet on one chain, behind the contract shared by every chain
/// family.
///
/// The adapter exclusively owns its chain-client handle and is the only
/// writer of its [`AdapterState`]. Amounts cross the boundary in display
/// units; conversion to minor units happens just before calling the
/// client and right after it returns.
///
/// Commands run on tokio's blocking pool under
/// [`AdapterConfig::command_timeout`], so they must be awaited inside a
/// tokio runtime. A timed-out call is reported to the caller but keeps
/// running inside the client.
pub struct WalletAdapter {
    coin: Coin,
    scale: UnitScale,
    client: Arc<dyn ChainClient>,
    events: Arc<AdapterEvents>,
    config: AdapterConfig,
    send_lock: Arc<tokio::sync::Mutex<()>>,
}

impl std::fmt::Debug for WalletAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletAdapter")
            .field("coin", &self.coin)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

impl WalletAdapter {
    /// Wrap `client` and install the adapter as its listener.
    ///
    /// The adapter starts in `Syncing(0)`.
    pub fn new(coin: Coin, client: Arc<dyn ChainClient>, config: AdapterConfig) -> Self {
        let events = Arc::new(AdapterEvents::new(coin, config.event_capacity));
        let callbacks = ClientCallbacks::new(
            coin,
            &client,
            TransactionRecordMapper::for_coin(coin),
            Arc::clone(&events),
        );
        client.set_listener(Arc::new(callbacks));

        Self {
            coin,
            scale: coin.unit_scale(),
            client,
            events,
            config,
            send_lock: Arc::new(tokio::sync::Mutex::new(())),
        }
    }

    pub fn coin(&self) -> Coin {
        self.coin
    }

    // ── Commands ────────────────────────────────────────────────────────

    /// Begin synchronization.
    pub async fn start(&self) -> Result<(), StartError> {
        self.run_blocking(|client| client.start())
            .await
            .map_err(StartError::from)
            .inspect(|_| info!(coin = %self.coin, "chain client started"))
            .inspect_err(|e| warn!(coin = %self.coin, error = %e, "chain client failed to start"))
    }

    /// Ask the chain client for a forced re-sync.
    pub async fn refresh(&self) -> Result<(), RefreshError> {
        self.run_blocking(|client| client.refresh())
            .await
            .map_err(RefreshError::from)
            .inspect_err(|e| warn!(coin = %self.coin, error = %e, "refresh failed"))
    }

    /// Irreversibly wipe the locally synchronized state of this wallet.
    ///
    /// On success the adapter is back in `Syncing(0)`; on failure its state
    /// is left as it was.
    pub async fn clear(&self) -> Result<(), ClearError> {
        self.run_blocking(|client| client.clear())
            .await
            .map_err(ClearError::from)
            .inspect(|_| {
                self.events.sync().reset();
                info!(coin = %self.coin, "wallet data cleared");
            })
            .inspect_err(|e| warn!(coin = %self.coin, error = %e, "clear failed"))
    }

    /// Send `amount` (display units) to `address`.
    ///
    /// The address is validated first; an invalid one never reaches the
    /// client's send path. Sends on one adapter never overlap inside the
    /// client, even when an earlier send timed out and is still running.
    pub async fn send(&self, address: &str, amount: Decimal) -> Result<(), SendError> {
        let minor = self.scale.to_minor(amount);
        if minor <= 0 {
            return Err(SendError::InvalidAmount(amount));
        }

        let guard = Arc::clone(&self.send_lock).lock_owned().await;

        self.validate_address(address).await?;

        let to = address.to_string();
        self.run_blocking(move |client| {
            // Released only when the client call returns, not on timeout.
            let _guard = guard;
            client.send(&to, minor)
        })
        .await
        .map_err(SendError::from)
        .inspect(|_| info!(coin = %self.coin, %address, %amount, "transaction sent"))
        .inspect_err(|e| warn!(coin = %self.coin, %address, %amount, error = %e, "send failed"))
    }

    /// Fee (display units) for sending `amount` (display units).
    pub async fn estimate_fee(
        &self,
        amount: Decimal,
        sender_pays_fee: bool,
    ) -> Result<Decimal, FeeError> {
        let minor = self.scale.to_minor(amount);
        if minor < 0 {
            return Err(FeeError::InvalidAmount(amount));
        }

        let fee = self
            .run_blocking(move |client| client.fee(minor, sender_pays_fee))
            .await
            .map_err(FeeError::from)
            .inspect_err(|e| warn!(coin = %self.coin, %amount, error = %e, "fee estimation failed"))?;

        Ok(self.scale.to_display(fee))
    }

    pub async fn validate_address(&self, address: &str) -> Result<(), ValidationError> {
        let address = address.to_string();
        self.run_blocking(move |client| client.validate(&address))
            .await
            .map_err(ValidationError::from)
    }

    // ── Queries ─────────────────────────────────────────────────────────

    /// Spendable balance in display units.
    pub fn balance(&self) -> Decimal {
        self.scale.to_display(self.client.balance())
    }

    /// Height of the last known block, `0` if none.
    pub fn tip_height(&self) -> u64 {
        self.client.last_block_info().map(|info| info.height).unwrap_or(0)
    }

    pub fn receive_address(&self) -> String {
        self.client.receive_address()
    }

    pub fn debug_info(&self) -> String {
        self.client.debug_info()
    }

    pub fn state(&self) -> AdapterState {
        self.events.sync().state()
    }

    /// Latest sync progress reported by the chain client.
    pub fn progress(&self) -> f64 {
        self.events.sync().progress()
    }

    // ── Event streams ───────────────────────────────────────────────────

    /// Balance updates in display units. No replay.
    pub fn subscribe_balance(&self) -> EventReceiver<Decimal> {
        self.events.subscribe_balance()
    }

    /// Tip-height updates. No replay.
    pub fn subscribe_tip_height(&self) -> EventReceiver<u64> {
        self.events.subscribe_tip_height()
    }

    /// Inserted/updated records and deleted hashes. No replay.
    pub fn subscribe_transactions(&self) -> EventReceiver<TransactionBatch> {
        self.events.subscribe_transactions()
    }

    /// Adapter state, starting with the current one.
    pub fn subscribe_state(&self) -> LatestValueReceiver<AdapterState> {
        self.events.subscribe_state()
    }

    /// Raw sync progress, starting with the latest value.
    pub fn subscribe_progress(&self) -> LatestValueReceiver<f64> {
        self.events.subscribe_progress()
    }

    // ── Internals ───────────────────────────────────────────────────────

    async fn run_blocking<T, F>(&self, op: F) -> Result<T, CommandFailure>
    where
        T: Send + 'static,
        F: FnOnce(&dyn ChainClient) -> Result<T, ChainClientError> + Send + 'static,
    {
        let client = Arc::clone(&self.client);
        let timeout = self.config.command_timeout();
        let task = tokio::task::spawn_blocking(move || op(client.as_ref()));

        match tokio::time::timeout(timeout, task).await {
            Ok(Ok(Ok(value))) => Ok(value),
            Ok(Ok(Err(e))) => Err(CommandFailure::Client(e)),
            Ok(Err(join_err)) => Err(CommandFailure::Internal(join_err.to_string())),
            Err(_) => Err(CommandFailure::Timeout(timeout)),
        }
    }
}
