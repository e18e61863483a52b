//! Republication of chain-client callbacks as uniform domain events.

use std::sync::{Arc, Weak};

use coinbridge_chain::{BlockInfo, ChainClient, ChainClientListener, TransactionInfo};
use coinbridge_types::{AdapterState, Coin, Decimal, TransactionBatch};
use tracing::debug;

use crate::channel::{EventChannel, EventReceiver, LatestValueReceiver};
use crate::mapper::TransactionRecordMapper;
use crate::sync::SyncStateMachine;

/// The five event streams of one adapter.
#[derive(Debug)]
pub struct AdapterEvents {
    balance: EventChannel<Decimal>,
    tip_height: EventChannel<u64>,
    transactions: EventChannel<TransactionBatch>,
    sync: SyncStateMachine,
}

impl AdapterEvents {
    pub fn new(coin: Coin, capacity: usize) -> Self {
        Self {
            balance: EventChannel::new(capacity),
            tip_height: EventChannel::new(capacity),
            transactions: EventChannel::new(capacity),
            sync: SyncStateMachine::new(coin, capacity),
        }
    }

    pub fn sync(&self) -> &SyncStateMachine {
        &self.sync
    }

    pub fn subscribe_balance(&self) -> EventReceiver<Decimal> {
        self.balance.subscribe()
    }

    pub fn subscribe_tip_height(&self) -> EventReceiver<u64> {
        self.tip_height.subscribe()
    }

    pub fn subscribe_transactions(&self) -> EventReceiver<TransactionBatch> {
        self.transactions.subscribe()
    }

    pub fn subscribe_state(&self) -> LatestValueReceiver<AdapterState> {
        self.sync.subscribe_state()
    }

    pub fn subscribe_progress(&self) -> LatestValueReceiver<f64> {
        self.sync.subscribe_progress()
    }
}

/// Listener installed on the chain client by the adapter.
///
/// Holds the client weakly: the client owns this listener, so a strong
/// reference would keep both alive forever.
pub(crate) struct ClientCallbacks {
    coin: Coin,
    client: Weak<dyn ChainClient>,
    mapper: TransactionRecordMapper,
    events: Arc<AdapterEvents>,
}

impl ClientCallbacks {
    pub(crate) fn new(
        coin: Coin,
        client: &Arc<dyn ChainClient>,
        mapper: TransactionRecordMapper,
        events: Arc<AdapterEvents>,
    ) -> Self {
        Self {
            coin,
            client: Arc::downgrade(client),
            mapper,
            events,
        }
    }

    fn tip_height(&self) -> Option<u64> {
        self.client
            .upgrade()
            .and_then(|client| client.last_block_info())
            .map(|info| info.height)
    }
}

impl ChainClientListener for ClientCallbacks {
    fn transactions_updated(
        &self,
        inserted: Vec<TransactionInfo>,
        updated: Vec<TransactionInfo>,
        deleted: Vec<String>,
    ) {
        let tip = self.tip_height();
        let records = self
            .mapper
            .map_all(inserted.iter().chain(updated.iter()), tip);

        debug!(
            coin = %self.coin,
            inserted = inserted.len(),
            updated = updated.len(),
            deleted = deleted.len(),
            "transactions updated"
        );

        self.events
            .transactions
            .publish(TransactionBatch { records, deleted });
    }

    fn balance_updated(&self, balance: i128) {
        let amount = self.mapper.scale().to_display(balance);
        debug!(coin = %self.coin, balance = %amount, "balance updated");
        self.events.balance.publish(amount);
    }

    fn last_block_info_updated(&self, info: BlockInfo) {
        debug!(coin = %self.coin, height = info.height, "tip height updated");
        self.events.tip_height.publish(info.height);
    }

    fn progress_updated(&self, progress: f64) {
        self.events.sync.on_progress(progress);
    }
}
