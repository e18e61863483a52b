//! Wallet adapter core for coinbridge.
//!
//! Normalizes chain clients of every supported family behind one adapter:
//! - Unit conversion between minor and display units (via `coinbridge-types`)
//! - Confirmation classification of transactions
//! - Mapping of raw chain-client transactions into domain records
//! - Sync state machine driven by progress callbacks
//! - Event streams with explicit replay policies
//! - The [`WalletAdapter`] command/query façade

pub mod adapter;
pub mod channel;
pub mod config;
pub mod confirmation;
pub mod error;
pub mod events;
pub mod mapper;
pub mod sync;

pub use adapter::WalletAdapter;
pub use channel::{EventReceiver, LatestValueReceiver, RecvError, TryRecvError};
pub use config::AdapterConfig;
pub use confirmation::{classify, confirmations};
pub use error::{ClearError, FeeError, RefreshError, SendError, StartError, ValidationError};
pub use events::AdapterEvents;
pub use mapper::TransactionRecordMapper;
pub use sync::SyncStateMachine;
