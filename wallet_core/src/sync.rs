//! Sync state machine driven by chain-client progress callbacks.
//!
//! | current  | progress p | next        |
//! |----------|------------|-------------|
//! | Synced   | p < 1      | Syncing(p)  |
//! | Synced   | p == 1     | Synced      |
//! | Syncing  | p == 1     | Synced      |
//! | Syncing  | p < 1      | Syncing(p)  |
//!
//! Every progress value is also re-published on the progress channel,
//! whether or not the state changed.

use coinbridge_types::{AdapterState, Coin};
use tracing::{debug, info};

use crate::channel::{LatestValueChannel, LatestValueReceiver};

/// Bring a raw progress value into `[0, 1]`; NaN counts as no progress.
pub fn clamp_progress(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 1.0)
    }
}

/// The state a progress value (already clamped) leads to. The table above
/// collapses to this: full progress means synced, anything less syncing.
pub fn state_for_progress(p: f64) -> AdapterState {
    if p >= 1.0 {
        AdapterState::Synced
    } else {
        AdapterState::Syncing { progress: p }
    }
}

/// Owns the adapter's state and progress channels.
///
/// Only the chain client's callback thread drives it.
#[derive(Debug)]
pub struct SyncStateMachine {
    coin: Coin,
    state: LatestValueChannel<AdapterState>,
    progress: LatestValueChannel<f64>,
}

impl SyncStateMachine {
    /// Starts in `Syncing(0)` with progress `0`.
    pub fn new(coin: Coin, capacity: usize) -> Self {
        Self {
            coin,
            state: LatestValueChannel::new(AdapterState::default(), capacity),
            progress: LatestValueChannel::new(0.0, capacity),
        }
    }

    pub fn state(&self) -> AdapterState {
        self.state.current()
    }

    pub fn progress(&self) -> f64 {
        self.progress.current()
    }

    pub fn subscribe_state(&self) -> LatestValueReceiver<AdapterState> {
        self.state.subscribe()
    }

    pub fn subscribe_progress(&self) -> LatestValueReceiver<f64> {
        self.progress.subscribe()
    }

    /// Apply one progress callback.
    pub fn on_progress(&self, raw: f64) {
        let p = clamp_progress(raw);

        let mut transition = None;
        self.state.update(|current| {
            let next = state_for_progress(p);
            if next == *current {
                return None;
            }
            transition = Some((*current, next));
            Some(next)
        });

        match transition {
            Some((from, to)) if from.is_synced() != to.is_synced() => {
                info!(coin = %self.coin, from = %from, to = %to, "adapter sync state changed");
            }
            _ => debug!(coin = %self.coin, progress = p, "sync progress"),
        }

        self.progress.publish(p);
    }

    /// Return to `Syncing(0)` after the client's data was wiped.
    pub fn reset(&self) {
        let reset = AdapterState::default();
        if self.state.update(|current| (*current != reset).then_some(reset)) {
            info!(coin = %self.coin, "adapter sync state reset");
        }
        self.progress.publish(0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::channel::TryRecvError;

    fn drain<T: Clone>(rx: &mut LatestValueReceiver<T>) -> Vec<T> {
        let mut out = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(v) => out.push(v),
                Err(TryRecvError::Empty) => return out,
                Err(e) => panic!("unexpected receive error: {e}"),
            }
        }
    }

    #[test]
    fn starts_syncing_from_zero() {
        let machine = SyncStateMachine::new(Coin::Bitcoin, 16);
        assert_eq!(machine.state(), AdapterState::Syncing { progress: 0.0 });
        assert_eq!(machine.progress(), 0.0);
    }

    #[test]
    fn progress_sequence_drives_transitions() {
        let machine = SyncStateMachine::new(Coin::Bitcoin, 16);
        let mut states = machine.subscribe_state();
        let mut progress = machine.subscribe_progress();

        for p in [0.3, 1.0, 0.5] {
            machine.on_progress(p);
        }

        assert_eq!(
            drain(&mut states),
            vec![
                AdapterState::Syncing { progress: 0.0 },
                AdapterState::Syncing { progress: 0.3 },
                AdapterState::Synced,
                AdapterState::Syncing { progress: 0.5 },
            ]
        );
        assert_eq!(drain(&mut progress), vec![0.0, 0.3, 1.0, 0.5]);
    }

    #[test]
    fn synced_plus_full_progress_only_reemits_progress() {
        let machine = SyncStateMachine::new(Coin::Dash, 16);
        machine.on_progress(1.0);

        let mut states = machine.subscribe_state();
        let mut progress = machine.subscribe_progress();
        machine.on_progress(1.0);

        assert_eq!(drain(&mut states), vec![AdapterState::Synced]);
        assert_eq!(drain(&mut progress), vec![1.0, 1.0]);
    }

    #[test]
    fn out_of_range_progress_is_clamped() {
        let machine = SyncStateMachine::new(Coin::Ethereum, 16);
        machine.on_progress(-0.5);
        assert_eq!(machine.state(), AdapterState::Syncing { progress: 0.0 });
        assert_eq!(machine.progress(), 0.0);

        machine.on_progress(1.7);
        assert_eq!(machine.state(), AdapterState::Synced);
        assert_eq!(machine.progress(), 1.0);

        machine.on_progress(f64::NAN);
        assert_eq!(machine.state(), AdapterState::Syncing { progress: 0.0 });
    }

    #[test]
    fn reset_returns_to_syncing_zero() {
        let machine = SyncStateMachine::new(Coin::Litecoin, 16);
        machine.on_progress(1.0);

        let mut states = machine.subscribe_state();
        let mut progress = machine.subscribe_progress();
        machine.reset();
        machine.reset();

        assert_eq!(
            drain(&mut states),
            vec![AdapterState::Synced, AdapterState::Syncing { progress: 0.0 }]
        );
        assert_eq!(drain(&mut progress), vec![1.0, 0.0, 0.0]);
    }

    #[test]
    fn state_for_progress_table() {
        assert_eq!(state_for_progress(0.4), AdapterState::Syncing { progress: 0.4 });
        assert_eq!(state_for_progress(1.0), AdapterState::Synced);
        assert_eq!(state_for_progress(0.0), AdapterState::Syncing { progress: 0.0 });
    }
}
