//! Property tests for confirmation classification and sync-state mapping.

use coinbridge_types::{AdapterState, TransactionStatus};
use coinbridge_wallet_core::classify;
use coinbridge_wallet_core::sync::{clamp_progress, state_for_progress};
use proptest::prelude::*;

proptest! {
    #[test]
    fn verifying_progress_stays_in_unit_interval(
        tx in any::<u64>(),
        tip in any::<u64>(),
        threshold in 0u32..=64,
    ) {
        if let TransactionStatus::Verifying { progress } = classify(Some(tx), Some(tip), threshold) {
            prop_assert!((0.0..1.0).contains(&progress));
        }
    }

    #[test]
    fn completed_iff_threshold_reached(
        tx in 0u64..1_000_000,
        tip in 0u64..1_000_000,
        threshold in 1u32..=12,
    ) {
        let confirmations = tip as i64 - tx as i64 + 1;
        let completed = classify(Some(tx), Some(tip), threshold).is_completed();
        prop_assert_eq!(completed, confirmations >= i64::from(threshold));
    }

    #[test]
    fn missing_height_is_always_processing(h in any::<u64>(), threshold in any::<u32>()) {
        prop_assert_eq!(classify(None, Some(h), threshold), TransactionStatus::Processing);
        prop_assert_eq!(classify(Some(h), None, threshold), TransactionStatus::Processing);
    }

    #[test]
    fn sync_state_is_synced_iff_progress_reaches_one(raw in -2.0f64..3.0) {
        let p = clamp_progress(raw);
        prop_assert!((0.0..=1.0).contains(&p));
        match state_for_progress(p) {
            AdapterState::Synced => prop_assert!(p >= 1.0),
            AdapterState::Syncing { progress } => {
                prop_assert!(progress < 1.0);
                prop_assert_eq!(progress, p);
            }
        }
    }
}
