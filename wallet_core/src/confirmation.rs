//! Transaction confirmation classification.
//!
//! Maps a transaction's block height and the chain tip to a tri-state
//! status:
//!
//! ```text
//! confirmations = tip - tx_height + 1
//! no height or no tip          -> Processing
//! confirmations >= threshold   -> Completed
//! otherwise                    -> Verifying { confirmations / threshold }
//! ```
//!
//! A tip behind the transaction's height (reorg, stale snapshot) yields zero
//! or negative confirmations; progress is clamped to zero and the
//! transaction is never reported completed.

use coinbridge_types::TransactionStatus;

/// `tip - tx_height + 1`; negative when the tip lags the transaction.
pub fn confirmations(tx_height: u64, tip_height: u64) -> i64 {
    let diff = i128::from(tip_height) - i128::from(tx_height) + 1;
    diff.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}

/// Classify a transaction against the current tip.
///
/// A zero `threshold` is treated as one confirmation.
pub fn classify(
    tx_height: Option<u64>,
    tip_height: Option<u64>,
    threshold: u32,
) -> TransactionStatus {
    let (Some(tx_height), Some(tip_height)) = (tx_height, tip_height) else {
        return TransactionStatus::Processing;
    };

    let threshold = i64::from(threshold.max(1));
    let confirmations = confirmations(tx_height, tip_height);

    if confirmations >= threshold {
        TransactionStatus::Completed
    } else {
        TransactionStatus::Verifying {
            progress: confirmations.max(0) as f64 / threshold as f64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn six_confirmations_complete() {
        assert_eq!(classify(Some(100), Some(105), 6), TransactionStatus::Completed);
        assert_eq!(classify(Some(100), Some(500), 6), TransactionStatus::Completed);
    }

    #[test]
    fn four_of_six_is_verifying() {
        assert_eq!(
            classify(Some(100), Some(103), 6),
            TransactionStatus::Verifying { progress: 4.0 / 6.0 }
        );
    }

    #[test]
    fn included_in_tip_block_has_one_confirmation() {
        assert_eq!(confirmations(100, 100), 1);
        assert_eq!(
            classify(Some(100), Some(100), 6).progress(),
            Some(1.0 / 6.0)
        );
    }

    #[test]
    fn missing_height_is_processing() {
        assert_eq!(classify(None, Some(105), 6), TransactionStatus::Processing);
        assert_eq!(classify(Some(100), None, 6), TransactionStatus::Processing);
        assert_eq!(classify(None, None, 6), TransactionStatus::Processing);
    }

    #[test]
    fn lagging_tip_clamps_to_zero_progress() {
        assert_eq!(confirmations(100, 99), 0);
        assert_eq!(
            classify(Some(100), Some(99), 6),
            TransactionStatus::Verifying { progress: 0.0 }
        );
        assert_eq!(
            classify(Some(100), Some(10), 6),
            TransactionStatus::Verifying { progress: 0.0 }
        );
    }

    #[test]
    fn extreme_heights_do_not_overflow() {
        assert_eq!(confirmations(u64::MAX, 0), i64::MIN);
        assert_eq!(confirmations(0, u64::MAX), i64::MAX);
        assert_eq!(
            classify(Some(u64::MAX), Some(0), 6),
            TransactionStatus::Verifying { progress: 0.0 }
        );
        assert_eq!(classify(Some(0), Some(u64::MAX), 6), TransactionStatus::Completed);
    }

    #[test]
    fn zero_threshold_acts_as_one() {
        assert_eq!(classify(Some(100), Some(100), 0), TransactionStatus::Completed);
        assert_eq!(
            classify(Some(100), Some(99), 0),
            TransactionStatus::Verifying { progress: 0.0 }
        );
    }
}
