//! Conversion of raw chain-client transactions into domain records.

use coinbridge_chain::{TransactionAddressInfo, TransactionInfo};
use coinbridge_types::{
    Coin, Timestamp, TransactionAddress, TransactionRecord, UnitScale,
};

use crate::confirmation::classify;

/// Builds [`TransactionRecord`]s for one coin.
///
/// Pure apart from the tip height passed in: the same raw transaction and
/// tip always map to an equal record, which upstream de-duplication relies
/// on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransactionRecordMapper {
    scale: UnitScale,
    threshold: u32,
}

impl TransactionRecordMapper {
    pub fn new(scale: UnitScale, threshold: u32) -> Self {
        Self { scale, threshold }
    }

    pub fn for_coin(coin: Coin) -> Self {
        Self::new(coin.unit_scale(), coin.confirmation_threshold())
    }

    pub fn scale(&self) -> UnitScale {
        self.scale
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn map(&self, raw: &TransactionInfo, tip_height: Option<u64>) -> TransactionRecord {
        TransactionRecord {
            transaction_hash: raw.transaction_hash.clone(),
            amount: self.scale.to_display(raw.amount),
            timestamp: Timestamp::from_optional(raw.timestamp),
            status: classify(raw.block_height, tip_height, self.threshold),
            from: map_addresses(&raw.from),
            to: map_addresses(&raw.to),
        }
    }

    /// Map a batch, keeping the input order.
    pub fn map_all<'a>(
        &self,
        raws: impl IntoIterator<Item = &'a TransactionInfo>,
        tip_height: Option<u64>,
    ) -> Vec<TransactionRecord> {
        raws.into_iter().map(|raw| self.map(raw, tip_height)).collect()
    }
}

fn map_addresses(addresses: &[TransactionAddressInfo]) -> Vec<TransactionAddress> {
    addresses
        .iter()
        .map(|info| TransactionAddress {
            address: info.address.clone(),
            mine: info.mine,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinbridge_types::{Decimal, TransactionStatus};
    use std::str::FromStr;

    fn raw_tx(block_height: Option<u64>) -> TransactionInfo {
        TransactionInfo {
            transaction_hash: "a1b2c3".to_string(),
            amount: 12_345_678,
            timestamp: block_height.map(|_| 1_700_000_000),
            block_height,
            from: vec![
                TransactionAddressInfo::new("1Zed", false),
                TransactionAddressInfo::new("1Alpha", true),
            ],
            to: vec![
                TransactionAddressInfo::new("1Mine", true),
                TransactionAddressInfo::new("1Change", true),
                TransactionAddressInfo::new("1Other", false),
            ],
        }
    }

    #[test]
    fn maps_amount_timestamp_and_status() {
        let mapper = TransactionRecordMapper::for_coin(Coin::Bitcoin);
        let record = mapper.map(&raw_tx(Some(100)), Some(103));

        assert_eq!(record.transaction_hash, "a1b2c3");
        assert_eq!(record.amount, Decimal::from_str("0.12345678").unwrap());
        assert_eq!(record.timestamp.as_secs(), 1_700_000_000);
        assert_eq!(record.status, TransactionStatus::Verifying { progress: 4.0 / 6.0 });
    }

    #[test]
    fn pending_transaction_has_zero_timestamp() {
        let mapper = TransactionRecordMapper::for_coin(Coin::Litecoin);
        let record = mapper.map(&raw_tx(None), Some(103));

        assert!(record.timestamp.is_unconfirmed());
        assert_eq!(record.status, TransactionStatus::Processing);
    }

    #[test]
    fn address_order_is_preserved() {
        let mapper = TransactionRecordMapper::for_coin(Coin::Bitcoin);
        let record = mapper.map(&raw_tx(Some(1)), Some(1));

        let from: Vec<_> = record.from.iter().map(|a| a.address.as_str()).collect();
        let to: Vec<_> = record.to.iter().map(|a| a.address.as_str()).collect();
        assert_eq!(from, ["1Zed", "1Alpha"]);
        assert_eq!(to, ["1Mine", "1Change", "1Other"]);
        assert!(!record.from[0].mine);
        assert!(record.from[1].mine);
    }

    #[test]
    fn mapping_is_idempotent() {
        let mapper = TransactionRecordMapper::for_coin(Coin::Bitcoin);
        let raw = raw_tx(Some(100));
        assert_eq!(mapper.map(&raw, Some(102)), mapper.map(&raw, Some(102)));
    }

    #[test]
    fn ethereum_uses_wei_and_twelve_confirmations() {
        let mapper = TransactionRecordMapper::for_coin(Coin::Ethereum);
        let mut raw = raw_tx(Some(100));
        raw.amount = 1_500_000_000_000_000_000;

        let record = mapper.map(&raw, Some(105));
        assert_eq!(record.amount, Decimal::from_str("1.5").unwrap());
        assert_eq!(record.status, TransactionStatus::Verifying { progress: 0.5 });
    }

    #[test]
    fn map_all_keeps_batch_order() {
        let mapper = TransactionRecordMapper::for_coin(Coin::Dash);
        let mut second = raw_tx(None);
        second.transaction_hash = "ffff".to_string();
        let batch = [raw_tx(Some(1)), second];

        let records = mapper.map_all(&batch, Some(10));
        assert_eq!(records[0].transaction_hash, "a1b2c3");
        assert_eq!(records[1].transaction_hash, "ffff");
    }
}
