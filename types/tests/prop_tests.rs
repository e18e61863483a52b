use proptest::prelude::*;

use coinbridge_types::{to_display, to_minor, Coin, Timestamp, UnitScale};

proptest! {
    /// Minor -> display -> minor never drifts, for any scale up to 18 decimals.
    #[test]
    fn minor_units_round_trip(minor in any::<i64>(), decimals in 0u32..=18) {
        let scale = UnitScale::new(decimals);
        let display = to_display(minor as i128, scale);
        prop_assert_eq!(to_minor(display, scale), minor as i128);
    }

    /// Wei-sized values (beyond i64) survive the round trip too.
    #[test]
    fn wei_amounts_round_trip(minor in 0i128..=10i128.pow(27)) {
        let display = to_display(minor, UnitScale::WEI);
        prop_assert_eq!(to_minor(display, UnitScale::WEI), minor);
    }

    /// Display value keeps the sign of the minor amount.
    #[test]
    fn display_preserves_sign(minor in any::<i64>()) {
        let display = to_display(minor as i128, UnitScale::SATOSHI);
        prop_assert_eq!(display.is_sign_negative() && !display.is_zero(), minor < 0);
    }

    /// Every coin parses back from its display name and ticker.
    #[test]
    fn coin_names_parse(index in 0usize..Coin::ALL.len()) {
        let coin = Coin::ALL[index];
        prop_assert_eq!(coin.to_string().parse::<Coin>().unwrap(), coin);
        prop_assert_eq!(coin.code().parse::<Coin>().unwrap(), coin);
    }

    /// Only a missing source timestamp maps to the unconfirmed placeholder.
    #[test]
    fn timestamp_from_optional(secs in 1u64..u64::MAX) {
        prop_assert_eq!(Timestamp::from_optional(Some(secs)).as_secs(), secs);
        prop_assert!(Timestamp::from_optional(None).is_unconfirmed());
    }
}
