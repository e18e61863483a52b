//! Unit conversion between a chain's minor units and its display units.
//!
//! Minor units (satoshi, wei, ...) are exact integers held as `i128`.
//! Display units are base-10 [`Decimal`]s, so a value converted to display
//! and back never drifts by a low-order unit. Floating point never touches
//! an amount.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Largest number of decimals a [`Decimal`] can carry.
pub const MAX_DECIMALS: u32 = 28;

/// Scale of a chain's native asset: display unit = minor unit × 10^decimals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitScale(u32);

impl UnitScale {
    /// Satoshi-style scale used by the Bitcoin family (10^8).
    pub const SATOSHI: Self = Self(8);
    /// Wei-style scale used by the Ethereum family (10^18).
    pub const WEI: Self = Self(18);

    /// Requests above [`MAX_DECIMALS`] are clamped.
    pub const fn new(decimals: u32) -> Self {
        if decimals > MAX_DECIMALS {
            Self(MAX_DECIMALS)
        } else {
            Self(decimals)
        }
    }

    pub const fn decimals(&self) -> u32 {
        self.0
    }

    /// The integer scale factor `10^decimals`.
    pub fn factor(&self) -> Decimal {
        Decimal::from_i128_with_scale(10i128.pow(self.0), 0)
    }

    /// Convert minor units to display units. Exact.
    pub fn to_display(&self, minor: i128) -> Decimal {
        Decimal::try_from_i128_with_scale(minor, self.0).unwrap_or(if minor < 0 {
            Decimal::MIN
        } else {
            Decimal::MAX
        })
    }

    /// Convert display units to minor units, truncating toward zero.
    ///
    /// Saturates at the decimal range instead of failing.
    pub fn to_minor(&self, display: Decimal) -> i128 {
        let product = display.saturating_mul(self.factor()).trunc();
        product.to_i128().unwrap_or(if product.is_sign_negative() {
            i128::MIN
        } else {
            i128::MAX
        })
    }
}

impl fmt::Display for UnitScale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "10^{}", self.0)
    }
}

/// `minor / scale`.
pub fn to_display(minor: i128, scale: UnitScale) -> Decimal {
    scale.to_display(minor)
}

/// `trunc(display * scale)`.
pub fn to_minor(display: Decimal, scale: UnitScale) -> i128 {
    scale.to_minor(display)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn one_satoshi_is_eight_decimal_places() {
        let d = to_display(1, UnitScale::SATOSHI);
        assert_eq!(d, Decimal::from_str("0.00000001").unwrap());
    }

    #[test]
    fn whole_coin_round_trips() {
        let d = to_display(150_000_000, UnitScale::SATOSHI);
        assert_eq!(d, Decimal::from_str("1.5").unwrap());
        assert_eq!(to_minor(d, UnitScale::SATOSHI), 150_000_000);
    }

    #[test]
    fn sub_unit_display_truncates_toward_zero() {
        let d = Decimal::from_str("0.000000019").unwrap();
        assert_eq!(to_minor(d, UnitScale::SATOSHI), 1);
        assert_eq!(to_minor(-d, UnitScale::SATOSHI), -1);
    }

    #[test]
    fn negative_amounts_keep_sign() {
        let d = to_display(-2_500, UnitScale::SATOSHI);
        assert!(d.is_sign_negative());
        assert_eq!(to_minor(d, UnitScale::SATOSHI), -2_500);
    }

    #[test]
    fn wei_scale_handles_large_balances() {
        // 12345.678901234567890123 ETH
        let minor: i128 = 12_345_678_901_234_567_890_123;
        let d = to_display(minor, UnitScale::WEI);
        assert_eq!(d, Decimal::from_str("12345.678901234567890123").unwrap());
        assert_eq!(to_minor(d, UnitScale::WEI), minor);
    }

    #[test]
    fn scale_is_clamped_to_decimal_limit() {
        assert_eq!(UnitScale::new(40).decimals(), MAX_DECIMALS);
    }

    #[test]
    fn overflowing_display_saturates() {
        assert_eq!(to_minor(Decimal::MAX, UnitScale::WEI), Decimal::MAX.to_i128().unwrap());
    }
}
