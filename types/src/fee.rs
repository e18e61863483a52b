//! Fee rates and the priority tiers a sender can pick from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// Fee rate in chain-specific units (sat/byte for the Bitcoin family,
/// wei per gas for Ethereum).
///
/// Carries no chain tag: the provider that returned it defines the chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FeeRate(u64);

impl FeeRate {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for FeeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A selectable fee-aggressiveness tier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeRatePriority {
    Low,
    Medium,
    High,
    /// User-chosen rate with its allowed bounds.
    Custom {
        value: u64,
        range: RangeInclusive<u64>,
    },
}

impl FeeRatePriority {
    /// Fallback list for chains that declare no tiers of their own.
    pub fn default_list() -> Vec<FeeRatePriority> {
        vec![Self::Low, Self::Medium, Self::High]
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom { .. })
    }
}

impl fmt::Display for FeeRatePriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("low"),
            Self::Medium => f.write_str("medium"),
            Self::High => f.write_str("high"),
            Self::Custom { value, range } => {
                write!(f, "custom {value} ({}..={})", range.start(), range.end())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_list_is_low_medium_high() {
        assert_eq!(
            FeeRatePriority::default_list(),
            vec![FeeRatePriority::Low, FeeRatePriority::Medium, FeeRatePriority::High]
        );
    }

    #[test]
    fn custom_tier_displays_value_and_range() {
        let a = FeeRatePriority::Custom { value: 1, range: 1..=200 };
        assert!(a.is_custom());
        assert!(!FeeRatePriority::High.is_custom());
        assert_eq!(a.to_string(), "custom 1 (1..=200)");
    }
}
