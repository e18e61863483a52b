//! Synchronization state of a wallet adapter.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an adapter is still catching up with its chain.
///
/// Exactly one variant is current at any time. A fresh adapter starts in
/// `Syncing { progress: 0.0 }`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum AdapterState {
    /// Synchronization in progress; `progress` lies in `[0, 1)`.
    Syncing { progress: f64 },
    /// The chain client reports full synchronization.
    Synced,
}

impl AdapterState {
    pub fn is_synced(&self) -> bool {
        matches!(self, Self::Synced)
    }

    /// Sync progress, `1.0` once synced.
    pub fn progress(&self) -> f64 {
        match self {
            Self::Syncing { progress } => *progress,
            Self::Synced => 1.0,
        }
    }
}

impl Default for AdapterState {
    fn default() -> Self {
        Self::Syncing { progress: 0.0 }
    }
}

impl fmt::Display for AdapterState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syncing { progress } => write!(f, "syncing ({:.0}%)", progress * 100.0),
            Self::Synced => f.write_str("synced"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_syncing_from_zero() {
        assert_eq!(AdapterState::default(), AdapterState::Syncing { progress: 0.0 });
        assert!(!AdapterState::default().is_synced());
    }

    #[test]
    fn display_shows_percentage() {
        let state = AdapterState::Syncing { progress: 0.25 };
        assert_eq!(state.to_string(), "syncing (25%)");
        assert_eq!(AdapterState::Synced.to_string(), "synced");
    }
}
