//! Transaction timestamps.
//!
//! Timestamps are Unix epoch seconds (UTC). A transaction the chain client
//! has not yet timestamped (still pending) carries [`Timestamp::UNCONFIRMED`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A Unix timestamp in seconds since epoch (UTC).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Placeholder for transactions without a confirmed time.
    pub const UNCONFIRMED: Self = Self(0);

    /// `Some(secs)` from the chain client, or [`Timestamp::UNCONFIRMED`].
    pub fn from_optional(secs: Option<u64>) -> Self {
        secs.map(Self).unwrap_or(Self::UNCONFIRMED)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    pub fn is_unconfirmed(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
