//! Shared utilities for coinbridge.

pub mod logging;

pub use logging::{init_logging, init_tracing, LogFormat};
