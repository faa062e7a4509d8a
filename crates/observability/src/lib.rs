//! Tracing/logging setup shared by MindBridge binaries.

/// Tracing configuration (filters, formatters).
pub mod tracing;

pub use self::tracing::{init, LogFormat};
