//! `mindbridge-core` — shared building blocks for the navigation layer.
//!
//! This crate contains **pure** primitives (no I/O, no session state).

pub mod error;
pub mod path;

pub use error::{DomainError, DomainResult};
pub use path::{normalize_pathname, segments, PARAM_MARKER};
