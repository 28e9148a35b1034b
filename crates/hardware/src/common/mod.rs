//! Common types and constants shared by every part of the harness.
//!
//! This module provides:
//! 1. **Constants:** The fixed memory map, ACIA register bits, and boot defaults.
//! 2. **Error Handling:** Load, record-decode, and configuration error types.

/// Memory map and boot constants.
pub mod constants;

/// Error types for loading, decoding, and configuration.
pub mod error;

pub use error::{ConfigError, LoadError, RecordError};
