//! Error definitions.
//!
//! Loading errors are fatal to the process: the CLI prints them and exits
//! with status 1. Record errors are per-line and never abort a load. Runtime
//! bus accesses have no error type at all; unmapped reads return open-bus
//! values and unmapped writes are discarded.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to load a ROM or program image.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file could not be opened or read.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        /// Path of the file being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The program file extension names no supported format.
    #[error("unsupported load format '{}'", path.display())]
    UnsupportedFormat {
        /// Path whose extension was not recognized.
        path: PathBuf,
    },

    /// The image was read, but none of its bytes landed in RAM.
    #[error("failed to load file '{source_name}' into RAM: no data bytes within 0x0000-0x7FFF")]
    NoData {
        /// Name of the image (usually its path).
        source_name: String,
    },

    /// Strict mode rejected an Intel HEX record type other than data or end-of-file.
    #[error("unhandled Intel HEX record type {kind:#04x} on line {line}")]
    UnhandledRecordType {
        /// One-based line number.
        line: usize,
        /// Record type byte.
        kind: u8,
    },
}

/// Failure to decode the fixed header of a single record line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// The line ends before its header fields are complete.
    #[error("record header needs {needed} characters, line has {len}")]
    ShortHeader {
        /// Characters required for the header.
        needed: usize,
        /// Characters present.
        len: usize,
    },

    /// A header field contains non-hexadecimal characters.
    #[error("invalid hex field '{field}' at column {column}")]
    InvalidHex {
        /// Offending characters.
        field: String,
        /// Zero-based column of the field.
        column: usize,
    },
}

/// Failure to read a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read config '{}': {source}", path.display())]
    Io {
        /// Path of the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The configuration document is not valid JSON for [`crate::Config`].
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}
