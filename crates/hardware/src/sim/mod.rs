//! Program loading and execution.
//!
//! Provides the textual image decoders, the loader that writes decoded
//! records into RAM, and the harness that boots and drives a processor.

/// Record decoders for Motorola S-record and Intel HEX.
pub mod format;

/// Boot target resolution and the run loop.
pub mod harness;

/// Image loader: drives a decoder over a file and fills RAM.
pub mod loader;
