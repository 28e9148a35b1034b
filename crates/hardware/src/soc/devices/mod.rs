//! Address-mapped I/O devices.
//!
//! The board has exactly one device: a 6850-style ACIA serial console backed
//! by a host console capability.

/// 6850-style ACIA console device.
pub mod acia;

/// Host console capability (keyboard input, character output).
pub mod host;

pub use acia::Acia;
pub use host::{ConsoleHost, ConsoleKey, StdioHost};

pub use crate::soc::traits::Device;
