//! 6809 single-board-computer host harness.
//!
//! This crate assembles the board around an external 8-bit processor engine:
//! 1. **Bus:** Fixed memory map of 32 KiB RAM, 16 KiB ROM, and an ACIA console window.
//! 2. **Console:** 6850-style status/data registers backed by the host terminal.
//! 3. **Loading:** Motorola S-record and Intel HEX decoders and the RAM image loader.
//! 4. **Execution:** Processor capability traits, boot target resolution, and the run loop.
//!
//! The instruction set itself is not emulated here; engines plug in through
//! [`core::Processor`] and call back into the bus through [`core::MemoryBus`].

/// Common types and constants (memory map, errors).
pub mod common;
/// Harness configuration (console window, boot state, tracing, loading).
pub mod config;
/// Processor capability traits and the fetch-only stand-in engine.
pub mod core;
/// Image decoding, loading, and the run loop.
pub mod sim;
/// Board components (RAM, ROM, ACIA, address-space bus).
pub mod soc;

/// Root configuration type; use `Config::default()` or parse JSON.
pub use crate::config::Config;
/// Processor capability implemented by instruction-set engines.
pub use crate::core::{MemoryBus, Processor};
/// The board's address space; construct with `AddressSpace::new`.
pub use crate::soc::AddressSpace;
