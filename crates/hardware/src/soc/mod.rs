//! Board components.
//!
//! This module organizes the pieces that make up the simulated board: the
//! RAM and ROM regions, the ACIA console device and its host capability, and
//! the address-space bus that decodes every CPU access.

/// Console device and host console capability.
pub mod devices;

/// Address-space bus: region decoding and routing.
pub mod interconnect;

/// RAM and ROM regions.
pub mod memory;

/// Device trait for address-mapped components.
pub mod traits;

pub use interconnect::{AddressSpace, Region};
