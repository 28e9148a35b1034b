//! Asynchronous Communications Interface Adapter (ACIA).
//!
//! Implements the two registers of a 6850-style serial controller that the
//! board firmware polls. The device holds no state of its own beyond its
//! window base; pending input lives in the host console.
//!
//! # Registers
//!
//! * `base + 0`: Status (read). Bit 1 (TDRE) is always set, bit 0 (RDRF) is
//!   set while a key is pending. Writes (control) are discarded.
//! * `base + 1`: Data. A read consumes and returns one pending key, or `0x00`
//!   when none is pending. A write emits the byte to the host console unless
//!   it is `0x00`.

use tracing::trace;

use crate::common::constants::{ACIA_STATUS_RDRF, ACIA_STATUS_TDRE};
use crate::soc::devices::Device;
use crate::soc::devices::host::ConsoleHost;

/// Status register offset.
const REG_STATUS: u16 = 0;
/// Data register offset.
const REG_DATA: u16 = 1;

/// ACIA console device.
#[derive(Debug)]
pub struct Acia<H> {
    /// Address of the status register.
    base: u16,
    /// Host console supplying keystrokes and receiving output.
    host: H,
}

impl<H: ConsoleHost> Acia<H> {
    /// Creates an ACIA whose status register sits at `base`.
    pub const fn new(base: u16, host: H) -> Self {
        Self { base, host }
    }

    /// Returns the status register address.
    pub const fn base(&self) -> u16 {
        self.base
    }

    /// Moves the register window.
    pub const fn set_base(&mut self, base: u16) {
        self.base = base;
    }

    /// Returns the data register address.
    ///
    /// A window based at `0xFFFF` has no data register; the address space
    /// does not wrap around to `0x0000`.
    pub const fn data_address(&self) -> Option<u16> {
        self.base.checked_add(1)
    }

    /// Returns the host console.
    pub const fn host(&self) -> &H {
        &self.host
    }

    /// Returns the host console mutably.
    pub const fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn read_status(&mut self) -> u8 {
        let mut status = ACIA_STATUS_TDRE;
        if self.host.key_pending() {
            status |= ACIA_STATUS_RDRF;
        }
        status
    }

    /// Consumes at most one pending key; reading is not idempotent.
    fn read_data(&mut self) -> u8 {
        self.host.read_key().unwrap_or(0)
    }

    fn write_data(&mut self, val: u8) {
        // NUL is never echoed; firmware idles by writing it.
        if val != 0 {
            self.host.write_byte(val);
        }
    }
}

impl<H: ConsoleHost> Device for Acia<H> {
    fn name(&self) -> &str {
        "ACIA"
    }

    fn address_range(&self) -> (u16, usize) {
        let size = if self.data_address().is_some() { 2 } else { 1 };
        (self.base, size)
    }

    fn read_u8(&mut self, offset: u16) -> u8 {
        match offset {
            REG_STATUS => self.read_status(),
            REG_DATA => self.read_data(),
            _ => 0,
        }
    }

    fn write_u8(&mut self, offset: u16, val: u8) {
        match offset {
            REG_DATA => self.write_data(val),
            _ => trace!(offset, val, "ACIA control write ignored"),
        }
    }
}
