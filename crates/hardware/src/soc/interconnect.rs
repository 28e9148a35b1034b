//! Address-space bus.
//!
//! This module implements the bus that every CPU access goes through. It provides:
//! 1. **Decoding:** Maps a 16-bit address to the ACIA window, RAM, ROM, or the unmapped gap.
//! 2. **Access routing:** `read8`/`write8` with open-bus reads and discarded writes for the gap.
//! 3. **Loading:** Host-side ROM image fill and direct RAM stores for the image loader.
//!
//! Decoding is purely range based. The ACIA window is checked first, so it
//! shadows RAM or ROM when configured inside either region.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::common::LoadError;
use crate::common::constants::{OPEN_BUS, RAM_LIMIT, ROM_BASE, ROM_SIZE};
use crate::config::Config;
use crate::core::MemoryBus;
use crate::soc::devices::{Acia, ConsoleHost, Device};
use crate::soc::memory::{Ram, Rom};

/// Region an address decodes to, with the region-relative offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    /// ACIA register window.
    Console(u16),
    /// Read/write memory.
    Ram(u16),
    /// Read-only memory.
    Rom(u16),
    /// The unmapped gap: reads float high, writes vanish.
    Unmapped,
}

/// The board's complete address space: RAM, ROM, and the ACIA window.
#[derive(Debug)]
pub struct AddressSpace<H> {
    ram: Ram,
    rom: Rom,
    acia: Acia<H>,
}

impl<H: ConsoleHost> AddressSpace<H> {
    /// Creates a power-on address space: zeroed RAM, erased ROM, and the ACIA at `acia_base`.
    pub fn new(host: H, acia_base: u16) -> Self {
        Self {
            ram: Ram::new(),
            rom: Rom::new(),
            acia: Acia::new(acia_base, host),
        }
    }

    /// Creates an address space with the console window from `config`.
    pub fn with_config(host: H, config: &Config) -> Self {
        Self::new(host, config.console.base)
    }

    /// Decodes `addr`; the ACIA window takes precedence over every other region.
    pub fn decode(&self, addr: u16) -> Region {
        if self.acia.contains(addr) {
            Region::Console(addr - self.acia.base())
        } else if addr <= RAM_LIMIT {
            Region::Ram(addr)
        } else if addr >= ROM_BASE {
            Region::Rom(addr - ROM_BASE)
        } else {
            Region::Unmapped
        }
    }

    /// Reads one byte as the CPU sees it.
    ///
    /// Not idempotent at the ACIA data register: each read consumes a pending key.
    pub fn read8(&mut self, addr: u16) -> u8 {
        match self.decode(addr) {
            Region::Console(offset) => self.acia.read_u8(offset),
            Region::Ram(offset) => self.ram.read_u8(offset),
            Region::Rom(offset) => self.rom.read_u8(offset),
            Region::Unmapped => OPEN_BUS,
        }
    }

    /// Writes one byte as the CPU sees it. ROM and unmapped writes are discarded.
    pub fn write8(&mut self, addr: u16, val: u8) {
        match self.decode(addr) {
            Region::Console(offset) => self.acia.write_u8(offset, val),
            Region::Ram(offset) => self.ram.write_u8(offset, val),
            Region::Rom(_) | Region::Unmapped => {}
        }
    }

    /// Replaces the ROM contents with `image` and returns the new reset vector.
    ///
    /// Images shorter than 16 KiB are padded with `0xFF`; longer ones are truncated.
    pub fn load_rom(&mut self, image: &[u8]) -> u16 {
        if image.len() > ROM_SIZE {
            warn!(
                size = image.len(),
                "ROM image larger than 16 KiB, extra bytes ignored"
            );
        }
        let vector = self.rom.load(image);
        debug!(size = image.len(), reset_vector = vector, "ROM image loaded");
        vector
    }

    /// Reads a raw binary file into ROM and returns the new reset vector.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Io`] if the file cannot be read; the ROM is left untouched.
    pub fn load_rom_file(&mut self, path: impl AsRef<Path>) -> Result<u16, LoadError> {
        let path = path.as_ref();
        let image = fs::read(path).map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.load_rom(&image))
    }

    /// Stores a loader byte directly into RAM, bypassing the ACIA window.
    ///
    /// Returns `false` (and stores nothing) when `addr` is outside RAM.
    pub fn load_ram_byte(&mut self, addr: u16, val: u8) -> bool {
        if addr <= RAM_LIMIT {
            self.ram.write_u8(addr, val);
            true
        } else {
            false
        }
    }

    /// Returns the reset vector stored in the last two ROM bytes.
    pub fn reset_vector(&self) -> u16 {
        self.rom.reset_vector()
    }

    /// Returns true once a ROM image has been loaded.
    pub const fn rom_loaded(&self) -> bool {
        self.rom.is_loaded()
    }

    /// Returns the RAM region.
    pub const fn ram(&self) -> &Ram {
        &self.ram
    }

    /// Returns the ROM region.
    pub const fn rom(&self) -> &Rom {
        &self.rom
    }

    /// Returns the ACIA console device.
    pub const fn console(&self) -> &Acia<H> {
        &self.acia
    }

    /// Returns the ACIA console device mutably.
    pub const fn console_mut(&mut self) -> &mut Acia<H> {
        &mut self.acia
    }
}

impl<H: ConsoleHost> MemoryBus for AddressSpace<H> {
    fn read8(&mut self, addr: u16) -> u8 {
        Self::read8(self, addr)
    }

    fn write8(&mut self, addr: u16, val: u8) {
        Self::write8(self, addr, val);
    }
}
