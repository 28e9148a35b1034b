//! RAM and ROM regions.
//!
//! Both regions are fixed-size byte arrays owned by the address space. RAM
//! starts zeroed; ROM starts filled with `0xFF` and is only ever changed by a
//! host-side image load, never by CPU writes.

use crate::common::constants::{
    OPEN_BUS, RAM_BASE, RAM_SIZE, RESET_VECTOR_OFFSET, ROM_BASE, ROM_FILL, ROM_SIZE,
};
use crate::soc::traits::Device;

/// 32 KiB of read/write memory at `0x0000..=0x7FFF`.
#[derive(Debug, Clone)]
pub struct Ram {
    bytes: Box<[u8]>,
}

impl Ram {
    /// Creates zero-filled RAM.
    pub fn new() -> Self {
        Self {
            bytes: vec![0; RAM_SIZE].into_boxed_slice(),
        }
    }

    /// Returns the whole RAM contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Zeroes every byte.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }
}

impl Default for Ram {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Ram {
    fn name(&self) -> &str {
        "RAM"
    }

    fn address_range(&self) -> (u16, usize) {
        (RAM_BASE, RAM_SIZE)
    }

    fn read_u8(&mut self, offset: u16) -> u8 {
        self.bytes
            .get(usize::from(offset))
            .copied()
            .unwrap_or(OPEN_BUS)
    }

    fn write_u8(&mut self, offset: u16, val: u8) {
        if let Some(byte) = self.bytes.get_mut(usize::from(offset)) {
            *byte = val;
        }
    }
}

/// 16 KiB of read-only memory at `0xC000..=0xFFFF`.
#[derive(Debug, Clone)]
pub struct Rom {
    bytes: Box<[u8]>,
    loaded: bool,
}

impl Rom {
    /// Creates an erased ROM (every byte `0xFF`).
    pub fn new() -> Self {
        Self {
            bytes: vec![ROM_FILL; ROM_SIZE].into_boxed_slice(),
            loaded: false,
        }
    }

    /// Replaces the ROM contents with `image`.
    ///
    /// The ROM is erased to `0xFF` first, then `min(image.len(), 16 KiB)`
    /// bytes are copied from the start of the image. Returns the reset vector
    /// recomputed from the final two ROM bytes.
    pub fn load(&mut self, image: &[u8]) -> u16 {
        self.bytes.fill(ROM_FILL);
        let len = image.len().min(ROM_SIZE);
        self.bytes[..len].copy_from_slice(&image[..len]);
        self.loaded = true;
        self.reset_vector()
    }

    /// Returns the big-endian word stored in the last two ROM bytes.
    pub fn reset_vector(&self) -> u16 {
        u16::from_be_bytes([
            self.bytes[RESET_VECTOR_OFFSET],
            self.bytes[RESET_VECTOR_OFFSET + 1],
        ])
    }

    /// Returns true once an image has been loaded.
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Returns the whole ROM contents.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }
}

impl Default for Rom {
    fn default() -> Self {
        Self::new()
    }
}

impl Device for Rom {
    fn name(&self) -> &str {
        "ROM"
    }

    fn address_range(&self) -> (u16, usize) {
        (ROM_BASE, ROM_SIZE)
    }

    fn read_u8(&mut self, offset: u16) -> u8 {
        self.bytes
            .get(usize::from(offset))
            .copied()
            .unwrap_or(OPEN_BUS)
    }

    /// CPU writes to ROM are discarded.
    fn write_u8(&mut self, _offset: u16, _val: u8) {}
}
