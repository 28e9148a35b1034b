//! Fixed memory map and boot constants.
//!
//! The board has 32 KiB of RAM at the bottom of the address space, 16 KiB of
//! ROM at the top, and an unmapped gap between them in which the ACIA window
//! normally lives.

/// First RAM address.
pub const RAM_BASE: u16 = 0x0000;

/// Last RAM address (inclusive).
pub const RAM_LIMIT: u16 = 0x7FFF;

/// RAM size in bytes (32 KiB).
pub const RAM_SIZE: usize = 0x8000;

/// First ROM address.
pub const ROM_BASE: u16 = 0xC000;

/// ROM size in bytes (16 KiB).
pub const ROM_SIZE: usize = 0x4000;

/// Fill value for ROM bytes not covered by an image.
pub const ROM_FILL: u8 = 0xFF;

/// Value returned by reads that hit no region.
pub const OPEN_BUS: u8 = 0xFF;

/// Offset of the big-endian reset vector inside the ROM image.
pub const RESET_VECTOR_OFFSET: usize = 0x3FFE;

/// Default ACIA window base (status register; data register at base + 1).
pub const DEFAULT_ACIA_BASE: u16 = 0xA000;

/// Program counter origin used when neither ROM nor a load address supplies one.
pub const DEFAULT_ORIGIN: u16 = 0x1000;

/// Stack pointer installed before the processor is reset.
pub const DEFAULT_STACK_POINTER: u16 = 0x7FF0;

/// Program counter value at which the run loop stops without executing.
pub const HALT_PC: u16 = 0xFFFF;

/// Disassembly tracing stops once this many cycles have elapsed.
pub const TRACE_CYCLE_LIMIT: u64 = 1200;

/// ACIA status: receive data register full (a key is pending).
pub const ACIA_STATUS_RDRF: u8 = 0x01;

/// ACIA status: transmit data register empty (always set).
pub const ACIA_STATUS_TDRE: u8 = 0x02;
