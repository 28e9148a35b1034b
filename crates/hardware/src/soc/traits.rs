//! Device trait for address-mapped components.
//!
//! Every region of the board (RAM, ROM, the ACIA window) implements `Device`.
//! The bus decodes an address to a device and a device-relative offset, then
//! calls `read_u8`/`write_u8` with that offset.

/// A component occupying a contiguous range of the 16-bit address space.
pub trait Device {
    /// Returns a short name for this device (e.g., `"RAM"`, `"ACIA"`).
    fn name(&self) -> &str;

    /// Returns (base_address, size_in_bytes) for this device.
    fn address_range(&self) -> (u16, usize);

    /// Returns true if `addr` falls inside this device's range.
    fn contains(&self, addr: u16) -> bool {
        let (base, size) = self.address_range();
        addr >= base && usize::from(addr - base) < size
    }

    /// Reads one byte at the given device-relative offset.
    ///
    /// Reads may have side effects (the ACIA data register consumes a key).
    fn read_u8(&mut self, offset: u16) -> u8;

    /// Writes one byte at the given device-relative offset.
    fn write_u8(&mut self, offset: u16, val: u8);
}
