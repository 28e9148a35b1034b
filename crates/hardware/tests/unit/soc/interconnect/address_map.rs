//! Address Map Tests.
//!
//! Verifies decoding, routing, and host-side loading through the bus.

use pretty_assertions::assert_eq;
use rstest::rstest;
use sbc6809_core::common::LoadError;
use sbc6809_core::soc::Region;

use crate::common::images::{rom_with_vector, temp_binary};
use crate::common::mocks::host::ScriptedHost;
use crate::common::{board, board_with_acia};
use sbc6809_core::AddressSpace;

#[rstest]
#[case(0x0000, Region::Ram(0x0000))]
#[case(0x7FFF, Region::Ram(0x7FFF))]
#[case(0x8000, Region::Unmapped)]
#[case(0x9FFF, Region::Unmapped)]
#[case(0xA000, Region::Console(0))]
#[case(0xA001, Region::Console(1))]
#[case(0xA002, Region::Unmapped)]
#[case(0xBFFF, Region::Unmapped)]
#[case(0xC000, Region::Rom(0x0000))]
#[case(0xFFFF, Region::Rom(0x3FFF))]
fn test_decode_default_map(#[case] addr: u16, #[case] expected: Region) {
    assert_eq!(board().decode(addr), expected);
}

#[test]
fn test_ram_round_trip() {
    let mut bus = board();
    bus.write8(0x1234, 0x56);
    bus.write8(0x7FFF, 0x9A);
    assert_eq!(bus.read8(0x1234), 0x56);
    assert_eq!(bus.read8(0x7FFF), 0x9A);
    assert_eq!(bus.read8(0x0000), 0x00);
}

#[test]
fn test_gap_reads_open_bus_and_drops_writes() {
    let mut bus = board();
    bus.write8(0x8000, 0x12);
    bus.write8(0x9ABC, 0x34);
    assert_eq!(bus.read8(0x8000), 0xFF);
    assert_eq!(bus.read8(0x9ABC), 0xFF);
}

#[test]
fn test_rom_is_read_only() {
    let mut bus = board();
    let _ = bus.load_rom(&[0x11, 0x22]);
    bus.write8(0xC000, 0x99);
    assert_eq!(bus.read8(0xC000), 0x11);
    assert_eq!(bus.read8(0xC001), 0x22);
}

#[test]
fn test_erased_rom_reads_ff() {
    let mut bus = board();
    assert!(!bus.rom_loaded());
    assert_eq!(bus.read8(0xC000), 0xFF);
    assert_eq!(bus.read8(0xFFFE), 0xFF);
}

#[test]
fn test_load_rom_sets_reset_vector() {
    let mut bus = board();
    let vector = bus.load_rom(&rom_with_vector(0xC123));
    assert_eq!(vector, 0xC123);
    assert_eq!(bus.reset_vector(), 0xC123);
    assert!(bus.rom_loaded());
    assert_eq!(bus.read8(0xFFFE), 0xC1);
    assert_eq!(bus.read8(0xFFFF), 0x23);
    assert_eq!(bus.read8(0xC000), 0x12);
}

#[test]
fn test_short_rom_keeps_erased_vector() {
    let mut bus = board();
    let vector = bus.load_rom(&[0x01; 0x100]);
    assert_eq!(vector, 0xFFFF);
    assert_eq!(bus.read8(0xC0FF), 0x01);
    assert_eq!(bus.read8(0xC100), 0xFF);
}

#[test]
fn test_oversized_rom_is_truncated() {
    let mut bus = board();
    let mut image = rom_with_vector(0xD000);
    image.extend_from_slice(&[0x55; 32]);
    assert_eq!(bus.load_rom(&image), 0xD000);
    assert_eq!(bus.rom().as_slice().len(), 0x4000);
}

#[test]
fn test_load_rom_file_reads_binary() {
    let file = temp_binary(&rom_with_vector(0xE000));
    let mut bus = board();
    assert_eq!(bus.load_rom_file(file.path()).unwrap(), 0xE000);
}

#[test]
fn test_load_rom_file_missing_is_io_error() {
    let mut bus = board();
    let err = bus.load_rom_file("/nonexistent/monitor.rom").unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(!bus.rom_loaded());
}

#[test]
fn test_console_window_routes_to_host() {
    let mut bus = AddressSpace::new(ScriptedHost::with_input(b"k"), 0xA000);
    assert_eq!(bus.read8(0xA000), 0x03);
    assert_eq!(bus.read8(0xA001), b'k');
    assert_eq!(bus.read8(0xA000), 0x02);

    bus.write8(0xA001, b'A');
    assert_eq!(bus.console().host().output, b"A");
}

#[test]
fn test_console_window_shadows_ram() {
    let mut bus = board_with_acia(0x0400);
    bus.write8(0x0401, b'Z');
    assert_eq!(bus.console().host().output, b"Z");
    // The RAM cell under the window was never touched.
    assert_eq!(bus.ram().as_slice()[0x0401], 0x00);
    assert_eq!(bus.read8(0x0400), 0x02);
    assert_eq!(bus.decode(0x0402), Region::Ram(0x0402));
}

#[test]
fn test_console_window_shadows_rom() {
    let mut bus = board_with_acia(0xE000);
    let _ = bus.load_rom(&[0x77; 0x4000]);
    assert_eq!(bus.read8(0xE000), 0x02);
    assert_eq!(bus.read8(0xE001), 0x00);
    assert_eq!(bus.read8(0xE002), 0x77);
    assert_eq!(bus.read8(0xA000), 0xFF);
}

#[test]
fn test_console_at_top_of_memory() {
    let mut bus = board_with_acia(0xFFFF);
    assert_eq!(bus.decode(0xFFFF), Region::Console(0));
    assert_eq!(bus.decode(0x0000), Region::Ram(0));
    assert_eq!(bus.read8(0xFFFF), 0x02);
}

#[test]
fn test_load_ram_byte_bypasses_console() {
    let mut bus = board_with_acia(0x0400);
    assert!(bus.load_ram_byte(0x0401, 0x5A));
    assert!(bus.console().host().output.is_empty());
    assert_eq!(bus.ram().as_slice()[0x0401], 0x5A);
}

#[test]
fn test_load_ram_byte_rejects_outside_ram() {
    let mut bus = board();
    assert!(!bus.load_ram_byte(0x8000, 0x01));
    assert!(!bus.load_ram_byte(0xC000, 0x01));
    assert!(bus.load_ram_byte(0x7FFF, 0x01));
    assert_eq!(bus.read8(0xC000), 0xFF);
}
