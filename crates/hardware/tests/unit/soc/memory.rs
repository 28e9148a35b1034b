//! RAM and ROM Region Tests.

use sbc6809_core::soc::memory::{Ram, Rom};
use sbc6809_core::soc::traits::Device;

#[test]
fn test_ram_powers_on_zeroed() {
    let ram = Ram::new();
    assert_eq!(ram.as_slice().len(), 0x8000);
    assert!(ram.as_slice().iter().all(|&b| b == 0));
}

#[test]
fn test_ram_reads_back_writes() {
    let mut ram = Ram::new();
    ram.write_u8(0x0000, 0x11);
    ram.write_u8(0x7FFF, 0x22);
    assert_eq!(ram.read_u8(0x0000), 0x11);
    assert_eq!(ram.read_u8(0x7FFF), 0x22);

    ram.clear();
    assert_eq!(ram.read_u8(0x7FFF), 0);
}

#[test]
fn test_ram_reports_its_range() {
    let ram = Ram::new();
    assert_eq!(ram.name(), "RAM");
    assert_eq!(ram.address_range(), (0x0000, 0x8000));
    assert!(ram.contains(0x7FFF));
    assert!(!ram.contains(0x8000));
}

#[test]
fn test_rom_powers_on_erased() {
    let rom = Rom::new();
    assert!(!rom.is_loaded());
    assert_eq!(rom.as_slice().len(), 0x4000);
    assert!(rom.as_slice().iter().all(|&b| b == 0xFF));
    assert_eq!(rom.reset_vector(), 0xFFFF);
}

#[test]
fn test_rom_ignores_writes() {
    let mut rom = Rom::new();
    rom.write_u8(0x0010, 0x00);
    assert_eq!(rom.read_u8(0x0010), 0xFF);
}

#[test]
fn test_rom_load_pads_short_image() {
    let mut rom = Rom::new();
    let vector = rom.load(&[0xAA, 0xBB, 0xCC]);
    assert!(rom.is_loaded());
    assert_eq!(rom.read_u8(0), 0xAA);
    assert_eq!(rom.read_u8(2), 0xCC);
    assert_eq!(rom.read_u8(3), 0xFF);
    assert_eq!(vector, 0xFFFF);
}

#[test]
fn test_rom_load_truncates_long_image() {
    let mut rom = Rom::new();
    let mut image = vec![0u8; 0x4000 + 16];
    image[0x3FFE] = 0xC1;
    image[0x3FFF] = 0x00;
    image[0x4000] = 0x99;
    let vector = rom.load(&image);
    assert_eq!(vector, 0xC100);
    assert_eq!(rom.as_slice().len(), 0x4000);
}

#[test]
fn test_rom_reload_clears_previous_image() {
    let mut rom = Rom::new();
    let _ = rom.load(&[0x01; 0x100]);
    let _ = rom.load(&[0x02; 0x10]);
    assert_eq!(rom.read_u8(0x0F), 0x02);
    assert_eq!(rom.read_u8(0x10), 0xFF);
}
