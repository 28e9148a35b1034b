//! Intel HEX Loading Tests.

use std::io::Cursor;

use pretty_assertions::assert_eq;
use sbc6809_core::common::LoadError;
use sbc6809_core::config::LoadConfig;
use sbc6809_core::sim::loader::{ImageFormat, LoadReport, load_from_reader, load_image};

use crate::common::board;
use crate::common::images::temp_image;
use crate::common::mocks::host::ScriptedHost;
use sbc6809_core::AddressSpace;

fn load_with(
    bus: &mut AddressSpace<ScriptedHost>,
    text: &str,
    strict: bool,
) -> Result<LoadReport, LoadError> {
    let options = LoadConfig {
        strict_record_types: strict,
    };
    load_from_reader(bus, Cursor::new(text), ImageFormat::IntelHex, "test.hex", &options)
}

#[test]
fn test_program_lands_in_ram() {
    let file = temp_image(
        ".hex",
        ":0301000086413FF6\n:10001000101112131415161718191A1B1C1D1E1F68\n:00000001FF\n",
    );
    let mut bus = board();

    let report = load_image(&mut bus, file.path(), &LoadConfig::default()).unwrap();

    assert_eq!(report.first_address, 0x0100);
    assert_eq!(report.bytes_written, 19);
    assert!(report.terminated);
    assert_eq!(&bus.ram().as_slice()[0x0100..0x0103], &[0x86, 0x41, 0x3F]);
    assert_eq!(bus.read8(0x001F), 0x1F);
}

#[test]
fn test_eof_stops_loading() {
    let mut bus = board();
    let report = load_with(&mut bus, ":00000001FF\n:02200000DEAD53\n", false);
    assert!(matches!(report, Err(LoadError::NoData { .. })));
    assert_eq!(bus.read8(0x2000), 0x00);
}

#[test]
fn test_extended_records_ignored_by_default() {
    let mut bus = board();
    let report = load_with(&mut bus, ":020000040001F9\n:02200000DEAD53\n:00000001FF\n", false)
        .unwrap();
    assert_eq!(report.lines_skipped, 1);
    // Extended addressing is not applied; the data lands at its 16-bit address.
    assert_eq!(report.first_address, 0x2000);
    assert_eq!(bus.read8(0x2001), 0xAD);
}

#[test]
fn test_extended_records_rejected_when_strict() {
    let mut bus = board();
    let err = load_with(&mut bus, ":02200000DEAD53\n:020000040001F9\n", true).unwrap_err();
    assert!(matches!(
        err,
        LoadError::UnhandledRecordType { line: 2, kind: 0x04 }
    ));
}

#[test]
fn test_rom_targeted_bytes_are_dropped() {
    let mut bus = board();
    let report = load_with(&mut bus, ":02C00000050633\n:0301000086413FF6\n", false).unwrap();
    assert_eq!(report.bytes_dropped, 2);
    assert_eq!(report.first_address, 0x0100);
}

#[test]
fn test_record_straddling_ram_end() {
    let mut bus = board();
    let report = load_with(&mut bus, ":047FFE000102030475\n", false).unwrap();
    assert_eq!(report.first_address, 0x7FFE);
    assert_eq!(report.bytes_written, 2);
    assert_eq!(report.bytes_dropped, 2);
}

#[test]
fn test_empty_image_is_no_data() {
    let mut bus = board();
    let err = load_with(&mut bus, ":00000001FF\n", false).unwrap_err();
    assert!(matches!(err, LoadError::NoData { .. }));
}

#[test]
fn test_empty_file_is_no_data() {
    let file = temp_image(".hex", "");
    let mut bus = board();
    let err = load_image(&mut bus, file.path(), &LoadConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::NoData { .. }));
}
