//! Format Detection Tests.

use rstest::rstest;
use sbc6809_core::common::LoadError;
use sbc6809_core::config::LoadConfig;
use sbc6809_core::sim::loader::{ImageFormat, load_image};

use crate::common::board;
use crate::common::images::temp_image;

#[rstest]
#[case("prog.hex", ImageFormat::IntelHex)]
#[case("PROG.HEX", ImageFormat::IntelHex)]
#[case("prog.s19", ImageFormat::SRecord)]
#[case("prog.S09", ImageFormat::SRecord)]
#[case("build/out.srec", ImageFormat::SRecord)]
#[case("archive.tar.s19", ImageFormat::SRecord)]
fn test_supported_extensions(#[case] path: &str, #[case] expected: ImageFormat) {
    assert_eq!(ImageFormat::from_path(path).unwrap(), expected);
}

#[rstest]
#[case("prog.bin")]
#[case("prog.s28")]
#[case("prog")]
#[case("hex")]
#[case("prog.hex.txt")]
fn test_unsupported_extensions(#[case] path: &str) {
    let err = ImageFormat::from_path(path).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
}

#[test]
fn test_display_names() {
    assert_eq!(ImageFormat::IntelHex.to_string(), "Intel HEX");
    assert_eq!(ImageFormat::SRecord.to_string(), "S-record");
}

#[test]
fn test_unsupported_file_is_rejected_before_reading() {
    let file = temp_image(".bin", "S9031000EC\n");
    let mut bus = board();
    let err = load_image(&mut bus, file.path(), &LoadConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::UnsupportedFormat { .. }));
}

#[test]
fn test_missing_file_is_io_error() {
    let mut bus = board();
    let err = load_image(&mut bus, "/nonexistent/prog.s19", &LoadConfig::default()).unwrap_err();
    assert!(matches!(err, LoadError::Io { .. }));
}
