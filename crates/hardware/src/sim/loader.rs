//! Image Loader.
//!
//! This module loads program images into RAM. It performs:
//! 1. **Format detection:** Chooses Intel HEX or S-record from the file extension.
//! 2. **Record application:** Decodes each line and stores payload bytes through
//!    [`AddressSpace::load_ram_byte`]; bytes addressed outside RAM are dropped.
//! 3. **Start address tracking:** Remembers the first address that received a byte,
//!    which becomes the default execution start.
//!
//! A load fails only when the file cannot be read, the format is unknown, no
//! byte ever lands in RAM, or (in strict mode) an unhandled Intel HEX record
//! type appears. Malformed lines are logged and skipped.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::common::LoadError;
use crate::config::LoadConfig;
use crate::sim::format::{IntelHexDecoder, RecordDecoder, RecordKind, SRecordDecoder};
use crate::soc::AddressSpace;
use crate::soc::devices::ConsoleHost;

/// Supported textual image formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// Intel HEX (`.hex`).
    IntelHex,
    /// Motorola S-record (`.s19`, `.s09`, `.srec`).
    SRecord,
}

impl ImageFormat {
    /// Chooses a format from the case-insensitive file name suffix.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::UnsupportedFormat`] for any other suffix.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let name = path.to_string_lossy().to_ascii_lowercase();
        if name.ends_with(".hex") {
            Ok(Self::IntelHex)
        } else if name.ends_with(".s19") || name.ends_with(".s09") || name.ends_with(".srec") {
            Ok(Self::SRecord)
        } else {
            Err(LoadError::UnsupportedFormat {
                path: path.to_path_buf(),
            })
        }
    }

    /// Returns the line decoder for this format.
    pub fn decoder(self) -> &'static dyn RecordDecoder {
        match self {
            Self::IntelHex => &IntelHexDecoder,
            Self::SRecord => &SRecordDecoder,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IntelHex => f.write_str("Intel HEX"),
            Self::SRecord => f.write_str("S-record"),
        }
    }
}

/// Outcome of a successful load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadReport {
    /// Address of the first byte stored in RAM.
    pub first_address: u16,
    /// Bytes stored in RAM.
    pub bytes_written: usize,
    /// Payload bytes addressed outside RAM and dropped.
    pub bytes_dropped: usize,
    /// Records applied (data and terminator).
    pub records: usize,
    /// Lines that carried no applicable record or could not be decoded.
    pub lines_skipped: usize,
    /// True if a terminator record ended the stream.
    pub terminated: bool,
}

/// Loads the image at `path` into RAM, choosing the format from its extension.
///
/// # Errors
///
/// Returns [`LoadError::UnsupportedFormat`] or [`LoadError::Io`] before any
/// byte is stored, and otherwise the errors of [`load_from_reader`].
pub fn load_image<H: ConsoleHost>(
    bus: &mut AddressSpace<H>,
    path: impl AsRef<Path>,
    options: &LoadConfig,
) -> Result<LoadReport, LoadError> {
    let path = path.as_ref();
    let format = ImageFormat::from_path(path)?;
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let report = load_from_reader(
        bus,
        BufReader::new(file),
        format,
        &path.to_string_lossy(),
        options,
    )?;
    debug!(
        path = %path.display(),
        %format,
        first_address = report.first_address,
        bytes = report.bytes_written,
        dropped = report.bytes_dropped,
        "image loaded"
    );
    Ok(report)
}

/// Loads an image of the given format from `reader` into RAM.
///
/// `source_name` labels log lines and errors.
///
/// # Errors
///
/// Returns [`LoadError::NoData`] if no byte landed in RAM,
/// [`LoadError::UnhandledRecordType`] in strict mode, or [`LoadError::Io`]
/// if reading fails midway. Bytes stored before the error stay in RAM.
pub fn load_from_reader<H: ConsoleHost, R: BufRead>(
    bus: &mut AddressSpace<H>,
    mut reader: R,
    format: ImageFormat,
    source_name: &str,
    options: &LoadConfig,
) -> Result<LoadReport, LoadError> {
    let decoder = format.decoder();
    let mut first_address = None;
    let mut bytes_written = 0;
    let mut bytes_dropped = 0;
    let mut records = 0;
    let mut lines_skipped = 0;
    let mut terminated = false;

    let mut buf = Vec::new();
    let mut line_no = 0;
    loop {
        buf.clear();
        let n = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| LoadError::Io {
                path: PathBuf::from(source_name),
                source,
            })?;
        if n == 0 {
            break;
        }
        line_no += 1;

        let line = String::from_utf8_lossy(&buf);
        let record = match decoder.decode_line(&line) {
            Ok(Some(record)) => record,
            Ok(None) => {
                lines_skipped += 1;
                continue;
            }
            Err(e) => {
                warn!(source = source_name, line = line_no, error = %e, "skipping malformed record");
                lines_skipped += 1;
                continue;
            }
        };

        if let RecordKind::Other(kind) = record.kind {
            if options.strict_record_types {
                return Err(LoadError::UnhandledRecordType {
                    line: line_no,
                    kind,
                });
            }
            debug!(source = source_name, line = line_no, kind, "ignoring record type");
            lines_skipped += 1;
            continue;
        }

        if record.truncated {
            warn!(
                source = source_name,
                line = line_no,
                kept = record.data.len(),
                "record shorter than its byte count"
            );
        }

        records += 1;
        for (addr, byte) in record.placements() {
            if bus.load_ram_byte(addr, byte) {
                if first_address.is_none() {
                    first_address = Some(addr);
                }
                bytes_written += 1;
            } else {
                bytes_dropped += 1;
            }
        }

        if record.is_terminator() {
            terminated = true;
            break;
        }
    }

    let Some(first_address) = first_address else {
        return Err(LoadError::NoData {
            source_name: source_name.to_string(),
        });
    };

    Ok(LoadReport {
        first_address,
        bytes_written,
        bytes_dropped,
        records,
        lines_skipped,
        terminated,
    })
}
