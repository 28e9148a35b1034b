//! Line-oriented image record decoding.
//!
//! Both supported formats encode one record per text line: a start marker, a
//! fixed header of hex fields, a payload, and a checksum. Decoders turn a
//! line into a [`Record`] or report that the line carries no record.
//! Checksums are parsed over but never validated.

/// Intel HEX decoder.
pub mod ihex;

/// Motorola S-record decoder.
pub mod srec;

pub use ihex::IntelHexDecoder;
pub use srec::SRecordDecoder;

use crate::common::RecordError;

/// What a decoded record means to the loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    /// Payload bytes to place in memory.
    Data,
    /// End of the stream; nothing after this record is read.
    Terminator,
    /// A recognized record type the loader does not act on (Intel HEX type byte).
    Other(u8),
}

/// One decoded line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// Record meaning.
    pub kind: RecordKind,
    /// Load address of the first payload byte (up to 32 bits wide in S3 records).
    pub address: u32,
    /// Payload bytes in order.
    pub data: Vec<u8>,
    /// True when the line ended before the declared payload was complete.
    pub truncated: bool,
}

impl Record {
    /// Returns true if this record ends the stream.
    pub const fn is_terminator(&self) -> bool {
        matches!(self.kind, RecordKind::Terminator)
    }

    /// Yields `(address, byte)` for every payload byte.
    ///
    /// Addresses are truncated to 16 bits, so a payload running past `0xFFFF`
    /// wraps to `0x0000`.
    pub fn placements(&self) -> impl Iterator<Item = (u16, u8)> + '_ {
        self.data
            .iter()
            .enumerate()
            .map(|(i, &byte)| (self.address.wrapping_add(i as u32) as u16, byte))
    }
}

/// Decodes single lines of a textual image format.
pub trait RecordDecoder {
    /// Decodes one line.
    ///
    /// Returns `Ok(None)` for lines that carry no record the decoder handles
    /// (no start marker, unknown S-record type). Header damage is an error;
    /// payload damage only truncates the record.
    fn decode_line(&self, line: &str) -> Result<Option<Record>, RecordError>;
}

const fn nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

/// Decodes the two hex digits at `at`, if both exist and are valid.
fn hex_byte(line: &[u8], at: usize) -> Option<u8> {
    let hi = nibble(*line.get(at)?)?;
    let lo = nibble(*line.get(at + 1)?)?;
    Some((hi << 4) | lo)
}

/// Decodes a header field; the caller has checked the header length.
fn header_byte(line: &[u8], at: usize) -> Result<u8, RecordError> {
    hex_byte(line, at).ok_or_else(|| RecordError::InvalidHex {
        field: String::from_utf8_lossy(line.get(at..at + 2).unwrap_or_default()).into_owned(),
        column: at,
    })
}

/// Decodes up to `count` payload bytes starting at `start`.
///
/// Stops at the first missing or malformed byte and reports the payload as truncated.
fn read_payload(line: &[u8], start: usize, count: usize) -> (Vec<u8>, bool) {
    let mut data = Vec::with_capacity(count);
    for i in 0..count {
        match hex_byte(line, start + i * 2) {
            Some(byte) => data.push(byte),
            None => return (data, true),
        }
    }
    (data, false)
}
