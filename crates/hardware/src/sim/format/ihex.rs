//! Intel HEX decoder.
//!
//! Layout: `:`, a two-digit byte count, a four-digit address, a two-digit
//! record type, `count` payload bytes, and a checksum byte. Type `00` carries
//! data and type `01` ends the file. Extended-address and start-address
//! types (`02`-`05`) decode as [`RecordKind::Other`] with no payload; the
//! loader decides whether to skip or reject them.

use super::{Record, RecordDecoder, RecordKind, header_byte, read_payload};
use crate::common::RecordError;

/// Columns of the fixed header fields.
const COUNT_COLUMN: usize = 1;
const ADDRESS_COLUMN: usize = 3;
const TYPE_COLUMN: usize = 7;
/// First payload column; also the minimum line length.
const PAYLOAD_COLUMN: usize = 9;

/// Data record type.
const TYPE_DATA: u8 = 0x00;
/// End-of-file record type.
const TYPE_EOF: u8 = 0x01;

/// Decoder for Intel HEX lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntelHexDecoder;

impl RecordDecoder for IntelHexDecoder {
    fn decode_line(&self, line: &str) -> Result<Option<Record>, RecordError> {
        let line = line.trim_end().as_bytes();
        if line.first() != Some(&b':') {
            return Ok(None);
        }
        if line.len() < PAYLOAD_COLUMN {
            return Err(RecordError::ShortHeader {
                needed: PAYLOAD_COLUMN,
                len: line.len(),
            });
        }

        let count = header_byte(line, COUNT_COLUMN)?;
        let address = u16::from_be_bytes([
            header_byte(line, ADDRESS_COLUMN)?,
            header_byte(line, ADDRESS_COLUMN + 2)?,
        ]);
        let record_type = header_byte(line, TYPE_COLUMN)?;

        let record = match record_type {
            TYPE_DATA => {
                let (data, truncated) = read_payload(line, PAYLOAD_COLUMN, usize::from(count));
                Record {
                    kind: RecordKind::Data,
                    address: u32::from(address),
                    data,
                    truncated,
                }
            }
            TYPE_EOF => Record {
                kind: RecordKind::Terminator,
                address: u32::from(address),
                data: Vec::new(),
                truncated: false,
            },
            other => Record {
                kind: RecordKind::Other(other),
                address: u32::from(address),
                data: Vec::new(),
                truncated: false,
            },
        };
        Ok(Some(record))
    }
}
