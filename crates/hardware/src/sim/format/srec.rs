//! Motorola S-record decoder.
//!
//! Layout: `S`, a type digit, a two-digit byte count, an address of 2, 3, or 4
//! bytes depending on type, the payload, and a checksum byte. The byte count
//! covers address, payload, and checksum.
//!
//! | Type | Address bytes | Meaning |
//! |------|---------------|---------|
//! | `1`  | 2             | Data |
//! | `2`  | 3             | Data |
//! | `3`  | 4             | Data |
//! | `9`  | 2             | Terminator |
//!
//! Every other type (`0` header, `5` count, `7`/`8` terminators for wider
//! addresses) is skipped without error.

use super::{Record, RecordDecoder, RecordKind, header_byte, read_payload};
use crate::common::RecordError;

/// Column of the byte-count field.
const COUNT_COLUMN: usize = 2;
/// Column of the first address digit.
const ADDRESS_COLUMN: usize = 4;
/// The byte count includes one checksum byte.
const CHECKSUM_BYTES: usize = 1;

/// Decoder for Motorola S-record lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct SRecordDecoder;

impl SRecordDecoder {
    /// Maps a type digit to the record kind and its address width in bytes.
    const fn layout(type_digit: u8) -> Option<(RecordKind, usize)> {
        match type_digit {
            b'1' => Some((RecordKind::Data, 2)),
            b'2' => Some((RecordKind::Data, 3)),
            b'3' => Some((RecordKind::Data, 4)),
            b'9' => Some((RecordKind::Terminator, 2)),
            _ => None,
        }
    }
}

impl RecordDecoder for SRecordDecoder {
    fn decode_line(&self, line: &str) -> Result<Option<Record>, RecordError> {
        let line = line.trim_end().as_bytes();
        if line.first() != Some(&b'S') {
            return Ok(None);
        }
        let Some((kind, width)) = line.get(1).copied().and_then(Self::layout) else {
            return Ok(None);
        };

        let payload_column = ADDRESS_COLUMN + width * 2;
        if line.len() < payload_column {
            return Err(RecordError::ShortHeader {
                needed: payload_column,
                len: line.len(),
            });
        }

        let count = header_byte(line, COUNT_COLUMN)?;
        let mut address = 0u32;
        for i in 0..width {
            address = (address << 8) | u32::from(header_byte(line, ADDRESS_COLUMN + i * 2)?);
        }

        let data_len = usize::from(count).saturating_sub(width + CHECKSUM_BYTES);
        let (data, truncated) = read_payload(line, payload_column, data_len);

        Ok(Some(Record {
            kind,
            address,
            data,
            truncated,
        }))
    }
}
