//! Tag-length-value record scanning.
//!
//! Wire format, repeated until the end of the buffer:
//! `u16 tag (LE) | u16 length (LE) | length bytes payload`

use crate::error::MintError;

/// Size of the `tag | length` record header.
pub const TLV_HEADER_LEN: usize = 4;

/// A single record borrowed from the scanned buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TlvRecord<'a> {
    pub tag: u16,
    pub offset: usize,
    pub payload: &'a [u8],
}

/// Outcome of reading one record at a cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// The cursor is at or past the end of the buffer.
    End,
    /// A record was read; `next` is the cursor just past its payload.
    Record { record: TlvRecord<'a>, next: usize },
}

/// Read the record starting at `cursor`.
pub fn step(buf: &[u8], cursor: usize) -> Result<Step<'_>, MintError> {
    if cursor >= buf.len() {
        return Ok(Step::End);
    }

    let payload_start = cursor + TLV_HEADER_LEN;
    if payload_start > buf.len() {
        return Err(MintError::BufferCorruption {
            offset: cursor,
            declared_len: TLV_HEADER_LEN,
            buffer_len: buf.len(),
        });
    }

    let tag = u16::from_le_bytes([buf[cursor], buf[cursor + 1]]);
    let length = u16::from_le_bytes([buf[cursor + 2], buf[cursor + 3]]) as usize;
    let end = payload_start + length;
    if end > buf.len() {
        return Err(MintError::BufferCorruption {
            offset: cursor,
            declared_len: TLV_HEADER_LEN + length,
            buffer_len: buf.len(),
        });
    }

    Ok(Step::Record {
        record: TlvRecord {
            tag,
            offset: cursor,
            payload: &buf[payload_start..end],
        },
        next: end,
    })
}

/// Return the payload of the first record tagged `target`.
///
/// `Ok(None)` means the buffer was scanned to the end without a match. A
/// record that runs past the buffer fails the whole lookup, even if a match
/// was never going to be found after it.
pub fn find_extension(buf: &[u8], target: u16) -> Result<Option<&[u8]>, MintError> {
    let mut cursor = 0;
    loop {
        match step(buf, cursor)? {
            Step::End => return Ok(None),
            Step::Record { record, .. } if record.tag == target => {
                log::debug!(
                    "found extension {} at offset {} ({} bytes)",
                    target,
                    record.offset,
                    record.payload.len()
                );
                return Ok(Some(record.payload));
            }
            Step::Record { next, .. } => cursor = next,
        }
    }
}

/// Iterate over every record in the buffer.
///
/// Yields an error once and then stops if a record is corrupt.
pub fn records(buf: &[u8]) -> Records<'_> {
    Records {
        buf,
        cursor: 0,
        failed: false,
    }
}

pub struct Records<'a> {
    buf: &'a [u8],
    cursor: usize,
    failed: bool,
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<TlvRecord<'a>, MintError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match step(self.buf, self.cursor) {
            Ok(Step::End) => None,
            Ok(Step::Record { record, next }) => {
                self.cursor = next;
                Some(Ok(record))
            }
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}

/// Encode one record. Used to build account layouts and test fixtures.
pub fn encode_record(tag: u16, payload: &[u8]) -> Result<Vec<u8>, MintError> {
    let length = u16::try_from(payload.len()).map_err(|_| {
        MintError::Serialization(format!(
            "extension payload of {} bytes exceeds u16 length",
            payload.len()
        ))
    })?;
    let mut out = Vec::with_capacity(TLV_HEADER_LEN + payload.len());
    out.extend_from_slice(&tag.to_le_bytes());
    out.extend_from_slice(&length.to_le_bytes());
    out.extend_from_slice(payload);
    Ok(out)
}
