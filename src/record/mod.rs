//! # Record Machinery
//!
//! The bridge between the wire primitives and the typed record kinds.
//!
//! Each record kind declares its fixed field layout as static data — a
//! [`FieldSpec`] table mapping field number to wire type — and one generic
//! decode loop serves every record: read a tag, look it up in the table,
//! merge into the typed field on a hit, forward-skip on a miss. A miss is
//! either an unrecognized field number or a recognized number carrying an
//! unexpected wire type; both take the skip path so that schema evolution on
//! either side of the wire never turns into a decode error.
//!
//! ## Decode guarantees
//! - Absent fields keep their zero value (`Default`), so "absent" and
//!   "present with zero value" are indistinguishable after decode
//! - Repeated fields preserve occurrence order exactly
//! - Malformed input surfaces as a typed [`WireError`]; no partial record is
//!   ever silently accepted, and no input can cause a panic
//! - Nested decode depth is bounded by
//!   [`MAX_NESTING_DEPTH`](crate::wire::MAX_NESTING_DEPTH)

pub mod claim;
pub mod validator;
pub mod valset;

use std::fmt::Debug;

use bytes::Bytes;
use tracing::trace;

use crate::error::{Result, WireError};
use crate::wire::reader::WireReader;
use crate::wire::writer::WireWriter;
use crate::wire::{tag, varint, WireType, MAX_NESTING_DEPTH};

/// One row of a record's static field table.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// Field number as it appears on the wire (always >= 1)
    pub number: u32,
    /// Field name, for diagnostics only
    pub name: &'static str,
    /// The wire type this field is encoded with
    pub wire_type: WireType,
}

/// A fixed-layout record that can be sized, encoded, and decoded.
///
/// Implementors provide the field table plus the typed per-field actions;
/// the buffer plumbing, the exact-fit allocation, and the known-vs-unknown
/// dispatch loop are shared across all record kinds.
pub trait Record: Default + Debug + Sized {
    /// Record name, for diagnostics only
    const NAME: &'static str;

    /// Static field layout in ascending field-number order.
    const FIELDS: &'static [FieldSpec];

    /// Exact encoded size in bytes, counting only non-zero-valued fields.
    fn encoded_len(&self) -> usize;

    /// Write every non-zero field, in field-number order, into `writer`.
    fn encode_fields(&self, writer: &mut WireWriter<'_>) -> Result<()>;

    /// Decode one occurrence of a known field into `self`.
    ///
    /// Only called with `field` numbers present in [`Self::FIELDS`] whose
    /// wire type matched the tag just read from `reader`.
    fn merge_field(&mut self, field: u32, reader: &mut WireReader<'_>, depth: usize) -> Result<()>;

    /// Serialize into a freshly allocated exact-fit buffer.
    fn encode(&self) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; self.encoded_len()];
        self.encode_to(&mut buf)?;
        Ok(buf)
    }

    /// Serialize into `buf`, returning the number of bytes written.
    ///
    /// Fails with [`WireError::BufferTooSmall`] when `buf` is shorter than
    /// [`encoded_len`](Record::encoded_len); that is a contract violation in
    /// the calling code, not a runtime condition.
    fn encode_to(&self, buf: &mut [u8]) -> Result<usize> {
        let needed = self.encoded_len();
        if buf.len() < needed {
            return Err(WireError::BufferTooSmall {
                needed,
                available: buf.len(),
            });
        }
        let mut writer = WireWriter::new(&mut buf[..needed]);
        self.encode_fields(&mut writer)?;
        Ok(writer.written())
    }

    /// Serialize into a shared [`Bytes`] handle.
    fn encode_bytes(&self) -> Result<Bytes> {
        self.encode().map(Bytes::from)
    }

    /// Decode a record from an untrusted byte slice.
    fn decode(buf: &[u8]) -> Result<Self> {
        Self::decode_at_depth(buf, 0)
    }

    /// Decode loop with explicit nesting depth, for recursive delegation
    /// from embedded-message fields.
    fn decode_at_depth(buf: &[u8], depth: usize) -> Result<Self> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(WireError::DepthLimitExceeded(MAX_NESTING_DEPTH));
        }
        let mut record = Self::default();
        let mut reader = WireReader::new(buf);
        while reader.has_remaining() {
            let (field, wire_type) = reader.read_tag()?;
            match Self::FIELDS.iter().find(|spec| spec.number == field) {
                Some(spec) if spec.wire_type == wire_type => {
                    record.merge_field(field, &mut reader, depth)?;
                }
                Some(spec) => {
                    trace!(
                        record = Self::NAME,
                        field = spec.name,
                        expected = spec.wire_type as u8,
                        got = wire_type as u8,
                        "wire type mismatch, skipping field"
                    );
                    reader.skip(wire_type)?;
                }
                None => {
                    trace!(
                        record = Self::NAME,
                        field,
                        wire_type = wire_type as u8,
                        "skipping unrecognized field"
                    );
                    reader.skip(wire_type)?;
                }
            }
        }
        Ok(record)
    }
}

/// Encoded size of a varint field, zero when the value is suppressed.
pub(crate) fn varint_field_len(field: u32, value: u64) -> usize {
    if value == 0 {
        0
    } else {
        key_len(field, WireType::Varint) + varint::encoded_len(value)
    }
}

/// Encoded size of a string/bytes field, zero when the payload is empty.
pub(crate) fn bytes_field_len(field: u32, payload_len: usize) -> usize {
    if payload_len == 0 {
        0
    } else {
        delimited_len(field, payload_len)
    }
}

/// Encoded size of one embedded-message occurrence.
///
/// Unlike scalars, a present element is always written, even with an
/// all-zero (empty) body; suppression applies to the repeated field having
/// no elements at all.
pub(crate) fn message_field_len(field: u32, body_len: usize) -> usize {
    delimited_len(field, body_len)
}

fn delimited_len(field: u32, payload_len: usize) -> usize {
    key_len(field, WireType::LengthDelimited)
        + varint::encoded_len(payload_len as u64)
        + payload_len
}

fn key_len(field: u32, wire_type: WireType) -> usize {
    varint::encoded_len(tag(field, wire_type))
}

/// Decode a UTF-8 string payload, replacing invalid sequences.
///
/// The wire carries opaque bytes; address/claimer fields are expected to be
/// ASCII, and lossy replacement keeps a hostile payload from turning into a
/// decode failure for an otherwise well-formed record.
pub(crate) fn read_string(reader: &mut WireReader<'_>) -> Result<String> {
    let bytes = reader.read_bytes()?;
    Ok(String::from_utf8_lossy(bytes).into_owned())
}
