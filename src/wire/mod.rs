//! # Wire Format Primitives
//!
//! Low-level varint coding, cursor-based reading, and exact-fit writing.
//!
//! This module provides the foundation for the codec, handling tag
//! multiplexing, length-delimited framing, and safe forward-skip of
//! unrecognized fields.
//!
//! ## Components
//! - **varint**: base-128 integer coding with exact size precomputation
//! - **WireReader**: bounds-checked cursor over an immutable byte slice
//! - **WireWriter**: forward writer over a preallocated exact-fit buffer
//!
//! ## Wire Format
//! ```text
//! [Tag(varint)] [Payload]   where tag = (field_number << 3) | wire_type
//! ```
//!
//! ## Security
//! - Varints reject continuations past 10 bytes (64-bit overflow)
//! - Lengths are validated before any slice or allocation
//! - Group nesting is bounded by [`MAX_NESTING_DEPTH`]

pub mod reader;
pub mod varint;
pub mod writer;

use serde::{Deserialize, Serialize};

use crate::error::WireError;

/// Max bytes a 64-bit varint may occupy (10 groups of 7 bits)
pub const MAX_VARINT_LEN: usize = 10;

/// Max nesting depth for embedded messages and group skips.
///
/// Bounds recursion against adversarial input; the on-wire schema itself
/// never nests deeper than two levels.
pub const MAX_NESTING_DEPTH: usize = 64;

/// The 3-bit payload framing selector carried in every tag.
///
/// Only `Varint` and `LengthDelimited` are produced by the current record
/// set; the fixed-width and group types exist so that unknown fields using
/// them can still be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum WireType {
    /// Base-128 integer (uint64/int32/uint32/bool)
    Varint = 0,
    /// 8-byte little-endian payload
    Fixed64 = 1,
    /// Varint length prefix followed by that many bytes
    LengthDelimited = 2,
    /// Deprecated group start marker (skip-only)
    StartGroup = 3,
    /// Deprecated group end marker (skip-only)
    EndGroup = 4,
    /// 4-byte little-endian payload
    Fixed32 = 5,
}

impl WireType {
    /// Decode the low 3 bits of a tag. Values 6 and 7 are undefined.
    pub fn from_raw(raw: u8) -> Option<Self> {
        match raw {
            0 => Some(WireType::Varint),
            1 => Some(WireType::Fixed64),
            2 => Some(WireType::LengthDelimited),
            3 => Some(WireType::StartGroup),
            4 => Some(WireType::EndGroup),
            5 => Some(WireType::Fixed32),
            _ => None,
        }
    }
}

/// Pack a field number and wire type into a tag value.
pub fn tag(field: u32, wire_type: WireType) -> u64 {
    (u64::from(field) << 3) | u64::from(wire_type as u8)
}

/// Split a decoded tag into field number and raw wire type bits.
pub fn split_tag(raw: u64) -> (u32, u8) {
    ((raw >> 3) as u32, (raw & 0x7) as u8)
}

/// Validate a tag read at message level: field numbers start at 1, wire
/// types 6/7 are undefined, and an end-group with no open group is illegal.
pub(crate) fn check_tag(raw: u64) -> crate::error::Result<(u32, WireType)> {
    let (field, wire_raw) = split_tag(raw);
    let wire_type = WireType::from_raw(wire_raw).ok_or(WireError::InvalidTag {
        field,
        wire_type: wire_raw,
    })?;
    if field == 0 || wire_type == WireType::EndGroup {
        return Err(WireError::InvalidTag {
            field,
            wire_type: wire_raw,
        });
    }
    Ok((field, wire_type))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_packing() {
        assert_eq!(tag(1, WireType::Varint), 0x08);
        assert_eq!(tag(2, WireType::LengthDelimited), 0x12);
        assert_eq!(tag(3, WireType::Varint), 0x18);
        assert_eq!(split_tag(0x12), (2, 2));
    }

    #[test]
    fn test_wire_type_raw_roundtrip() {
        for raw in 0u8..6 {
            let wt = WireType::from_raw(raw).expect("defined wire type");
            assert_eq!(wt as u8, raw);
        }
        assert_eq!(WireType::from_raw(6), None);
        assert_eq!(WireType::from_raw(7), None);
    }

    #[test]
    fn test_check_tag_rejects_field_zero() {
        assert_eq!(
            check_tag(tag(0, WireType::Varint)),
            Err(WireError::InvalidTag {
                field: 0,
                wire_type: 0
            })
        );
    }

    #[test]
    fn test_check_tag_rejects_bare_end_group() {
        assert_eq!(
            check_tag(tag(7, WireType::EndGroup)),
            Err(WireError::InvalidTag {
                field: 7,
                wire_type: 4
            })
        );
    }
}
