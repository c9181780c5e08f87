//! # Wire Reader
//!
//! A bounds-checked cursor over an immutable byte buffer.
//!
//! The reader decodes tags, scalar fields, and length-delimited fields, and
//! can forward-skip a well-formed field of any wire type. Skipping handles
//! the deprecated group convention (start/end markers instead of a length
//! prefix) so that unknown fields from newer schemas never break decoding,
//! with nesting bounded by [`MAX_NESTING_DEPTH`](super::MAX_NESTING_DEPTH).
//!
//! The reader never retains references past a call and never reads outside
//! the slice it was constructed over.

use crate::error::{Result, WireError};
use crate::wire::{check_tag, varint, WireType, MAX_NESTING_DEPTH};

/// Cursor over an immutable byte slice.
#[derive(Debug)]
pub struct WireReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> WireReader<'a> {
    /// Start a reader at the beginning of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current cursor offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the cursor and the end of the buffer.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    /// True while at least one byte remains.
    pub fn has_remaining(&self) -> bool {
        self.pos < self.buf.len()
    }

    /// Read one varint and advance the cursor.
    pub fn read_varint(&mut self) -> Result<u64> {
        let (value, pos) = varint::decode(self.buf, self.pos)?;
        self.pos = pos;
        Ok(value)
    }

    /// Read a field tag and split it into field number and wire type.
    ///
    /// Fails with [`WireError::InvalidTag`] on field number zero, on the
    /// undefined wire types 6/7, and on an end-group marker (no record in
    /// this schema set opens a group at message level).
    pub fn read_tag(&mut self) -> Result<(u32, WireType)> {
        let raw = self.read_varint()?;
        check_tag(raw)
    }

    /// Read a length-delimited payload: a varint length followed by exactly
    /// that many bytes. Returns the sub-slice and advances past it.
    pub fn read_bytes(&mut self) -> Result<&'a [u8]> {
        let length = self.read_varint()?;
        // Lengths above i64::MAX would read as negative in a signed-length
        // implementation; reject them the same way.
        if length > i64::MAX as u64 {
            return Err(WireError::NegativeLength);
        }
        let len = length as usize;
        let end = self.pos.checked_add(len).ok_or(WireError::NegativeLength)?;
        if end > self.buf.len() {
            return Err(WireError::UnexpectedEnd);
        }
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    /// Read a 4-byte little-endian value (wire type 5).
    ///
    /// No current record uses fixed-width fields; this exists so the wire
    /// contract stays complete alongside the skip path.
    pub fn read_fixed32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read an 8-byte little-endian value (wire type 1).
    pub fn read_fixed64(&mut self) -> Result<u64> {
        let bytes = self.take(8)?;
        Ok(u64::from_le_bytes([
            bytes[0], bytes[1], bytes[2], bytes[3], bytes[4], bytes[5], bytes[6], bytes[7],
        ]))
    }

    /// Forward-skip one field of the given wire type.
    ///
    /// Groups are skipped by tracking start/end markers until the depth
    /// returns to zero; an end marker with no matching start, or a buffer
    /// that ends mid-group, fails with [`WireError::TruncatedGroup`].
    pub fn skip(&mut self, wire_type: WireType) -> Result<()> {
        match wire_type {
            WireType::StartGroup => self.skip_group(),
            WireType::EndGroup => Err(WireError::TruncatedGroup),
            scalar => self.skip_scalar(scalar),
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.remaining() < n {
            return Err(WireError::UnexpectedEnd);
        }
        let slice = &self.buf[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn skip_scalar(&mut self, wire_type: WireType) -> Result<()> {
        match wire_type {
            WireType::Varint => {
                self.read_varint()?;
            }
            WireType::Fixed64 => {
                self.take(8)?;
            }
            WireType::LengthDelimited => {
                self.read_bytes()?;
            }
            WireType::Fixed32 => {
                self.take(4)?;
            }
            WireType::StartGroup | WireType::EndGroup => unreachable!("handled by skip()"),
        }
        Ok(())
    }

    /// Skip a group body: consume tags until the matching end marker.
    fn skip_group(&mut self) -> Result<()> {
        let mut depth = 1usize;
        while depth > 0 {
            if !self.has_remaining() {
                return Err(WireError::TruncatedGroup);
            }
            let raw = self.read_varint()?;
            let (field, wire_raw) = super::split_tag(raw);
            let wire_type = WireType::from_raw(wire_raw).ok_or(WireError::InvalidTag {
                field,
                wire_type: wire_raw,
            })?;
            match wire_type {
                WireType::StartGroup => {
                    depth += 1;
                    if depth > MAX_NESTING_DEPTH {
                        return Err(WireError::DepthLimitExceeded(MAX_NESTING_DEPTH));
                    }
                }
                WireType::EndGroup => depth -= 1,
                scalar => self.skip_scalar(scalar)?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wire::tag;

    fn varint_bytes(v: u64) -> Vec<u8> {
        let mut buf = vec![0u8; varint::encoded_len(v)];
        varint::encode(&mut buf, 0, v);
        buf
    }

    #[test]
    fn test_read_tag_splits_fields() {
        let mut reader = WireReader::new(&[0x08, 0x12]);
        assert_eq!(reader.read_tag().unwrap(), (1, WireType::Varint));
        assert_eq!(reader.read_tag().unwrap(), (2, WireType::LengthDelimited));
        assert!(!reader.has_remaining());
    }

    #[test]
    fn test_read_tag_rejects_field_zero() {
        let mut reader = WireReader::new(&[0x00]);
        assert!(matches!(
            reader.read_tag(),
            Err(WireError::InvalidTag { field: 0, .. })
        ));
    }

    #[test]
    fn test_read_tag_rejects_undefined_wire_type() {
        // field 1, wire type 7
        let mut reader = WireReader::new(&[0x0F]);
        assert!(matches!(
            reader.read_tag(),
            Err(WireError::InvalidTag { wire_type: 7, .. })
        ));
    }

    #[test]
    fn test_read_bytes_exact_subslice() {
        let mut data = varint_bytes(5);
        data.extend_from_slice(b"0xabc");
        data.push(0x99);
        let mut reader = WireReader::new(&data);
        assert_eq!(reader.read_bytes().unwrap(), b"0xabc");
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_read_bytes_truncated_payload() {
        let mut data = varint_bytes(10);
        data.extend_from_slice(b"short");
        let mut reader = WireReader::new(&data);
        assert_eq!(reader.read_bytes(), Err(WireError::UnexpectedEnd));
    }

    #[test]
    fn test_read_bytes_negative_length() {
        // length u64::MAX reads as a negative signed quantity
        let data = varint_bytes(u64::MAX);
        let mut reader = WireReader::new(&data);
        assert_eq!(reader.read_bytes(), Err(WireError::NegativeLength));
    }

    #[test]
    fn test_read_fixed_widths() {
        let data = [
            0x78, 0x56, 0x34, 0x12, // fixed32
            0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x80, // fixed64
        ];
        let mut reader = WireReader::new(&data);
        assert_eq!(reader.read_fixed32().unwrap(), 0x1234_5678);
        assert_eq!(reader.read_fixed64().unwrap(), 0x8000_0000_0000_0001);
        assert_eq!(reader.read_fixed32(), Err(WireError::UnexpectedEnd));
    }

    #[test]
    fn test_skip_each_scalar_type() {
        let mut data = Vec::new();
        data.extend_from_slice(&varint_bytes(300)); // varint payload
        data.extend_from_slice(&[0u8; 8]); // fixed64 payload
        data.extend_from_slice(&varint_bytes(3));
        data.extend_from_slice(b"abc"); // length-delimited payload
        data.extend_from_slice(&[0u8; 4]); // fixed32 payload
        data.push(0x07); // trailing marker

        let mut reader = WireReader::new(&data);
        reader.skip(WireType::Varint).unwrap();
        reader.skip(WireType::Fixed64).unwrap();
        reader.skip(WireType::LengthDelimited).unwrap();
        reader.skip(WireType::Fixed32).unwrap();
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_skip_nested_group() {
        // group 5 { varint field, group 6 { } }
        let mut data = Vec::new();
        data.extend_from_slice(&varint_bytes(tag(1, WireType::Varint)));
        data.extend_from_slice(&varint_bytes(42));
        data.extend_from_slice(&varint_bytes(tag(6, WireType::StartGroup)));
        data.extend_from_slice(&varint_bytes(tag(6, WireType::EndGroup)));
        data.extend_from_slice(&varint_bytes(tag(5, WireType::EndGroup)));
        data.push(0xAA);

        let mut reader = WireReader::new(&data);
        reader.skip(WireType::StartGroup).unwrap();
        assert_eq!(reader.remaining(), 1);
    }

    #[test]
    fn test_skip_unterminated_group() {
        let mut data = Vec::new();
        data.extend_from_slice(&varint_bytes(tag(1, WireType::Varint)));
        data.extend_from_slice(&varint_bytes(42));
        let mut reader = WireReader::new(&data);
        assert_eq!(
            reader.skip(WireType::StartGroup),
            Err(WireError::TruncatedGroup)
        );
    }

    #[test]
    fn test_skip_bare_end_group() {
        let mut reader = WireReader::new(&[]);
        assert_eq!(
            reader.skip(WireType::EndGroup),
            Err(WireError::TruncatedGroup)
        );
    }

    #[test]
    fn test_skip_group_depth_bomb() {
        // More start markers than the nesting bound allows
        let mut data = Vec::new();
        for _ in 0..(MAX_NESTING_DEPTH + 1) {
            data.extend_from_slice(&varint_bytes(tag(1, WireType::StartGroup)));
        }
        let mut reader = WireReader::new(&data);
        assert_eq!(
            reader.skip(WireType::StartGroup),
            Err(WireError::DepthLimitExceeded(MAX_NESTING_DEPTH))
        );
    }
}
