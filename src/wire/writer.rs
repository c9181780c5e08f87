//! # Wire Writer
//!
//! Forward writer over a preallocated exact-fit buffer.
//!
//! Because every record can compute its encoded size up front (including the
//! size of each nested message), fields are written in a single forward pass:
//! tag, then length varint for length-delimited fields, then payload. Nested
//! records write straight into the same buffer after their precomputed
//! length prefix, so no second length-fixup pass and no reallocation ever
//! happen.
//!
//! A [`WireError::BufferTooSmall`] from this module means the caller broke
//! the `encoded_len()`/`encode()` contract; correct callers allocate exactly
//! `encoded_len()` bytes immediately before encoding, which makes the error
//! unreachable.

use crate::error::{Result, WireError};
use crate::wire::{tag, varint, WireType};

/// Field-oriented writer filling a caller-owned buffer front to back.
#[derive(Debug)]
pub struct WireWriter<'a> {
    buf: &'a mut [u8],
    pos: usize,
}

impl<'a> WireWriter<'a> {
    /// Start a writer at the beginning of `buf`.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Bytes written so far.
    pub fn written(&self) -> usize {
        self.pos
    }

    /// Write one varint.
    pub fn write_varint(&mut self, v: u64) -> Result<()> {
        self.ensure(varint::encoded_len(v))?;
        self.pos = varint::encode(self.buf, self.pos, v);
        Ok(())
    }

    /// Write a field tag.
    pub fn write_tag(&mut self, field: u32, wire_type: WireType) -> Result<()> {
        self.write_varint(tag(field, wire_type))
    }

    /// Write a complete varint field: tag then value.
    pub fn write_varint_field(&mut self, field: u32, v: u64) -> Result<()> {
        self.write_tag(field, WireType::Varint)?;
        self.write_varint(v)
    }

    /// Write a complete length-delimited field: tag, length varint, payload.
    pub fn write_bytes_field(&mut self, field: u32, bytes: &[u8]) -> Result<()> {
        self.write_tag(field, WireType::LengthDelimited)?;
        self.write_varint(bytes.len() as u64)?;
        self.write_raw(bytes)
    }

    /// Copy raw bytes at the cursor.
    pub fn write_raw(&mut self, bytes: &[u8]) -> Result<()> {
        self.ensure(bytes.len())?;
        self.buf[self.pos..self.pos + bytes.len()].copy_from_slice(bytes);
        self.pos += bytes.len();
        Ok(())
    }

    fn ensure(&self, extra: usize) -> Result<()> {
        let available = self.buf.len() - self.pos;
        if extra > available {
            return Err(WireError::BufferTooSmall {
                needed: extra,
                available,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_varint_field_layout() {
        let mut buf = [0u8; 3];
        let mut writer = WireWriter::new(&mut buf);
        writer.write_varint_field(1, 300).unwrap();
        assert_eq!(writer.written(), 3);
        assert_eq!(buf, [0x08, 0xAC, 0x02]);
    }

    #[test]
    fn test_write_bytes_field_layout() {
        let mut buf = [0u8; 7];
        let mut writer = WireWriter::new(&mut buf);
        writer.write_bytes_field(2, b"0xabc").unwrap();
        assert_eq!(writer.written(), 7);
        assert_eq!(&buf, &[0x12, 0x05, 0x30, 0x78, 0x61, 0x62, 0x63]);
    }

    #[test]
    fn test_exact_fit_buffer() {
        let mut buf = [0u8; 2];
        let mut writer = WireWriter::new(&mut buf);
        writer.write_varint_field(1, 5).unwrap();
        assert_eq!(writer.written(), 2);
    }

    #[test]
    fn test_undersized_buffer_rejected() {
        let mut buf = [0u8; 2];
        let mut writer = WireWriter::new(&mut buf);
        let err = writer.write_bytes_field(2, b"0xabc");
        assert!(matches!(err, Err(WireError::BufferTooSmall { .. })));
    }

    #[test]
    fn test_sequential_fields_share_buffer() {
        let mut buf = [0u8; 5];
        let mut writer = WireWriter::new(&mut buf);
        writer.write_varint_field(1, 1).unwrap();
        writer.write_varint_field(3, 7).unwrap();
        writer.write_varint(0x7F).unwrap();
        assert_eq!(buf, [0x08, 0x01, 0x18, 0x07, 0x7F]);
    }
}
