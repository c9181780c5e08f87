//! # Varint Coding
//!
//! Base-128 variable-length coding for unsigned 64-bit integers.
//!
//! Each output byte carries 7 data bits, least-significant group first, with
//! the high bit set on every byte except the last. [`encoded_len`] computes
//! the exact output size without allocating, which is what lets the writer
//! fill an exact-fit buffer in a single forward pass.
//!
//! Signed 32-bit fields reuse this codec directly: a negative value is
//! sign-extended to 64 bits and encoded as its two's-complement varint
//! (10 bytes). Wasteful, but bit-compatible with the existing wire format.

use crate::error::{Result, WireError};
use crate::wire::MAX_VARINT_LEN;

/// Exact encoded size of `v` in bytes: one per started 7-bit group,
/// minimum 1 for zero.
pub fn encoded_len(v: u64) -> usize {
    // bit_length(v | 1) rounds up to whole 7-bit groups
    ((64 - (v | 1).leading_zeros() as usize) + 6) / 7
}

/// Write `v` at `pos` and return the new write position.
///
/// The caller guarantees `buf` has `encoded_len(v)` bytes available at
/// `pos`; the writer enforces this before delegating here.
pub fn encode(buf: &mut [u8], mut pos: usize, mut v: u64) -> usize {
    while v >= 0x80 {
        buf[pos] = (v as u8) | 0x80;
        v >>= 7;
        pos += 1;
    }
    buf[pos] = v as u8;
    pos + 1
}

/// Read a varint at `pos`, returning the value and the new cursor.
///
/// Fails with [`WireError::MalformedVarint`] when the continuation sequence
/// exceeds 10 bytes (a 64-bit value never needs more) and with
/// [`WireError::UnexpectedEnd`] when the buffer runs out before a
/// terminating byte.
pub fn decode(buf: &[u8], mut pos: usize) -> Result<(u64, usize)> {
    let mut value = 0u64;
    let mut shift = 0u32;
    while shift < (MAX_VARINT_LEN as u32) * 7 {
        let byte = *buf.get(pos).ok_or(WireError::UnexpectedEnd)?;
        pos += 1;
        value |= u64::from(byte & 0x7F) << shift;
        if byte < 0x80 {
            return Ok((value, pos));
        }
        shift += 7;
    }
    Err(WireError::MalformedVarint)
}
