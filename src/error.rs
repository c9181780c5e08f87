//! # Error Types
//!
//! Error handling for the wire codec.
//!
//! This module defines all error variants that can occur while decoding an
//! untrusted byte stream, plus the single encode-side contract violation.
//!
//! ## Error Categories
//! - **Malformed input**: overlong varints, truncated buffers, illegal tags
//! - **Length violations**: negative or cursor-overflowing lengths
//! - **Group violations**: unbalanced or excessively nested groups
//! - **Encode contract**: a buffer smaller than `encoded_len()` (a defect in
//!   the calling code, not a runtime condition)
//!
//! Unknown fields and wire-type mismatches are deliberately *not* errors;
//! they take the skip path so that schema evolution never breaks old readers.
//!
//! All errors implement `std::error::Error` for interoperability.
//!
//! ## Example Usage
//! ```rust
//! use bridge_wire::error::{Result, WireError};
//! use bridge_wire::{BridgeValidator, Record};
//!
//! fn parse(bytes: &[u8]) -> Result<BridgeValidator> {
//!     BridgeValidator::decode(bytes)
//! }
//!
//! // A lone continuation byte is a truncated varint.
//! assert_eq!(parse(&[0x80]), Err(WireError::UnexpectedEnd));
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// WireError is the primary error type for all codec operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WireError {
    #[error("malformed varint: continuation exceeds 10 bytes")]
    MalformedVarint,

    #[error("unexpected end of buffer")]
    UnexpectedEnd,

    #[error("invalid tag: field {field} with wire type {wire_type}")]
    InvalidTag { field: u32, wire_type: u8 },

    #[error("negative length in length-delimited field")]
    NegativeLength,

    #[error("group nesting did not return to zero")]
    TruncatedGroup,

    #[error("nesting depth exceeds the limit of {0}")]
    DepthLimitExceeded(usize),

    #[error("buffer too small: need {needed} bytes, have {available}")]
    BufferTooSmall { needed: usize, available: usize },
}

/// Type alias for Results using WireError
pub type Result<T> = std::result::Result<T, WireError>;
