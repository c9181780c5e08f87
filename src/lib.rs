//! # bridge-wire
//!
//! Compact protobuf wire codec for validator-set bridging records.
//!
//! This crate hand-implements the proto3 wire format for the three fixed
//! record kinds a validator-set bridge exchanges with its counterparties:
//! [`BridgeValidator`], [`ValidatorSetSnapshot`], and [`GenericClaim`].
//! The encoding must stay bit-compatible with the deployed protobuf schema,
//! so the interesting work is the general-purpose machinery underneath:
//! varint coding, tag/wire-type multiplexing, length-delimited nested
//! framing, deterministic size precomputation, and depth-bounded forward
//! skip of unrecognized fields.
//!
//! ## Components
//! - [`wire`]: varint codec, [`WireReader`], [`WireWriter`], wire constants
//! - [`record`]: the [`Record`] trait, static field tables, and the three
//!   record kinds
//! - [`error`]: the [`WireError`] taxonomy for untrusted input
//!
//! ## Guarantees
//! - `decode(encode(r)) == r` for every record produced by the encoder
//! - Zero-valued fields are never written; absent fields decode to zero
//! - Unknown fields and wire-type mismatches are skipped, never errors
//! - Malformed input yields a typed error, never a panic, on any byte slice
//! - All operations are synchronous and retain no references past return
//!
//! ## Example
//! ```rust
//! use bridge_wire::{BridgeValidator, Record};
//!
//! let validator = BridgeValidator::new(300, "0xabc");
//! let bytes = validator.encode()?;
//! assert_eq!(bytes.len(), validator.encoded_len());
//!
//! let decoded = BridgeValidator::decode(&bytes)?;
//! assert_eq!(decoded, validator);
//! # Ok::<(), bridge_wire::WireError>(())
//! ```

pub mod error;
pub mod record;
pub mod wire;

pub use error::{Result, WireError};
pub use record::claim::GenericClaim;
pub use record::validator::BridgeValidator;
pub use record::valset::ValidatorSetSnapshot;
pub use record::{FieldSpec, Record};
pub use wire::reader::WireReader;
pub use wire::writer::WireWriter;
pub use wire::{WireType, MAX_NESTING_DEPTH, MAX_VARINT_LEN};
