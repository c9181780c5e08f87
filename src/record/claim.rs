//! # Generic Claim
//!
//! A flat event claim record. Claim variants are not polymorphically
//! serializable in the surrounding protocol, so the variant is carried as a
//! plain `i32` discriminant next to an opaque event hash.
//!
//! ## Wire Layout
//! ```text
//! 1: event_nonce   varint (u64)
//! 2: claim_type    varint (i32, two's-complement, not zigzag)
//! 3: hash          length-delimited raw bytes
//! 4: event_claimer length-delimited UTF-8
//! ```
//!
//! A negative `claim_type` encodes as its sign-extended 64-bit varint
//! (always 10 bytes). Wasteful, but required for bit-compatibility with the
//! deployed wire format.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::{bytes_field_len, read_string, varint_field_len, FieldSpec, Record};
use crate::wire::reader::WireReader;
use crate::wire::writer::WireWriter;
use crate::wire::WireType;

/// A generic event claim reported by an orchestrator.
///
/// `hash` is opaque content-addressing bytes with no text encoding assumed.
/// Absence and explicit-empty are indistinguishable: an absent hash decodes
/// to an empty vector, and an empty vector is never written.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericClaim {
    /// Ordering key for claims
    pub event_nonce: u64,
    /// Discriminant selecting the true claim variant
    pub claim_type: i32,
    /// Opaque event hash
    pub hash: Vec<u8>,
    /// Reporter identity
    pub event_claimer: String,
}

const EVENT_NONCE: u32 = 1;
const CLAIM_TYPE: u32 = 2;
const HASH: u32 = 3;
const EVENT_CLAIMER: u32 = 4;

impl GenericClaim {
    /// Construct from parts.
    pub fn new(
        event_nonce: u64,
        claim_type: i32,
        hash: Vec<u8>,
        event_claimer: impl Into<String>,
    ) -> Self {
        Self {
            event_nonce,
            claim_type,
            hash,
            event_claimer: event_claimer.into(),
        }
    }
}

impl Record for GenericClaim {
    const NAME: &'static str = "GenericClaim";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            number: EVENT_NONCE,
            name: "event_nonce",
            wire_type: WireType::Varint,
        },
        FieldSpec {
            number: CLAIM_TYPE,
            name: "claim_type",
            wire_type: WireType::Varint,
        },
        FieldSpec {
            number: HASH,
            name: "hash",
            wire_type: WireType::LengthDelimited,
        },
        FieldSpec {
            number: EVENT_CLAIMER,
            name: "event_claimer",
            wire_type: WireType::LengthDelimited,
        },
    ];

    fn encoded_len(&self) -> usize {
        // i32 -> u64 sign-extends, matching the 10-byte negative encoding
        varint_field_len(EVENT_NONCE, self.event_nonce)
            + varint_field_len(CLAIM_TYPE, self.claim_type as u64)
            + bytes_field_len(HASH, self.hash.len())
            + bytes_field_len(EVENT_CLAIMER, self.event_claimer.len())
    }

    fn encode_fields(&self, writer: &mut WireWriter<'_>) -> Result<()> {
        if self.event_nonce != 0 {
            writer.write_varint_field(EVENT_NONCE, self.event_nonce)?;
        }
        if self.claim_type != 0 {
            writer.write_varint_field(CLAIM_TYPE, self.claim_type as u64)?;
        }
        if !self.hash.is_empty() {
            writer.write_bytes_field(HASH, &self.hash)?;
        }
        if !self.event_claimer.is_empty() {
            writer.write_bytes_field(EVENT_CLAIMER, self.event_claimer.as_bytes())?;
        }
        Ok(())
    }

    fn merge_field(&mut self, field: u32, reader: &mut WireReader<'_>, _depth: usize) -> Result<()> {
        match field {
            EVENT_NONCE => self.event_nonce = reader.read_varint()?,
            // Truncation to the low 32 bits reverses the sign extension
            CLAIM_TYPE => self.claim_type = reader.read_varint()? as i32,
            HASH => self.hash = reader.read_bytes()?.to_vec(),
            EVENT_CLAIMER => self.event_claimer = read_string(reader)?,
            _ => unreachable!("dispatch checked the field table"),
        }
        Ok(())
    }
}
