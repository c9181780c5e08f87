//! # Validator Set Snapshot
//!
//! A versioned, ordered snapshot of the bridge validator set. The member
//! order is part of the signed payload in the surrounding protocol, so it
//! must round-trip exactly; repeated entries are ordered by occurrence on
//! the wire.
//!
//! ## Wire Layout
//! ```text
//! 1: nonce   varint (u64)
//! 2: members repeated length-delimited BridgeValidator
//! 3: height  varint (u64)
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::validator::BridgeValidator;
use crate::record::{message_field_len, varint_field_len, FieldSpec, Record};
use crate::wire::reader::WireReader;
use crate::wire::writer::WireWriter;
use crate::wire::WireType;

/// An ordered validator set at a given nonce and block height.
///
/// Owns its members by value; decoding never shares or retains buffers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorSetSnapshot {
    /// Monotonic version identifier for the set
    pub nonce: u64,
    /// Validators in signing order; order round-trips exactly
    pub members: Vec<BridgeValidator>,
    /// Reference block height the snapshot was taken at
    pub height: u64,
}

const NONCE: u32 = 1;
const MEMBERS: u32 = 2;
const HEIGHT: u32 = 3;

impl ValidatorSetSnapshot {
    /// Construct from parts.
    pub fn new(nonce: u64, members: Vec<BridgeValidator>, height: u64) -> Self {
        Self {
            nonce,
            members,
            height,
        }
    }
}

impl Record for ValidatorSetSnapshot {
    const NAME: &'static str = "ValidatorSetSnapshot";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            number: NONCE,
            name: "nonce",
            wire_type: WireType::Varint,
        },
        FieldSpec {
            number: MEMBERS,
            name: "members",
            wire_type: WireType::LengthDelimited,
        },
        FieldSpec {
            number: HEIGHT,
            name: "height",
            wire_type: WireType::Varint,
        },
    ];

    fn encoded_len(&self) -> usize {
        let members: usize = self
            .members
            .iter()
            .map(|member| message_field_len(MEMBERS, member.encoded_len()))
            .sum();
        varint_field_len(NONCE, self.nonce) + members + varint_field_len(HEIGHT, self.height)
    }

    fn encode_fields(&self, writer: &mut WireWriter<'_>) -> Result<()> {
        if self.nonce != 0 {
            writer.write_varint_field(NONCE, self.nonce)?;
        }
        for member in &self.members {
            // An all-zero member still gets a tag and a zero-length prefix;
            // only an empty sequence disappears from the wire.
            writer.write_tag(MEMBERS, WireType::LengthDelimited)?;
            writer.write_varint(member.encoded_len() as u64)?;
            member.encode_fields(writer)?;
        }
        if self.height != 0 {
            writer.write_varint_field(HEIGHT, self.height)?;
        }
        Ok(())
    }

    fn merge_field(&mut self, field: u32, reader: &mut WireReader<'_>, depth: usize) -> Result<()> {
        match field {
            NONCE => self.nonce = reader.read_varint()?,
            MEMBERS => {
                let body = reader.read_bytes()?;
                self.members
                    .push(BridgeValidator::decode_at_depth(body, depth + 1)?);
            }
            HEIGHT => self.height = reader.read_varint()?,
            _ => unreachable!("dispatch checked the field table"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValidatorSetSnapshot {
        ValidatorSetSnapshot::new(
            7,
            vec![
                BridgeValidator::new(100, "0xaaaa"),
                BridgeValidator::new(200, "0xbbbb"),
            ],
            12_345,
        )
    }

    #[test]
    fn test_roundtrip() {
        let valset = sample();
        let bytes = valset.encode().unwrap();
        assert_eq!(bytes.len(), valset.encoded_len());
        assert_eq!(ValidatorSetSnapshot::decode(&bytes).unwrap(), valset);
    }

    #[test]
    fn test_member_order_preserved() {
        let a = BridgeValidator::new(1, "0xa");
        let b = BridgeValidator::new(2, "0xb");
        let valset = ValidatorSetSnapshot::new(1, vec![a.clone(), b.clone()], 1);
        let decoded = ValidatorSetSnapshot::decode(&valset.encode().unwrap()).unwrap();
        assert_eq!(decoded.members, vec![a, b]);
    }

    #[test]
    fn test_empty_members_stay_empty() {
        let valset = ValidatorSetSnapshot::new(3, vec![], 9);
        let decoded = ValidatorSetSnapshot::decode(&valset.encode().unwrap()).unwrap();
        assert!(decoded.members.is_empty());
        assert_eq!(decoded, valset);
    }

    #[test]
    fn test_all_zero_member_roundtrips_as_element() {
        // A default member is still an element on the wire: tag + length 0
        let valset = ValidatorSetSnapshot::new(0, vec![BridgeValidator::default()], 0);
        let bytes = valset.encode().unwrap();
        assert_eq!(bytes, [0x12, 0x00]);
        let decoded = ValidatorSetSnapshot::decode(&bytes).unwrap();
        assert_eq!(decoded.members.len(), 1);
        assert_eq!(decoded.members[0], BridgeValidator::default());
    }

    #[test]
    fn test_field_order_on_wire() {
        let valset = sample();
        let bytes = valset.encode().unwrap();
        // nonce(1) first, members(2) next, height(3) last
        assert_eq!(bytes[0], 0x08);
        assert_eq!(bytes[2], 0x12);
        assert_eq!(bytes[bytes.len() - 3], 0x18);
    }

    #[test]
    fn test_zero_record_encodes_empty() {
        let valset = ValidatorSetSnapshot::default();
        assert_eq!(valset.encoded_len(), 0);
        assert!(valset.encode().unwrap().is_empty());
        assert_eq!(ValidatorSetSnapshot::decode(&[]).unwrap(), valset);
    }
}
