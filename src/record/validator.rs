//! # Bridge Validator
//!
//! A single validator as seen by the bridge: its external-chain address and
//! its voting power. This is the leaf record embedded (repeated) inside a
//! [`ValidatorSetSnapshot`](crate::record::valset::ValidatorSetSnapshot).
//!
//! ## Wire Layout
//! ```text
//! 1: power            varint (u64)
//! 2: ethereum_address length-delimited UTF-8
//! ```

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::{bytes_field_len, read_string, varint_field_len, FieldSpec, Record};
use crate::wire::reader::WireReader;
use crate::wire::writer::WireWriter;
use crate::wire::WireType;

/// One validator's voting weight and external-chain address.
///
/// Proto3 semantics: a field absent from the wire decodes to its zero value,
/// and a zero-valued field is never written. A `BridgeValidator` whose power
/// is 0 and whose address is empty therefore encodes to zero bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeValidator {
    /// Voting weight; no upper bound beyond 64 bits
    pub power: u64,
    /// External-chain address, e.g. a 0x-prefixed hex string
    pub ethereum_address: String,
}

const POWER: u32 = 1;
const ETHEREUM_ADDRESS: u32 = 2;

impl BridgeValidator {
    /// Construct from parts.
    pub fn new(power: u64, ethereum_address: impl Into<String>) -> Self {
        Self {
            power,
            ethereum_address: ethereum_address.into(),
        }
    }
}

impl Record for BridgeValidator {
    const NAME: &'static str = "BridgeValidator";

    const FIELDS: &'static [FieldSpec] = &[
        FieldSpec {
            number: POWER,
            name: "power",
            wire_type: WireType::Varint,
        },
        FieldSpec {
            number: ETHEREUM_ADDRESS,
            name: "ethereum_address",
            wire_type: WireType::LengthDelimited,
        },
    ];

    fn encoded_len(&self) -> usize {
        varint_field_len(POWER, self.power)
            + bytes_field_len(ETHEREUM_ADDRESS, self.ethereum_address.len())
    }

    fn encode_fields(&self, writer: &mut WireWriter<'_>) -> Result<()> {
        if self.power != 0 {
            writer.write_varint_field(POWER, self.power)?;
        }
        if !self.ethereum_address.is_empty() {
            writer.write_bytes_field(ETHEREUM_ADDRESS, self.ethereum_address.as_bytes())?;
        }
        Ok(())
    }

    fn merge_field(&mut self, field: u32, reader: &mut WireReader<'_>, _depth: usize) -> Result<()> {
        match field {
            POWER => self.power = reader.read_varint()?,
            ETHEREUM_ADDRESS => self.ethereum_address = read_string(reader)?,
            _ => unreachable!("dispatch checked the field table"),
        }
        Ok(())
    }
}
