#![no_main]

use bridge_wire::{BridgeValidator, GenericClaim, Record, ValidatorSetSnapshot};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Fuzz record decoding - test for panics, crashes, infinite loops
    let _ = BridgeValidator::decode(data);
    let _ = ValidatorSetSnapshot::decode(data);
    let _ = GenericClaim::decode(data);
});
