//! Fuzz target for Envelope::decode
//!
//! Feeds arbitrary byte sequences to the envelope parser to find:
//! - Parser crashes or panics
//! - Integer overflows in segment length arithmetic
//! - Buffer over-reads
//!
//! The parser should NEVER panic. All invalid inputs must return an error.

#![no_main]

use libfuzzer_sys::fuzz_target;
use wafer_proto::Envelope;

fuzz_target!(|data: &[u8]| {
    // Arbitrary bytes must parse or fail cleanly, never panic
    if let Ok(envelope) = Envelope::decode(data) {
        // Anything that parses must re-encode to the identical bytes
        assert_eq!(envelope.encode(), data);
    }
});
