//! Fuzz target for daemon reply decoding.
//!
//! Run with: cargo +nightly fuzz run fuzz_response_decode
//!
//! The daemon reply is an unframed byte stream; this feeds arbitrary byte
//! sequences through the decode path to find panics on malformed input.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Invalid UTF-8 must surface as a classified error, never a panic
    let _ = battkit_core::socket::wire::decode_response(data.to_vec());
});
