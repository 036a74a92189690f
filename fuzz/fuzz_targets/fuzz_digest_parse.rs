//! Fuzz target: `Digest` parsing and display.
//!
//! Arbitrary strings must never panic the parser, and anything that parses
//! must display back as the same hex in lowercase.

#![no_main]

use amdil_core::Digest;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(digest) = text.parse::<Digest>() {
        assert_eq!(digest.to_string(), text.to_ascii_lowercase());
    }

    let hashed = amdil_golden::digest_bytes(data);
    assert_eq!(hashed.to_string().len(), 64, "SHA-256 hex must always be 64 chars");
});
