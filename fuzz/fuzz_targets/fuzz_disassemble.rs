//! Fuzz target: decode and dump arbitrary IL binaries.
//!
//! Verifies that malformed streams are rejected with an error instead of
//! panicking, and that a successful decode always yields a listing with the
//! two header lines.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let mut listing = Vec::new();
    if amdil_disasm::disassemble(&mut listing, data).is_ok() {
        let lines = listing.iter().filter(|&&b| b == b'\n').count();
        assert!(lines >= 2, "listing must contain the header lines");
        assert_eq!(listing.last(), Some(&b'\n'), "listing must end with a newline");
    }
});
