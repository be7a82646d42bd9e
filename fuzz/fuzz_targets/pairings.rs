//! Feeds arbitrary bytes to the pairings parser, which must reject bad
//! input with an error rather than panic.

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(json) = std::str::from_utf8(data) {
        let _ = preassign::tabbycat::parse_pairings(json);
    }
});
