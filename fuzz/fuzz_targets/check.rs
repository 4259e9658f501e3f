#![no_main]

use libfuzzer_sys::fuzz_target;
use sable::{CompileOptions, check_source};

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Full pipeline: scanner, parser and registry validation against the host catalog
        let _ = check_source("fuzz.sbl", s, &CompileOptions::new());
    }
});
