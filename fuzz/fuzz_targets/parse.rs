#![no_main]

use libfuzzer_sys::fuzz_target;
use sable::frontend::checker::NoopChecker;
use sable::frontend::diagnostics::{DiagnosticBag, Reporter};
use sable::frontend::{lexer, parser};

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Fuzz the scanner
        if let Ok(tokens) = lexer::lex(s) {
            // If scanning succeeds, fuzz the parser without symbol validation
            let mut bag = DiagnosticBag::new();
            let _ = parser::parse(&tokens, &mut bag, &mut NoopChecker);
            let _ = bag.has_errors();
        }
    }
});
