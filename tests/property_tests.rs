//! Property-based tests for the Sable frontend
//!
//! These tests use proptest to verify invariants across many randomly
//! generated inputs, catching edge cases that hand-written tests might miss.

use proptest::prelude::*;
use sable::frontend::suggest::{did_you_mean, similar_names};
use sable::frontend::{lexer, parser};
use sable::diagnostics::DiagnosticBag;
use sable::{CompileOptions, check_source};

// =============================================================================
// Recovery Properties
// =============================================================================

#[cfg(test)]
mod recovery_tests {
    use super::*;
    use sable::frontend::checker::NoopChecker;

    proptest! {
        /// Property: a malformed statement costs exactly itself; every good statement after it survives.
        #[test]
        fn good_statements_survive_a_bad_one(count in 1usize..12, bad_at in 0usize..12) {
            let bad_at = bad_at % (count + 1);
            let mut source = String::new();
            for i in 0..count {
                if i == bad_at {
                    source.push_str("var = ;\n");
                }
                source.push_str(&format!("var v{i} = {i};\n"));
            }
            if bad_at == count {
                source.push_str("var = ;\n");
            }

            let tokens = lexer::lex(&source).unwrap();
            let mut bag = DiagnosticBag::new();
            let program = parser::parse(&tokens, &mut bag, &mut NoopChecker);
            prop_assert_eq!(program.statements.len(), count);
            prop_assert_eq!(bag.error_count(), 1);
        }

        /// Property: checking never panics and always yields a unit, whatever the token soup.
        #[test]
        fn checking_token_soup_always_yields_a_unit(
            words in prop::collection::vec(
                prop::sample::select(vec![
                    "var", "function", "class", "if", "else", "return", "new", "this", "x", "Foo",
                    "Console", ".", ",", ";", ":", "(", ")", "{", "}", "[", "]", "=", "+", "1", "\"s\"",
                ]),
                0..40,
            )
        ) {
            let source = words.join(" ");
            let unit = check_source("soup.sbl", &source, &CompileOptions::new()).unwrap();
            prop_assert_eq!(unit.source.as_deref(), Some(source.as_str()));
        }
    }
}

// =============================================================================
// Suggestion Properties
// =============================================================================

#[cfg(test)]
mod suggestion_tests {
    use super::*;

    proptest! {
        /// Property: a name one deletion away is always suggested.
        #[test]
        fn single_deletion_is_suggested(name in "[a-z][a-zA-Z0-9_]{2,12}", at in 0usize..13) {
            let at = at % name.len();
            let mut typo = name.clone();
            typo.remove(at);
            let suggestions = similar_names(&typo, [name.as_str()]);
            prop_assert_eq!(suggestions, vec![name]);
        }

        /// Property: suggestions are capped, distinct and never echo the needle.
        #[test]
        fn suggestions_are_capped_and_distinct(
            needle in "[a-c]{1,4}",
            candidates in prop::collection::vec("[a-c]{1,4}", 0..30),
        ) {
            let suggestions = similar_names(&needle, candidates.iter().map(String::as_str));
            prop_assert!(suggestions.len() <= 5);
            prop_assert!(!suggestions.contains(&needle));
            let mut unique = suggestions.clone();
            unique.sort();
            unique.dedup();
            prop_assert_eq!(unique.len(), suggestions.len());
            prop_assert_eq!(did_you_mean(&suggestions).is_some(), !suggestions.is_empty());
        }
    }
}
