//! Syntax frontend for the Sable language: tokens, a reference scanner, the AST, the diagnostics model,
//! and the recursive-descent parser.
//!
//! The parser does not own symbol knowledge. It consults a [`checker::SymbolChecker`] while it builds
//! call, constructor and member-access nodes, and it writes every diagnostic into a
//! [`diagnostics::Reporter`]. The compiler crate supplies the real registry; [`checker::NoopChecker`]
//! accepts everything and is handy for pure syntax work.
//!
//! ## Examples
//! ```rust
//! use sable_syntax::checker::NoopChecker;
//! use sable_syntax::diagnostics::{DiagnosticBag, Reporter};
//! use sable_syntax::{lexer, parser};
//!
//! let tokens = lexer::lex("function main() { println(\"hi\"); }").unwrap();
//! let mut bag = DiagnosticBag::new();
//! let program = parser::parse(&tokens, &mut bag, &mut NoopChecker);
//! assert_eq!(program.statements.len(), 1);
//! assert!(!bag.has_errors());
//! ```
//!
//! ## See also
//! - `sable_core::lang` for the registry-backed vocabulary the scanner and parser match on.

pub mod ast;
pub mod checker;
pub mod diagnostics;
pub mod lexer;
pub mod parser;
pub mod token_helpers;
