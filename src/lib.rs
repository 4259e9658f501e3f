#![forbid(unsafe_code)]
//! Sable Language Compiler Frontend
//!
//! This crate turns Sable source into a validated syntax tree. The parser (from `sable_syntax`)
//! consults a symbol registry while it builds call, constructor and member-access nodes, so
//! unknown names, arity mismatches and misplaced attributes are reported during the parse. The
//! registry is backed by a catalog of host types, methods and attributes built from the manifest
//! in `sable_core::host`.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Validation**: Symbol validation never panics or returns errors; it reports diagnostics and returns `false`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.
//!
//! - **True invariants**: If a panic represents a compiler bug (logic error), use `.expect("INVARIANT: reason")` with a
//!   clear explanation.

pub mod cli;
pub mod frontend;

pub use frontend::ast;
pub use frontend::diagnostics;
pub use frontend::lexer;
pub use frontend::parser;

pub use frontend::registry::SymbolRegistry;
pub use frontend::session::{CatalogConfig, CompileOptions, CompiledUnit, FrontendError, ProjectReport, check_source};
