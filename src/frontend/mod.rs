//! Sable Compiler Frontend
//!
//! This module contains the symbol-aware half of the frontend:
//! - `catalog`: the Host Symbol Catalog, indexed from the host manifest
//! - `attributes`: the Attribute Resolver
//! - `registry`: the Symbol Registry the parser validates references against
//! - `suggest`: "did you mean" suggestions
//! - `session`: the per-unit and per-project pipeline

// Syntax components are provided by the shared sable_syntax crate.
pub use sable_syntax::{ast, checker, diagnostics, lexer, parser};

pub mod attributes;
pub mod catalog;
pub mod registry;
pub mod session;
pub mod suggest;
