//! Sable language vocabulary registries.
//!
//! This module is the "front door" for language-level vocabulary: reserved keywords, operators,
//! punctuation, and the attribute spellings the compiler treats specially.
//!
//! The design goal is to avoid stringly-typed checks scattered across the compiler/tooling.
//! Instead, callers work with **stable IDs** (e.g. `KeywordId`, `OperatorId`) and look up
//! spellings/metadata via registry tables.
//!
//! ## Notes
//! - Registries are intentionally **pure**: no AST types, no IO, no side effects.
//! - The lexer/parser enforce syntax; registries provide spellings and metadata for shared use.
//!
//! ## Examples
//! ```rust
//! use sable_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("function"), Some(KeywordId::Function));
//! assert_eq!(keywords::as_str(KeywordId::If), "if");
//! ```

pub mod attributes;
pub mod keywords;
pub mod operators;
pub mod punctuation;
pub mod registry;
