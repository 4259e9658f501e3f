//! Provide the canonical vocabulary and the host symbol-catalog manifest for the Sable compiler.
//!
//! This crate is intentionally small and dependency-free. It holds two kinds of data:
//! - `lang`: the language's own vocabulary (keywords, operators, punctuation, attribute spellings), and
//! - `host`: a declarative manifest of the host ecosystem (types, methods, generic templates, attributes)
//!   that the compiler's symbol catalog is built from.
//!
//! ## Notes
//!
//! - This is a "semantic core" crate: **no IO**, no global mutable state, and no compiler-specific types.
//! - The manifest is generated ahead of time per host ecosystem; the compiler never reflects over a
//!   running host. Lookup algorithms live in the compiler crate, not here.

pub mod host;
pub mod lang;
