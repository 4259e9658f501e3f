//! Shareable metadata for `sable_core::lang` registries.
//!
//! The `sable_core::lang` module is a set of **registry-first** vocabularies: keywords,
//! operators, punctuation and attribute spellings. This submodule provides the small,
//! dependency-free metadata types that are reused across all registries.
//!
//! ## Notes
//! - These types are intentionally lightweight and `Copy`-friendly so registries can live in
//!   `const` tables.
//! - Metadata is meant for tooling/docs/diagnostics; enforcement of syntax rules still lives
//!   in the lexer/parser.

/// Identify the language version a vocabulary item is available since, as `(major, minor)`.
///
/// ## Examples
/// ```rust
/// use sable_core::lang::registry::Since;
///
/// let since = Since(0, 1);
/// assert_eq!(since.to_string(), "0.1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Since(pub u16, pub u16);

impl std::fmt::Display for Since {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.0, self.1)
    }
}

/// Describe the lifecycle status of a language vocabulary item.
///
/// ## Notes
/// - This is intended for docs/tooling (e.g. to warn on deprecated spellings), not for
///   feature-gating by itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stability {
    Stable,
    Draft,
    Deprecated,
}

/// Represent a small example snippet for documentation.
#[derive(Debug, Clone, Copy)]
pub struct Example {
    pub code: &'static str,
    pub note: Option<&'static str>,
}

/// Shared metadata shape for "registry-first" vocabulary items.
///
/// Many language vocabularies share the same core fields:
/// - stable identity (`id`)
/// - accepted spellings (`canonical` + `aliases`)
/// - documentation (`description` + `examples`)
/// - provenance (`since`, `stability`)
///
/// Registries that need extra per-item data (e.g. operator precedence, keyword category) wrap this
/// shape in their own info type.
#[derive(Debug, Clone, Copy)]
pub struct LangItemInfo<Id> {
    pub id: Id,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub since: Since,
    pub stability: Stability,
    pub examples: &'static [Example],
}

/// Resolve a spelling against a registry table (canonical first, then aliases).
pub fn lookup<Id: Copy>(items: &[LangItemInfo<Id>], name: &str) -> Option<Id> {
    if let Some(item) = items.iter().find(|i| i.canonical == name) {
        return Some(item.id);
    }
    items
        .iter()
        .find(|i| {
            let aliases: &[&str] = i.aliases;
            aliases.contains(&name)
        })
        .map(|i| i.id)
}
