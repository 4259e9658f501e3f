//! Attribute vocabulary the compiler itself understands.
//!
//! Most attributes are host-defined and described by the host manifest (see [`crate::host`]). This
//! module centralizes the few spellings the compiler gives meaning to, so downstream code doesn't
//! need stringly-typed comparisons:
//! - the **foreign marker** (`[Extern]` and its aliases) that exempts a declaration from registration
//!   and call validation, and
//! - a fixed table of common short aliases (`required`, `obsolete`, HTTP verbs, ...) mapping onto
//!   canonical host attribute names.
//!
//! ## Examples
//! ```rust
//! use sable_core::lang::attributes;
//!
//! assert!(attributes::is_foreign_marker("Extern"));
//! assert!(attributes::is_foreign_marker("Sable.ExternAttribute"));
//! assert_eq!(attributes::normalize("System.ObsoleteAttribute"), "Obsolete");
//! assert_eq!(attributes::alias_target("get"), Some("HttpGet"));
//! ```

use crate::lang::registry::{self, LangItemInfo, Since, Stability};

/// Stable identifier for compiler-recognized attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeId {
    /// The declaration is provided by the host; its definition lives outside the compilation unit.
    Extern,
}

/// Suffix carried by host attribute type names (`ObsoleteAttribute`).
pub const ATTRIBUTE_SUFFIX: &str = "Attribute";

/// Metadata entry for a compiler-recognized attribute.
pub type AttributeInfo = LangItemInfo<AttributeId>;

/// Registry of compiler-recognized attributes.
pub const ATTRIBUTES: &[AttributeInfo] = &[LangItemInfo {
    id: AttributeId::Extern,
    canonical: "Extern",
    aliases: &["Foreign", "HostBinding", "Native"],
    description: "Bind a declaration to a host-provided definition; skips registration and call validation.",
    since: Since(0, 1),
    stability: Stability::Stable,
    examples: &[],
}];

/// Short spellings accepted for common host attributes, mapped to the canonical (normalized) name.
///
/// Keys are compared case-insensitively.
pub const ATTRIBUTE_ALIASES: &[(&str, &str)] = &[
    ("required", "Required"),
    ("obsolete", "Obsolete"),
    ("deprecated", "Obsolete"),
    ("serializable", "Serializable"),
    ("flags", "Flags"),
    ("test", "Test"),
    ("get", "HttpGet"),
    ("post", "HttpPost"),
    ("put", "HttpPut"),
    ("delete", "HttpDelete"),
    ("patch", "HttpPatch"),
    ("route", "Route"),
];

/// Resolve an attribute spelling to its stable id (namespace prefix and `Attribute` suffix ignored).
pub fn from_str(name: &str) -> Option<AttributeId> {
    let normalized = normalize(name);
    registry::lookup(ATTRIBUTES, normalized).or_else(|| {
        ATTRIBUTES
            .iter()
            .find(|a| {
                a.canonical.eq_ignore_ascii_case(normalized)
                    || a.aliases.iter().any(|alias| alias.eq_ignore_ascii_case(normalized))
            })
            .map(|a| a.id)
    })
}

/// Return the canonical spelling for a compiler-recognized attribute.
pub fn as_str(id: AttributeId) -> &'static str {
    info_for(id).canonical
}

/// Return the metadata entry for a compiler-recognized attribute.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: AttributeId) -> &'static AttributeInfo {
    ATTRIBUTES.iter().find(|a| a.id == id).expect("attribute info missing")
}

/// Return `true` if `name` spells the foreign/host-binding marker.
pub fn is_foreign_marker(name: &str) -> bool {
    from_str(name) == Some(AttributeId::Extern)
}

/// Strip a namespace prefix and the `Attribute` suffix from an attribute name.
///
/// A bare `Attribute` is returned unchanged.
pub fn normalize(name: &str) -> &str {
    let simple = name.rsplit('.').next().unwrap_or(name);
    match simple.strip_suffix(ATTRIBUTE_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => simple,
    }
}

/// Look up the canonical name behind a short alias (case-insensitive).
pub fn alias_target(name: &str) -> Option<&'static str> {
    ATTRIBUTE_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(name))
        .map(|(_, target)| *target)
}
