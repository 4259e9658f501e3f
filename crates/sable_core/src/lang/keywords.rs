//! Define the reserved keyword vocabulary for the Sable language.
//!
//! This module is the single source of truth for reserved words: a stable identifier
//! ([`KeywordId`]) plus a const metadata table ([`KEYWORDS`]) that records canonical spellings,
//! aliases, categories and provenance.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**, except where explicit aliases are defined.
//! - Contextual words such as `get`, `set`, `value` and `assembly` are *not* reserved; the parser
//!   recognizes them as identifiers in the few places they matter.
//!
//! ## Examples
//! ```rust
//! use sable_core::lang::keywords::{self, KeywordId};
//!
//! assert_eq!(keywords::from_str("switch"), Some(KeywordId::Match)); // alias
//! assert_eq!(keywords::as_str(KeywordId::Match), "match");
//! assert!(keywords::is_modifier(KeywordId::Static));
//! ```

use super::registry::{Since, Stability};

/// Stable identifier for every reserved keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordId {
    // Control flow / statements
    If,
    Else,
    While,
    For,
    In,
    Loop,
    Return,
    Break,
    Continue,
    Match,

    // Declarations
    Function,
    Class,
    Struct,
    Interface,
    Enum,
    Namespace,
    Module,
    Import,
    Include,
    As,
    Property,
    Constructor,

    // Bindings
    Var,
    Let,
    Const,

    // Expressions / literals
    New,
    This,
    Null,
    True,
    False,

    // Modifiers
    Public,
    Private,
    Protected,
    Internal,
    Static,
    Abstract,
    Virtual,
    Override,
    Sealed,
    Readonly,
    Async,
}

/// High-level grouping for documentation and tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeywordCategory {
    ControlFlow,
    Declaration,
    Binding,
    Expression,
    Literal,
    Modifier,
}

/// Metadata for a keyword.
#[derive(Debug, Clone, Copy)]
pub struct KeywordInfo {
    pub id: KeywordId,
    pub canonical: &'static str,
    pub aliases: &'static [&'static str],
    pub category: KeywordCategory,
    pub since: Since,
    pub stability: Stability,
}

/// Registry of all keywords.
///
/// ## Notes
/// - The ordering is not semantically meaningful, but is grouped for readability.
pub const KEYWORDS: &[KeywordInfo] = &[
    // Control flow / statements
    info(KeywordId::If, "if", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Else, "else", &[], KeywordCategory::ControlFlow),
    info(KeywordId::While, "while", &[], KeywordCategory::ControlFlow),
    info(KeywordId::For, "for", &["foreach"], KeywordCategory::ControlFlow),
    info(KeywordId::In, "in", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Loop, "loop", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Return, "return", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Break, "break", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Continue, "continue", &[], KeywordCategory::ControlFlow),
    info(KeywordId::Match, "match", &["switch"], KeywordCategory::ControlFlow),
    // Declarations
    info(KeywordId::Function, "function", &[], KeywordCategory::Declaration),
    info(KeywordId::Class, "class", &[], KeywordCategory::Declaration),
    info(KeywordId::Struct, "struct", &[], KeywordCategory::Declaration),
    info(KeywordId::Interface, "interface", &[], KeywordCategory::Declaration),
    info(KeywordId::Enum, "enum", &[], KeywordCategory::Declaration),
    info(KeywordId::Namespace, "namespace", &[], KeywordCategory::Declaration),
    info(KeywordId::Module, "module", &[], KeywordCategory::Declaration),
    info(KeywordId::Import, "import", &["using"], KeywordCategory::Declaration),
    info(KeywordId::Include, "include", &[], KeywordCategory::Declaration),
    info(KeywordId::As, "as", &[], KeywordCategory::Declaration),
    info(KeywordId::Property, "property", &[], KeywordCategory::Declaration),
    info(KeywordId::Constructor, "constructor", &[], KeywordCategory::Declaration),
    // Bindings
    info(KeywordId::Var, "var", &[], KeywordCategory::Binding),
    info(KeywordId::Let, "let", &[], KeywordCategory::Binding),
    info(KeywordId::Const, "const", &[], KeywordCategory::Binding),
    // Expressions / literals
    info(KeywordId::New, "new", &[], KeywordCategory::Expression),
    info(KeywordId::This, "this", &[], KeywordCategory::Expression),
    info(KeywordId::Null, "null", &[], KeywordCategory::Literal),
    info(KeywordId::True, "true", &[], KeywordCategory::Literal),
    info(KeywordId::False, "false", &[], KeywordCategory::Literal),
    // Modifiers
    info(KeywordId::Public, "public", &["pub"], KeywordCategory::Modifier),
    info(KeywordId::Private, "private", &[], KeywordCategory::Modifier),
    info(KeywordId::Protected, "protected", &[], KeywordCategory::Modifier),
    info(KeywordId::Internal, "internal", &[], KeywordCategory::Modifier),
    info(KeywordId::Static, "static", &[], KeywordCategory::Modifier),
    info(KeywordId::Abstract, "abstract", &[], KeywordCategory::Modifier),
    info(KeywordId::Virtual, "virtual", &[], KeywordCategory::Modifier),
    info(KeywordId::Override, "override", &[], KeywordCategory::Modifier),
    info(KeywordId::Sealed, "sealed", &[], KeywordCategory::Modifier),
    info(KeywordId::Readonly, "readonly", &[], KeywordCategory::Modifier),
    info(KeywordId::Async, "async", &[], KeywordCategory::Modifier),
];

/// Canonical spelling.
pub fn as_str(id: KeywordId) -> &'static str {
    info_for(id).canonical
}

/// Accepted alias spellings.
pub fn aliases(id: KeywordId) -> &'static [&'static str] {
    info_for(id).aliases
}

/// Category.
pub fn category(id: KeywordId) -> KeywordCategory {
    info_for(id).category
}

/// Return `true` for declaration modifiers (`public`, `static`, ...).
pub fn is_modifier(id: KeywordId) -> bool {
    category(id) == KeywordCategory::Modifier
}

/// Full metadata.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: KeywordId) -> &'static KeywordInfo {
    KEYWORDS.iter().find(|k| k.id == id).expect("keyword info missing")
}

/// Lookup by spelling (canonical or alias).
///
/// ## Notes
/// - Matching is **case-sensitive**.
pub fn from_str(s: &str) -> Option<KeywordId> {
    if let Some(k) = KEYWORDS.iter().find(|k| k.canonical == s) {
        return Some(k.id);
    }
    KEYWORDS
        .iter()
        .find(|k| {
            let aliases: &[&str] = k.aliases;
            aliases.contains(&s)
        })
        .map(|k| k.id)
}

// --- helpers -----------------------------------------------------------------

const fn info(
    id: KeywordId,
    canonical: &'static str,
    aliases: &'static [&'static str],
    category: KeywordCategory,
) -> KeywordInfo {
    KeywordInfo {
        id,
        canonical,
        aliases,
        category,
        since: Since(0, 1),
        stability: Stability::Stable,
    }
}
