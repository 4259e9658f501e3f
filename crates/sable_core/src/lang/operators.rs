//! Operator vocabulary.
//!
//! This module defines the canonical operator set along with basic metadata such as precedence,
//! associativity, and fixity.
//!
//! ## Notes
//! - Lookup via [`from_str`] is **case-sensitive**.
//! - `precedence` is a relative ordering where higher binds tighter. The parser's precedence ladder
//!   (assignment → `||` → `&&` → equality → relational → range → additive → multiplicative → unary →
//!   postfix) must agree with this table; a guardrail test checks the ordering.
//!
//! ## Examples
//! ```rust
//! use sable_core::lang::operators::{self, OperatorId};
//!
//! assert_eq!(operators::from_str("+="), Some(OperatorId::PlusEq));
//! assert!(operators::info_for(OperatorId::Star).precedence > operators::info_for(OperatorId::Plus).precedence);
//! ```

use super::registry::Stability;

/// Define how operators associate when chained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Associativity {
    Left,
    Right,
    None,
}

/// Define where an operator appears relative to its operand(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fixity {
    Infix,
    Prefix,
    /// Prefix or postfix (`++`, `--`).
    Affix,
}

/// Stable identifier for every operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperatorId {
    // Arithmetic
    Plus,
    Minus,
    Star,
    Slash,
    Percent,

    // Comparison
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Logical
    AndAnd,
    OrOr,
    Bang,

    // Assignment
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,

    // Increment / decrement
    PlusPlus,
    MinusMinus,

    // Ranges
    DotDot,
    DotDotEq,
}

/// Metadata for an operator.
#[derive(Debug, Clone, Copy)]
pub struct OperatorInfo {
    pub id: OperatorId,
    pub spellings: &'static [&'static str],
    pub precedence: u8,
    pub associativity: Associativity,
    pub fixity: Fixity,
    pub stability: Stability,
}

/// Registry of all operators.
pub const OPERATORS: &[OperatorInfo] = &[
    // Assignment
    op(OperatorId::Eq, &["="], 10, Associativity::Right, Fixity::Infix),
    op(OperatorId::PlusEq, &["+="], 10, Associativity::Right, Fixity::Infix),
    op(OperatorId::MinusEq, &["-="], 10, Associativity::Right, Fixity::Infix),
    op(OperatorId::StarEq, &["*="], 10, Associativity::Right, Fixity::Infix),
    op(OperatorId::SlashEq, &["/="], 10, Associativity::Right, Fixity::Infix),
    // Logical
    op(OperatorId::OrOr, &["||"], 20, Associativity::Left, Fixity::Infix),
    op(OperatorId::AndAnd, &["&&"], 30, Associativity::Left, Fixity::Infix),
    // Comparison
    op(OperatorId::EqEq, &["=="], 40, Associativity::Left, Fixity::Infix),
    op(OperatorId::NotEq, &["!="], 40, Associativity::Left, Fixity::Infix),
    op(OperatorId::Lt, &["<"], 50, Associativity::Left, Fixity::Infix),
    op(OperatorId::LtEq, &["<="], 50, Associativity::Left, Fixity::Infix),
    op(OperatorId::Gt, &[">"], 50, Associativity::Left, Fixity::Infix),
    op(OperatorId::GtEq, &[">="], 50, Associativity::Left, Fixity::Infix),
    // Ranges
    op(OperatorId::DotDot, &[".."], 55, Associativity::None, Fixity::Infix),
    op(OperatorId::DotDotEq, &["..="], 55, Associativity::None, Fixity::Infix),
    // Arithmetic
    op(OperatorId::Plus, &["+"], 60, Associativity::Left, Fixity::Infix),
    op(OperatorId::Minus, &["-"], 60, Associativity::Left, Fixity::Infix),
    op(OperatorId::Star, &["*"], 70, Associativity::Left, Fixity::Infix),
    op(OperatorId::Slash, &["/"], 70, Associativity::Left, Fixity::Infix),
    op(OperatorId::Percent, &["%"], 70, Associativity::Left, Fixity::Infix),
    // Unary / affix
    op(OperatorId::Bang, &["!"], 80, Associativity::Right, Fixity::Prefix),
    op(OperatorId::PlusPlus, &["++"], 90, Associativity::None, Fixity::Affix),
    op(OperatorId::MinusMinus, &["--"], 90, Associativity::None, Fixity::Affix),
];

/// Return the full metadata entry for an operator.
///
/// ## Panics
/// - If the registry is missing an entry for `id` (this indicates a programming error).
pub fn info_for(id: OperatorId) -> &'static OperatorInfo {
    OPERATORS.iter().find(|o| o.id == id).expect("operator info missing")
}

/// Return the canonical spelling of an operator.
pub fn as_str(id: OperatorId) -> &'static str {
    info_for(id).spellings[0]
}

/// Resolve an operator spelling to its identifier.
pub fn from_str(spelling: &str) -> Option<OperatorId> {
    OPERATORS
        .iter()
        .find(|o| {
            let spellings: &[&str] = o.spellings;
            spellings.contains(&spelling)
        })
        .map(|o| o.id)
}

/// Return `true` for compound and simple assignment operators.
pub fn is_assignment(id: OperatorId) -> bool {
    info_for(id).precedence == 10
}

// --- helpers -----------------------------------------------------------------

const fn op(
    id: OperatorId,
    spellings: &'static [&'static str],
    precedence: u8,
    associativity: Associativity,
    fixity: Fixity,
) -> OperatorInfo {
    OperatorInfo {
        id,
        spellings,
        precedence,
        associativity,
        fixity,
        stability: Stability::Stable,
    }
}
