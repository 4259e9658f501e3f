//! Small helper APIs for working with `Token` / `TokenKind`.
//!
//! These reduce repetitive `matches!(...)` at call sites when working with id-based tokens.

use crate::lexer::{Token, TokenKind};
use sable_core::lang::keywords::{self, KeywordId};
use sable_core::lang::operators::OperatorId;
use sable_core::lang::punctuation::PunctuationId;

impl TokenKind {
    /// Return the keyword id, if this is a keyword token.
    pub fn keyword_id(&self) -> Option<KeywordId> {
        match self {
            TokenKind::Keyword(id) => Some(*id),
            _ => None,
        }
    }

    /// Return `true` if this is the given keyword.
    pub fn is_keyword(&self, id: KeywordId) -> bool {
        matches!(self, TokenKind::Keyword(k) if *k == id)
    }

    /// Return `true` if this is the given operator.
    pub fn is_operator(&self, id: OperatorId) -> bool {
        matches!(self, TokenKind::Operator(o) if *o == id)
    }

    /// Return `true` if this is the given punctuation.
    pub fn is_punctuation(&self, id: PunctuationId) -> bool {
        matches!(self, TokenKind::Punctuation(p) if *p == id)
    }

    /// Return `true` for declaration modifier keywords.
    pub fn is_modifier(&self) -> bool {
        self.keyword_id().is_some_and(keywords::is_modifier)
    }
}

impl Token {
    /// Return `true` if this is an identifier spelled `name` (contextual words like `get`).
    pub fn is_ident_named(&self, name: &str) -> bool {
        self.kind == TokenKind::Ident && self.text == name
    }

    /// Return `true` if the identifier text starts with an upper-case letter.
    pub fn is_capitalized(&self) -> bool {
        self.kind == TokenKind::Ident && starts_uppercase(&self.text)
    }
}

/// Return `true` if `name` starts with an ASCII upper-case letter.
pub fn starts_uppercase(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_uppercase())
}
