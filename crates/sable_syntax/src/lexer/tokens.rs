//! Token types for the Sable scanner.
//!
//! Tokens carry the shape the parser consumes: a kind, the text, and a 1-based line/column.
//! Vocabulary tokens carry registry ids from `sable_core::lang` instead of spellings.
//!
//! ## Notes
//! - `text` of a `String` or `InterpText` token is the unescaped content, without quotes.
//! - Interpolated strings are flattened into
//!   `InterpStart (InterpText | HoleStart <tokens> HoleEnd)* InterpEnd`.

use crate::ast::Location;
use sable_core::lang::keywords::{self, KeywordId};
use sable_core::lang::operators::OperatorId;
use sable_core::lang::punctuation::PunctuationId;

/// Kind of token produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Keyword(KeywordId),
    Operator(OperatorId),
    Punctuation(PunctuationId),

    Ident,
    Int,
    Float,
    String,

    InterpStart,
    InterpText,
    HoleStart,
    HoleEnd,
    InterpEnd,

    Eof,
}

/// A token with its kind, text and position.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            kind,
            text: text.into(),
            line,
            column,
        }
    }

    pub fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    /// Human-readable description used in syntax errors.
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Ident => format!("identifier '{}'", self.text),
            TokenKind::Int | TokenKind::Float => format!("number '{}'", self.text),
            TokenKind::String => "string literal".to_string(),
            TokenKind::InterpStart => "interpolated string".to_string(),
            TokenKind::InterpText | TokenKind::HoleStart | TokenKind::HoleEnd | TokenKind::InterpEnd => {
                "interpolated string fragment".to_string()
            }
            TokenKind::Keyword(_) => format!("keyword '{}'", self.text),
            TokenKind::Operator(_) | TokenKind::Punctuation(_) => format!("'{}'", self.text),
        }
    }
}

/// Resolve an identifier spelling to a keyword id, if reserved.
pub fn keyword_id(name: &str) -> Option<KeywordId> {
    keywords::from_str(name)
}
