//! Reference scanner for Sable source text.
//!
//! Handles:
//! - Keywords and identifiers (registry lookup, ASCII identifiers)
//! - Integer and float literals (`1..5` stays a range, not a float)
//! - Plain and interpolated (`$"..{expr}.."`) string literals
//! - `//` line comments and `/* */` block comments
//! - Operators and punctuation with longest-match
//!
//! ## Module Structure
//!
//! - `tokens` - Token types (TokenKind, Token)
//! - `strings` - String and interpolated-string scanning

mod strings;
pub mod tokens;

pub use tokens::{Token, TokenKind, keyword_id};

use crate::ast::Location;
use crate::diagnostics::{Diagnostic, DiagnosticCode};
use sable_core::lang::operators::OperatorId;
use sable_core::lang::punctuation::PunctuationId;

/// Scanner failure.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("unexpected character '{ch}'")]
    UnexpectedChar { ch: char, location: Location },
    #[error("unterminated string literal")]
    UnterminatedString { location: Location },
    #[error("unterminated block comment")]
    UnterminatedComment { location: Location },
    #[error("invalid numeric literal '{text}'")]
    InvalidNumber { text: String, location: Location },
    #[error("unknown escape sequence '\\{ch}'")]
    InvalidEscape { ch: char, location: Location },
}

impl LexError {
    pub fn location(&self) -> Location {
        match self {
            LexError::UnexpectedChar { location, .. }
            | LexError::UnterminatedString { location }
            | LexError::UnterminatedComment { location }
            | LexError::InvalidNumber { location, .. }
            | LexError::InvalidEscape { location, .. } => *location,
        }
    }
}

impl From<&LexError> for Diagnostic {
    fn from(err: &LexError) -> Self {
        let code = match err {
            LexError::UnterminatedString { .. } | LexError::UnterminatedComment { .. } => {
                DiagnosticCode::UnterminatedLiteral
            }
            _ => DiagnosticCode::InvalidToken,
        };
        Diagnostic::error(code, err.to_string()).at(err.location())
    }
}

/// Scanner mode; interpolated strings nest code inside string text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Inside the text of `$"..."`.
    Interp,
    /// Inside a `{...}` hole; `depth` counts nested braces opened within the hole.
    Hole { depth: usize },
}

/// Scanner for Sable source code.
pub struct Lexer<'a> {
    source: &'a str,
    chars: std::iter::Peekable<std::str::CharIndices<'a>>,
    current_pos: usize,
    line: usize,
    column: usize,
    modes: Vec<Mode>,
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl<'a> Lexer<'a> {
    /// Create a new scanner for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.char_indices().peekable(),
            current_pos: 0,
            line: 1,
            column: 1,
            modes: Vec::new(),
            tokens: Vec::new(),
            errors: Vec::new(),
        }
    }

    /// Tokenize the entire source.
    ///
    /// The token stream always ends with an `Eof` token.
    pub fn tokenize(mut self) -> Result<Vec<Token>, Vec<LexError>> {
        while !self.is_at_end() {
            match self.modes.last() {
                Some(Mode::Interp) => self.scan_interp_text(),
                _ => self.scan_token(),
            }
        }

        if let Some(Mode::Interp | Mode::Hole { .. }) = self.modes.last() {
            self.errors.push(LexError::UnterminatedString {
                location: self.location(),
            });
        }

        let (line, column) = (self.line, self.column);
        self.tokens.push(Token::new(TokenKind::Eof, "", line, column));

        if self.errors.is_empty() {
            Ok(self.tokens)
        } else {
            Err(self.errors)
        }
    }

    // ========================================================================
    // Core character handling
    // ========================================================================

    fn is_at_end(&mut self) -> bool {
        self.chars.peek().is_none()
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, c)| *c)
    }

    fn peek_next(&self) -> Option<char> {
        let mut iter = self.source[self.current_pos..].chars();
        iter.next();
        iter.next()
    }

    fn advance(&mut self) -> Option<char> {
        let (pos, c) = self.chars.next()?;
        self.current_pos = pos + c.len_utf8();
        if c == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(c)
    }

    fn location(&self) -> Location {
        Location::new(self.line, self.column)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    // ========================================================================
    // Main scanning dispatch
    // ========================================================================

    fn scan_token(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }

        let start = self.location();
        let start_pos = self.current_pos;
        let Some(c) = self.advance() else {
            return;
        };

        match c {
            '/' => {
                if self.match_char('/') {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                } else if self.match_char('*') {
                    self.skip_block_comment(start);
                } else if self.match_char('=') {
                    self.add_op(OperatorId::SlashEq, start_pos, start);
                } else {
                    self.add_op(OperatorId::Slash, start_pos, start);
                }
            }
            '+' => self.operator(
                start_pos,
                start,
                OperatorId::Plus,
                &[('+', OperatorId::PlusPlus), ('=', OperatorId::PlusEq)],
            ),
            '-' => self.operator(
                start_pos,
                start,
                OperatorId::Minus,
                &[('-', OperatorId::MinusMinus), ('=', OperatorId::MinusEq)],
            ),
            '*' => self.operator(start_pos, start, OperatorId::Star, &[('=', OperatorId::StarEq)]),
            '%' => self.add_op(OperatorId::Percent, start_pos, start),
            '=' => {
                if self.match_char('=') {
                    self.add_op(OperatorId::EqEq, start_pos, start);
                } else if self.match_char('>') {
                    self.add_punct(PunctuationId::FatArrow, start_pos, start);
                } else {
                    self.add_op(OperatorId::Eq, start_pos, start);
                }
            }
            '!' => self.operator(start_pos, start, OperatorId::Bang, &[('=', OperatorId::NotEq)]),
            '<' => self.operator(start_pos, start, OperatorId::Lt, &[('=', OperatorId::LtEq)]),
            '>' => self.operator(start_pos, start, OperatorId::Gt, &[('=', OperatorId::GtEq)]),
            '&' if self.match_char('&') => self.add_op(OperatorId::AndAnd, start_pos, start),
            '|' if self.match_char('|') => self.add_op(OperatorId::OrOr, start_pos, start),
            '.' => {
                if self.match_char('.') {
                    if self.match_char('=') {
                        self.add_op(OperatorId::DotDotEq, start_pos, start);
                    } else {
                        self.add_op(OperatorId::DotDot, start_pos, start);
                    }
                } else {
                    self.add_punct(PunctuationId::Dot, start_pos, start);
                }
            }
            ',' => self.add_punct(PunctuationId::Comma, start_pos, start),
            ';' => self.add_punct(PunctuationId::Semicolon, start_pos, start),
            ':' => self.add_punct(PunctuationId::Colon, start_pos, start),
            '?' => self.add_punct(PunctuationId::Question, start_pos, start),
            '(' => self.add_punct(PunctuationId::LParen, start_pos, start),
            ')' => self.add_punct(PunctuationId::RParen, start_pos, start),
            '[' => self.add_punct(PunctuationId::LBracket, start_pos, start),
            ']' => self.add_punct(PunctuationId::RBracket, start_pos, start),
            '{' => {
                if let Some(Mode::Hole { depth }) = self.modes.last_mut() {
                    *depth += 1;
                }
                self.add_punct(PunctuationId::LBrace, start_pos, start);
            }
            '}' => match self.modes.last_mut() {
                Some(Mode::Hole { depth: 0 }) => {
                    self.modes.pop();
                    self.tokens.push(Token::new(TokenKind::HoleEnd, "}", start.line, start.column));
                }
                Some(Mode::Hole { depth }) => {
                    *depth -= 1;
                    self.add_punct(PunctuationId::RBrace, start_pos, start);
                }
                _ => self.add_punct(PunctuationId::RBrace, start_pos, start),
            },
            '"' => self.scan_string(start),
            '$' if self.peek() == Some('"') => {
                self.advance();
                self.tokens.push(Token::new(TokenKind::InterpStart, "$\"", start.line, start.column));
                self.modes.push(Mode::Interp);
            }
            '0'..='9' => self.scan_number(start_pos, start),
            _ if is_ident_start(c) => self.scan_identifier(start_pos, start),
            _ => self.errors.push(LexError::UnexpectedChar { ch: c, location: start }),
        }
    }

    fn skip_block_comment(&mut self, start: Location) {
        loop {
            match self.advance() {
                Some('*') if self.peek() == Some('/') => {
                    self.advance();
                    return;
                }
                Some(_) => {}
                None => {
                    self.errors.push(LexError::UnterminatedComment { location: start });
                    return;
                }
            }
        }
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn add_token(&mut self, kind: TokenKind, start_pos: usize, start: Location) {
        let text = &self.source[start_pos..self.current_pos];
        self.tokens.push(Token::new(kind, text, start.line, start.column));
    }

    fn add_op(&mut self, id: OperatorId, start_pos: usize, start: Location) {
        self.add_token(TokenKind::Operator(id), start_pos, start);
    }

    fn add_punct(&mut self, id: PunctuationId, start_pos: usize, start: Location) {
        self.add_token(TokenKind::Punctuation(id), start_pos, start);
    }

    /// Try to match a compound operator, falling back to the simple one.
    fn operator(&mut self, start_pos: usize, start: Location, simple: OperatorId, compounds: &[(char, OperatorId)]) {
        for (c, id) in compounds {
            if self.match_char(*c) {
                self.add_op(*id, start_pos, start);
                return;
            }
        }
        self.add_op(simple, start_pos, start);
    }

    // ========================================================================
    // Numbers and identifiers
    // ========================================================================

    fn scan_number(&mut self, start_pos: usize, start: Location) {
        let mut is_float = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() || c == '_' {
                self.advance();
            } else if c == '.' && !is_float && self.peek_next().is_some_and(|n| n.is_ascii_digit()) {
                is_float = true;
                self.advance();
            } else if (c == 'e' || c == 'E') && self.peek_next().is_some_and(|n| n.is_ascii_digit() || n == '-') {
                is_float = true;
                self.advance();
                self.match_char('-');
            } else {
                break;
            }
        }

        let text: String = self.source[start_pos..self.current_pos].chars().filter(|c| *c != '_').collect();
        let valid = if is_float {
            text.parse::<f64>().is_ok()
        } else {
            text.parse::<i64>().is_ok()
        };
        if !valid {
            self.errors.push(LexError::InvalidNumber { text, location: start });
            return;
        }
        let kind = if is_float { TokenKind::Float } else { TokenKind::Int };
        self.tokens.push(Token::new(kind, text, start.line, start.column));
    }

    fn scan_identifier(&mut self, start_pos: usize, start: Location) {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }

        let spelling = &self.source[start_pos..self.current_pos];
        let kind = match keyword_id(spelling) {
            Some(id) => TokenKind::Keyword(id),
            None => TokenKind::Ident,
        };
        self.tokens.push(Token::new(kind, spelling, start.line, start.column));
    }
}

// ============================================================================
// Helper functions
// ============================================================================

/// Check if a character can start an identifier (ASCII-only).
fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

/// Check if a character can continue an identifier (ASCII-only).
fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Convenience function to lex a source string.
///
/// This is a shorthand for `Lexer::new(source).tokenize()`.
#[tracing::instrument(skip_all, fields(source_len = source.len()))]
pub fn lex(source: &str) -> Result<Vec<Token>, Vec<LexError>> {
    Lexer::new(source).tokenize()
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use sable_core::lang::keywords::KeywordId;
    use sable_core::lang::punctuation;

    fn kinds(source: &str) -> Vec<TokenKind> {
        lex(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_punctuation_registry_parity() {
        for info in punctuation::PUNCTUATION {
            let tokens = lex(info.canonical).unwrap();
            assert_eq!(tokens[0].kind, TokenKind::Punctuation(info.id), "lexing {:?}", info.canonical);
        }
    }

    #[test]
    fn test_operator_registry_parity() {
        for info in sable_core::lang::operators::OPERATORS {
            for spelling in info.spellings {
                let tokens = lex(spelling).unwrap();
                assert_eq!(tokens.len(), 2, "{spelling} must lex to a single token");
                assert_eq!(tokens[0].kind, TokenKind::Operator(info.id));
            }
        }
    }

    #[test]
    fn test_keywords_and_aliases() {
        assert_eq!(
            kinds("function foreach using x"),
            vec![
                TokenKind::Keyword(KeywordId::Function),
                TokenKind::Keyword(KeywordId::For),
                TokenKind::Keyword(KeywordId::Import),
                TokenKind::Ident,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_positions_are_one_based() {
        let tokens = lex("var x = 1;\n  foo();").unwrap();
        assert_eq!((tokens[0].line, tokens[0].column), (1, 1));
        let foo = tokens.iter().find(|t| t.text == "foo").unwrap();
        assert_eq!((foo.line, foo.column), (2, 3));
    }

    #[test]
    fn test_comments_are_skipped() {
        assert_eq!(
            kinds("a // line\n/* block\n */ b"),
            vec![TokenKind::Ident, TokenKind::Ident, TokenKind::Eof]
        );
    }

    #[test]
    fn test_unterminated_block_comment() {
        let errs = lex("a /* never closed").unwrap_err();
        assert!(matches!(errs[0], LexError::UnterminatedComment { .. }));
    }

    #[test]
    fn test_range_not_float() {
        assert_eq!(
            kinds("1..5"),
            vec![
                TokenKind::Int,
                TokenKind::Operator(OperatorId::DotDot),
                TokenKind::Int,
                TokenKind::Eof
            ]
        );
        assert_eq!(kinds("1.5"), vec![TokenKind::Float, TokenKind::Eof]);
    }

    #[test]
    fn test_numbers_strip_underscores() {
        let tokens = lex("1_000").unwrap();
        assert_eq!(tokens[0].text, "1000");
    }

    #[test]
    fn test_unexpected_character() {
        let errs = lex("a # b").unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(matches!(errs[0], LexError::UnexpectedChar { ch: '#', .. }));
    }
}
