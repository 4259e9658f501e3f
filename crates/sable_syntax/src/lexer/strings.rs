//! String and interpolated-string scanning.

use super::{LexError, Lexer, Mode, Token, TokenKind};
use crate::ast::Location;

impl<'a> Lexer<'a> {
    /// Scan a `"..."` literal; the opening quote is already consumed.
    pub(super) fn scan_string(&mut self, start: Location) {
        let mut value = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.errors.push(LexError::UnterminatedString { location: start });
                    return;
                }
                Some('"') => {
                    self.advance();
                    break;
                }
                Some('\\') => {
                    self.advance();
                    if let Some(c) = self.escape() {
                        value.push(c);
                    }
                }
                Some(c) => {
                    self.advance();
                    value.push(c);
                }
            }
        }
        self.tokens.push(Token::new(TokenKind::String, value, start.line, start.column));
    }

    /// Scan interpolated-string text up to the next hole, or the closing quote.
    pub(super) fn scan_interp_text(&mut self) {
        let start = self.location();
        let mut text = String::new();
        loop {
            match self.peek() {
                None | Some('\n') => {
                    self.errors.push(LexError::UnterminatedString { location: start });
                    self.modes.pop();
                    return;
                }
                Some('"') => {
                    self.flush_interp_text(&mut text, start);
                    let end = self.location();
                    self.advance();
                    self.tokens.push(Token::new(TokenKind::InterpEnd, "\"", end.line, end.column));
                    self.modes.pop();
                    return;
                }
                Some('{') if self.peek_next() == Some('{') => {
                    self.advance();
                    self.advance();
                    text.push('{');
                }
                Some('}') if self.peek_next() == Some('}') => {
                    self.advance();
                    self.advance();
                    text.push('}');
                }
                Some('{') => {
                    self.flush_interp_text(&mut text, start);
                    let hole = self.location();
                    self.advance();
                    self.tokens.push(Token::new(TokenKind::HoleStart, "{", hole.line, hole.column));
                    self.modes.push(Mode::Hole { depth: 0 });
                    return;
                }
                Some('\\') => {
                    self.advance();
                    if let Some(c) = self.escape() {
                        text.push(c);
                    }
                }
                Some(c) => {
                    self.advance();
                    text.push(c);
                }
            }
        }
    }

    fn flush_interp_text(&mut self, text: &mut String, start: Location) {
        if !text.is_empty() {
            self.tokens
                .push(Token::new(TokenKind::InterpText, std::mem::take(text), start.line, start.column));
        }
    }

    /// Decode the character after a backslash.
    fn escape(&mut self) -> Option<char> {
        let location = self.location();
        let c = self.advance()?;
        let decoded = match c {
            'n' => '\n',
            't' => '\t',
            'r' => '\r',
            '0' => '\0',
            '\\' => '\\',
            '"' => '"',
            '\'' => '\'',
            '{' => '{',
            '}' => '}',
            other => {
                self.errors.push(LexError::InvalidEscape { ch: other, location });
                return None;
            }
        };
        Some(decoded)
    }
}

#[cfg(test)]
mod tests {
    use crate::lexer::{TokenKind, lex};

    #[test]
    fn test_string_escapes() {
        let tokens = lex(r#""a\n\"b\"""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].text, "a\n\"b\"");
    }

    #[test]
    fn test_interpolated_string_flattens_holes() {
        let tokens = lex(r#"$"Hello {user.name}, {{x}}!""#).unwrap();
        let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
        assert_eq!(kinds[0], TokenKind::InterpStart);
        assert_eq!(tokens[1].text, "Hello ");
        assert_eq!(kinds[2], TokenKind::HoleStart);
        assert_eq!(tokens[3].text, "user");
        assert_eq!(kinds[6], TokenKind::HoleEnd);
        assert_eq!(tokens[7].text, ", {x}!");
        assert_eq!(kinds[8], TokenKind::InterpEnd);
        assert_eq!(kinds[9], TokenKind::Eof);
    }

    #[test]
    fn test_interpolation_hole_with_nested_braces() {
        let tokens = lex(r#"$"{match x { _ => 1 }}""#).unwrap();
        let hole_ends = tokens.iter().filter(|t| t.kind == TokenKind::HoleEnd).count();
        assert_eq!(hole_ends, 1);
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    }

    #[test]
    fn test_unterminated_string() {
        assert!(lex("\"abc\nx").is_err());
        assert!(lex("$\"abc {x").is_err());
    }
}
