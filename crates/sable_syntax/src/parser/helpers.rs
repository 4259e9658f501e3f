/// Token-stream helpers and error recovery.
///
/// This chunk contains the low-level primitives used throughout parsing:
/// - Peeking/consuming tokens (`peek`, `advance`)
/// - Matching / expecting keywords, operators, and punctuation
/// - Error recovery (`synchronize`) and brace skipping for the forward pass
/// - Routing diagnostics and checker calls to the right sink
impl<'a> Parser<'a> {
    // ========================================================================
    // Helpers
    // ========================================================================

    /// Return `true` if the current token is [`TokenKind::Eof`].
    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    /// Return the current token without consuming it.
    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    /// Return the token `n` positions ahead, clamped to the final `Eof`.
    fn peek_at(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    fn kind_at(&self, idx: usize) -> TokenKind {
        self.tokens[idx.min(self.tokens.len() - 1)].kind
    }

    /// Advance to the next token and return the token we just consumed.
    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.pos += 1;
        }
        &self.tokens[self.pos.saturating_sub(1)]
    }

    fn current_loc(&self) -> Location {
        self.peek().location()
    }

    fn check_keyword(&self, id: KeywordId) -> bool {
        self.peek().kind.is_keyword(id)
    }

    fn check_punct(&self, id: PunctuationId) -> bool {
        self.peek().kind.is_punctuation(id)
    }

    fn check_op(&self, id: OperatorId) -> bool {
        self.peek().kind.is_operator(id)
    }

    fn check_kind(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn match_keyword(&mut self, id: KeywordId) -> bool {
        if self.check_keyword(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_punct(&mut self, id: PunctuationId) -> bool {
        if self.check_punct(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn match_op(&mut self, id: OperatorId) -> bool {
        if self.check_op(id) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expected(&self, message: &str) -> SyntaxError {
        SyntaxError::Expected {
            message: message.to_string(),
            found: self.peek().describe(),
            location: self.current_loc(),
        }
    }

    fn unexpected(&self) -> SyntaxError {
        SyntaxError::Unexpected {
            found: self.peek().describe(),
            location: self.current_loc(),
        }
    }

    fn expect_keyword(&mut self, id: KeywordId, msg: &str) -> ParseResult<Location> {
        if self.check_keyword(id) {
            Ok(self.advance().location())
        } else {
            Err(self.expected(msg))
        }
    }

    fn expect_punct(&mut self, id: PunctuationId, msg: &str) -> ParseResult<Location> {
        if self.check_punct(id) {
            Ok(self.advance().location())
        } else {
            Err(self.expected(msg))
        }
    }

    fn expect_op(&mut self, id: OperatorId, msg: &str) -> ParseResult<Location> {
        if self.check_op(id) {
            Ok(self.advance().location())
        } else {
            Err(self.expected(msg))
        }
    }

    fn expect_kind(&mut self, kind: TokenKind, msg: &str) -> ParseResult<Location> {
        if self.check_kind(kind) {
            Ok(self.advance().location())
        } else {
            Err(self.expected(msg))
        }
    }

    /// Return `true` if the current token starts a construct that recovery must not swallow.
    fn at_recovery_boundary(&self) -> bool {
        let kind = self.peek().kind;
        [
            KeywordId::Function,
            KeywordId::Var,
            KeywordId::Const,
            KeywordId::For,
            KeywordId::If,
            KeywordId::While,
            KeywordId::Return,
        ]
        .into_iter()
        .any(|id| kind.is_keyword(id))
            || kind.is_punctuation(PunctuationId::LBrace)
            || kind.is_punctuation(PunctuationId::RBrace)
    }

    /// Skip tokens after a syntax error.
    ///
    /// Stops after consuming a `;`, or before a declaration keyword or a brace. If the failed
    /// construct (which began at `start`) consumed nothing, at least one token is skipped.
    fn synchronize(&mut self, start: usize) {
        while !self.is_at_end() {
            if self.match_punct(PunctuationId::Semicolon) {
                break;
            }
            if self.at_recovery_boundary() {
                break;
            }
            self.advance();
        }
        if self.pos == start {
            self.advance();
        }
    }

    /// Index of the token closing the bracket opened at `open` (same bracket family), if any.
    fn matching_close(&self, open: usize) -> Option<usize> {
        let (lhs, rhs) = match self.kind_at(open) {
            TokenKind::Punctuation(PunctuationId::LParen) => (PunctuationId::LParen, PunctuationId::RParen),
            TokenKind::Punctuation(PunctuationId::LBracket) => (PunctuationId::LBracket, PunctuationId::RBracket),
            TokenKind::Punctuation(PunctuationId::LBrace) => (PunctuationId::LBrace, PunctuationId::RBrace),
            _ => return None,
        };
        let mut depth = 0usize;
        for idx in open..self.tokens.len() {
            let kind = self.tokens[idx].kind;
            if kind.is_punctuation(lhs) {
                depth += 1;
            } else if kind.is_punctuation(rhs) {
                depth -= 1;
                if depth == 0 {
                    return Some(idx);
                }
            }
        }
        None
    }

    /// Skip a `{ ... }` group by brace-depth counting, consuming the closing brace.
    fn skip_braces(&mut self) -> ParseResult<()> {
        if !self.check_punct(PunctuationId::LBrace) {
            return Err(self.expected("expected '{'"));
        }
        match self.matching_close(self.pos) {
            Some(close) => {
                self.pos = close + 1;
                Ok(())
            }
            None => {
                self.pos = self.tokens.len() - 1;
                Err(self.expected("expected '}'"))
            }
        }
    }

    // ========================================================================
    // Diagnostics routing
    // ========================================================================

    fn report(&mut self, diagnostic: Diagnostic) {
        if self.prescanning {
            self.scratch.report(diagnostic);
        } else {
            self.reporter.report(diagnostic);
        }
    }

    /// Run `f` one nesting level deeper. Fails at [`MAX_NESTING`] instead of recursing further.
    fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> ParseResult<T>) -> ParseResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(SyntaxError::TooDeep {
                limit: MAX_NESTING,
                location: self.current_loc(),
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn report_syntax(&mut self, err: &SyntaxError) {
        self.report(Diagnostic::from(err));
    }

    /// Run `f` against the checker with the reporter appropriate for the current pass.
    fn with_checker<R>(&mut self, f: impl FnOnce(&mut dyn SymbolChecker, &mut dyn Reporter) -> R) -> R {
        let sink: &mut dyn Reporter = if self.prescanning {
            &mut self.scratch
        } else {
            &mut *self.reporter
        };
        f(&mut *self.checker, sink)
    }

    /// Like [`Parser::with_checker`], but skipped entirely during the forward pass.
    fn validate(&mut self, f: impl FnOnce(&mut dyn SymbolChecker, &mut dyn Reporter) -> bool) -> bool {
        if self.prescanning {
            return true;
        }
        self.with_checker(f)
    }
}
