/// Statement parsing methods.
///
/// Syntax errors propagate out of [`Parser::statement`] as [`SyntaxError`] values and are caught in
/// [`Parser::statement_or_recover`], which reports them and synchronizes to the next statement.
impl<'a> Parser<'a> {
    // ========================================================================
    // Statements
    // ========================================================================

    /// Parse one statement, recovering from a syntax error by reporting it and synchronizing.
    fn statement_or_recover(&mut self) -> Option<Spanned<Statement>> {
        let start = self.pos;
        match self.statement() {
            Ok(stmt) => Some(stmt),
            Err(err) => {
                self.report_syntax(&err);
                self.synchronize(start);
                None
            }
        }
    }

    fn statement(&mut self) -> ParseResult<Spanned<Statement>> {
        let loc = self.current_loc();

        if self.is_attribute_application_start() {
            let stmt = self.attribute_application()?;
            return Ok(Spanned::new(stmt, loc));
        }
        if self.at_declaration_start() {
            return self.declaration();
        }

        let stmt = match self.peek().kind {
            TokenKind::Keyword(KeywordId::Namespace | KeywordId::Module) => self.namespace_decl()?,
            TokenKind::Keyword(KeywordId::Import) => self.import_decl()?,
            TokenKind::Keyword(KeywordId::Include) => self.include_decl()?,
            TokenKind::Keyword(KeywordId::Var | KeywordId::Let | KeywordId::Const) => {
                let decl = self.var_decl()?;
                self.expect_punct(PunctuationId::Semicolon, "expected ';' after variable declaration")?;
                Statement::Var(decl)
            }
            TokenKind::Keyword(KeywordId::If) => Statement::If(self.if_stmt()?),
            TokenKind::Keyword(KeywordId::While) => {
                self.advance();
                let condition = self.expression()?;
                let body = self.body()?;
                Statement::While(WhileStmt { condition, body })
            }
            TokenKind::Keyword(KeywordId::For) => self.for_stmt()?,
            TokenKind::Keyword(KeywordId::Loop) => {
                self.advance();
                Statement::Loop(self.block()?)
            }
            TokenKind::Keyword(KeywordId::Return) => {
                self.advance();
                let value = if self.check_punct(PunctuationId::Semicolon) {
                    None
                } else {
                    Some(self.expression()?)
                };
                self.expect_punct(PunctuationId::Semicolon, "expected ';' after return")?;
                Statement::Return(value)
            }
            TokenKind::Keyword(KeywordId::Break) => {
                self.advance();
                self.expect_punct(PunctuationId::Semicolon, "expected ';' after 'break'")?;
                Statement::Break
            }
            TokenKind::Keyword(KeywordId::Continue) => {
                self.advance();
                self.expect_punct(PunctuationId::Semicolon, "expected ';' after 'continue'")?;
                Statement::Continue
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => Statement::Block(self.block()?),
            _ => {
                let expr = self.expression()?;
                // A match used as a statement may omit the terminator.
                if !matches!(expr.node, Expr::Match { .. }) || self.check_punct(PunctuationId::Semicolon) {
                    self.expect_punct(PunctuationId::Semicolon, "expected ';' after expression")?;
                }
                Statement::Expr(expr)
            }
        };
        Ok(Spanned::new(stmt, loc))
    }

    /// `var name: Type = value` (without the terminator). The name is in scope after the initializer.
    fn var_decl(&mut self) -> ParseResult<VarDecl> {
        let kind = match self.advance().kind {
            TokenKind::Keyword(KeywordId::Let) => VarKind::Let,
            TokenKind::Keyword(KeywordId::Const) => VarKind::Const,
            _ => VarKind::Var,
        };
        let name = self.identifier()?;
        let ty = if self.match_punct(PunctuationId::Colon) {
            Some(self.type_expr()?)
        } else {
            None
        };
        let value = if self.match_op(OperatorId::Eq) {
            Some(self.expression()?)
        } else {
            None
        };
        self.declare_local(&name);
        Ok(VarDecl { kind, name, ty, value })
    }

    /// `if cond { } else if cond { } else { }`
    fn if_stmt(&mut self) -> ParseResult<IfStmt> {
        self.expect_keyword(KeywordId::If, "expected 'if'")?;
        let condition = self.expression()?;
        let then_body = self.body()?;
        let else_body = if self.match_keyword(KeywordId::Else) {
            if self.check_keyword(KeywordId::If) {
                let loc = self.current_loc();
                let nested = self.nested(Self::if_stmt)?;
                Some(vec![Spanned::new(Statement::If(nested), loc)])
            } else {
                Some(self.body()?)
            }
        } else {
            None
        };
        Ok(IfStmt {
            condition,
            then_body,
            else_body,
        })
    }

    /// `for (init; cond; step) { }`, `for (var x in xs) { }` or `for x in xs { }`.
    fn for_stmt(&mut self) -> ParseResult<Statement> {
        self.expect_keyword(KeywordId::For, "expected 'for'")?;

        if !self.check_punct(PunctuationId::LParen) {
            let var = self.identifier()?;
            self.expect_keyword(KeywordId::In, "expected 'in' after loop variable")?;
            return self.for_in_rest(var);
        }

        let after_paren = self.peek_at(1).kind;
        let binding_offset = if after_paren.is_keyword(KeywordId::Var) || after_paren.is_keyword(KeywordId::Let) {
            2
        } else {
            1
        };
        let is_for_in = self.peek_at(binding_offset).kind == TokenKind::Ident
            && self.peek_at(binding_offset + 1).kind.is_keyword(KeywordId::In);

        if is_for_in {
            for _ in 0..binding_offset {
                self.advance();
            }
            let var = self.identifier()?;
            self.expect_keyword(KeywordId::In, "expected 'in' after loop variable")?;
            let iterable = self.expression()?;
            self.expect_punct(PunctuationId::RParen, "expected ')' after for-in header")?;
            let body = self.scoped_block(std::iter::once(var.clone()))?;
            return Ok(Statement::ForIn(ForInStmt { var, iterable, body }));
        }

        self.advance();
        self.push_scope();
        let result = self.for_clauses();
        self.pop_scope();
        result
    }

    fn for_in_rest(&mut self, var: Ident) -> ParseResult<Statement> {
        let iterable = self.expression()?;
        let body = self.scoped_block(std::iter::once(var.clone()))?;
        Ok(Statement::ForIn(ForInStmt { var, iterable, body }))
    }

    /// The three clauses and body of a C-style `for`, after the opening parenthesis.
    fn for_clauses(&mut self) -> ParseResult<Statement> {
        let init = if self.check_punct(PunctuationId::Semicolon) {
            None
        } else {
            let loc = self.current_loc();
            let stmt = if self.check_keyword(KeywordId::Var)
                || self.check_keyword(KeywordId::Let)
                || self.check_keyword(KeywordId::Const)
            {
                Statement::Var(self.var_decl()?)
            } else {
                Statement::Expr(self.expression()?)
            };
            Some(Box::new(Spanned::new(stmt, loc)))
        };
        self.expect_punct(PunctuationId::Semicolon, "expected ';' after for initializer")?;

        let condition = if self.check_punct(PunctuationId::Semicolon) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_punct(PunctuationId::Semicolon, "expected ';' after for condition")?;

        let step = if self.check_punct(PunctuationId::RParen) {
            None
        } else {
            Some(self.expression()?)
        };
        self.expect_punct(PunctuationId::RParen, "expected ')' after for clauses")?;

        let body = self.block()?;
        Ok(Statement::For(ForStmt {
            init,
            condition,
            step,
            body,
        }))
    }

    // ========================================================================
    // Blocks
    // ========================================================================

    /// A braced block, or a single statement used as a body.
    fn body(&mut self) -> ParseResult<Block> {
        if self.check_punct(PunctuationId::LBrace) {
            return self.block();
        }
        let stmt = self.nested(Self::statement)?;
        Ok(vec![stmt])
    }

    /// `{ statements }` in a fresh scope.
    fn block(&mut self) -> ParseResult<Block> {
        self.scoped_block(std::iter::empty())
    }

    /// `{ statements }` with `names` bound in the block's scope. Skipped during the forward pass.
    fn scoped_block(&mut self, names: impl IntoIterator<Item = String>) -> ParseResult<Block> {
        if self.prescanning {
            self.skip_braces()?;
            return Ok(Vec::new());
        }
        self.nested(|parser| parser.block_body(names))
    }

    fn block_body(&mut self, names: impl IntoIterator<Item = String>) -> ParseResult<Block> {
        self.expect_punct(PunctuationId::LBrace, "expected '{'")?;
        self.scopes.push(names.into_iter().collect());

        let mut statements = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            if let Some(stmt) = self.statement_or_recover() {
                statements.push(stmt);
            }
        }

        self.scopes.pop();
        self.expect_punct(PunctuationId::RBrace, "expected '}' to close block")?;
        Ok(statements)
    }
}
