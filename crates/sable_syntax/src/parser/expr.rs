/// Expression parsing methods.
///
/// Precedence, lowest to highest:
/// assignment → `||` → `&&` → equality → relational → range → additive → multiplicative →
/// unary → postfix (`()`, `[]`, `.`, `++`, `--`) → primary.
///
/// ## Notes
/// - Reference sites are validated here as they are built: free calls, implicit and explicit
///   constructor calls, `Type.member` paths and `this.member` accesses.
/// - Names bound in an enclosing scope are instance values, so calls through them are not checked.
impl<'a> Parser<'a> {
    // ========================================================================
    // Expressions
    // ========================================================================

    fn expression(&mut self) -> ParseResult<Spanned<Expr>> {
        self.nested(Self::assignment)
    }

    fn assignment(&mut self) -> ParseResult<Spanned<Expr>> {
        if self.at_lambda_start() {
            return self.lambda();
        }

        let target = self.or_expr()?;
        let op = match self.peek().kind {
            TokenKind::Operator(OperatorId::Eq) => AssignOp::Assign,
            TokenKind::Operator(OperatorId::PlusEq) => AssignOp::Add,
            TokenKind::Operator(OperatorId::MinusEq) => AssignOp::Sub,
            TokenKind::Operator(OperatorId::StarEq) => AssignOp::Mul,
            TokenKind::Operator(OperatorId::SlashEq) => AssignOp::Div,
            _ => return Ok(target),
        };
        if !matches!(
            target.node,
            Expr::Ident(_) | Expr::Qualified(_) | Expr::Member(..) | Expr::Index(..)
        ) {
            return Err(self.expected("invalid assignment target"));
        }
        self.advance();
        let value = self.nested(Self::assignment)?;
        let loc = target.loc;
        Ok(Spanned::new(
            Expr::Assign {
                target: Box::new(target),
                op,
                value: Box::new(value),
            },
            loc,
        ))
    }

    /// `x => ...` or `(a, b: T) => ...`
    fn at_lambda_start(&self) -> bool {
        if self.check_kind(TokenKind::Ident) {
            return self.peek_at(1).kind.is_punctuation(PunctuationId::FatArrow);
        }
        if self.check_punct(PunctuationId::LParen) {
            return self
                .matching_close(self.pos)
                .is_some_and(|close| self.kind_at(close + 1).is_punctuation(PunctuationId::FatArrow));
        }
        false
    }

    fn lambda(&mut self) -> ParseResult<Spanned<Expr>> {
        let loc = self.current_loc();
        let params = if self.check_kind(TokenKind::Ident) {
            let name = self.identifier()?;
            vec![Param {
                attributes: Vec::new(),
                name,
                ty: None,
                loc,
            }]
        } else {
            self.params()?
        };
        self.expect_punct(PunctuationId::FatArrow, "expected '=>' after lambda parameters")?;

        let names = params.iter().map(|p| p.name.clone());
        let body = if self.check_punct(PunctuationId::LBrace) {
            LambdaBody::Block(self.scoped_block(names)?)
        } else {
            self.scopes.push(names.collect());
            let body = self.expression();
            self.scopes.pop();
            LambdaBody::Expr(Box::new(body?))
        };
        Ok(Spanned::new(Expr::Lambda { params, body }, loc))
    }

    /// Parse one left-associative binary precedence level.
    fn binary_level(
        &mut self,
        next: fn(&mut Self) -> ParseResult<Spanned<Expr>>,
        ops: &[(OperatorId, BinaryOp)],
    ) -> ParseResult<Spanned<Expr>> {
        let mut left = next(self)?;
        while let Some(op) = ops.iter().find(|(id, _)| self.check_op(*id)).map(|(_, op)| *op) {
            self.advance();
            let right = next(self)?;
            let loc = left.loc;
            left = Spanned::new(Expr::Binary(Box::new(left), op, Box::new(right)), loc);
        }
        Ok(left)
    }

    fn or_expr(&mut self) -> ParseResult<Spanned<Expr>> {
        self.binary_level(Self::and_expr, &[(OperatorId::OrOr, BinaryOp::Or)])
    }

    fn and_expr(&mut self) -> ParseResult<Spanned<Expr>> {
        self.binary_level(Self::equality, &[(OperatorId::AndAnd, BinaryOp::And)])
    }

    fn equality(&mut self) -> ParseResult<Spanned<Expr>> {
        self.binary_level(
            Self::relational,
            &[(OperatorId::EqEq, BinaryOp::Eq), (OperatorId::NotEq, BinaryOp::NotEq)],
        )
    }

    fn relational(&mut self) -> ParseResult<Spanned<Expr>> {
        self.binary_level(
            Self::range,
            &[
                (OperatorId::Lt, BinaryOp::Lt),
                (OperatorId::LtEq, BinaryOp::LtEq),
                (OperatorId::Gt, BinaryOp::Gt),
                (OperatorId::GtEq, BinaryOp::GtEq),
            ],
        )
    }

    /// `a..b` / `a..=b` (non-associative).
    fn range(&mut self) -> ParseResult<Spanned<Expr>> {
        let start = self.additive()?;
        let inclusive = if self.match_op(OperatorId::DotDotEq) {
            true
        } else if self.match_op(OperatorId::DotDot) {
            false
        } else {
            return Ok(start);
        };
        let end = self.additive()?;
        let loc = start.loc;
        Ok(Spanned::new(
            Expr::Range {
                start: Box::new(start),
                end: Box::new(end),
                inclusive,
            },
            loc,
        ))
    }

    fn additive(&mut self) -> ParseResult<Spanned<Expr>> {
        self.binary_level(
            Self::multiplicative,
            &[(OperatorId::Plus, BinaryOp::Add), (OperatorId::Minus, BinaryOp::Sub)],
        )
    }

    fn multiplicative(&mut self) -> ParseResult<Spanned<Expr>> {
        self.binary_level(
            Self::unary,
            &[
                (OperatorId::Star, BinaryOp::Mul),
                (OperatorId::Slash, BinaryOp::Div),
                (OperatorId::Percent, BinaryOp::Mod),
            ],
        )
    }

    fn unary(&mut self) -> ParseResult<Spanned<Expr>> {
        let loc = self.current_loc();
        let op = match self.peek().kind {
            TokenKind::Operator(OperatorId::Bang) => UnaryOp::Not,
            TokenKind::Operator(OperatorId::Minus) => UnaryOp::Neg,
            TokenKind::Operator(OperatorId::PlusPlus) => UnaryOp::PreInc,
            TokenKind::Operator(OperatorId::MinusMinus) => UnaryOp::PreDec,
            _ => return self.postfix(),
        };
        self.advance();
        let operand = self.nested(Self::unary)?;
        Ok(Spanned::new(Expr::Unary(op, Box::new(operand)), loc))
    }

    /// Call/index/member chain, then an optional postfix `++`/`--`.
    fn postfix(&mut self) -> ParseResult<Spanned<Expr>> {
        let mut expr = self.primary()?;
        loop {
            if self.check_punct(PunctuationId::LParen) {
                let loc = expr.loc;
                let args = self.call_args()?;
                expr = self.finish_call(expr, args, loc);
            } else if self.check_punct(PunctuationId::LBracket) {
                self.check_path_access(&expr);
                self.advance();
                let index = self.expression()?;
                self.expect_punct(PunctuationId::RBracket, "expected ']' after index")?;
                let loc = expr.loc;
                expr = Spanned::new(Expr::Index(Box::new(expr), Box::new(index)), loc);
            } else if self.match_punct(PunctuationId::Dot) {
                let member = self.identifier()?;
                expr = self.extend_path(expr, member);
            } else {
                break;
            }
        }
        self.check_path_access(&expr);

        let loc = expr.loc;
        if self.match_op(OperatorId::PlusPlus) {
            return Ok(Spanned::new(Expr::Unary(UnaryOp::PostInc, Box::new(expr)), loc));
        }
        if self.match_op(OperatorId::MinusMinus) {
            return Ok(Spanned::new(Expr::Unary(UnaryOp::PostDec, Box::new(expr)), loc));
        }
        Ok(expr)
    }

    /// Append `.member`: non-local identifier paths grow into `Qualified`, anything else becomes `Member`.
    fn extend_path(&mut self, expr: Spanned<Expr>, member: Ident) -> Spanned<Expr> {
        let loc = expr.loc;
        match expr.node {
            Expr::Ident(first) if !self.is_local(&first) => Spanned::new(Expr::Qualified(vec![first, member]), loc),
            Expr::Qualified(mut parts) => {
                parts.push(member);
                Spanned::new(Expr::Qualified(parts), loc)
            }
            node => {
                let object = Spanned::new(node, loc);
                self.check_path_access(&object);
                Spanned::new(Expr::Member(Box::new(object), member), loc)
            }
        }
    }

    /// `( args )`
    fn call_args(&mut self) -> ParseResult<Vec<Spanned<Expr>>> {
        self.expect_punct(PunctuationId::LParen, "expected '('")?;
        let mut args = Vec::new();
        while !self.check_punct(PunctuationId::RParen) {
            args.push(self.expression()?);
            if !self.match_punct(PunctuationId::Comma) {
                break;
            }
        }
        self.expect_punct(PunctuationId::RParen, "expected ')' after arguments")?;
        Ok(args)
    }

    /// Build a call node, validating the callee. A bare capitalized name is an implicit constructor.
    fn finish_call(&mut self, callee: Spanned<Expr>, args: Vec<Spanned<Expr>>, loc: Location) -> Spanned<Expr> {
        match &callee.node {
            Expr::Ident(name) if self.is_local(name) => {}
            Expr::Ident(name) if starts_uppercase(name) => {
                let ty = TypeExpr::simple(name.clone());
                self.validate(|c, r| c.validate_constructor_call(&ty.name, &args, loc, r));
                return Spanned::new(
                    Expr::New {
                        ty,
                        args,
                        implicit: true,
                    },
                    loc,
                );
            }
            Expr::Ident(name) => {
                self.validate(|c, r| c.validate_call(name, &args, loc, r));
            }
            Expr::Qualified(parts) => self.validate_qualified_call(parts, &args, loc),
            Expr::Member(object, member) if object.node == Expr::This => {
                if let Some(class) = self.current_class.clone() {
                    self.validate(|c, r| c.validate_member_access(&class, member, loc, r));
                }
            }
            _ => {}
        }
        Spanned::new(
            Expr::Call {
                callee: Box::new(callee),
                args,
            },
            loc,
        )
    }

    /// Validate `a.b.c(args)`.
    ///
    /// Resolution: import aliases are expanded; a local first segment is an instance call; a known
    /// class receiver checks the member; a declared namespace prefix is stripped and the remainder
    /// re-checked (a bare capitalized remainder is an external constructor and is accepted); everything
    /// else goes to call validation under the dotted name.
    fn validate_qualified_call(&mut self, parts: &[Ident], args: &[Spanned<Expr>], loc: Location) {
        if self.is_local(&parts[0]) {
            return;
        }
        let parts = self.resolve_alias(parts);
        let rest = self.strip_namespace(&parts);

        match rest {
            // Qualified constructor calls are external references.
            [name] if starts_uppercase(name) => {}
            [name] => {
                self.validate(|c, r| c.validate_call(name, args, loc, r));
            }
            [class, member, ..] if self.checker.is_known_class(class) => {
                self.validate(|c, r| c.validate_member_access(class, member, loc, r));
            }
            _ => {
                let dotted = rest.join(".");
                self.validate(|c, r| c.validate_call(&dotted, args, loc, r));
            }
        }
    }

    /// Validate a non-call path: `Class.member`, `Ns.Class.member` or `this.member`.
    fn check_path_access(&mut self, expr: &Spanned<Expr>) {
        let loc = expr.loc;
        match &expr.node {
            Expr::Qualified(parts) if !self.is_local(&parts[0]) => {
                let parts = self.resolve_alias(parts);
                if let [class, member, ..] = self.strip_namespace(&parts) {
                    if self.checker.is_known_class(class) {
                        self.validate(|c, r| c.validate_member_access(class, member, loc, r));
                    }
                }
            }
            Expr::Member(object, member) if object.node == Expr::This => {
                if let Some(class) = self.current_class.clone() {
                    self.validate(|c, r| c.validate_member_access(&class, member, loc, r));
                }
            }
            _ => {}
        }
    }

    // ========================================================================
    // Primary expressions
    // ========================================================================

    fn primary(&mut self) -> ParseResult<Spanned<Expr>> {
        let loc = self.current_loc();
        let expr = match self.peek().kind {
            TokenKind::Int => {
                let text = self.advance().text.clone();
                let value = text.parse::<i64>().map_err(|_| SyntaxError::Expected {
                    message: "integer literal out of range".to_string(),
                    found: format!("number '{text}'"),
                    location: loc,
                })?;
                Expr::Literal(Literal::Int(value))
            }
            TokenKind::Float => {
                let text = self.advance().text.clone();
                let value = text.parse::<f64>().map_err(|_| SyntaxError::Expected {
                    message: "invalid float literal".to_string(),
                    found: format!("number '{text}'"),
                    location: loc,
                })?;
                Expr::Literal(Literal::Float(value))
            }
            TokenKind::String => Expr::Literal(Literal::String(self.advance().text.clone())),
            TokenKind::Keyword(KeywordId::True) => {
                self.advance();
                Expr::Literal(Literal::Bool(true))
            }
            TokenKind::Keyword(KeywordId::False) => {
                self.advance();
                Expr::Literal(Literal::Bool(false))
            }
            TokenKind::Keyword(KeywordId::Null) => {
                self.advance();
                Expr::Literal(Literal::Null)
            }
            TokenKind::Keyword(KeywordId::This) => {
                self.advance();
                Expr::This
            }
            TokenKind::Keyword(KeywordId::New) => return self.new_expr(),
            TokenKind::Keyword(KeywordId::Match) => return self.match_expr(),
            TokenKind::InterpStart => return self.interpolated(),
            TokenKind::Punctuation(PunctuationId::LParen) => {
                self.advance();
                let inner = self.expression()?;
                self.expect_punct(PunctuationId::RParen, "expected ')' after expression")?;
                return Ok(inner);
            }
            TokenKind::Punctuation(PunctuationId::LBracket) => return self.array_expr(),
            TokenKind::Ident => Expr::Ident(self.advance().text.clone()),
            _ => return Err(self.unexpected()),
        };
        Ok(Spanned::new(expr, loc))
    }

    /// `new Type(args)`; the argument list may be omitted.
    fn new_expr(&mut self) -> ParseResult<Spanned<Expr>> {
        let loc = self.expect_keyword(KeywordId::New, "expected 'new'")?;
        let ty = self.type_expr()?;
        let args = if self.check_punct(PunctuationId::LParen) {
            self.call_args()?
        } else {
            Vec::new()
        };
        let name = ty.to_string();
        self.validate(|c, r| c.validate_constructor_call(&name, &args, loc, r));
        Ok(Spanned::new(
            Expr::New {
                ty,
                args,
                implicit: false,
            },
            loc,
        ))
    }

    /// `[a, b, c]` or `[element for x in xs if cond]`.
    fn array_expr(&mut self) -> ParseResult<Spanned<Expr>> {
        let loc = self.expect_punct(PunctuationId::LBracket, "expected '['")?;
        if self.match_punct(PunctuationId::RBracket) {
            return Ok(Spanned::new(Expr::Array(Vec::new()), loc));
        }

        // The collect variable is used before it is bound, so bind it up front.
        let collect_var = self.collect_var_ahead();
        self.scopes.push(collect_var.iter().cloned().collect());
        let result = self.array_body(loc);
        self.scopes.pop();
        result
    }

    fn array_body(&mut self, loc: Location) -> ParseResult<Spanned<Expr>> {
        let first = self.expression()?;
        if self.match_keyword(KeywordId::For) {
            let var = self.identifier()?;
            self.expect_keyword(KeywordId::In, "expected 'in' in array collect")?;
            let iterable = self.expression()?;
            let filter = if self.match_keyword(KeywordId::If) {
                Some(Box::new(self.expression()?))
            } else {
                None
            };
            self.expect_punct(PunctuationId::RBracket, "expected ']' after array collect")?;
            return Ok(Spanned::new(
                Expr::ArrayCollect {
                    element: Box::new(first),
                    var,
                    iterable: Box::new(iterable),
                    filter,
                },
                loc,
            ));
        }

        let mut elements = vec![first];
        while self.match_punct(PunctuationId::Comma) {
            if self.check_punct(PunctuationId::RBracket) {
                break;
            }
            elements.push(self.expression()?);
        }
        self.expect_punct(PunctuationId::RBracket, "expected ']' after array elements")?;
        Ok(Spanned::new(Expr::Array(elements), loc))
    }

    /// The `x` of `[... for x in ...]` when the current `[` opens an array collect.
    fn collect_var_ahead(&self) -> Option<Ident> {
        let close = self.matching_close(self.pos - 1)?;
        let mut depth = 0usize;
        for idx in self.pos..close {
            match self.tokens[idx].kind {
                TokenKind::Punctuation(PunctuationId::LParen | PunctuationId::LBracket | PunctuationId::LBrace) => {
                    depth += 1
                }
                TokenKind::Punctuation(PunctuationId::RParen | PunctuationId::RBracket | PunctuationId::RBrace) => {
                    depth = depth.saturating_sub(1)
                }
                TokenKind::Keyword(KeywordId::For) if depth == 0 => {
                    return self
                        .tokens
                        .get(idx + 1)
                        .filter(|t| t.kind == TokenKind::Ident)
                        .map(|t| t.text.clone());
                }
                _ => {}
            }
        }
        None
    }

    /// `match subject { pattern => expr, _ => { block } }`
    fn match_expr(&mut self) -> ParseResult<Spanned<Expr>> {
        let loc = self.expect_keyword(KeywordId::Match, "expected 'match'")?;
        let subject = self.or_expr()?;
        self.expect_punct(PunctuationId::LBrace, "expected '{' after match subject")?;

        let mut arms = Vec::new();
        while !self.check_punct(PunctuationId::RBrace) && !self.is_at_end() {
            let arm_loc = self.current_loc();
            let pattern = if self.peek().is_ident_named("_") {
                self.advance();
                Pattern::Wildcard
            } else {
                Pattern::Expr(self.or_expr()?)
            };
            self.expect_punct(PunctuationId::FatArrow, "expected '=>' after match pattern")?;
            let body = if self.check_punct(PunctuationId::LBrace) {
                MatchBody::Block(self.block()?)
            } else {
                MatchBody::Expr(self.expression()?)
            };
            arms.push(MatchArm {
                pattern,
                body,
                loc: arm_loc,
            });
            let block_arm = matches!(arms.last().map(|a| &a.body), Some(MatchBody::Block(_)));
            if !self.match_punct(PunctuationId::Comma) && !self.check_punct(PunctuationId::RBrace) && !block_arm {
                return Err(self.expected("expected ',' or '}' after match arm"));
            }
        }
        self.expect_punct(PunctuationId::RBrace, "expected '}' to close match")?;
        Ok(Spanned::new(
            Expr::Match {
                subject: Box::new(subject),
                arms,
            },
            loc,
        ))
    }

    /// `$"text {expr} text"` as flattened by the scanner.
    fn interpolated(&mut self) -> ParseResult<Spanned<Expr>> {
        let loc = self.expect_kind(TokenKind::InterpStart, "expected interpolated string")?;
        let mut parts = Vec::new();
        loop {
            match self.peek().kind {
                TokenKind::InterpText => parts.push(InterpPart::Text(self.advance().text.clone())),
                TokenKind::HoleStart => {
                    self.advance();
                    parts.push(InterpPart::Expr(self.expression()?));
                    self.expect_kind(TokenKind::HoleEnd, "expected '}' to close interpolation")?;
                }
                TokenKind::InterpEnd => {
                    self.advance();
                    break;
                }
                _ => return Err(self.expected("expected end of interpolated string")),
            }
        }
        Ok(Spanned::new(Expr::Interpolated(parts), loc))
    }
}
