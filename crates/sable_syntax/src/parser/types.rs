/// Type expression parsing.
impl<'a> Parser<'a> {
    /// Parse `Name.Path<Args>[][]?`.
    fn type_expr(&mut self) -> ParseResult<TypeExpr> {
        let name = self.dotted_name()?;
        let mut ty = TypeExpr::simple(name);

        if self.match_op(OperatorId::Lt) {
            ty.args.push(self.nested(Self::type_expr)?);
            while self.match_punct(PunctuationId::Comma) {
                ty.args.push(self.nested(Self::type_expr)?);
            }
            self.expect_op(OperatorId::Gt, "expected '>' after type arguments")?;
        }

        loop {
            if self.check_punct(PunctuationId::LBracket) && self.peek_at(1).kind.is_punctuation(PunctuationId::RBracket) {
                self.advance();
                self.advance();
                ty.array_rank += 1;
            } else if self.match_punct(PunctuationId::Question) {
                ty.nullable = true;
            } else {
                break;
            }
        }
        Ok(ty)
    }

    /// Parse optional `<T, U>` type parameters on a declaration.
    fn type_params(&mut self) -> ParseResult<Vec<Ident>> {
        let mut params = Vec::new();
        if self.match_op(OperatorId::Lt) {
            params.push(self.identifier()?);
            while self.match_punct(PunctuationId::Comma) {
                params.push(self.identifier()?);
            }
            self.expect_op(OperatorId::Gt, "expected '>' after type parameters")?;
        }
        Ok(params)
    }
}
