/// Small parsing utilities: names, literals, scopes and path resolution.
impl<'a> Parser<'a> {
    fn identifier(&mut self) -> ParseResult<Ident> {
        if self.check_kind(TokenKind::Ident) {
            Ok(self.advance().text.clone())
        } else {
            Err(self.expected("expected identifier"))
        }
    }

    /// `a.b.c`, built by repeated `.` consumption.
    fn dotted_name(&mut self) -> ParseResult<String> {
        let mut name = self.identifier()?;
        while self.check_punct(PunctuationId::Dot) && self.peek_at(1).kind == TokenKind::Ident {
            self.advance();
            name.push('.');
            name.push_str(&self.advance().text);
        }
        Ok(name)
    }

    fn string_literal(&mut self) -> ParseResult<String> {
        if self.check_kind(TokenKind::String) {
            Ok(self.advance().text.clone())
        } else {
            Err(self.expected("expected string literal"))
        }
    }

    // ========================================================================
    // Scopes
    // ========================================================================

    fn push_scope(&mut self) {
        self.scopes.push(HashSet::new());
    }

    fn pop_scope(&mut self) {
        self.scopes.pop();
    }

    /// Bind `name` in the innermost scope; outside any scope it is a unit-level name.
    fn declare_local(&mut self, name: &str) {
        match self.scopes.last_mut() {
            Some(scope) => scope.insert(name.to_string()),
            None => self.globals.insert(name.to_string()),
        };
    }

    fn is_local(&self, name: &str) -> bool {
        self.scopes.iter().rev().any(|scope| scope.contains(name)) || self.globals.contains(name)
    }

    // ========================================================================
    // Paths
    // ========================================================================

    /// Expand an `import ... as x` alias in the first segment.
    fn resolve_alias(&self, parts: &[Ident]) -> Vec<Ident> {
        match parts.split_first() {
            Some((first, rest)) => match self.aliases.get(first) {
                Some(target) => target.split('.').map(str::to_string).chain(rest.iter().cloned()).collect(),
                None => parts.to_vec(),
            },
            None => Vec::new(),
        }
    }

    /// Drop the longest proper prefix that names a known namespace.
    fn strip_namespace<'p>(&self, parts: &'p [Ident]) -> &'p [Ident] {
        for split in (1..parts.len()).rev() {
            if self.checker.is_namespace(&parts[..split].join(".")) {
                return &parts[split..];
            }
        }
        parts
    }
}
