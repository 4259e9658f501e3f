/// Forward registration pass.
///
/// Before the real parse, the whole token stream is walked once from the start. Declarations
/// (functions, classes, structs, interfaces, enums) are parsed with bodies skipped by brace
/// counting and registered with the checker, so that later call sites may reference them
/// before their definition. Namespace bodies are entered; any other brace group is skipped.
///
/// ## Notes
/// - Failures are swallowed: the cursor moves one token past where the failed construct began
///   and scanning resumes.
/// - The cursor is saved and restored around the pass.
impl<'a> Parser<'a> {
    fn prescan(&mut self) {
        let saved = self.pos;
        self.pos = 0;
        self.prescanning = true;

        let mut registered = 0usize;
        let mut failures = 0usize;
        while !self.is_at_end() {
            let start = self.pos;
            match self.prescan_item() {
                Ok(true) => registered += 1,
                Ok(false) => {}
                Err(_) => {
                    failures += 1;
                    self.pos = start + 1;
                }
            }
            if self.pos == start {
                self.advance();
            }
        }

        self.prescanning = false;
        self.scratch = DiagnosticBag::new();
        self.current_class = None;
        self.scopes.clear();
        self.pos = saved;
        tracing::debug!(registered, failures, globals = self.globals.len(), "forward registration complete");
    }

    /// Handle one construct of the forward pass. Returns `true` if a declaration was registered.
    fn prescan_item(&mut self) -> ParseResult<bool> {
        let kind = self.peek().kind;
        match kind {
            TokenKind::Keyword(KeywordId::Namespace | KeywordId::Module) => {
                self.advance();
                let name = self.dotted_name()?;
                self.with_checker(|c, _| c.register_namespace(&name));
                self.expect_punct(PunctuationId::LBrace, "expected '{' after namespace name")?;
                Ok(false)
            }
            TokenKind::Keyword(KeywordId::Var | KeywordId::Let | KeywordId::Const) => {
                self.advance();
                if self.check_kind(TokenKind::Ident) {
                    let name = self.advance().text.clone();
                    self.globals.insert(name);
                }
                Ok(false)
            }
            TokenKind::Keyword(KeywordId::Import) => {
                self.import_decl()?;
                Ok(false)
            }
            TokenKind::Punctuation(PunctuationId::LBrace) => {
                self.skip_braces()?;
                Ok(false)
            }
            _ if self.at_declaration_start() => {
                let decl = self.declaration()?;
                Ok(matches!(
                    decl.node,
                    Statement::Function(_) | Statement::Class(_) | Statement::Interface(_) | Statement::Enum(_)
                ))
            }
            _ => {
                self.advance();
                Ok(false)
            }
        }
    }
}
