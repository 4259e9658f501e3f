/// Parse a token stream into a [`Program`].
///
/// Syntax errors and reference diagnostics go to `reporter`; declarations are registered with
/// `checker`. The returned tree is complete even when errors were reported.
#[tracing::instrument(skip_all, fields(token_count = tokens.len()))]
pub fn parse(tokens: &[Token], reporter: &mut dyn Reporter, checker: &mut dyn SymbolChecker) -> Program {
    let program = Parser::new(tokens, reporter, checker).parse();
    tracing::debug!(statements = program.statements.len(), "parsed compilation unit");
    program
}
