/// Parser core types and entrypoint.
///
/// This chunk defines the [`Parser`] type and its top-level `parse()` entrypoint.
///
/// ## Notes
/// - This file is `include!`'d into `crate::parser` to keep all parser methods in a
///   single module while avoiding a single "god file".
type ParseResult<T> = Result<T, SyntaxError>;

/// Deepest expression, type or block nesting the parser descends into before giving up.
pub const MAX_NESTING: usize = 64;

/// Parser state.
///
/// ## Notes
/// - The token buffer is immutable; the forward registration pass saves and restores `pos`.
/// - While `prescanning` is set, bodies are skipped, reference validation is off, and every
///   diagnostic produced by registration lands in `scratch` and is discarded.
pub struct Parser<'a> {
    tokens: Cow<'a, [Token]>,
    pos: usize,
    reporter: &'a mut dyn Reporter,
    checker: &'a mut dyn SymbolChecker,
    scratch: DiagnosticBag,
    prescanning: bool,
    /// Names bound in enclosing scopes (locals, parameters, class members, unit-level variables).
    scopes: Vec<HashSet<String>>,
    /// Unit-level variable names found by the forward pass.
    globals: HashSet<String>,
    /// `import a.b as x` aliases: `x` -> `a.b`.
    aliases: HashMap<String, String>,
    current_class: Option<String>,
    /// Current recursion depth; see [`MAX_NESTING`].
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser for a token stream.
    ///
    /// An end-of-input token is appended when the stream does not already end with one.
    pub fn new(tokens: &'a [Token], reporter: &'a mut dyn Reporter, checker: &'a mut dyn SymbolChecker) -> Self {
        let tokens = match tokens.last() {
            Some(last) if last.kind == TokenKind::Eof => Cow::Borrowed(tokens),
            last => {
                let (line, column) = last.map_or((1, 1), |t| (t.line, t.column + t.text.len()));
                let mut owned = tokens.to_vec();
                owned.push(Token::new(TokenKind::Eof, "", line, column));
                Cow::Owned(owned)
            }
        };
        Self {
            tokens,
            pos: 0,
            reporter,
            checker,
            scratch: DiagnosticBag::new(),
            prescanning: false,
            scopes: Vec::new(),
            globals: HashSet::new(),
            aliases: HashMap::new(),
            current_class: None,
            depth: 0,
        }
    }

    /// Parse the entire token stream into a [`Program`].
    ///
    /// Syntax errors are reported and recovered from at statement boundaries, so this always
    /// returns a tree; callers consult the reporter's `has_errors` before using it.
    pub fn parse(mut self) -> Program {
        self.prescan();

        let unit_scope = std::mem::take(&mut self.globals);
        self.scopes.push(unit_scope);

        let mut statements = Vec::new();
        while !self.is_at_end() {
            if let Some(stmt) = self.statement_or_recover() {
                statements.push(stmt);
            }
        }
        Program { statements }
    }
}
