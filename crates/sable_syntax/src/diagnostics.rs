//! Diagnostics model shared by the scanner, parser and symbol resolution.
//!
//! The core never prints. Every finding is a [`Diagnostic`] handed to a [`Reporter`]; presentation
//! (colors, snippets) belongs to the caller. [`DiagnosticBag`] is the in-memory reporter used by the
//! compiler pipeline and by tests.

use std::fmt;

use crate::ast::Location;

/// How serious a diagnostic is. Ordered: `Info < Warning < Error < Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Warning => write!(f, "warning"),
            Severity::Error => write!(f, "error"),
            Severity::Fatal => write!(f, "fatal"),
        }
    }
}

/// Stable diagnostic codes.
///
/// `E1xxx` syntax, `E2xxx` symbol resolution, `E3xxx` attributes, `W`/`I`/`F` for the other
/// severities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticCode {
    // Syntax
    UnexpectedToken,
    MissingToken,
    InvalidToken,
    UnterminatedLiteral,

    // Symbol resolution
    UnknownFunction,
    UnknownClass,
    UnknownMember,
    ConstructorArity,
    FunctionArity,
    UnknownType,
    InvalidConstruction,

    // Attributes
    UnknownAttribute,
    AttributeTarget,
    AttributeTooFewArgs,
    AttributeTooManyArgs,
    DuplicateAttribute,

    // Warnings
    DidYouMean,
    UnknownAttributeAllowed,
    AttributeArgType,

    // Info
    ForeignDeclaration,

    // Fatal
    UnreadableInput,
    ScannerFailure,
}

impl DiagnosticCode {
    pub fn as_str(self) -> &'static str {
        match self {
            DiagnosticCode::UnexpectedToken => "E1001",
            DiagnosticCode::MissingToken => "E1002",
            DiagnosticCode::InvalidToken => "E1003",
            DiagnosticCode::UnterminatedLiteral => "E1004",
            DiagnosticCode::UnknownFunction => "E2001",
            DiagnosticCode::UnknownClass => "E2002",
            DiagnosticCode::UnknownMember => "E2003",
            DiagnosticCode::ConstructorArity => "E2004",
            DiagnosticCode::FunctionArity => "E2005",
            DiagnosticCode::UnknownType => "E2006",
            DiagnosticCode::InvalidConstruction => "E2007",
            DiagnosticCode::UnknownAttribute => "E3001",
            DiagnosticCode::AttributeTarget => "E3002",
            DiagnosticCode::AttributeTooFewArgs => "E3003",
            DiagnosticCode::AttributeTooManyArgs => "E3004",
            DiagnosticCode::DuplicateAttribute => "E3005",
            DiagnosticCode::DidYouMean => "W0001",
            DiagnosticCode::UnknownAttributeAllowed => "W3001",
            DiagnosticCode::AttributeArgType => "W3002",
            DiagnosticCode::ForeignDeclaration => "I0001",
            DiagnosticCode::UnreadableInput => "F0001",
            DiagnosticCode::ScannerFailure => "F0002",
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single reported finding.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub code: Option<DiagnosticCode>,
    pub message: String,
    pub location: Option<Location>,
    /// Fix-it text ("did you mean ...").
    pub suggestion: Option<String>,
    pub notes: Vec<String>,
}

impl Diagnostic {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            code: None,
            message: message.into(),
            location: None,
            suggestion: None,
            notes: Vec::new(),
        }
    }

    pub fn error(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message).with_code(code)
    }

    pub fn warning(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message).with_code(code)
    }

    pub fn info(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message).with_code(code)
    }

    pub fn fatal(code: DiagnosticCode, message: impl Into<String>) -> Self {
        Self::new(Severity::Fatal, message).with_code(code)
    }

    pub fn with_code(mut self, code: DiagnosticCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn at(mut self, location: Location) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity >= Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.severity)?;
        if let Some(code) = self.code {
            write!(f, "[{code}]")?;
        }
        if let Some(loc) = self.location {
            write!(f, " at {loc}")?;
        }
        write!(f, ": {}", self.message)?;
        if let Some(suggestion) = &self.suggestion {
            write!(f, " ({suggestion})")?;
        }
        Ok(())
    }
}

/// Sink for diagnostics.
///
/// ## Notes
/// - `has_errors` must be true iff at least one reported diagnostic has severity `Error` or `Fatal`.
pub trait Reporter {
    fn report(&mut self, diagnostic: Diagnostic);

    fn has_errors(&self) -> bool;

    fn report_error(&mut self, code: DiagnosticCode, message: String, location: Option<Location>) {
        self.report(Diagnostic {
            location,
            ..Diagnostic::error(code, message)
        });
    }

    fn report_warning(&mut self, code: DiagnosticCode, message: String, location: Option<Location>) {
        self.report(Diagnostic {
            location,
            ..Diagnostic::warning(code, message)
        });
    }

    fn report_info(&mut self, code: DiagnosticCode, message: String, location: Option<Location>) {
        self.report(Diagnostic {
            location,
            ..Diagnostic::info(code, message)
        });
    }

    fn report_fatal(&mut self, code: DiagnosticCode, message: String, location: Option<Location>) {
        self.report(Diagnostic {
            location,
            ..Diagnostic::fatal(code, message)
        });
    }
}

/// In-memory [`Reporter`] preserving report order.
#[derive(Debug, Clone, Default)]
pub struct DiagnosticBag {
    diagnostics: Vec<Diagnostic>,
}

impl DiagnosticBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Diagnostic> {
        self.diagnostics.iter()
    }

    pub fn len(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.severity == severity)
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.with_severity(Severity::Warning)
    }

    pub fn error_count(&self) -> usize {
        self.errors().count()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings().count()
    }

    /// Number of diagnostics carrying `code`.
    pub fn count_code(&self, code: DiagnosticCode) -> usize {
        self.diagnostics.iter().filter(|d| d.code == Some(code)).count()
    }

    pub fn extend(&mut self, other: DiagnosticBag) {
        self.diagnostics.extend(other.diagnostics);
    }

    pub fn into_vec(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Reporter for DiagnosticBag {
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(%diagnostic, "diagnostic reported");
        self.diagnostics.push(diagnostic);
    }

    fn has_errors(&self) -> bool {
        self.diagnostics.iter().any(Diagnostic::is_error)
    }
}

impl<'a> IntoIterator for &'a DiagnosticBag {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.diagnostics.iter()
    }
}

/// Recoverable syntax failure raised inside the parser and caught at the statement boundary.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SyntaxError {
    #[error("{message}, found {found}")]
    Expected {
        message: String,
        found: String,
        location: Location,
    },
    #[error("unexpected {found}")]
    Unexpected { found: String, location: Location },
    #[error("nesting exceeds {limit} levels")]
    TooDeep { limit: usize, location: Location },
}

impl SyntaxError {
    pub fn location(&self) -> Location {
        match self {
            SyntaxError::Expected { location, .. }
            | SyntaxError::Unexpected { location, .. }
            | SyntaxError::TooDeep { location, .. } => *location,
        }
    }

    pub fn code(&self) -> DiagnosticCode {
        match self {
            SyntaxError::Expected { .. } => DiagnosticCode::MissingToken,
            SyntaxError::Unexpected { .. } | SyntaxError::TooDeep { .. } => DiagnosticCode::UnexpectedToken,
        }
    }
}

impl From<&SyntaxError> for Diagnostic {
    fn from(err: &SyntaxError) -> Self {
        Diagnostic::error(err.code(), err.to_string()).at(err.location())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn has_errors_tracks_error_and_fatal_only() {
        let mut bag = DiagnosticBag::new();
        bag.report_info(DiagnosticCode::ForeignDeclaration, "skipped".into(), None);
        bag.report_warning(DiagnosticCode::DidYouMean, "did you mean".into(), None);
        assert!(!bag.has_errors());
        bag.report_fatal(DiagnosticCode::UnreadableInput, "gone".into(), None);
        assert!(bag.has_errors());
        assert_eq!(bag.error_count(), 1);
    }

    #[test]
    fn display_includes_code_and_location() {
        let d = Diagnostic::error(DiagnosticCode::UnknownFunction, "unknown function 'make'")
            .at(Location::new(3, 5))
            .with_suggestion("did you mean 'make2'?");
        insta::assert_snapshot!(d.to_string(), @"error[E2001] at 3:5: unknown function 'make' (did you mean 'make2'?)");
    }

    #[test]
    fn syntax_error_converts_with_location() {
        let err = SyntaxError::Expected {
            message: "expected ';' after expression".into(),
            found: "'}'".into(),
            location: Location::new(2, 9),
        };
        let d = Diagnostic::from(&err);
        assert_eq!(d.code, Some(DiagnosticCode::MissingToken));
        assert_eq!(d.location, Some(Location::new(2, 9)));
        assert_eq!(d.message, "expected ';' after expression, found '}'");
    }
}
