//! Terminal presentation of diagnostics through `miette`.
//!
//! The core only produces [`Diagnostic`] values with line/column positions; this module converts
//! them into miette reports with a labeled source snippet.

use std::fmt;

use miette::{LabeledSpan, NamedSource, SourceCode, SourceSpan};
use sable_syntax::ast::Location;
use sable_syntax::diagnostics::{Diagnostic, Severity};

/// A diagnostic bound to the source it was reported against.
#[derive(Debug)]
pub struct RenderedDiagnostic {
    diagnostic: Diagnostic,
    source: Option<NamedSource<String>>,
    span: Option<SourceSpan>,
}

impl RenderedDiagnostic {
    pub fn new(diagnostic: Diagnostic, file_name: &str, source: Option<&str>) -> Self {
        let span = match (source, diagnostic.location) {
            (Some(text), Some(loc)) => span_at(text, loc),
            _ => None,
        };
        Self {
            source: source.map(|text| NamedSource::new(file_name, text.to_string())),
            span,
            diagnostic,
        }
    }
}

impl fmt::Display for RenderedDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.diagnostic.message)
    }
}

impl std::error::Error for RenderedDiagnostic {}

impl miette::Diagnostic for RenderedDiagnostic {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic
            .code
            .map(|code| Box::new(code) as Box<dyn fmt::Display + 'a>)
    }

    fn severity(&self) -> Option<miette::Severity> {
        Some(match self.diagnostic.severity {
            Severity::Info => miette::Severity::Advice,
            Severity::Warning => miette::Severity::Warning,
            Severity::Error | Severity::Fatal => miette::Severity::Error,
        })
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let mut lines: Vec<&str> = Vec::new();
        if let Some(suggestion) = &self.diagnostic.suggestion {
            lines.push(suggestion);
        }
        lines.extend(self.diagnostic.notes.iter().map(String::as_str));
        if lines.is_empty() {
            None
        } else {
            Some(Box::new(lines.join("\n")) as Box<dyn fmt::Display + 'a>)
        }
    }

    fn source_code(&self) -> Option<&dyn SourceCode> {
        self.source.as_ref().map(|source| source as &dyn SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let label = LabeledSpan::new_with_span(Some(self.diagnostic.severity.to_string()), span);
        Some(Box::new(std::iter::once(label)))
    }
}

/// Byte span of the word starting at a 1-based line/column position.
///
/// Positions inside the text are at least one byte wide; a position at the very end is empty.
pub fn span_at(source: &str, loc: Location) -> Option<SourceSpan> {
    let line_start: usize = source
        .split_inclusive('\n')
        .take(loc.line.checked_sub(1)?)
        .map(str::len)
        .sum();
    let line = source.get(line_start..)?.lines().next().unwrap_or("");
    let column = line
        .char_indices()
        .nth(loc.column.saturating_sub(1))
        .map(|(i, _)| i)
        .unwrap_or(line.len());
    let word: usize = line[column..]
        .chars()
        .take_while(|c| c.is_alphanumeric() || *c == '_')
        .map(char::len_utf8)
        .sum();
    let offset = line_start + column;
    let len = if offset >= source.len() { 0 } else { word.max(1) };
    Some(SourceSpan::new(offset.into(), len))
}

/// Print every diagnostic of a unit to stderr.
pub fn emit(diagnostics: impl IntoIterator<Item = Diagnostic>, file_name: &str, source: Option<&str>) {
    for diagnostic in diagnostics {
        let report = miette::Report::new(RenderedDiagnostic::new(diagnostic, file_name, source));
        eprintln!("{report:?}");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use miette::{GraphicalReportHandler, GraphicalTheme};
    use sable_syntax::diagnostics::DiagnosticCode;

    use super::*;

    #[test]
    fn spans_cover_the_word_at_the_position() {
        let source = "function main() {\n    nope();\n}\n";
        let span = span_at(source, Location::new(2, 5)).unwrap();
        assert_eq!(span.offset(), 22);
        assert_eq!(span.len(), 4);
        assert_eq!(&source[span.offset()..span.offset() + span.len()], "nope");
    }

    #[test]
    fn columns_past_the_line_end_clamp_to_it() {
        let span = span_at("x", Location::new(1, 9)).unwrap();
        assert_eq!(span.offset(), 1);
        assert_eq!(span.len(), 0);
        assert!(span_at("x", Location::new(0, 1)).is_none());
    }

    #[test]
    fn report_shows_code_message_and_help() {
        let source = "function main() {\n    nope();\n}\n";
        let diagnostic = Diagnostic::error(DiagnosticCode::UnknownFunction, "unknown function 'nope'")
            .at(Location::new(2, 5))
            .with_suggestion("did you mean 'note'?");
        let rendered = RenderedDiagnostic::new(diagnostic, "main.sbl", Some(source));

        let mut out = String::new();
        GraphicalReportHandler::new_themed(GraphicalTheme::unicode_nocolor())
            .render_report(&mut out, &rendered)
            .unwrap();
        assert!(out.contains("E2001"));
        assert!(out.contains("unknown function 'nope'"));
        assert!(out.contains("main.sbl"));
        assert!(out.contains("did you mean 'note'?"));
    }
}
