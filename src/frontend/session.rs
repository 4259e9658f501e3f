//! Per-unit and per-project compilation pipeline.
//!
//! A unit runs `lex → parse` with a fresh [`SymbolRegistry`]; the parser registers declarations and
//! validates references as it goes, so the unit's diagnostics are complete when parsing returns.
//! Projects run the same pipeline once per file, sequentially, and aggregate the results. Symbols
//! are not shared between the files of a project.

use std::fmt;
use std::path::{Path, PathBuf};

use sable_core::host::{HOST_MODULES, STDLIB};
use sable_syntax::ast::Program;
use sable_syntax::diagnostics::{Diagnostic, DiagnosticBag, DiagnosticCode, Reporter};
use sable_syntax::lexer::{self, Token};
use sable_syntax::parser;

use crate::frontend::catalog::{CatalogError, TypeResolverFn};
use crate::frontend::registry::SymbolRegistry;

/// Which host modules the catalog scans, and how user types join type resolution.
#[derive(Clone)]
pub struct CatalogConfig {
    /// `None` scans every host module.
    modules: Option<Vec<String>>,
    include_stdlib: bool,
    type_resolver: Option<TypeResolverFn>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            modules: None,
            include_stdlib: true,
            type_resolver: None,
        }
    }
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("modules", &self.module_names())
            .field("include_stdlib", &self.include_stdlib)
            .field("type_resolver", &self.type_resolver.is_some())
            .finish()
    }
}

impl CatalogConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan only the named host modules.
    pub fn with_modules<I, S>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modules = Some(modules.into_iter().map(Into::into).collect());
        self
    }

    /// Include the language's own standard library (`print`, `len`, `[Extern]`, ...).
    pub fn with_stdlib(mut self, include: bool) -> Self {
        self.include_stdlib = include;
        self
    }

    /// Consult `resolver` before the host tables when resolving type names.
    pub fn with_type_resolver(mut self, resolver: TypeResolverFn) -> Self {
        self.type_resolver = Some(resolver);
        self
    }

    /// Module identities to scan, standard library last.
    pub fn module_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = match &self.modules {
            Some(modules) => modules.iter().map(String::as_str).collect(),
            None => HOST_MODULES.iter().map(|m| m.name).collect(),
        };
        if self.include_stdlib && !names.contains(&STDLIB.name) {
            names.push(STDLIB.name);
        }
        names
    }

    pub fn type_resolver(&self) -> Option<&TypeResolverFn> {
        self.type_resolver.as_ref()
    }
}

#[derive(Debug, Clone, Default)]
pub struct CompileOptions {
    pub catalog: CatalogConfig,
    /// Treat warnings as errors at the code-generation boundary.
    pub deny_warnings: bool,
}

impl CompileOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, catalog: CatalogConfig) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn deny_warnings(mut self, deny: bool) -> Self {
        self.deny_warnings = deny;
        self
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to read '{}'", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("'{unit}' has {count} error(s); refusing to generate code")]
    UnitHasErrors { unit: String, count: usize },

    #[error("'{unit}' has {count} warning(s) and warnings are denied")]
    WarningsDenied { unit: String, count: usize },
}

/// The result of running the pipeline over one compilation unit.
#[derive(Debug)]
pub struct CompiledUnit {
    pub name: String,
    /// Source text, when the unit was read successfully.
    pub source: Option<String>,
    pub program: Program,
    pub diagnostics: DiagnosticBag,
    pub registry: SymbolRegistry,
}

impl CompiledUnit {
    pub fn has_errors(&self) -> bool {
        self.diagnostics.has_errors()
    }

    /// The code-generation boundary: hand out the tree only if nothing blocks generation.
    ///
    /// Errors always block; warnings block only under `deny_warnings`.
    pub fn program_for_codegen(&self, options: &CompileOptions) -> Result<&Program, FrontendError> {
        let errors = self.diagnostics.error_count();
        if errors > 0 {
            return Err(FrontendError::UnitHasErrors {
                unit: self.name.clone(),
                count: errors,
            });
        }
        let warnings = self.diagnostics.warning_count();
        if options.deny_warnings && warnings > 0 {
            return Err(FrontendError::WarningsDenied {
                unit: self.name.clone(),
                count: warnings,
            });
        }
        Ok(&self.program)
    }
}

/// Aggregated results of a multi-file check.
#[derive(Debug, Default)]
pub struct ProjectReport {
    pub units: Vec<CompiledUnit>,
}

impl ProjectReport {
    pub fn error_count(&self) -> usize {
        self.units.iter().map(|u| u.diagnostics.error_count()).sum()
    }

    pub fn warning_count(&self) -> usize {
        self.units.iter().map(|u| u.diagnostics.warning_count()).sum()
    }

    pub fn has_errors(&self) -> bool {
        self.units.iter().any(CompiledUnit::has_errors)
    }

    /// No errors, and no warnings either when `deny_warnings` is set.
    pub fn is_clean(&self, options: &CompileOptions) -> bool {
        !self.has_errors() && !(options.deny_warnings && self.warning_count() > 0)
    }
}

/// Lex and parse one unit of source text.
#[tracing::instrument(skip_all, fields(unit = name, bytes = source.len()))]
pub fn check_source(name: &str, source: &str, options: &CompileOptions) -> Result<CompiledUnit, FrontendError> {
    let registry = SymbolRegistry::from_config(&options.catalog)?;
    let mut unit = match lexer::lex(source) {
        Ok(tokens) => check_tokens(name, &tokens, registry),
        Err(errors) => {
            let mut diagnostics = DiagnosticBag::new();
            for error in &errors {
                diagnostics.report(Diagnostic::from(error));
            }
            diagnostics.report_fatal(
                DiagnosticCode::ScannerFailure,
                format!("'{name}' could not be scanned ({} error(s)); skipping the parse", errors.len()),
                None,
            );
            CompiledUnit {
                name: name.to_string(),
                source: None,
                program: Program::default(),
                diagnostics,
                registry,
            }
        }
    };
    unit.source = Some(source.to_string());
    tracing::debug!(
        errors = unit.diagnostics.error_count(),
        warnings = unit.diagnostics.warning_count(),
        "checked unit"
    );
    Ok(unit)
}

/// Parse an already-scanned token stream against `registry`.
pub fn check_tokens(name: &str, tokens: &[Token], mut registry: SymbolRegistry) -> CompiledUnit {
    let mut diagnostics = DiagnosticBag::new();
    let program = parser::parse(tokens, &mut diagnostics, &mut registry);
    CompiledUnit {
        name: name.to_string(),
        source: None,
        program,
        diagnostics,
        registry,
    }
}

/// Read and check one file.
pub fn check_file(path: &Path, options: &CompileOptions) -> Result<CompiledUnit, FrontendError> {
    let source = std::fs::read_to_string(path).map_err(|source| FrontendError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    check_source(&path.display().to_string(), &source, options)
}

/// Check each file in order. An unreadable file becomes a unit with a fatal diagnostic; only
/// catalog configuration errors abort the whole run.
#[tracing::instrument(skip_all, fields(files = paths.len()))]
pub fn check_project(paths: &[PathBuf], options: &CompileOptions) -> Result<ProjectReport, FrontendError> {
    let mut report = ProjectReport::default();
    for path in paths {
        let unit = match check_file(path, options) {
            Ok(unit) => unit,
            Err(err @ FrontendError::Io { .. }) => unreadable_unit(path, &err, options)?,
            Err(err) => return Err(err),
        };
        report.units.push(unit);
    }
    tracing::info!(
        units = report.units.len(),
        errors = report.error_count(),
        warnings = report.warning_count(),
        "project checked"
    );
    Ok(report)
}

fn unreadable_unit(path: &Path, err: &FrontendError, options: &CompileOptions) -> Result<CompiledUnit, FrontendError> {
    let mut diagnostics = DiagnosticBag::new();
    let mut message = err.to_string();
    if let Some(source) = std::error::Error::source(err) {
        message = format!("{message}: {source}");
    }
    diagnostics.report_fatal(DiagnosticCode::UnreadableInput, message, None);
    Ok(CompiledUnit {
        name: path.display().to_string(),
        source: None,
        program: Program::default(),
        diagnostics,
        registry: SymbolRegistry::from_config(&options.catalog)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_unit_passes_the_codegen_boundary() {
        let unit = check_source("main.sbl", "function main() { println(\"hi\"); }", &CompileOptions::new()).unwrap();
        assert!(!unit.has_errors());
        assert!(unit.program_for_codegen(&CompileOptions::new()).is_ok());
    }

    #[test]
    fn unit_with_errors_is_refused() {
        let options = CompileOptions::new();
        let unit = check_source("main.sbl", "function main() { nope(); }", &options).unwrap();
        let err = unit.program_for_codegen(&options).unwrap_err();
        assert!(matches!(err, FrontendError::UnitHasErrors { count: 1, .. }));
    }

    #[test]
    fn denied_warnings_block_codegen() {
        let options = CompileOptions::new().deny_warnings(true);
        let unit = check_source("main.sbl", "[Whatever]\nfunction main() { }", &options).unwrap();
        assert!(!unit.has_errors());
        assert!(matches!(
            unit.program_for_codegen(&options),
            Err(FrontendError::WarningsDenied { count: 1, .. })
        ));
    }

    #[test]
    fn lex_errors_become_diagnostics() {
        let unit = check_source("bad.sbl", "var s = \"open;", &CompileOptions::new()).unwrap();
        assert!(unit.has_errors());
        assert!(unit.program.statements.is_empty());
        assert!(unit.diagnostics.count_code(DiagnosticCode::UnterminatedLiteral) >= 1);
        assert_eq!(unit.diagnostics.count_code(DiagnosticCode::ScannerFailure), 1);
    }

    #[test]
    fn unknown_module_is_a_configuration_error() {
        let options = CompileOptions::new().with_catalog(CatalogConfig::new().with_modules(["Nowhere"]));
        assert!(matches!(
            check_source("main.sbl", "", &options),
            Err(FrontendError::Catalog(CatalogError::UnknownModule(_)))
        ));
    }

    #[test]
    fn unreadable_files_are_fatal_diagnostics() {
        let paths = vec![PathBuf::from("/definitely/not/here.sbl")];
        let report = check_project(&paths, &CompileOptions::new()).unwrap();
        assert_eq!(report.units.len(), 1);
        assert_eq!(report.units[0].diagnostics.count_code(DiagnosticCode::UnreadableInput), 1);
        assert!(report.has_errors());
    }

    #[test]
    fn stdlib_is_scanned_last_unless_excluded() {
        let config = CatalogConfig::new();
        assert_eq!(config.module_names().last(), Some(&"Sable"));
        assert!(!CatalogConfig::new().with_stdlib(false).module_names().contains(&"Sable"));
    }
}
