//! Integration tests for the Sable compiler frontend

use std::fs;
use std::path::{Path, PathBuf};

use sable::diagnostics::{DiagnosticCode, Severity};
use sable::{CatalogConfig, CompileOptions, CompiledUnit, FrontendError, check_source};
use sable::frontend::session;

fn fixtures(dir: &str) -> Vec<PathBuf> {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(dir);
    let mut paths: Vec<PathBuf> = fs::read_dir(&dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| path.extension().is_some_and(|e| e == "sbl"))
        .collect();
    paths.sort();
    paths
}

/// Helper to run the full pipeline on a source file
fn check_file(path: &Path) -> CompiledUnit {
    session::check_file(path, &CompileOptions::new()).unwrap()
}

fn summary(unit: &CompiledUnit) -> String {
    unit.diagnostics
        .iter()
        .map(|d| {
            let code = d.code.map(|c| c.as_str()).unwrap_or("-");
            format!("{} {code} {}", d.severity, d.message)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Every valid fixture checks without errors
#[test]
fn test_valid_fixtures() {
    let paths = fixtures("valid");
    assert!(!paths.is_empty());
    for path in paths {
        let unit = check_file(&path);
        assert!(
            !unit.has_errors(),
            "Expected {} to check cleanly, got:\n{}",
            path.display(),
            summary(&unit)
        );
    }
}

/// Every invalid fixture reports at least one error
#[test]
fn test_invalid_fixtures() {
    let paths = fixtures("invalid");
    assert!(!paths.is_empty());
    for path in paths {
        let unit = check_file(&path);
        assert!(unit.has_errors(), "Expected {} to report errors", path.display());
    }
}

#[test]
fn test_project_reports_every_unit_in_order() {
    let mut paths = fixtures("valid");
    paths.extend(fixtures("invalid"));
    paths.push(PathBuf::from("tests/fixtures/does_not_exist.sbl"));

    let report = session::check_project(&paths, &CompileOptions::new()).unwrap();
    assert_eq!(report.units.len(), paths.len());
    for (unit, path) in report.units.iter().zip(&paths) {
        assert_eq!(unit.name, path.display().to_string());
    }
    assert!(report.has_errors());
    let missing = report.units.last().unwrap();
    assert_eq!(missing.diagnostics.count_code(DiagnosticCode::UnreadableInput), 1);
}

#[test]
fn test_foreign_fixture_registers_nothing_foreign() {
    let unit = check_file(&fixtures("valid").into_iter().find(|p| p.ends_with("foreign.sbl")).unwrap());
    assert_eq!(unit.registry.exempt_names(), vec!["Window", "native_time"]);
    assert_eq!(unit.diagnostics.with_severity(Severity::Info).count(), 2);
    assert!(unit.registry.signatures("native_time").is_empty());
    assert!(!unit.registry.signatures("open_all").is_empty());
}

#[test]
fn test_diagnostics_for_a_unit() {
    let source = r#"
class Counter {
    var count = 0;
    function bump() { this.cuont = this.count + 1; }
}
[Frobnicate]
function run_all() { run_al(); var c = Counter(1); }
"#;
    let options = CompileOptions::new().with_catalog(CatalogConfig::new().with_modules(["System"]));
    let unit = check_source("counter.sbl", source, &options).unwrap();
    insta::assert_snapshot!(summary(&unit), @r"
    error E2003 'Counter' has no member 'cuont'
    warning W0001 did you mean 'count'?
    error E2001 unknown function 'run_al'
    warning W0001 did you mean 'run_all'?
    error E2004 'Counter' declares no constructors and takes 0 arguments, found 1
    warning W3001 unknown attribute 'Frobnicate'; allowing it
    ");
}

#[test]
fn test_codegen_gate() {
    let options = CompileOptions::new();
    let clean = check_source("clean.sbl", "var x = 1;", &options).unwrap();
    assert!(clean.program_for_codegen(&options).is_ok());

    let broken = check_source("broken.sbl", "var x = ;", &options).unwrap();
    assert!(matches!(
        broken.program_for_codegen(&options),
        Err(FrontendError::UnitHasErrors { .. })
    ));
}

#[test]
fn test_unknown_module_is_a_configuration_error() {
    let options = CompileOptions::new().with_catalog(CatalogConfig::new().with_modules(["System.Nope"]));
    let err = check_source("a.sbl", "var x = 1;", &options).unwrap_err();
    assert!(matches!(err, FrontendError::Catalog(_)));
}
