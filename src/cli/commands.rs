//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level `run()`.

use std::fs;
use std::path::{Path, PathBuf};

use sable_core::host::{self, HostModule};

use super::render;
use super::{CliError, CliResult, ExitCode};
use crate::frontend::session::{self, CompileOptions, CompiledUnit};

/// Largest source file the single-file commands will read.
const MAX_SOURCE_SIZE: u64 = 100 * 1024 * 1024;

/// Read a source file.
///
/// Returns an error if:
/// - The file cannot be read (I/O error)
/// - The file exceeds `MAX_SOURCE_SIZE` (100 MB)
pub fn read_source(path: &Path) -> CliResult<String> {
    let metadata =
        fs::metadata(path).map_err(|e| CliError::failure(format!("Cannot access file '{}': {}", path.display(), e)))?;

    if metadata.len() > MAX_SOURCE_SIZE {
        return Err(CliError::failure(format!(
            "Source file '{}' is too large ({} bytes, max {} bytes)",
            path.display(),
            metadata.len(),
            MAX_SOURCE_SIZE
        )));
    }

    fs::read_to_string(path).map_err(|e| CliError::failure(format!("Error reading file '{}': {}", path.display(), e)))
}

fn emit_unit(unit: &CompiledUnit) {
    render::emit(unit.diagnostics.iter().cloned(), &unit.name, unit.source.as_deref());
}

fn check_one(path: &Path, options: &CompileOptions) -> CliResult<CompiledUnit> {
    let source = read_source(path)?;
    let unit = session::check_source(&path.display().to_string(), &source, options)?;
    emit_unit(&unit);
    Ok(unit)
}

/// Check every file, print diagnostics, and summarize.
pub fn check_files(files: &[PathBuf], options: &CompileOptions) -> CliResult<ExitCode> {
    let report = session::check_project(files, options)?;
    for unit in &report.units {
        emit_unit(unit);
    }

    let errors = report.error_count();
    let warnings = report.warning_count();
    if report.is_clean(options) {
        println!(
            "✓ Checked {} file(s): {errors} error(s), {warnings} warning(s)",
            report.units.len()
        );
        Ok(ExitCode::SUCCESS)
    } else {
        let denied = if errors == 0 { " (warnings denied)" } else { "" };
        Err(CliError::failure(format!(
            "✗ Checked {} file(s): {errors} error(s), {warnings} warning(s){denied}",
            report.units.len()
        )))
    }
}

/// Parse a file and print its tree.
pub fn print_ast(path: &Path, options: &CompileOptions) -> CliResult<ExitCode> {
    let unit = check_one(path, options)?;
    println!("{:#?}", unit.program);
    Ok(if unit.has_errors() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// Print what a file registers with the symbol registry.
pub fn print_symbols(path: &Path, options: &CompileOptions) -> CliResult<ExitCode> {
    let unit = check_one(path, options)?;
    let registry = &unit.registry;

    println!("functions:");
    for name in registry.get_all_method_names() {
        for signature in registry.signatures(&name) {
            let params: Vec<String> = signature
                .params
                .iter()
                .map(|p| match &p.ty {
                    Some(ty) => format!("{}: {ty}", p.name),
                    None => p.name.clone(),
                })
                .collect();
            let returns = signature.return_type.as_deref().map(|r| format!(": {r}")).unwrap_or_default();
            println!("  {name}({}){returns}  [{}]", params.join(", "), signature.loc);
        }
    }

    let mut classes: Vec<_> = registry.classes().collect();
    classes.sort_by(|a, b| a.name.cmp(&b.name));
    println!("types:");
    for class in classes {
        let bases = if class.bases.is_empty() {
            String::new()
        } else {
            format!(" : {}", class.bases.join(", "))
        };
        println!("  {} {}{bases}  [{}]", class.kind.as_str(), class.name, class.loc);
        let members: Vec<&str> = class.member_names().collect();
        if !members.is_empty() {
            println!("    members: {}", members.join(", "));
        }
        if !class.constructors.is_empty() {
            let arities: Vec<String> = class.constructors.iter().map(usize::to_string).collect();
            println!("    constructors: {}", arities.join(", "));
        }
    }

    let exempt = registry.exempt_names();
    if !exempt.is_empty() {
        println!("host-provided: {}", exempt.join(", "));
    }
    Ok(if unit.has_errors() { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}

/// List the host modules and the language's standard library.
pub fn list_modules() -> CliResult<ExitCode> {
    let modules: Vec<&HostModule> = host::HOST_MODULES
        .iter()
        .copied()
        .chain(std::iter::once(&host::STDLIB))
        .collect();
    for module in modules {
        println!(
            "{:<42} {:>3} types  {:>3} functions  {:>3} attributes",
            module.name,
            module.types.len(),
            module.functions.len(),
            module.attributes.len()
        );
    }
    Ok(ExitCode::SUCCESS)
}
