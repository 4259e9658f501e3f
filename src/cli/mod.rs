//! CLI module for the Sable compiler frontend
//!
//! ## Commands
//!
//! - `check <files...>` - Parse and validate source files, reporting diagnostics
//! - `ast <file>` - Print the parsed tree of one file
//! - `symbols <file>` - Print the symbols a file registers
//! - `modules` - List the host modules the catalog can scan
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;
pub mod render;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand};

use crate::frontend::session::{CatalogConfig, CompileOptions};

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }

    /// Create an error with a custom exit code.
    pub fn with_code(message: impl Into<String>, code: i32) -> Self {
        Self::new(message, ExitCode(code))
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

impl From<crate::frontend::session::FrontendError> for CliError {
    fn from(err: crate::frontend::session::FrontendError) -> Self {
        CliError::with_code(format!("error: {err}"), 2)
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// The Sable language compiler frontend
#[derive(Parser, Debug)]
#[command(name = "sable")]
#[command(version = VERSION)]
#[command(about = "Parse and validate Sable source against the host symbol catalog", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// Host catalog selection shared by the commands that parse source.
#[derive(Args, Debug, Clone, Default)]
pub struct CatalogArgs {
    /// Scan only this host module (repeatable; default: all host modules)
    #[arg(long = "module", value_name = "NAME")]
    pub modules: Vec<String>,

    /// Do not scan the language's own standard library
    #[arg(long)]
    pub no_stdlib: bool,
}

impl CatalogArgs {
    pub fn to_config(&self) -> CatalogConfig {
        let config = CatalogConfig::new().with_stdlib(!self.no_stdlib);
        if self.modules.is_empty() {
            config
        } else {
            config.with_modules(self.modules.iter().cloned())
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Parse and validate source files
    Check {
        /// Source files, checked in order
        #[arg(value_name = "FILE", required = true)]
        files: Vec<PathBuf>,
        #[command(flatten)]
        catalog: CatalogArgs,
        /// Fail when any warning is reported
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Print the parsed tree of a file
    Ast {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// Print the functions, classes and exempt names a file registers
    Symbols {
        #[arg(value_name = "FILE")]
        file: PathBuf,
        #[command(flatten)]
        catalog: CatalogArgs,
    },

    /// List the host modules available to the catalog
    Modules,
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Check {
            files,
            catalog,
            deny_warnings,
        } => {
            let options = CompileOptions::new()
                .with_catalog(catalog.to_config())
                .deny_warnings(deny_warnings);
            commands::check_files(&files, &options)
        }
        Command::Ast { file, catalog } => {
            commands::print_ast(&file, &CompileOptions::new().with_catalog(catalog.to_config()))
        }
        Command::Symbols { file, catalog } => {
            commands::print_symbols(&file, &CompileOptions::new().with_catalog(catalog.to_config()))
        }
        Command::Modules => commands::list_modules(),
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_check() {
        let cli = Cli::try_parse_from([
            "sable",
            "check",
            "a.sbl",
            "b.sbl",
            "--module",
            "System",
            "--module",
            "System.IO",
            "--no-stdlib",
            "--deny-warnings",
        ])
        .unwrap();
        let Command::Check {
            files,
            catalog,
            deny_warnings,
        } = cli.command
        else {
            panic!("Expected Check command");
        };
        assert_eq!(files.len(), 2);
        assert_eq!(catalog.modules, vec!["System", "System.IO"]);
        assert!(catalog.no_stdlib);
        assert!(deny_warnings);
        assert_eq!(catalog.to_config().module_names(), vec!["System", "System.IO"]);
    }

    #[test]
    fn test_cli_check_requires_a_file() {
        assert!(Cli::try_parse_from(["sable", "check"]).is_err());
    }

    #[test]
    fn test_cli_parse_ast_and_symbols() {
        let cli = Cli::try_parse_from(["sable", "ast", "main.sbl"]).unwrap();
        assert!(matches!(cli.command, Command::Ast { .. }));

        let cli = Cli::try_parse_from(["sable", "symbols", "main.sbl", "--module", "System"]).unwrap();
        if let Command::Symbols { catalog, .. } = cli.command {
            assert_eq!(catalog.modules, vec!["System"]);
            assert!(!catalog.no_stdlib);
        } else {
            panic!("Expected Symbols command");
        }
    }

    #[test]
    fn test_cli_parse_modules() {
        let cli = Cli::try_parse_from(["sable", "modules"]).unwrap();
        assert!(matches!(cli.command, Command::Modules));
    }

    #[test]
    fn test_default_catalog_args_scan_everything() {
        let config = CatalogArgs::default().to_config();
        let names = config.module_names();
        assert!(names.contains(&"System"));
        assert!(names.contains(&"Sable"));
    }
}
