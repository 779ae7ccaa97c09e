//! Shared CLI plumbing: errors, exit codes, and data loading.

use crate::catalog_db::{builtin_catalog, builtin_mappings};
use crate::config::Config;
use crate::models::{Entity, Language, ToggleMappings};
use crate::parser::{dedup_catalog, load_catalog, load_mappings};
use clap::Args;
use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use tracing::debug;

/// Process exit codes used by every command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    /// Command completed
    Success = 0,
    /// Bad input or failed checks
    Validation = 1,
    /// File or serialization failure
    Io = 2,
}

impl ExitCode {
    /// Numeric process exit code.
    #[must_use]
    pub const fn code(self) -> i32 {
        self as i32
    }
}

/// Category of a CLI failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorKind {
    /// Bad input or failed checks
    Validation,
    /// File or serialization failure
    Io,
}

/// Error returned by command handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliError {
    /// Failure category
    pub kind: CliErrorKind,
    /// Message printed to stderr
    pub message: String,
}

impl CliError {
    /// Validation failure (exit code 1).
    pub fn validation(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Validation,
            message: message.into(),
        }
    }

    /// I/O failure (exit code 2).
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            kind: CliErrorKind::Io,
            message: message.into(),
        }
    }

    /// Exit code for this error.
    #[must_use]
    pub const fn exit_code(&self) -> ExitCode {
        match self.kind {
            CliErrorKind::Validation => ExitCode::Validation,
            CliErrorKind::Io => ExitCode::Io,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for command handlers.
pub type CliResult<T> = Result<T, CliError>;

/// Pretty-prints `value` as JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?;
    println!("{text}");
    Ok(())
}

/// Data-source options shared by commands that need a catalog.
///
/// Precedence per file: command-line flag, then config file, then the
/// built-in data.
#[derive(Debug, Clone, Default, Args)]
pub struct DataArgs {
    /// Ghost catalog file (JSON, JSON5 or `const X = [...]` script)
    #[arg(long, value_name = "FILE")]
    pub catalog: Option<PathBuf>,

    /// Toggle mapping tables (TOML)
    #[arg(long, value_name = "FILE")]
    pub mappings: Option<PathBuf>,
}

/// Catalog and mappings ready for a session.
#[derive(Debug, Clone)]
pub struct LoadedData {
    /// Deduplicated catalog
    pub catalog: Vec<Entity>,
    /// Mapping tables
    pub mappings: ToggleMappings,
    /// Names dropped as duplicates
    pub duplicates: Vec<String>,
    /// Display language from the config file
    pub language: Language,
}

impl DataArgs {
    /// Loads the catalog and mappings, deduplicating the catalog.
    pub fn load(&self) -> CliResult<LoadedData> {
        let (raw, mappings, language) = self.load_raw()?;
        let (catalog, duplicates) = dedup_catalog(raw);
        Ok(LoadedData {
            catalog,
            mappings,
            duplicates,
            language,
        })
    }

    /// Loads the catalog exactly as stored, duplicates included.
    pub fn load_raw(&self) -> CliResult<(Vec<Entity>, ToggleMappings, Language)> {
        let config = Config::load()
            .map_err(|e| CliError::io(format!("Failed to load configuration: {e:#}")))?;

        let catalog_path = self.catalog.clone().or(config.paths.catalog);
        let catalog = match catalog_path {
            Some(path) => {
                debug!(path = %path.display(), "Using catalog file");
                load_catalog(&path).map_err(|e| CliError::io(format!("{e:#}")))?
            }
            None => builtin_catalog().map_err(|e| CliError::io(format!("{e:#}")))?,
        };

        let mappings_path = self.mappings.clone().or(config.paths.mappings);
        let mappings = match mappings_path {
            Some(path) => {
                debug!(path = %path.display(), "Using mappings file");
                load_mappings(&path).map_err(|e| CliError::io(format!("{e:#}")))?
            }
            None => builtin_mappings().map_err(|e| CliError::io(format!("{e:#}")))?,
        };

        Ok((catalog, mappings, config.ui.language))
    }
}
