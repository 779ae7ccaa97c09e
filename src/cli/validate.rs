//! Validation command for catalog and mapping files.

use crate::cli::common::{print_json, CliError, CliResult, DataArgs};
use crate::services::validator::{CatalogValidator, ValidationError, ValidationWarning};
use clap::Args;
use serde::Serialize;

/// Check a catalog and its mapping tables for problems
#[derive(Debug, Clone, Args)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,

    /// Treat warnings as errors (exit non-zero)
    #[arg(long)]
    pub strict: bool,
}

/// JSON response for the validate command
#[derive(Debug, Serialize)]
struct ValidationResponse<'a> {
    valid: bool,
    ghosts: usize,
    errors: &'a [ValidationError],
    warnings: &'a [ValidationWarning],
}

impl ValidateArgs {
    /// Execute the validate command
    pub fn execute(&self) -> CliResult<()> {
        let (catalog, mappings, _) = self.data.load_raw()?;
        let report = CatalogValidator::new(&catalog, &mappings).validate();

        if self.json {
            print_json(&ValidationResponse {
                valid: report.is_valid(),
                ghosts: catalog.len(),
                errors: &report.errors,
                warnings: &report.warnings,
            })?;
        } else {
            if report.is_valid() {
                println!("✓ Validation passed ({} ghosts)", catalog.len());
            } else {
                println!("✗ Validation failed ({} ghosts)", catalog.len());
            }
            let details = report.format_message();
            if !details.is_empty() {
                println!();
                print!("{details}");
            }
        }

        if !report.is_valid() {
            return Err(CliError::validation("Validation failed"));
        }

        if self.strict && !report.warnings.is_empty() {
            return Err(CliError::validation("Warnings found in strict mode"));
        }

        Ok(())
    }
}
