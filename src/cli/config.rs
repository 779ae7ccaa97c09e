//! Configuration management CLI commands.

use crate::cli::common::{print_json, CliError, CliResult};
use crate::config::Config;
use crate::constants::APP_NAME;
use crate::models::Language;
use clap::{Args, Subcommand};
use serde::Serialize;
use std::path::PathBuf;

/// Configuration management commands
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Display current configuration
    Show(ConfigShowArgs),
    /// Set configuration values
    Set(ConfigSetArgs),
    /// Print the config file location
    Path,
}

/// Display current configuration
#[derive(Args, Debug)]
pub struct ConfigShowArgs {
    /// Output as JSON
    #[arg(long)]
    json: bool,
}

/// Set configuration values
#[derive(Args, Debug)]
pub struct ConfigSetArgs {
    /// Ghost catalog file used instead of the built-in data
    #[arg(long, value_name = "FILE", conflicts_with = "clear_catalog")]
    catalog: Option<PathBuf>,

    /// Toggle mappings file used instead of the built-in tables
    #[arg(long, value_name = "FILE", conflicts_with = "clear_mappings")]
    mappings: Option<PathBuf>,

    /// Display language (ru or en)
    #[arg(long, value_name = "LANG")]
    language: Option<String>,

    /// Go back to the built-in catalog
    #[arg(long)]
    clear_catalog: bool,

    /// Go back to the built-in mappings
    #[arg(long)]
    clear_mappings: bool,
}

/// JSON-serializable configuration for output
#[derive(Serialize, Debug)]
struct ConfigOutput {
    paths: PathsOutput,
    ui: UiOutput,
}

#[derive(Serialize, Debug)]
struct PathsOutput {
    catalog: Option<String>,
    mappings: Option<String>,
}

#[derive(Serialize, Debug)]
struct UiOutput {
    language: String,
}

impl ConfigArgs {
    /// Execute config subcommand
    pub fn execute(&self) -> CliResult<()> {
        match &self.command {
            ConfigCommand::Show(args) => args.execute(),
            ConfigCommand::Set(args) => args.execute(),
            ConfigCommand::Path => {
                let path = Config::config_file_path()
                    .map_err(|e| CliError::io(format!("Failed to locate config file: {e}")))?;
                println!("{}", path.display());
                Ok(())
            }
        }
    }
}

impl ConfigShowArgs {
    /// Execute show command
    pub fn execute(&self) -> CliResult<()> {
        let config = Config::load()
            .map_err(|e| CliError::validation(format!("Failed to load configuration: {e:#}")))?;

        if self.json {
            print_json(&to_output(&config))
        } else {
            output_human_readable(&config);
            Ok(())
        }
    }
}

impl ConfigSetArgs {
    /// Execute set command
    pub fn execute(&self) -> CliResult<()> {
        if self.catalog.is_none()
            && self.mappings.is_none()
            && self.language.is_none()
            && !self.clear_catalog
            && !self.clear_mappings
        {
            return Err(CliError::validation(
                "At least one configuration option must be specified: --catalog, --mappings, --language, --clear-catalog, or --clear-mappings",
            ));
        }

        let mut config = Config::load().unwrap_or_default();

        if self.clear_catalog {
            config.paths.catalog = None;
        }
        if self.clear_mappings {
            config.paths.mappings = None;
        }

        if let Some(path) = &self.catalog {
            config
                .set_catalog_path(path.clone())
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        if let Some(path) = &self.mappings {
            config
                .set_mappings_path(path.clone())
                .map_err(|e| CliError::validation(e.to_string()))?;
        }

        if let Some(raw) = &self.language {
            config.ui.language = raw.parse::<Language>().map_err(|_| {
                CliError::validation("Invalid language. Must be 'ru' or 'en'".to_string())
            })?;
        }

        config
            .save()
            .map_err(|e| CliError::io(format!("Failed to save configuration: {e:#}")))?;

        println!("Configuration updated successfully.");

        Ok(())
    }
}

fn to_output(config: &Config) -> ConfigOutput {
    ConfigOutput {
        paths: PathsOutput {
            catalog: config
                .paths
                .catalog
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
            mappings: config
                .paths
                .mappings
                .as_ref()
                .map(|p| p.to_string_lossy().to_string()),
        },
        ui: UiOutput {
            language: config.ui.language.code().to_string(),
        },
    }
}

/// Output configuration in human-readable format
fn output_human_readable(config: &Config) {
    println!("{APP_NAME} Configuration");
    println!("=======================");
    println!();

    println!("Paths:");
    match &config.paths.catalog {
        Some(path) => println!("  Catalog:  {}", path.display()),
        None => println!("  Catalog:  (built-in)"),
    }
    match &config.paths.mappings {
        Some(path) => println!("  Mappings: {}", path.display()),
        None => println!("  Mappings: (built-in)"),
    }
    println!();

    println!("UI:");
    println!("  Language: {}", config.ui.language.code());
    println!();
}
