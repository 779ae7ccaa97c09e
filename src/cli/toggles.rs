//! Toggles command: list every sidebar toggle the engine understands.

use crate::cli::common::{print_json, CliError, CliResult, DataArgs};
use crate::models::{SpeedCategory, ToggleMappings};
use crate::parser::mappings_to_toml;
use clap::Args;
use serde::Serialize;

/// List sidebar toggles and the ghosts they point at
#[derive(Debug, Clone, Args)]
pub struct TogglesArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Output as JSON
    #[arg(long, conflicts_with = "toml")]
    pub json: bool,

    /// Print the mapping tables in use as a TOML mappings file
    #[arg(long)]
    pub toml: bool,
}

/// One toggle row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToggleInfo {
    /// Toggle id
    pub id: String,
    /// `speed` or `feature`
    pub kind: &'static str,
    /// Ghost names the toggle highlights green
    pub green: Vec<String>,
    /// Ghost names the toggle grays out
    pub reverse: Vec<String>,
    /// Whether the mimic is greened by this toggle
    pub mimic_imitates: bool,
}

/// Builds the toggle listing: speed toggles first, then feature toggles by id.
#[must_use]
pub fn toggle_listing(mappings: &ToggleMappings) -> Vec<ToggleInfo> {
    let speeds = SpeedCategory::ALL.into_iter().map(|category| ToggleInfo {
        id: category.toggle_id().to_string(),
        kind: "speed",
        green: Vec::new(),
        reverse: Vec::new(),
        mimic_imitates: false,
    });

    let features = mappings.feature_toggles().into_iter().map(|id| ToggleInfo {
        green: mappings.green.get(&id).cloned().unwrap_or_default(),
        reverse: mappings.reverse.get(&id).cloned().unwrap_or_default(),
        mimic_imitates: mappings.mimic.imitates(&id),
        kind: "feature",
        id,
    });

    speeds.chain(features).collect()
}

impl TogglesArgs {
    /// Execute the toggles command
    pub fn execute(&self) -> CliResult<()> {
        let data = self.data.load()?;

        if self.toml {
            let text = mappings_to_toml(&data.mappings)
                .map_err(|e| CliError::io(format!("{e:#}")))?;
            print!("{text}");
            return Ok(());
        }

        let listing = toggle_listing(&data.mappings);

        if self.json {
            return print_json(&listing);
        }

        for info in &listing {
            let mut targets = Vec::new();
            if !info.green.is_empty() {
                targets.push(format!("green: {}", info.green.join(", ")));
            }
            if !info.reverse.is_empty() {
                targets.push(format!("gray: {}", info.reverse.join(", ")));
            }
            if info.mimic_imitates {
                targets.push("mimic".to_string());
            }
            println!("{:<28} {:<8} {}", info.id, info.kind, targets.join("; "));
        }

        Ok(())
    }
}
