//! Toggle mapping tables stored as TOML.
//!
//! ```toml
//! [green]
//! microphone-scream = ["Банши", "Banshee"]
//!
//! [reverse]
//! breaker-off = ["Джинн", "Jinn"]
//!
//! [mimic]
//! names = ["Мимик", "Mimic"]
//! excluded = ["ghost-orb-only"]
//! ```
//!
//! Every section is optional. A missing `[mimic]` section falls back to the
//! default mimic names with no exclusions.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::models::ToggleMappings;

/// Parses mapping tables from TOML text.
pub fn parse_mappings_str(content: &str) -> Result<ToggleMappings> {
    toml::from_str(content).context("Failed to parse toggle mappings")
}

/// Loads mapping tables from a TOML file.
pub fn load_mappings(path: &Path) -> Result<ToggleMappings> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read mappings file: {}", path.display()))?;

    let mappings = parse_mappings_str(&content)
        .with_context(|| format!("Invalid mappings file: {}", path.display()))?;

    debug!(
        path = %path.display(),
        green = mappings.green.len(),
        reverse = mappings.reverse.len(),
        "Loaded toggle mappings"
    );
    Ok(mappings)
}

/// Serializes mapping tables back to TOML.
pub fn mappings_to_toml(mappings: &ToggleMappings) -> Result<String> {
    toml::to_string_pretty(mappings).context("Failed to serialize toggle mappings")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_tables() {
        let mappings = parse_mappings_str(
            r#"
            [green]
            microphone-scream = ["Банши", "Banshee"]

            [reverse]
            breaker-off = ["Jinn"]

            [mimic]
            names = ["Mimic"]
            excluded = ["orbs-only"]
            "#,
        )
        .unwrap();

        assert_eq!(mappings.green["microphone-scream"].len(), 2);
        assert_eq!(mappings.reverse["breaker-off"], vec!["Jinn".to_string()]);
        assert_eq!(mappings.mimic.names, vec!["Mimic".to_string()]);
        assert!(mappings.mimic.excluded.contains("orbs-only"));
    }

    #[test]
    fn test_missing_mimic_section_uses_defaults() {
        let mappings = parse_mappings_str("[green]\nfoo = [\"Oni\"]\n").unwrap();
        assert!(mappings.mimic.names.contains(&"Mimic".to_string()));
        assert!(mappings.mimic.excluded.is_empty());
        assert!(mappings.reverse.is_empty());
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(parse_mappings_str("").unwrap(), ToggleMappings::default());
    }

    #[test]
    fn test_wrong_shape_is_error() {
        assert!(parse_mappings_str("[green]\nfoo = \"Oni\"\n").is_err());
    }

    #[test]
    fn test_serialize_reparses() {
        let original = parse_mappings_str("[reverse]\nbreaker-off = [\"Jinn\"]\n").unwrap();
        let text = mappings_to_toml(&original).unwrap();
        assert_eq!(parse_mappings_str(&text).unwrap(), original);
    }
}
