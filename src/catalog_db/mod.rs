//! Built-in ghost catalog and toggle mappings.
//!
//! Both files are embedded in the binary at compile time, so the engine
//! works without any data files on disk. User-supplied files replace them
//! entirely; they are never merged.

use anyhow::{Context, Result};

use crate::models::{Entity, ToggleMappings};
use crate::parser::{parse_catalog_str, parse_mappings_str};

/// Embedded catalog source.
pub const BUILTIN_CATALOG: &str = include_str!("ghosts.json5");

/// Embedded mapping tables source.
pub const BUILTIN_MAPPINGS: &str = include_str!("mappings.toml");

/// Parses the embedded ghost catalog.
pub fn builtin_catalog() -> Result<Vec<Entity>> {
    parse_catalog_str(BUILTIN_CATALOG).context("Failed to parse embedded ghosts.json5")
}

/// Parses the embedded toggle mappings.
pub fn builtin_mappings() -> Result<ToggleMappings> {
    parse_mappings_str(BUILTIN_MAPPINGS).context("Failed to parse embedded mappings.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{EvidenceKey, SpeedCategory};
    use std::collections::HashSet;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = builtin_catalog().unwrap();
        assert_eq!(catalog.len(), 24);

        let names: HashSet<&str> = catalog.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(names.len(), catalog.len(), "duplicate ghost names");
    }

    #[test]
    fn test_every_ghost_has_three_evidence() {
        for ghost in builtin_catalog().unwrap() {
            assert_eq!(ghost.evidence.len(), 3, "{} evidence count", ghost.id);
        }
    }

    #[test]
    fn test_every_speed_and_sanity_parses() {
        for ghost in builtin_catalog().unwrap() {
            assert!(
                ghost.speed_values().iter().all(|v| v.is_finite()),
                "{} speed",
                ghost.id
            );
            assert!(
                ghost.sanity_parts().iter().all(|p| p.upper().is_finite()),
                "{} sanity",
                ghost.id
            );
        }
    }

    #[test]
    fn test_builtin_mappings_resolve_to_catalog() {
        let catalog = builtin_catalog().unwrap();
        let mappings = builtin_mappings().unwrap();

        for names in mappings.green.values().chain(mappings.reverse.values()) {
            for name in names {
                assert!(
                    catalog.iter().any(|e| e.is_named(name)),
                    "mapped name {name} not in catalog"
                );
            }
        }
        assert!(mappings.find_mimic(&catalog).is_some());
    }

    #[test]
    fn test_builtin_mappings_have_no_speed_entries() {
        let mappings = builtin_mappings().unwrap();
        for category in SpeedCategory::ALL {
            assert!(!mappings.green.contains_key(category.toggle_id()));
            assert!(!mappings.reverse.contains_key(category.toggle_id()));
        }
    }

    #[test]
    fn test_mimic_record() {
        let catalog = builtin_catalog().unwrap();
        let mimic = builtin_mappings().unwrap().find_mimic(&catalog).cloned().unwrap();
        assert_eq!(mimic.id, "{Мимик} [Mimic]");
        assert!(mimic.has_evidence(EvidenceKey::Zero));
    }
}
