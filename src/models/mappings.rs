//! Static toggle → ghost mapping tables.
//!
//! These tables are configuration, not derived data: which sidebar toggle
//! points at which ghosts (green), which toggle rules ghosts out (reverse
//! gray), and how the mimicking ghost reacts to toggles.

use crate::models::entity::Entity;
use crate::models::overlay::SignalId;
use crate::models::speed::SpeedCategory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// The one ghost that imitates other ghosts' behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MimicRule {
    /// Name variants identifying the mimic (either language)
    #[serde(default)]
    pub names: Vec<String>,
    /// Toggles the mimic cannot imitate
    #[serde(default)]
    pub excluded: BTreeSet<SignalId>,
}

impl Default for MimicRule {
    fn default() -> Self {
        Self {
            names: vec!["Мимик".to_string(), "Mimic".to_string()],
            excluded: BTreeSet::new(),
        }
    }
}

impl MimicRule {
    /// Returns true if `entity` is the mimic.
    #[must_use]
    pub fn is_mimic(&self, entity: &Entity) -> bool {
        entity.names.matches_any(self.names.as_slice())
    }

    /// Returns true if the mimic is greened by toggle `id`.
    ///
    /// Speed-category toggles are never imitated.
    #[must_use]
    pub fn imitates(&self, id: &str) -> bool {
        !self.excluded.contains(id) && !SpeedCategory::is_speed_toggle(id)
    }
}

/// Mapping tables consumed by the overlay resolver.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToggleMappings {
    /// Toggle → ghost names it highlights green
    #[serde(default)]
    pub green: BTreeMap<SignalId, Vec<String>>,
    /// Toggle → ghost names it rules out (gray)
    #[serde(default)]
    pub reverse: BTreeMap<SignalId, Vec<String>>,
    /// Mimic identity and exclusions
    #[serde(default)]
    pub mimic: MimicRule,
}

impl ToggleMappings {
    /// Returns true if toggle `id`'s green table lists `entity`.
    #[must_use]
    pub fn greens(&self, id: &str, entity: &Entity) -> bool {
        self.green
            .get(id)
            .is_some_and(|names| entity.names.matches_any(names.as_slice()))
    }

    /// Returns true if toggle `id`'s reverse table lists `entity`.
    #[must_use]
    pub fn reverse_grays(&self, id: &str, entity: &Entity) -> bool {
        self.reverse
            .get(id)
            .is_some_and(|names| entity.names.matches_any(names.as_slice()))
    }

    /// Every feature toggle mentioned by either table, in id order.
    ///
    /// Speed toggles are not listed; they are built in.
    #[must_use]
    pub fn feature_toggles(&self) -> BTreeSet<SignalId> {
        self.green
            .keys()
            .chain(self.reverse.keys())
            .filter(|id| !SpeedCategory::is_speed_toggle(id))
            .cloned()
            .collect()
    }

    /// Returns true if `id` is a speed toggle or appears in a table.
    #[must_use]
    pub fn knows_toggle(&self, id: &str) -> bool {
        SpeedCategory::is_speed_toggle(id)
            || self.green.contains_key(id)
            || self.reverse.contains_key(id)
    }

    /// First catalog entity that is the mimic.
    #[must_use]
    pub fn find_mimic<'c>(&self, catalog: &'c [Entity]) -> Option<&'c Entity> {
        catalog.iter().find(|e| self.mimic.is_mimic(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mappings() -> ToggleMappings {
        let mut mappings = ToggleMappings::default();
        mappings
            .green
            .insert("microphone-scream".into(), vec!["Banshee".into()]);
        mappings.reverse.insert("breaker-off".into(), vec!["Джинн".into()]);
        mappings.mimic.excluded.insert("microphone-scream".into());
        mappings
    }

    #[test]
    fn test_tables_match_either_name_variant() {
        let mappings = mappings();
        let banshee = Entity::new("{Банши} [Banshee]", "1.7", "50");
        let jinn = Entity::new("{Джинн} [Jinn]", "1.7/2.5", "50");

        assert!(mappings.greens("microphone-scream", &banshee));
        assert!(!mappings.greens("microphone-scream", &jinn));
        assert!(mappings.reverse_grays("breaker-off", &jinn));
        assert!(!mappings.greens("unknown", &banshee));
    }

    #[test]
    fn test_mimic_identity_and_exclusions() {
        let mappings = mappings();
        let mimic = Entity::new("{Мимик} [Mimic]", "1.7", "50");
        let spirit = Entity::new("{Дух} [Spirit]", "1.7", "50");

        assert!(mappings.mimic.is_mimic(&mimic));
        assert!(!mappings.mimic.is_mimic(&spirit));
        assert!(!mappings.mimic.imitates("microphone-scream"));
        assert!(!mappings.mimic.imitates("speed-slow"));
        assert!(mappings.mimic.imitates("breaker-off"));

        let catalog = vec![spirit, mimic];
        assert_eq!(mappings.find_mimic(&catalog).map(|e| e.names.english.as_str()), Some("Mimic"));
    }

    #[test]
    fn test_feature_toggles_union() {
        let mappings = mappings();
        let toggles: Vec<_> = mappings.feature_toggles().into_iter().collect();
        assert_eq!(toggles, vec!["breaker-off".to_string(), "microphone-scream".to_string()]);
        assert!(mappings.knows_toggle("speed-norm"));
        assert!(!mappings.knows_toggle("nothing"));
    }
}
