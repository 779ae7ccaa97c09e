//! Evidence-based visibility filtering.
//!
//! Visibility only depends on the per-evidence include/exclude filters.
//! Overlay signals (toggles, sanity threshold, clicks) never hide a card.

use crate::models::{Entity, EvidenceKey, FilterMode, FilterState};
use serde::Serialize;

/// Returns true if `entity` passes every evidence filter in `filters`.
#[must_use]
pub fn is_visible(filters: &FilterState, entity: &Entity) -> bool {
    EvidenceKey::ALL.into_iter().all(|key| {
        let has = entity.has_evidence(key);
        match filters.visibility(key) {
            FilterMode::None => true,
            FilterMode::Include => has,
            FilterMode::Exclude => !has,
        }
    })
}

/// Visibility decision for a whole catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VisibilityReport {
    /// One flag per catalog entity, in catalog order
    pub visible: Vec<bool>,
    /// Number of visible entities
    pub visible_count: usize,
    /// True when nothing is visible; callers show a "no matches" indicator
    pub empty_result: bool,
}

impl VisibilityReport {
    /// Visibility of the entity at catalog position `index`.
    #[must_use]
    pub fn is_visible_at(&self, index: usize) -> bool {
        self.visible.get(index).copied().unwrap_or(false)
    }
}

/// Evaluates `filters` against every entity of `catalog`.
#[must_use]
pub fn visibility_report(catalog: &[Entity], filters: &FilterState) -> VisibilityReport {
    let visible: Vec<bool> = catalog.iter().map(|e| is_visible(filters, e)).collect();
    let visible_count = visible.iter().filter(|v| **v).count();

    VisibilityReport {
        visible,
        visible_count,
        empty_result: visible_count == 0,
    }
}
