//! Overlay resolution: turns the current filter state into a highlight per ghost.
//!
//! Resolution is a pure pass over the catalog. Each ghost's signals are
//! checked in a fixed priority order and the first tier that fires decides the
//! highlight:
//!
//! 1. hunt-sanity gray (masks every other tier)
//! 2. speed-category gray (the mimic is exempt)
//! 3. reverse-mapping gray
//! 4. feature-toggle green, including toggles the mimic imitates
//! 5. manual highlight carried over from the previous pass
//!
//! Lower tiers are still evaluated and kept in a [`SignalBreakdown`], but only
//! the winner's activators are recorded on the [`OverlayState`].

use crate::models::{
    Entity, FilterState, OverlayMode, OverlayState, SignalBreakdown, SignalId, SpeedCategory,
    ToggleMappings, SANITY_FILTER_ID,
};
use crate::services::sanity::is_below_threshold;
use crate::services::speed::speed_gray;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// Overlay state per ghost id.
pub type OverlayMap = HashMap<String, OverlayState>;

/// Output of one resolve pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolution {
    /// Winning overlay per ghost id
    pub overlays: OverlayMap,
    /// Every signal that fired per ghost id
    pub breakdowns: HashMap<String, SignalBreakdown>,
}

/// Resolves the overlay of a single ghost.
///
/// `previous` is the ghost's overlay from the last pass; it only matters when
/// no toggle fires, to keep a manual highlight in place.
#[must_use]
pub fn resolve_entity(
    entity: &Entity,
    filters: &FilterState,
    mappings: &ToggleMappings,
    is_mimic: bool,
    previous: Option<&OverlayState>,
) -> (OverlayState, SignalBreakdown) {
    let mut breakdown = SignalBreakdown::default();

    if is_below_threshold(&entity.sanity, filters.effective_threshold()) {
        breakdown.sanity_gray = true;
        return (
            OverlayState::tracked(OverlayMode::Gray, [SANITY_FILTER_ID]),
            breakdown,
        );
    }

    if !is_mimic {
        let active_speeds = filters.active_speed_categories();
        if let Some(categories) = speed_gray(&entity.speed_values(), &active_speeds) {
            breakdown.speed_gray = categories
                .into_iter()
                .map(|c| c.toggle_id().to_string())
                .collect();
        }
    }

    for id in &filters.active_toggles {
        if mappings.greens(id, entity) || (is_mimic && mappings.mimic.imitates(id)) {
            breakdown.feature_green.insert(id.clone());
        }
        if mappings.reverse_grays(id, entity) {
            breakdown.reverse_gray.insert(id.clone());
        }
    }

    let state = if !breakdown.speed_gray.is_empty() {
        OverlayState::tracked(OverlayMode::Gray, breakdown.speed_gray.iter().cloned())
    } else if !breakdown.reverse_gray.is_empty() {
        OverlayState::tracked(OverlayMode::Gray, breakdown.reverse_gray.iter().cloned())
    } else if !breakdown.feature_green.is_empty() {
        OverlayState::tracked(OverlayMode::Green, breakdown.feature_green.iter().cloned())
    } else if let Some(prev) = previous.filter(|p| p.is_manual()) {
        breakdown.manual_carry = true;
        OverlayState::manual(prev.mode)
    } else {
        OverlayState::default()
    };

    (state, breakdown)
}

/// Resolves every ghost of `catalog`.
///
/// Deterministic and idempotent: running it again on its own output with the
/// same filter state yields the same result.
#[must_use]
pub fn resolve(
    catalog: &[Entity],
    filters: &FilterState,
    mappings: &ToggleMappings,
    previous: &OverlayMap,
) -> Resolution {
    if catalog.is_empty() {
        warn!("Overlay resolution skipped: no entities loaded");
        return Resolution::default();
    }

    let mimic_id = mappings.find_mimic(catalog).map(|m| m.id.as_str());
    let mut resolution = Resolution::default();

    for entity in catalog {
        let is_mimic = mimic_id == Some(entity.id.as_str());
        let (state, breakdown) =
            resolve_entity(entity, filters, mappings, is_mimic, previous.get(&entity.id));
        resolution.overlays.insert(entity.id.clone(), state);
        resolution.breakdowns.insert(entity.id.clone(), breakdown);
    }

    let green = resolution
        .overlays
        .values()
        .filter(|s| s.mode == OverlayMode::Green)
        .count();
    let gray = resolution
        .overlays
        .values()
        .filter(|s| s.mode == OverlayMode::Gray)
        .count();
    debug!(
        toggles = filters.active_toggles.len(),
        threshold = ?filters.effective_threshold(),
        green,
        gray,
        "Resolved overlays"
    );

    resolution
}

/// Which sidebar labels to render as active.
///
/// A feature toggle's label is active when at least one ghost is currently
/// green with that toggle among its green activators (this covers the mimic,
/// whose activators record the toggles it imitates). Speed toggles are
/// listed but never active.
#[must_use]
pub fn sidebar_echo(
    overlays: &OverlayMap,
    filters: &FilterState,
    mappings: &ToggleMappings,
) -> BTreeMap<SignalId, bool> {
    let mut labels: BTreeMap<SignalId, bool> = mappings
        .feature_toggles()
        .into_iter()
        .chain(
            filters
                .active_toggles
                .iter()
                .filter(|id| !SpeedCategory::is_speed_toggle(id))
                .cloned(),
        )
        .map(|id| (id, false))
        .collect();

    for state in overlays.values() {
        if state.mode != OverlayMode::Green {
            continue;
        }
        for id in &state.green_activators {
            if let Some(active) = labels.get_mut(id) {
                *active = true;
            }
        }
    }

    for category in SpeedCategory::ALL {
        labels.insert(category.toggle_id().to_string(), false);
    }

    labels
}
