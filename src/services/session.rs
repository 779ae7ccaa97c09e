//! Single-session engine that applies UI events to the filter state.
//!
//! The session owns the immutable catalog and the mutable state derived from
//! it. Every handler does one synchronous, bounded pass:
//!
//! - toggle, threshold and card-click events re-run overlay resolution
//! - visibility-filter cycling only re-evaluates visibility
//! - reloading the catalog resets every filter and overlay
//!
//! With an empty catalog every handler is a no-op and the snapshot reports
//! "no entities".

use crate::models::{
    parse_threshold, Entity, EvidenceKey, FilterMode, FilterState, Language, OverlayMode,
    OverlayState, SignalBreakdown, SignalId, ToggleMappings,
};
use crate::services::overlay::{resolve, sidebar_echo, OverlayMap};
use crate::services::visibility::{visibility_report, VisibilityReport};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, warn};

/// A discrete user action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SessionEvent {
    /// A sidebar toggle was checked or unchecked
    Toggle {
        /// Toggle id
        id: SignalId,
        /// New checkbox state
        active: bool,
    },
    /// The hunt-sanity input changed
    Threshold {
        /// Raw input text
        value: String,
    },
    /// A ghost card was clicked
    Click {
        /// Ghost id or either language variant of its name
        entity: String,
    },
    /// An evidence filter icon was clicked
    Cycle {
        /// Evidence key of the icon
        key: EvidenceKey,
    },
    /// The display language was switched
    Language {
        /// New language
        lang: Language,
    },
}

/// Rendering data for one ghost.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntityView {
    /// Identity key
    pub id: String,
    /// Name in the session language
    pub name: String,
    /// Speed values for display, e.g. `"1.7 / 2.5"`
    pub speed: String,
    /// Whether the card is shown
    pub visible: bool,
    /// Overlay highlight
    pub mode: OverlayMode,
    /// Signals behind the highlight; empty for manual highlights
    pub activators: Vec<SignalId>,
    /// Every signal that fired, when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown: Option<SignalBreakdown>,
}

/// Everything a rendering surface needs after an event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// Session language
    pub language: Language,
    /// One view per ghost, in catalog order
    pub entities: Vec<EntityView>,
    /// Number of visible ghosts
    pub visible_count: usize,
    /// True when no ghost is visible
    pub empty_result: bool,
    /// True when no catalog is loaded
    pub no_entities: bool,
    /// Sidebar label state per toggle
    pub sidebar: BTreeMap<SignalId, bool>,
    /// Current filter inputs
    pub filters: FilterState,
}

/// Overlay-and-filter engine for one user session.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Vec<Entity>,
    mappings: ToggleMappings,
    filters: FilterState,
    overlays: OverlayMap,
    breakdowns: HashMap<String, SignalBreakdown>,
    visibility: VisibilityReport,
    language: Language,
}

impl Session {
    /// Starts a session over `catalog` with fresh filter state.
    pub fn new(catalog: Vec<Entity>, mappings: ToggleMappings) -> Self {
        let mut session = Self {
            catalog: Vec::new(),
            mappings,
            filters: FilterState::new(),
            overlays: OverlayMap::new(),
            breakdowns: HashMap::new(),
            visibility: VisibilityReport::default(),
            language: Language::default(),
        };
        session.reload(catalog);
        session
    }

    /// Builder-style helper that sets the display language.
    pub fn with_language(mut self, language: Language) -> Self {
        self.language = language;
        self
    }

    /// Replaces the catalog and resets all filter and overlay state.
    pub fn reload(&mut self, catalog: Vec<Entity>) {
        self.catalog = catalog;
        self.filters = FilterState::new();
        self.overlays = self
            .catalog
            .iter()
            .map(|e| (e.id.clone(), OverlayState::default()))
            .collect();
        self.breakdowns.clear();
        self.refresh_visibility();

        if self.catalog.is_empty() {
            warn!("Catalog loaded with no entities");
        } else {
            debug!(entities = self.catalog.len(), "Catalog loaded");
        }
    }

    /// The loaded catalog.
    #[must_use]
    pub fn catalog(&self) -> &[Entity] {
        &self.catalog
    }

    /// Mapping tables in use.
    #[must_use]
    pub fn mappings(&self) -> &ToggleMappings {
        &self.mappings
    }

    /// Current filter inputs.
    #[must_use]
    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// Session language.
    #[must_use]
    pub fn language(&self) -> Language {
        self.language
    }

    /// Returns true when no catalog is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.catalog.is_empty()
    }

    /// Finds a ghost by id or by either language variant of its name.
    #[must_use]
    pub fn find_entity(&self, key: &str) -> Option<&Entity> {
        let key = key.trim();
        self.catalog
            .iter()
            .find(|e| e.id == key)
            .or_else(|| self.catalog.iter().find(|e| e.is_named(key)))
    }

    /// Overlay of the ghost with id `id`.
    #[must_use]
    pub fn overlay(&self, id: &str) -> Option<&OverlayState> {
        self.overlays.get(id)
    }

    /// Signal breakdown of the ghost with id `id` from the last resolve pass.
    #[must_use]
    pub fn breakdown(&self, id: &str) -> Option<&SignalBreakdown> {
        self.breakdowns.get(id)
    }

    /// Visibility of the ghost with id `id`.
    #[must_use]
    pub fn is_visible(&self, id: &str) -> bool {
        self.catalog
            .iter()
            .position(|e| e.id == id)
            .is_some_and(|index| self.visibility.is_visible_at(index))
    }

    /// Visibility of the whole catalog.
    #[must_use]
    pub fn visibility(&self) -> &VisibilityReport {
        &self.visibility
    }

    /// Handles a sidebar toggle change. Returns true if the toggle set changed.
    pub fn toggle_changed(&mut self, id: &str, active: bool) -> bool {
        if self.is_empty() {
            warn!(toggle = id, "Toggle ignored: no entities loaded");
            return false;
        }
        if !self.mappings.knows_toggle(id) {
            debug!(toggle = id, "Toggle has no mapping entry");
        }

        let changed = self.filters.set_toggle(id, active);
        debug!(toggle = id, active, changed, "Toggle changed");
        self.recompute_overlays();
        changed
    }

    /// Handles new hunt-sanity input. Returns the threshold now in effect.
    pub fn threshold_changed(&mut self, raw: &str) -> Option<f64> {
        if self.is_empty() {
            warn!("Threshold ignored: no entities loaded");
            return None;
        }

        self.filters.sanity_threshold = parse_threshold(raw);
        if self.filters.sanity_threshold.is_none() && !raw.trim().is_empty() {
            debug!(input = raw, "Threshold input rejected, sanity filter disabled");
        }
        self.recompute_overlays();
        self.filters.sanity_threshold
    }

    /// Handles a click on a ghost card.
    ///
    /// The click advances the card's manual cycle and clears its activators,
    /// then overlays are resolved again, so a signal that still applies wins
    /// over the manual highlight. Returns the resulting mode, or `None` if no
    /// ghost matches `entity`.
    pub fn card_clicked(&mut self, entity: &str) -> Option<OverlayMode> {
        let Some(id) = self.find_entity(entity).map(|e| e.id.clone()) else {
            warn!(entity, "Card click ignored: no such entity");
            return None;
        };

        let state = self.overlays.entry(id.clone()).or_default();
        state.cycle_manual();
        debug!(entity = %id, mode = %state.mode, "Card clicked");

        self.recompute_overlays();
        self.overlays.get(&id).map(|s| s.mode)
    }

    /// Handles a click on an evidence filter icon. Returns the new filter mode.
    pub fn visibility_filter_cycled(&mut self, key: EvidenceKey) -> FilterMode {
        if self.is_empty() {
            warn!(key = %key, "Visibility filter ignored: no entities loaded");
            return self.filters.visibility(key);
        }

        let mode = self.filters.cycle_visibility(key);
        self.refresh_visibility();
        debug!(key = %key, mode = %mode, visible = self.visibility.visible_count, "Visibility filter cycled");
        mode
    }

    /// Switches the display language. Overlays are not affected.
    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// Applies one event.
    pub fn apply(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::Toggle { id, active } => {
                self.toggle_changed(id, *active);
            }
            SessionEvent::Threshold { value } => {
                self.threshold_changed(value);
            }
            SessionEvent::Click { entity } => {
                self.card_clicked(entity);
            }
            SessionEvent::Cycle { key } => {
                self.visibility_filter_cycled(*key);
            }
            SessionEvent::Language { lang } => self.set_language(*lang),
        }
    }

    /// Sidebar label state per toggle.
    #[must_use]
    pub fn sidebar_echo(&self) -> BTreeMap<SignalId, bool> {
        sidebar_echo(&self.overlays, &self.filters, &self.mappings)
    }

    /// Current rendering data. With `explain`, each view carries its signal breakdown.
    #[must_use]
    pub fn snapshot(&self, explain: bool) -> Snapshot {
        let entities = self
            .catalog
            .iter()
            .enumerate()
            .map(|(index, entity)| {
                let state = self.overlays.get(&entity.id).cloned().unwrap_or_default();
                EntityView {
                    id: entity.id.clone(),
                    name: entity.display_name(self.language),
                    speed: entity.speed_label(),
                    visible: self.visibility.is_visible_at(index),
                    mode: state.mode,
                    activators: state.activators().iter().cloned().collect(),
                    breakdown: explain
                        .then(|| self.breakdowns.get(&entity.id).cloned().unwrap_or_default()),
                }
            })
            .collect();

        Snapshot {
            language: self.language,
            entities,
            visible_count: self.visibility.visible_count,
            empty_result: self.visibility.empty_result,
            no_entities: self.is_empty(),
            sidebar: self.sidebar_echo(),
            filters: self.filters.clone(),
        }
    }

    fn recompute_overlays(&mut self) {
        let resolution = resolve(&self.catalog, &self.filters, &self.mappings, &self.overlays);
        self.overlays = resolution.overlays;
        self.breakdowns = resolution.breakdowns;
    }

    fn refresh_visibility(&mut self) {
        self.visibility = visibility_report(&self.catalog, &self.filters);
    }
}
