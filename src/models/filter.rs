//! Session filter state: visibility filters, active toggles, sanity threshold.

use crate::models::evidence::EvidenceKey;
use crate::models::measure::parse_number;
use crate::models::overlay::SignalId;
use crate::models::speed::SpeedCategory;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Tri-state visibility filter for one evidence key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    /// No constraint
    #[default]
    None,
    /// The entity must have the evidence
    Include,
    /// The entity must not have the evidence
    Exclude,
}

impl FilterMode {
    /// Next mode when the sidebar icon is clicked: none, include, exclude, none.
    #[must_use]
    pub const fn cycled(self) -> Self {
        match self {
            Self::None => Self::Include,
            Self::Include => Self::Exclude,
            Self::Exclude => Self::None,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Include => "include",
            Self::Exclude => "exclude",
        })
    }
}

/// Parses raw threshold input.
///
/// Returns `None` for empty input, non-numeric input, and anything outside
/// `[0, 100]`; the sanity predicate is then disabled.
///
/// # Examples
///
/// ```
/// use phasmbase::models::parse_threshold;
///
/// assert_eq!(parse_threshold(" 50 "), Some(50.0));
/// assert_eq!(parse_threshold("101"), None);
/// assert_eq!(parse_threshold(""), None);
/// ```
#[must_use]
pub fn parse_threshold(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let value = parse_number(raw);
    is_valid_threshold(value).then_some(value)
}

/// Returns true if `value` is a usable sanity threshold.
#[must_use]
pub fn is_valid_threshold(value: f64) -> bool {
    value.is_finite() && (0.0..=100.0).contains(&value)
}

/// All user-controlled filter inputs of one session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    /// Visibility filter per evidence key; absent keys are `FilterMode::None`
    #[serde(default)]
    pub visibility_filters: BTreeMap<EvidenceKey, FilterMode>,
    /// Active sidebar toggles (feature toggles and speed-category toggles)
    #[serde(default)]
    pub active_toggles: BTreeSet<SignalId>,
    /// Hunt sanity threshold, if one is set
    #[serde(default)]
    pub sanity_threshold: Option<f64>,
}

impl FilterState {
    /// Creates an empty filter state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Visibility filter of `key`.
    #[must_use]
    pub fn visibility(&self, key: EvidenceKey) -> FilterMode {
        self.visibility_filters.get(&key).copied().unwrap_or_default()
    }

    /// Sets the visibility filter of `key`.
    pub fn set_visibility(&mut self, key: EvidenceKey, mode: FilterMode) {
        if mode == FilterMode::None {
            self.visibility_filters.remove(&key);
        } else {
            self.visibility_filters.insert(key, mode);
        }
    }

    /// Advances the visibility filter of `key` and returns the new mode.
    pub fn cycle_visibility(&mut self, key: EvidenceKey) -> FilterMode {
        let next = self.visibility(key).cycled();
        self.set_visibility(key, next);
        next
    }

    /// Activates or deactivates a toggle. Returns true if the set changed.
    pub fn set_toggle(&mut self, id: &str, active: bool) -> bool {
        if active {
            self.active_toggles.insert(id.to_string())
        } else {
            self.active_toggles.remove(id)
        }
    }

    /// Returns true if the toggle is active.
    #[must_use]
    pub fn is_active(&self, id: &str) -> bool {
        self.active_toggles.contains(id)
    }

    /// Active speed-category toggles, in category order.
    #[must_use]
    pub fn active_speed_categories(&self) -> Vec<SpeedCategory> {
        SpeedCategory::ALL
            .into_iter()
            .filter(|c| self.is_active(c.toggle_id()))
            .collect()
    }

    /// Threshold to evaluate, or `None` when the sanity predicate is disabled.
    #[must_use]
    pub fn effective_threshold(&self) -> Option<f64> {
        self.sanity_threshold.filter(|t| is_valid_threshold(*t))
    }
}
