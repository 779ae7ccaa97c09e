//! Overlay highlight state and its activator bookkeeping.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Activator id recorded when the hunt-sanity threshold grays an entity.
pub const SANITY_FILTER_ID: &str = "hunt-sanity-filter";

/// Identifier of a signal (sidebar toggle or the sanity filter).
pub type SignalId = String;

/// Three-state highlight drawn over an entity card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlayMode {
    /// No highlight
    #[default]
    None,
    /// Ruled out
    Gray,
    /// Candidate
    Green,
}

impl OverlayMode {
    /// Next mode in the manual click cycle: none, gray, green, none.
    #[must_use]
    pub const fn next_manual(self) -> Self {
        match self {
            Self::None => Self::Gray,
            Self::Gray => Self::Green,
            Self::Green => Self::None,
        }
    }

    /// Lowercase tag used in output.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Gray => "gray",
            Self::Green => "green",
        }
    }
}

impl fmt::Display for OverlayMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Overlay of one entity together with the signals that caused it.
///
/// # Invariants
///
/// - `mode == None` implies both activator sets are empty
/// - at most one activator set is non-empty, and it matches `mode`
/// - a non-`None` mode with an empty activator set was set by a manual click
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayState {
    /// Current highlight
    pub mode: OverlayMode,
    /// Signals currently holding the entity green
    pub green_activators: BTreeSet<SignalId>,
    /// Signals currently holding the entity gray
    pub gray_activators: BTreeSet<SignalId>,
}

impl OverlayState {
    /// Highlight caused by tracked signals.
    pub fn tracked<I, S>(mode: OverlayMode, activators: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SignalId>,
    {
        let activators: BTreeSet<SignalId> = activators.into_iter().map(Into::into).collect();
        match mode {
            OverlayMode::None => Self::default(),
            OverlayMode::Gray => Self {
                mode,
                green_activators: BTreeSet::new(),
                gray_activators: activators,
            },
            OverlayMode::Green => Self {
                mode,
                green_activators: activators,
                gray_activators: BTreeSet::new(),
            },
        }
    }

    /// Highlight set directly by the user, with no toggle cause.
    #[must_use]
    pub fn manual(mode: OverlayMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Activators of the current mode's colour.
    #[must_use]
    pub fn activators(&self) -> &BTreeSet<SignalId> {
        match self.mode {
            OverlayMode::Green => &self.green_activators,
            _ => &self.gray_activators,
        }
    }

    /// Returns true if the current highlight came from a manual click.
    #[must_use]
    pub fn is_manual(&self) -> bool {
        match self.mode {
            OverlayMode::None => false,
            OverlayMode::Gray => self.gray_activators.is_empty(),
            OverlayMode::Green => self.green_activators.is_empty(),
        }
    }

    /// Applies one manual click: advances the cycle and drops every activator.
    pub fn cycle_manual(&mut self) {
        *self = Self::manual(self.mode.next_manual());
    }
}

/// Every signal that fired for one entity during a resolve pass, tier by tier.
///
/// Only the winning tier reaches [`OverlayState`]; the rest is kept here so
/// callers can see what would take over if the winner were switched off.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SignalBreakdown {
    /// Tier 1: the sanity threshold grayed the entity (masks every other tier)
    pub sanity_gray: bool,
    /// Tier 2: speed toggles that grayed the entity
    pub speed_gray: BTreeSet<SignalId>,
    /// Tier 3: toggles whose reverse table lists the entity
    pub reverse_gray: BTreeSet<SignalId>,
    /// Tier 4: toggles whose green table lists the entity, or that the mimic imitates
    pub feature_green: BTreeSet<SignalId>,
    /// Tier 5: a manual highlight was carried over
    pub manual_carry: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manual_cycle() {
        let mut state = OverlayState::default();
        state.cycle_manual();
        assert_eq!(state.mode, OverlayMode::Gray);
        state.cycle_manual();
        assert_eq!(state.mode, OverlayMode::Green);
        state.cycle_manual();
        assert_eq!(state.mode, OverlayMode::None);
    }

    #[test]
    fn test_cycle_clears_activators() {
        let mut state = OverlayState::tracked(OverlayMode::Green, ["radio-hiss"]);
        assert!(!state.is_manual());
        state.cycle_manual();
        assert_eq!(state.mode, OverlayMode::None);
        assert!(state.green_activators.is_empty());
        assert!(state.gray_activators.is_empty());
    }

    #[test]
    fn test_tracked_fills_only_matching_colour() {
        let state = OverlayState::tracked(OverlayMode::Gray, ["speed-slow", "speed-fast"]);
        assert_eq!(state.gray_activators.len(), 2);
        assert!(state.green_activators.is_empty());
        assert_eq!(state.activators(), &state.gray_activators);

        let none = OverlayState::tracked(OverlayMode::None, ["ignored"]);
        assert_eq!(none, OverlayState::default());
    }

    #[test]
    fn test_is_manual() {
        assert!(OverlayState::manual(OverlayMode::Green).is_manual());
        assert!(OverlayState::manual(OverlayMode::Gray).is_manual());
        assert!(!OverlayState::manual(OverlayMode::None).is_manual());
    }
}
