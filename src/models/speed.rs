//! Speed-category toggles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Toggle id of the slow speed category.
pub const SPEED_SLOW_ID: &str = "speed-slow";
/// Toggle id of the normal speed category.
pub const SPEED_NORMAL_ID: &str = "speed-norm";
/// Toggle id of the fast speed category.
pub const SPEED_FAST_ID: &str = "speed-fast";

/// One of the three sidebar speed categories.
///
/// The categories overlap at 1.9: both `Normal` and `Fast` claim it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedCategory {
    /// v <= 1.5
    Slow,
    /// 1.5 < v <= 1.9
    Normal,
    /// v >= 1.9
    Fast,
}

impl SpeedCategory {
    /// All categories in sidebar order.
    pub const ALL: [Self; 3] = [Self::Slow, Self::Normal, Self::Fast];

    /// Sidebar toggle id for this category.
    #[must_use]
    pub const fn toggle_id(self) -> &'static str {
        match self {
            Self::Slow => SPEED_SLOW_ID,
            Self::Normal => SPEED_NORMAL_ID,
            Self::Fast => SPEED_FAST_ID,
        }
    }

    /// Looks up the category behind a toggle id.
    #[must_use]
    pub fn from_toggle_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.toggle_id() == id)
    }

    /// Returns true if `id` names a speed-category toggle.
    #[must_use]
    pub fn is_speed_toggle(id: &str) -> bool {
        Self::from_toggle_id(id).is_some()
    }

    /// Category membership test for one speed value. `NaN` belongs nowhere.
    #[must_use]
    pub fn contains(self, speed: f64) -> bool {
        match self {
            Self::Slow => speed <= 1.5,
            Self::Normal => speed > 1.5 && speed <= 1.9,
            Self::Fast => speed >= 1.9,
        }
    }
}

impl fmt::Display for SpeedCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.toggle_id())
    }
}
