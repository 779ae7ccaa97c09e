//! Speed-category gray signal and its override table.
//!
//! With a single active speed toggle the base rule applies: a ghost is grayed
//! unless one of its speeds falls in an active category. As soon as two or
//! more categories are active, [`SPEED_OVERRIDES`] decides instead. The table
//! is literal and is not derivable from the category boundaries.

use crate::models::SpeedCategory;
use serde::Serialize;

/// Gray condition applied when a given combination of speed toggles is active.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "rule", content = "value", rename_all = "snake_case")]
pub enum OverrideRule {
    /// Full coverage: never gray
    Never,
    /// Gray if every speed is strictly above the value
    AllAbove(f64),
    /// Gray if there is exactly one speed and it equals the value
    ExactlySingle(f64),
    /// Gray if every speed is at or below the value
    AllAtOrBelow(f64),
}

impl OverrideRule {
    /// Evaluates the rule against a ghost's parsed speeds.
    #[must_use]
    pub fn grays(self, speeds: &[f64]) -> bool {
        match self {
            Self::Never => false,
            Self::AllAbove(limit) => speeds.iter().all(|s| *s > limit),
            Self::ExactlySingle(value) => speeds.len() == 1 && speeds[0] == value,
            Self::AllAtOrBelow(limit) => speeds.iter().all(|s| *s <= limit),
        }
    }
}

/// One row of the override table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpeedOverride {
    /// Exact set of active speed toggles this row applies to, in category order
    pub active: &'static [SpeedCategory],
    /// Condition under which the ghost is grayed
    pub rule: OverrideRule,
}

/// Overrides for two or more simultaneously active speed toggles.
pub const SPEED_OVERRIDES: [SpeedOverride; 4] = [
    SpeedOverride {
        active: &[SpeedCategory::Slow, SpeedCategory::Normal, SpeedCategory::Fast],
        rule: OverrideRule::Never,
    },
    SpeedOverride {
        active: &[SpeedCategory::Slow, SpeedCategory::Normal],
        rule: OverrideRule::AllAbove(1.9),
    },
    // 1.7 is the only speed neither slow nor fast catches here; literal equality.
    SpeedOverride {
        active: &[SpeedCategory::Slow, SpeedCategory::Fast],
        rule: OverrideRule::ExactlySingle(1.7),
    },
    SpeedOverride {
        active: &[SpeedCategory::Normal, SpeedCategory::Fast],
        rule: OverrideRule::AllAtOrBelow(1.5),
    },
];

/// Table row for an exact combination of active categories.
#[must_use]
pub fn find_override(active: &[SpeedCategory]) -> Option<&'static SpeedOverride> {
    let mut sorted = active.to_vec();
    sorted.sort_unstable();
    sorted.dedup();
    SPEED_OVERRIDES.iter().find(|row| row.active == sorted.as_slice())
}

/// Base rule: gray unless some speed falls in some active category.
#[must_use]
pub fn base_rule_grays(speeds: &[f64], active: &[SpeedCategory]) -> bool {
    !speeds
        .iter()
        .any(|speed| active.iter().any(|category| category.contains(*speed)))
}

/// Evaluates the speed-category signal for one ghost.
///
/// Returns the categories to record as gray activators when the ghost is
/// grayed, or `None` when the speed toggles leave it alone.
#[must_use]
pub fn speed_gray(speeds: &[f64], active: &[SpeedCategory]) -> Option<Vec<SpeedCategory>> {
    if active.is_empty() {
        return None;
    }

    if active.len() > 1 {
        if let Some(row) = find_override(active) {
            return row.rule.grays(speeds).then(|| row.active.to_vec());
        }
    }

    base_rule_grays(speeds, active).then(|| active.to_vec())
}
