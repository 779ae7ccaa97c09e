//! Inspect command: resolve overlays and visibility for one set of inputs.

use crate::cli::common::{print_json, CliError, CliResult, DataArgs};
use crate::models::{EvidenceKey, FilterMode, Language, OverlayMode, SignalBreakdown};
use crate::services::{Session, Snapshot};
use clap::Args;

/// Resolve ghost highlights and visibility for the given filters
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Activate a sidebar toggle (repeatable)
    #[arg(short, long = "toggle", value_name = "ID")]
    pub toggles: Vec<String>,

    /// Hunt sanity threshold, as typed into the sanity box
    #[arg(long, value_name = "VALUE", allow_hyphen_values = true)]
    pub threshold: Option<String>,

    /// Only show ghosts with this evidence (repeatable)
    #[arg(long, value_name = "KEY")]
    pub include: Vec<EvidenceKey>,

    /// Hide ghosts with this evidence (repeatable)
    #[arg(long, value_name = "KEY")]
    pub exclude: Vec<EvidenceKey>,

    /// Click a ghost card by id or name (repeatable, applied in order)
    #[arg(long = "click", value_name = "NAME")]
    pub clicks: Vec<String>,

    /// Display language (ru or en); defaults to the configured language
    #[arg(long, value_name = "LANG")]
    pub lang: Option<Language>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Include every signal that fired, not just the winning one
    #[arg(long)]
    pub explain: bool,

    /// Only list visible ghosts
    #[arg(long)]
    pub visible_only: bool,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let data = self.data.load()?;
        let language = self.lang.unwrap_or(data.language);
        let mut session = Session::new(data.catalog, data.mappings).with_language(language);

        for key in &self.include {
            if self.exclude.contains(key) {
                return Err(CliError::validation(format!(
                    "Evidence '{key}' cannot be both included and excluded"
                )));
            }
        }

        for id in &self.toggles {
            if !session.mappings().knows_toggle(id) {
                return Err(CliError::validation(format!(
                    "Unknown toggle: {id} (see `phasmbase toggles`)"
                )));
            }
            session.toggle_changed(id, true);
        }

        if let Some(raw) = &self.threshold {
            session.threshold_changed(raw);
        }

        for key in &self.include {
            cycle_filter_to(&mut session, *key, FilterMode::Include);
        }
        for key in &self.exclude {
            cycle_filter_to(&mut session, *key, FilterMode::Exclude);
        }

        for name in &self.clicks {
            if session.card_clicked(name).is_none() && !session.is_empty() {
                return Err(CliError::validation(format!("Unknown ghost: {name}")));
            }
        }

        let snapshot = session.snapshot(self.explain);
        if self.json {
            print_json(&snapshot)
        } else {
            print_snapshot(&snapshot, self.visible_only);
            Ok(())
        }
    }
}

/// Clicks the evidence icon until its filter reaches `target`.
///
/// Repeating a key on the command line leaves it at `target` instead of
/// cycling past it.
fn cycle_filter_to(session: &mut Session, key: EvidenceKey, target: FilterMode) {
    if session.is_empty() {
        return;
    }
    while session.filters().visibility(key) != target {
        session.visibility_filter_cycled(key);
    }
}

fn mode_marker(mode: OverlayMode) -> &'static str {
    match mode {
        OverlayMode::None => " ",
        OverlayMode::Gray => "░",
        OverlayMode::Green => "●",
    }
}

fn describe_breakdown(breakdown: &SignalBreakdown) -> String {
    let mut parts = Vec::new();
    if breakdown.sanity_gray {
        parts.push("sanity".to_string());
    }
    let tiers = [
        ("speed", &breakdown.speed_gray),
        ("reverse", &breakdown.reverse_gray),
        ("green", &breakdown.feature_green),
    ];
    for (label, ids) in tiers {
        if !ids.is_empty() {
            let ids: Vec<&str> = ids.iter().map(String::as_str).collect();
            parts.push(format!("{label}: {}", ids.join(", ")));
        }
    }
    if breakdown.manual_carry {
        parts.push("manual".to_string());
    }
    if parts.is_empty() {
        "no signals".to_string()
    } else {
        parts.join("; ")
    }
}

/// Prints a snapshot as a human-readable table.
pub fn print_snapshot(snapshot: &Snapshot, visible_only: bool) {
    if snapshot.no_entities {
        println!("No entities loaded");
        return;
    }

    for view in &snapshot.entities {
        if visible_only && !view.visible {
            continue;
        }
        let visibility = if view.visible { " " } else { "x" };
        let activators: Vec<&str> = view.activators.iter().map(String::as_str).collect();
        let cause = if view.mode == OverlayMode::None {
            String::new()
        } else if activators.is_empty() {
            "(manual)".to_string()
        } else {
            format!("({})", activators.join(", "))
        };
        println!(
            "{} {} {:<6} {:<24} {:<12} {}",
            mode_marker(view.mode),
            visibility,
            view.mode.as_str(),
            view.name,
            view.speed,
            cause
        );
        if let Some(breakdown) = &view.breakdown {
            println!("      {}", describe_breakdown(breakdown));
        }
    }

    println!();
    if snapshot.empty_result {
        println!("No ghosts match the selected filters");
    } else {
        println!(
            "{} of {} ghosts visible",
            snapshot.visible_count,
            snapshot.entities.len()
        );
    }

    let lit: Vec<&str> = snapshot
        .sidebar
        .iter()
        .filter(|(_, active)| **active)
        .map(|(id, _)| id.as_str())
        .collect();
    if !lit.is_empty() {
        println!("Sidebar: {}", lit.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_breakdown() {
        let mut breakdown = SignalBreakdown::default();
        assert_eq!(describe_breakdown(&breakdown), "no signals");

        breakdown.speed_gray.insert("speed-fast".into());
        breakdown.feature_green.insert("radio-hiss".into());
        assert_eq!(
            describe_breakdown(&breakdown),
            "speed: speed-fast; green: radio-hiss"
        );
    }

    #[test]
    fn test_cycle_filter_to_is_stable_when_repeated() {
        let catalog = vec![crate::models::Entity::new("[Spirit]", "1.7", "50")
            .with_evidence(&[EvidenceKey::Emp])];
        let mut session = Session::new(catalog, crate::models::ToggleMappings::default());

        cycle_filter_to(&mut session, EvidenceKey::Emp, FilterMode::Include);
        cycle_filter_to(&mut session, EvidenceKey::Emp, FilterMode::Include);
        assert_eq!(session.filters().visibility(EvidenceKey::Emp), FilterMode::Include);

        cycle_filter_to(&mut session, EvidenceKey::Dots, FilterMode::Exclude);
        assert_eq!(session.filters().visibility(EvidenceKey::Dots), FilterMode::Exclude);
    }

    #[test]
    fn test_mode_markers_are_distinct() {
        assert_ne!(mode_marker(OverlayMode::Gray), mode_marker(OverlayMode::Green));
    }
}
