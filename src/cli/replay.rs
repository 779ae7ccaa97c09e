//! Replay command: apply a recorded event script to a fresh session.
//!
//! The script is a JSON array of events:
//!
//! ```json
//! [
//!   {"type": "toggle", "id": "speed-fast", "active": true},
//!   {"type": "threshold", "value": "50"},
//!   {"type": "click", "entity": "Spirit"},
//!   {"type": "cycle", "key": "emp"},
//!   {"type": "language", "lang": "en"}
//! ]
//! ```

use crate::cli::common::{print_json, CliError, CliResult, DataArgs};
use crate::cli::inspect::print_snapshot;
use crate::services::{Session, SessionEvent, Snapshot};
use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

/// Replay an event script and print the resulting state
#[derive(Debug, Clone, Args)]
pub struct ReplayArgs {
    #[command(flatten)]
    pub data: DataArgs,

    /// Event script (JSON array); `-` reads stdin
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Print a snapshot after every event instead of only the last one
    #[arg(long)]
    pub each: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,

    /// Include every signal that fired, not just the winning one
    #[arg(long)]
    pub explain: bool,
}

/// One replay step in JSON output.
#[derive(Debug, Serialize)]
struct Step<'a> {
    index: usize,
    event: &'a SessionEvent,
    snapshot: Snapshot,
}

/// Reads and parses an event script.
pub fn read_script(path: &Path) -> Result<Vec<SessionEvent>> {
    let content = if path.as_os_str() == "-" {
        let mut buffer = String::new();
        std::io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read event script from stdin")?;
        buffer
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read event script: {}", path.display()))?
    };

    serde_json::from_str(&content).context("Invalid event script")
}

impl ReplayArgs {
    /// Execute the replay command
    pub fn execute(&self) -> CliResult<()> {
        let events = read_script(&self.script).map_err(|e| {
            if e.downcast_ref::<serde_json::Error>().is_some() {
                CliError::validation(format!("{e:#}"))
            } else {
                CliError::io(format!("{e:#}"))
            }
        })?;

        let data = self.data.load()?;
        let mut session = Session::new(data.catalog, data.mappings).with_language(data.language);
        info!(events = events.len(), "Replaying event script");

        let mut steps = Vec::new();
        for (index, event) in events.iter().enumerate() {
            session.apply(event);
            if self.each {
                steps.push(Step {
                    index,
                    event,
                    snapshot: session.snapshot(self.explain),
                });
            }
        }

        match (self.json, self.each) {
            (true, true) => print_json(&steps),
            (true, false) => print_json(&session.snapshot(self.explain)),
            (false, true) => {
                for step in &steps {
                    println!("#{} {}", step.index + 1, describe_event(step.event));
                    print_snapshot(&step.snapshot, false);
                    println!();
                }
                Ok(())
            }
            (false, false) => {
                print_snapshot(&session.snapshot(self.explain), false);
                Ok(())
            }
        }
    }
}

fn describe_event(event: &SessionEvent) -> String {
    match event {
        SessionEvent::Toggle { id, active } => {
            format!("toggle {id} {}", if *active { "on" } else { "off" })
        }
        SessionEvent::Threshold { value } => format!("threshold {value:?}"),
        SessionEvent::Click { entity } => format!("click {entity}"),
        SessionEvent::Cycle { key } => format!("cycle {key}"),
        SessionEvent::Language { lang } => format!("language {lang}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_read_script() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"type": "toggle", "id": "speed-fast", "active": true}}, {{"type": "threshold", "value": ""}}]"#
        )
        .unwrap();

        let events = read_script(file.path()).unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(
            events[1],
            SessionEvent::Threshold {
                value: String::new()
            }
        );
    }

    #[test]
    fn test_read_script_rejects_unknown_event() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"[{{"type": "hover", "entity": "Spirit"}}]"#).unwrap();
        let err = read_script(file.path()).unwrap_err();
        assert!(err.downcast_ref::<serde_json::Error>().is_some());
    }

    #[test]
    fn test_describe_event() {
        let event = SessionEvent::Toggle {
            id: "radio-hiss".into(),
            active: false,
        };
        assert_eq!(describe_event(&event), "toggle radio-hiss off");
    }
}
