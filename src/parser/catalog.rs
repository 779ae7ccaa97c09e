//! Ghost catalog parser.
//!
//! Catalog files are an array of ghost records. Three encodings are accepted:
//! plain JSON, JSON5, and a JSON5 array wrapped in a script assignment such as
//! `const GHOSTS_DATA = [ ... ];`. Evidence columns hold `"x"` when the ghost
//! has that evidence; anything else means it does not.

use anyhow::{Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::models::{Entity, EvidenceKey};

/// Catalog record as stored on disk.
#[derive(Debug, Clone, Deserialize)]
pub struct RawGhost {
    /// Bilingual name, e.g. `"{Дух} [Spirit]"`
    pub name: String,
    /// EMP level 5
    #[serde(default)]
    pub emp: Option<Value>,
    /// D.O.T.S. projector
    #[serde(default)]
    pub dots: Option<Value>,
    /// Ultraviolet fingerprints
    #[serde(default)]
    pub uf: Option<Value>,
    /// Ghost orbs
    #[serde(default)]
    pub lights: Option<Value>,
    /// Ghost writing
    #[serde(default)]
    pub book: Option<Value>,
    /// Spirit box
    #[serde(default)]
    pub radio: Option<Value>,
    /// Freezing temperatures
    #[serde(default)]
    pub zero: Option<Value>,
    /// Speed field
    #[serde(default)]
    pub speed: Option<Value>,
    /// Hunt sanity field
    #[serde(default)]
    pub percentage: Option<Value>,
    /// Strength notes
    #[serde(default, rename = "strongSide")]
    pub strong_side: Option<Notes>,
    /// Weakness notes
    #[serde(default, rename = "weakSide")]
    pub weak_side: Option<Notes>,
    /// Zero-evidence test notes
    #[serde(default, rename = "0evidence")]
    pub zero_evidence: Option<Notes>,
}

/// Descriptive text stored either as one string or a list of strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Notes {
    /// A single paragraph
    One(String),
    /// Several bullet points
    Many(Vec<String>),
}

impl Notes {
    fn into_vec(self) -> Vec<String> {
        match self {
            Self::One(text) if text.trim().is_empty() => Vec::new(),
            Self::One(text) => vec![text],
            Self::Many(items) => items,
        }
    }
}

/// Returns true if a stored evidence cell marks the evidence as present.
#[must_use]
pub fn is_evidence_mark(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if s.trim().eq_ignore_ascii_case("x"))
}

fn text_field(value: Option<Value>) -> String {
    match value {
        Some(Value::String(s)) => s,
        Some(Value::Number(n)) => n.to_string(),
        _ => String::new(),
    }
}

impl RawGhost {
    fn evidence_cell(&self, key: EvidenceKey) -> Option<&Value> {
        match key {
            EvidenceKey::Emp => self.emp.as_ref(),
            EvidenceKey::Dots => self.dots.as_ref(),
            EvidenceKey::Uf => self.uf.as_ref(),
            EvidenceKey::Lights => self.lights.as_ref(),
            EvidenceKey::Book => self.book.as_ref(),
            EvidenceKey::Radio => self.radio.as_ref(),
            EvidenceKey::Zero => self.zero.as_ref(),
        }
    }

    /// Converts the stored record into a catalog entity.
    #[must_use]
    pub fn into_entity(self) -> Entity {
        let evidence: Vec<EvidenceKey> = EvidenceKey::ALL
            .into_iter()
            .filter(|key| is_evidence_mark(self.evidence_cell(*key)))
            .collect();

        let mut entity = Entity::new(
            self.name.trim(),
            text_field(self.speed),
            text_field(self.percentage),
        )
        .with_evidence(&evidence);
        entity.strong_side = self.strong_side.map(Notes::into_vec).unwrap_or_default();
        entity.weak_side = self.weak_side.map(Notes::into_vec).unwrap_or_default();
        entity.zero_evidence = self.zero_evidence.map(Notes::into_vec).unwrap_or_default();
        entity
    }
}

/// Strips a `const NAME = [...];` script wrapper, if present.
#[must_use]
pub fn strip_script_wrapper(content: &str) -> &str {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        return trimmed;
    }

    match (trimmed.find('['), trimmed.rfind(']')) {
        (Some(start), Some(end)) if start < end && trimmed[..start].contains('=') => {
            &trimmed[start..=end]
        }
        _ => trimmed,
    }
}

/// Parses catalog text in any accepted encoding.
///
/// Records with an empty name are skipped. Duplicate names are kept; see
/// [`dedup_catalog`].
pub fn parse_catalog_str(content: &str) -> Result<Vec<Entity>> {
    let body = strip_script_wrapper(content);

    let raw: Vec<RawGhost> = match serde_json::from_str(body) {
        Ok(raw) => raw,
        Err(json_err) => {
            debug!("Catalog is not strict JSON ({json_err}), retrying as JSON5");
            json5::from_str(body).context("Failed to parse catalog as JSON or JSON5")?
        }
    };

    let mut entities = Vec::with_capacity(raw.len());
    for (index, record) in raw.into_iter().enumerate() {
        if record.name.trim().is_empty() {
            warn!(index, "Skipping catalog record with an empty name");
            continue;
        }
        entities.push(record.into_entity());
    }

    Ok(entities)
}

/// Loads a catalog file.
///
/// # Arguments
///
/// * `path` - Path to a `.json`, `.json5` or `.js` catalog file
///
/// # Returns
///
/// Every record of the file in file order, duplicates included
pub fn load_catalog(path: &Path) -> Result<Vec<Entity>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read catalog file: {}", path.display()))?;

    let entities = parse_catalog_str(&content)
        .with_context(|| format!("Invalid catalog file: {}", path.display()))?;

    debug!(path = %path.display(), entities = entities.len(), "Loaded catalog");
    Ok(entities)
}

/// Drops every record whose name was already seen, keeping the first.
///
/// Returns the deduplicated catalog and the names that were dropped.
#[must_use]
pub fn dedup_catalog(entities: Vec<Entity>) -> (Vec<Entity>, Vec<String>) {
    let mut seen = HashSet::new();
    let mut kept = Vec::with_capacity(entities.len());
    let mut dropped = Vec::new();

    for entity in entities {
        if seen.insert(entity.id.clone()) {
            kept.push(entity);
        } else {
            warn!(name = %entity.id, "Duplicate catalog entry ignored");
            dropped.push(entity.id);
        }
    }

    (kept, dropped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"[
        {
            "name": "{Дух} [Spirit]",
            "emp": "x", "dots": "", "uf": "", "lights": "", "book": "X", "radio": "x", "zero": "",
            "speed": "1.7",
            "percentage": "50",
            "strongSide": "{Нет} [None]",
            "weakSide": ["{Благовоние} [Smudge sticks]"],
            "0evidence": ""
        }
    ]"#;

    #[test]
    fn test_parse_json_record() {
        let catalog = parse_catalog_str(SAMPLE).unwrap();
        assert_eq!(catalog.len(), 1);

        let spirit = &catalog[0];
        assert_eq!(spirit.id, "{Дух} [Spirit]");
        assert!(spirit.has_evidence(EvidenceKey::Emp));
        assert!(spirit.has_evidence(EvidenceKey::Book));
        assert!(!spirit.has_evidence(EvidenceKey::Dots));
        assert_eq!(spirit.speed, "1.7");
        assert_eq!(spirit.sanity, "50");
        assert_eq!(spirit.strong_side, vec!["{Нет} [None]".to_string()]);
        assert_eq!(spirit.weak_side.len(), 1);
        assert!(spirit.zero_evidence.is_empty());
    }

    #[test]
    fn test_parse_json5_script_wrapper() {
        let content = r#"
            // embedded copy
            const GHOSTS_DATA = [
                { name: '{Тень} [Shade]', emp: 'x', zero: 'x', book: 'x', speed: 1.7, percentage: 35, },
            ];
        "#;
        let catalog = parse_catalog_str(content).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].speed, "1.7");
        assert_eq!(catalog[0].sanity, "35");
        assert_eq!(catalog[0].evidence.len(), 3);
    }

    #[test]
    fn test_non_x_marks_are_absent() {
        assert!(is_evidence_mark(Some(&Value::String(" x ".into()))));
        assert!(!is_evidence_mark(Some(&Value::String("yes".into()))));
        assert!(!is_evidence_mark(Some(&Value::Bool(true))));
        assert!(!is_evidence_mark(None));
    }

    #[test]
    fn test_empty_names_skipped() {
        let catalog = parse_catalog_str(r#"[{"name": " "}, {"name": "[Oni]"}]"#).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog[0].id, "[Oni]");
        assert_eq!(catalog[0].speed, "");
    }

    #[test]
    fn test_invalid_catalog_is_error() {
        assert!(parse_catalog_str("{ not a list }").is_err());
        assert!(parse_catalog_str("").is_err());
    }

    #[test]
    fn test_dedup_keeps_first() {
        let catalog = vec![
            Entity::new("[Oni]", "1.7", "50"),
            Entity::new("[Oni]", "2.0", "50"),
            Entity::new("[Yurei]", "1.7", "50"),
        ];
        let (kept, dropped) = dedup_catalog(catalog);
        assert_eq!(kept.len(), 2);
        assert_eq!(kept[0].speed, "1.7");
        assert_eq!(dropped, vec!["[Oni]".to_string()]);
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let catalog = load_catalog(file.path()).unwrap();
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_load_missing_file_has_context() {
        let err = load_catalog(Path::new("/nonexistent/ghosts.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog file"));
    }
}
