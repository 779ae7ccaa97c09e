//! Catalog entity (ghost) records.

use crate::models::bilingual::{localize, BilingualName, Language};
use crate::models::evidence::{EvidenceKey, EvidenceSet};
use crate::models::measure::{parse_sanity_parts, split_values, SanityPart};
use serde::{Deserialize, Serialize};

/// A catalogued ghost.
///
/// Entities are created once when the catalog loads and never change for the
/// rest of the session. The engine treats the descriptive text fields as
/// opaque and only parses `speed` and `sanity` when a predicate needs them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    /// Bilingual display name, also the identity key (e.g. `"{Дух} [Spirit]"`)
    pub id: String,
    /// Both variants of `id`, parsed once at construction
    pub names: BilingualName,
    /// Evidence flags present on this ghost
    pub evidence: EvidenceSet,
    /// Speed field, e.g. `"1.7"`, `"1.7/2.25"`, `"1.4-1.9"`
    pub speed: String,
    /// Hunt sanity field, e.g. `"50"`, `"40/60"`, `"15-75"`
    pub sanity: String,
    /// Bilingual strength notes
    #[serde(default)]
    pub strong_side: Vec<String>,
    /// Bilingual weakness notes
    #[serde(default)]
    pub weak_side: Vec<String>,
    /// Bilingual zero-evidence test notes
    #[serde(default)]
    pub zero_evidence: Vec<String>,
}

impl Entity {
    /// Creates an entity with no evidence and no descriptive text.
    pub fn new(id: impl Into<String>, speed: impl Into<String>, sanity: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            names: BilingualName::parse(&id),
            id,
            evidence: EvidenceSet::new(),
            speed: speed.into(),
            sanity: sanity.into(),
            strong_side: Vec::new(),
            weak_side: Vec::new(),
            zero_evidence: Vec::new(),
        }
    }

    /// Builder-style helper that sets the given evidence flags.
    pub fn with_evidence(mut self, keys: &[EvidenceKey]) -> Self {
        for key in keys {
            self.evidence.insert(*key);
        }
        self
    }

    /// Returns true if the evidence flag is set.
    #[must_use]
    pub fn has_evidence(&self, key: EvidenceKey) -> bool {
        self.evidence.contains(key)
    }

    /// Parsed speed values; range endpoints count as separate values.
    #[must_use]
    pub fn speed_values(&self) -> Vec<f64> {
        split_values(&self.speed)
    }

    /// Separator to show between speed values when rendering.
    #[must_use]
    pub fn speed_delimiter(&self) -> &'static str {
        if self.speed.contains('/') {
            " / "
        } else {
            " - "
        }
    }

    /// Speed field for display: trimmed tokens joined with [`Self::speed_delimiter`].
    ///
    /// `"1.7/2.5"` renders as `"1.7 / 2.5"`, `"1.4-2.7"` as `"1.4 - 2.7"`.
    #[must_use]
    pub fn speed_label(&self) -> String {
        self.speed
            .split(['/', '-'])
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .collect::<Vec<_>>()
            .join(self.speed_delimiter())
    }

    /// Parsed sanity parts.
    #[must_use]
    pub fn sanity_parts(&self) -> Vec<SanityPart> {
        parse_sanity_parts(&self.sanity)
    }

    /// Name in the requested language.
    #[must_use]
    pub fn display_name(&self, lang: Language) -> String {
        localize(&self.id, lang)
    }

    /// Returns true if `name` is either language variant of this entity's name.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.names.matches(name)
    }
}
