//! Evidence keys and per-entity evidence flag sets.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// One of the seven fixed evidence attributes a ghost can leave behind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceKey {
    /// EMF level 5
    Emp,
    /// D.O.T.S. projector
    Dots,
    /// Ultraviolet fingerprints
    Uf,
    /// Ghost orbs
    Lights,
    /// Ghost writing
    Book,
    /// Spirit box
    Radio,
    /// Freezing temperatures
    Zero,
}

impl EvidenceKey {
    /// All evidence keys in sidebar order.
    pub const ALL: [Self; 7] = [
        Self::Emp,
        Self::Dots,
        Self::Uf,
        Self::Lights,
        Self::Book,
        Self::Radio,
        Self::Zero,
    ];

    /// Field name used for this key in catalog records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Emp => "emp",
            Self::Dots => "dots",
            Self::Uf => "uf",
            Self::Lights => "lights",
            Self::Book => "book",
            Self::Radio => "radio",
            Self::Zero => "zero",
        }
    }
}

impl fmt::Display for EvidenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvidenceKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str() == key)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown evidence key '{s}'. Expected one of: emp, dots, uf, lights, book, radio, zero"
                )
            })
    }
}

/// Set of evidence flags present on an entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EvidenceSet(BTreeSet<EvidenceKey>);

impl EvidenceSet {
    /// Creates an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks a key as present.
    pub fn insert(&mut self, key: EvidenceKey) {
        self.0.insert(key);
    }

    /// Returns true if the key is present.
    #[must_use]
    pub fn contains(&self, key: EvidenceKey) -> bool {
        self.0.contains(&key)
    }

    /// Number of flags set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no flag is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the present keys in sidebar order.
    pub fn iter(&self) -> impl Iterator<Item = EvidenceKey> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<EvidenceKey> for EvidenceSet {
    fn from_iter<I: IntoIterator<Item = EvidenceKey>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
