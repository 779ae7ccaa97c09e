//! Bilingual text encoding and localization.
//!
//! Catalog strings carry both languages in one value: the Russian text in
//! curly braces and the English text in square brackets, e.g.
//! `"{Дух} [Spirit]"`. A string with neither bracket pair is plain text.

use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Display language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// Russian (the catalog's primary language)
    #[default]
    Ru,
    /// English
    En,
}

impl Language {
    /// Short code used in config files and on the command line.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ru => "ru",
            Self::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "ru" => Ok(Self::Ru),
            "en" => Ok(Self::En),
            other => anyhow::bail!("Invalid language '{other}'. Must be 'ru' or 'en'"),
        }
    }
}

fn russian_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([^}]*)\}").ok()).as_ref()
}

fn english_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[([^\]]*)\]").ok()).as_ref()
}

/// First non-empty (after trimming) capture of `pattern` in `text`.
fn capture<'t>(pattern: Option<&Regex>, text: &'t str) -> Option<&'t str> {
    let caps = pattern?.captures(text)?;
    let inner = caps.get(1)?.as_str().trim();
    (!inner.is_empty()).then_some(inner)
}

/// Resolves a bilingual string to `lang`.
///
/// Falls back to the other language when the requested one is missing or
/// blank, and to the trimmed input when neither bracket pair is present.
///
/// # Examples
///
/// ```
/// use phasmbase::models::{localize, Language};
///
/// assert_eq!(localize("{Дух} [Spirit]", Language::En), "Spirit");
/// assert_eq!(localize("{Дух} []", Language::En), "Дух");
/// assert_eq!(localize("  plain  ", Language::Ru), "plain");
/// ```
#[must_use]
pub fn localize(text: &str, lang: Language) -> String {
    let ru = capture(russian_pattern(), text);
    let en = capture(english_pattern(), text);

    let preferred = match lang {
        Language::Ru => ru.or(en),
        Language::En => en.or(ru),
    };

    preferred.unwrap_or_else(|| text.trim()).to_string()
}

/// Both language variants of an entity's display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilingualName {
    /// Russian variant (may be empty)
    pub russian: String,
    /// English variant (may be empty)
    pub english: String,
}

impl BilingualName {
    /// Splits an encoded name into its variants.
    ///
    /// A name without any bracketed part is treated as Russian.
    #[must_use]
    pub fn parse(full: &str) -> Self {
        let russian = capture(russian_pattern(), full).unwrap_or_default();
        let english = capture(english_pattern(), full).unwrap_or_default();

        if russian.is_empty() && english.is_empty() {
            return Self {
                russian: full.trim().to_string(),
                english: String::new(),
            };
        }

        Self {
            russian: russian.to_string(),
            english: english.to_string(),
        }
    }

    /// Returns true if `name` equals either non-empty variant.
    #[must_use]
    pub fn matches(&self, name: &str) -> bool {
        (!self.russian.is_empty() && self.russian == name)
            || (!self.english.is_empty() && self.english == name)
    }

    /// Returns true if any of `names` equals either variant.
    #[must_use]
    pub fn matches_any<S: AsRef<str>>(&self, names: &[S]) -> bool {
        names.iter().any(|n| self.matches(n.as_ref()))
    }
}
