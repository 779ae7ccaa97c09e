//! Delimited numeric fields used for ghost speed and hunt sanity.
//!
//! Both fields share one grammar: values separated by `/`, where a value may
//! also be a `min-max` range (`"1.7"`, `"1.7/2.25"`, `"1.4-1.9"`, `"15-75"`).
//! Tokens that do not start with a number become `NaN`, and every comparison
//! against `NaN` is false, so a malformed token simply never matches.

use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

fn number_prefix() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?").ok())
        .as_ref()
}

/// Reads the leading decimal number of `token`, ignoring trailing text.
///
/// `"50%"` reads as 50.0; `"abc"` and `""` read as `NaN`.
#[must_use]
pub fn parse_number(token: &str) -> f64 {
    let token = token.trim();
    number_prefix()
        .and_then(|re| re.find(token))
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

/// Splits a field on both delimiters and parses every token.
///
/// Ranges contribute their two endpoints as separate values, which is how
/// speed fields are compared against speed categories.
#[must_use]
pub fn split_values(field: &str) -> Vec<f64> {
    field.split(['/', '-']).map(parse_number).collect()
}

/// One `/`-separated part of a sanity field.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum SanityPart {
    /// A single percentage
    Single {
        /// Parsed value
        value: f64,
    },
    /// A span of hyphen-separated values, normalized to its smallest and
    /// largest token
    Range {
        /// Smallest value
        min: f64,
        /// Largest value; `NaN` if any token is unparsable
        max: f64,
    },
}

impl SanityPart {
    /// The value compared against a threshold: the single value, or the
    /// largest value of the range whatever order it was written in.
    #[must_use]
    pub const fn upper(&self) -> f64 {
        match *self {
            Self::Single { value } => value,
            Self::Range { max, .. } => max,
        }
    }
}

fn parse_part(part: &str) -> SanityPart {
    if !part.contains('-') {
        return SanityPart::Single {
            value: parse_number(part),
        };
    }

    let values: Vec<f64> = part.split('-').map(parse_number).collect();
    if values.iter().any(|v| v.is_nan()) {
        return SanityPart::Range {
            min: f64::NAN,
            max: f64::NAN,
        };
    }

    SanityPart::Range {
        min: values.iter().copied().fold(f64::INFINITY, f64::min),
        max: values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
    }
}

/// Parses a sanity field into its parts.
#[must_use]
pub fn parse_sanity_parts(field: &str) -> Vec<SanityPart> {
    field.split('/').map(parse_part).collect()
}
