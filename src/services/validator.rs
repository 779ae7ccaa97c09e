//! Consistency checks for a catalog and its mapping tables.
//!
//! Errors describe data the engine will silently misjudge (a ghost whose
//! speed never parses is grayed by every speed toggle). Warnings describe
//! table entries that will never fire.

// Allow format! appended to String - more readable for building messages
#![allow(clippy::format_push_string)]

use crate::models::{Entity, SpeedCategory, ToggleMappings};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

/// Validation result with specific errors and warnings.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    /// Problems that make resolution results wrong
    pub errors: Vec<ValidationError>,
    /// Entries that can never take effect
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationReport {
    /// Creates a new empty validation report.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Returns true if there are no errors (warnings are allowed).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Adds an error to the report.
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Adds a warning to the report.
    pub fn add_warning(&mut self, warning: impl Into<String>) {
        self.warnings.push(ValidationWarning {
            message: warning.into(),
        });
    }

    /// Formats the report as a user-friendly message.
    #[must_use]
    pub fn format_message(&self) -> String {
        let mut message = String::new();

        if !self.errors.is_empty() {
            message.push_str(&format!("{} validation errors:\n", self.errors.len()));
            for (idx, error) in self.errors.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, error));
            }
        }

        if !self.warnings.is_empty() {
            message.push_str(&format!("{} warnings:\n", self.warnings.len()));
            for (idx, warning) in self.warnings.iter().enumerate() {
                message.push_str(&format!("  {}. {}\n", idx + 1, warning.message));
            }
        }

        message
    }
}

/// Types of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationErrorKind {
    /// Catalog has no entries
    EmptyCatalog,
    /// Two entries share a name
    DuplicateName,
    /// A speed token does not start with a number
    UnparsableSpeed,
    /// A sanity token does not start with a number
    UnparsableSanity,
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "Empty Catalog"),
            Self::DuplicateName => write!(f, "Duplicate Name"),
            Self::UnparsableSpeed => write!(f, "Unparsable Speed"),
            Self::UnparsableSanity => write!(f, "Unparsable Sanity"),
        }
    }
}

/// Validation error with context.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationError {
    /// Type of validation error
    pub kind: ValidationErrorKind,
    /// Catalog entry the error refers to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    /// Human-readable error message
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            entity: None,
            message: message.into(),
        }
    }

    /// Sets the entity context.
    #[must_use]
    pub fn with_entity(mut self, entity: impl Into<String>) -> Self {
        self.entity = Some(entity.into());
        self
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.entity {
            Some(entity) => write!(f, "[{entity}] {}: {}", self.kind, self.message),
            None => write!(f, "{}: {}", self.kind, self.message),
        }
    }
}

/// Validation warning (non-blocking).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationWarning {
    /// Warning message
    pub message: String,
}

/// Checks a catalog against its mapping tables.
pub struct CatalogValidator<'a> {
    catalog: &'a [Entity],
    mappings: &'a ToggleMappings,
}

impl<'a> CatalogValidator<'a> {
    /// Creates a validator over a catalog exactly as loaded (duplicates included).
    #[must_use]
    pub const fn new(catalog: &'a [Entity], mappings: &'a ToggleMappings) -> Self {
        Self { catalog, mappings }
    }

    /// Runs every check.
    #[must_use]
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();

        if self.catalog.is_empty() {
            report.add_error(ValidationError::new(
                ValidationErrorKind::EmptyCatalog,
                "Catalog contains no ghosts",
            ));
            return report;
        }

        self.check_names(&mut report);
        self.check_fields(&mut report);
        self.check_tables(&mut report);
        self.check_mimic(&mut report);

        report
    }

    fn check_names(&self, report: &mut ValidationReport) {
        let mut seen = HashSet::new();
        for entity in self.catalog {
            if !seen.insert(entity.id.as_str()) {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::DuplicateName,
                        "Name appears more than once; only the first entry is used",
                    )
                    .with_entity(&entity.id),
                );
            }
        }
    }

    fn check_fields(&self, report: &mut ValidationReport) {
        for entity in self.catalog {
            if entity.speed_values().iter().any(|v| v.is_nan()) {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::UnparsableSpeed,
                        format!("Speed '{}' has a non-numeric token", entity.speed),
                    )
                    .with_entity(&entity.id),
                );
            }
            if entity.sanity_parts().iter().any(|p| p.upper().is_nan()) {
                report.add_error(
                    ValidationError::new(
                        ValidationErrorKind::UnparsableSanity,
                        format!("Hunt sanity '{}' has a non-numeric token", entity.sanity),
                    )
                    .with_entity(&entity.id),
                );
            }
        }
    }

    fn check_tables(&self, report: &mut ValidationReport) {
        let tables = [("green", &self.mappings.green), ("reverse", &self.mappings.reverse)];
        for (table, entries) in tables {
            for (toggle, names) in entries {
                if SpeedCategory::is_speed_toggle(toggle) {
                    report.add_warning(format!(
                        "{table} table entry '{toggle}' uses a built-in speed toggle id"
                    ));
                }
                for name in names {
                    if !self.catalog.iter().any(|e| e.is_named(name)) {
                        report.add_warning(format!(
                            "{table} table entry '{toggle}' names '{name}', which matches no ghost"
                        ));
                    }
                }
            }
        }

        let known = self.mappings.feature_toggles();
        for id in &self.mappings.mimic.excluded {
            if !known.contains(id) && !SpeedCategory::is_speed_toggle(id) {
                report.add_warning(format!(
                    "mimic exclusion '{id}' is not a toggle in either table"
                ));
            }
        }
    }

    fn check_mimic(&self, report: &mut ValidationReport) {
        let matches: Vec<&Entity> = self
            .catalog
            .iter()
            .filter(|e| self.mappings.mimic.is_mimic(e))
            .collect();

        match matches.as_slice() {
            [] => report.add_warning(format!(
                "no ghost matches the mimic names [{}]",
                self.mappings.mimic.names.join(", ")
            )),
            [_] => {}
            [first, ..] => report.add_warning(format!(
                "{} ghosts match the mimic names; only '{}' is treated as the mimic",
                matches.len(),
                first.id
            )),
        }
    }
}
