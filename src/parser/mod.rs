//! Parsing for catalog and mapping files.
//!
//! Catalogs are JSON or JSON5 arrays of ghost records; mapping tables are TOML.

pub mod catalog;
pub mod mappings;

// Re-export commonly used functions
pub use catalog::{dedup_catalog, load_catalog, parse_catalog_str};
pub use mappings::{load_mappings, mappings_to_toml, parse_mappings_str};
