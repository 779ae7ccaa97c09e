//! Phasmbase Library
//!
//! Overlay-and-filter resolution for a bilingual ghost catalog: evidence
//! visibility filters, speed and hunt-sanity signals, feature toggle
//! mappings, and the per-session state that ties them together.

// Module declarations
pub mod catalog_db;
pub mod cli;
pub mod config;
pub mod constants;
pub mod models;
pub mod parser;
pub mod services;
