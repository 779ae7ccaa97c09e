//! Data models for the ghost catalog, filter state, and overlays.
//!
//! This module contains all the core data structures used throughout the application.
//! Models are plain values, independent of rendering and of the resolver logic.

pub mod bilingual;
pub mod entity;
pub mod evidence;
pub mod filter;
pub mod mappings;
pub mod measure;
pub mod overlay;
pub mod speed;

// Re-export all model types
pub use bilingual::{localize, BilingualName, Language};
pub use entity::Entity;
pub use evidence::{EvidenceKey, EvidenceSet};
pub use filter::{is_valid_threshold, parse_threshold, FilterMode, FilterState};
pub use mappings::{MimicRule, ToggleMappings};
pub use measure::{parse_number, parse_sanity_parts, split_values, SanityPart};
pub use overlay::{OverlayMode, OverlayState, SignalBreakdown, SignalId, SANITY_FILTER_ID};
pub use speed::{SpeedCategory, SPEED_FAST_ID, SPEED_NORMAL_ID, SPEED_SLOW_ID};
