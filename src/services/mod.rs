//! Service layer for the resolution engine.
//!
//! The services are pure functions over the models, except for
//! [`Session`], which owns the mutable state of one user session and
//! drives the others when events arrive.

pub mod overlay;
pub mod sanity;
pub mod session;
pub mod speed;
pub mod validator;
pub mod visibility;

// Re-export commonly used types and functions
pub use overlay::{resolve, resolve_entity, sidebar_echo, OverlayMap, Resolution};
pub use sanity::is_below_threshold;
pub use session::{EntityView, Session, SessionEvent, Snapshot};
pub use speed::{speed_gray, OverrideRule, SpeedOverride, SPEED_OVERRIDES};
pub use validator::{CatalogValidator, ValidationReport};
pub use visibility::{is_visible, visibility_report, VisibilityReport};
