//! CLI command handlers for Phasmbase.
//!
//! Every command builds a fresh session from the catalog and mapping tables,
//! so the CLI is a scriptable front end to the same engine a UI would drive.

pub mod common;
pub mod config;
pub mod inspect;
pub mod replay;
pub mod toggles;
pub mod validate;

// Re-export types used by main.rs and tests
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use inspect::InspectArgs;
pub use replay::ReplayArgs;
pub use toggles::TogglesArgs;
pub use validate::ValidateArgs;
