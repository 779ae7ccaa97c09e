//! Application-wide constants.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "Phasmbase";

/// Directory under the platform config dir holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = "Phasmbase";

/// Environment variable that overrides the config directory.
pub const CONFIG_DIR_ENV: &str = "PHASMBASE_CONFIG_DIR";
