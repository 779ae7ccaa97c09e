//! Shared test fixtures for engine and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use phasmbase::models::{Entity, ToggleMappings};
use phasmbase::parser::{parse_catalog_str, parse_mappings_str};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Small catalog covering every resolver tier.
///
/// - Spirit, Shade, Mimic: single speed 1.7
/// - Revenant: 1.0/3.0 (slow and fast)
/// - Twins: 1.5/1.9 (slow boundary and the shared 1.9 boundary)
/// - Deogen: 0.4/3.0 with a low hunt sanity
/// - Thaye: a `15-75` sanity range
/// - Jinn: listed in the reverse table
pub const TEST_CATALOG_JSON: &str = r#"[
    {"name": "{Дух} [Spirit]", "emp": "x", "book": "x", "radio": "x", "speed": "1.7", "percentage": "50"},
    {"name": "{Джинн} [Jinn]", "emp": "x", "uf": "x", "zero": "x", "speed": "1.7/2.5", "percentage": "50"},
    {"name": "{Ревенант} [Revenant]", "lights": "x", "book": "x", "zero": "x", "speed": "1.0/3.0", "percentage": "50"},
    {"name": "{Тень} [Shade]", "emp": "x", "book": "x", "zero": "x", "speed": "1.7", "percentage": "35"},
    {"name": "{Банши} [Banshee]", "dots": "x", "uf": "x", "lights": "x", "speed": "1.7", "percentage": "50"},
    {"name": "{Близнецы} [The Twins]", "emp": "x", "radio": "x", "zero": "x", "speed": "1.5/1.9", "percentage": "50"},
    {"name": "{Деоген} [Deogen]", "dots": "x", "book": "x", "radio": "x", "speed": "0.4/3.0", "percentage": "40"},
    {"name": "{Тайэ} [Thaye]", "dots": "x", "lights": "x", "book": "x", "speed": "1.0-2.75", "percentage": "15-75"},
    {"name": "{Мимик} [Mimic]", "uf": "x", "radio": "x", "zero": "x", "speed": "1.7", "percentage": "50"}
]"#;

/// Mapping tables matching [`TEST_CATALOG_JSON`].
pub const TEST_MAPPINGS_TOML: &str = r#"
[green]
microphone-scream = ["Банши", "Banshee"]
radio-hiss = ["Deogen"]
double-interaction = ["Близнецы"]

[reverse]
breaker-off = ["Джинн", "Jinn"]

[mimic]
names = ["Мимик", "Mimic"]
excluded = ["breaker-off", "radio-hiss"]
"#;

/// Parsed [`TEST_CATALOG_JSON`].
pub fn test_catalog() -> Vec<Entity> {
    parse_catalog_str(TEST_CATALOG_JSON).expect("test catalog parses")
}

/// Parsed [`TEST_MAPPINGS_TOML`].
pub fn test_mappings() -> ToggleMappings {
    parse_mappings_str(TEST_MAPPINGS_TOML).expect("test mappings parse")
}

/// Writes `content` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Temp directory holding the test catalog and mappings.
///
/// Returns `(catalog_path, mappings_path, temp_dir)`; keep the `TempDir` alive.
pub fn create_temp_data_files() -> (PathBuf, PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let catalog = write_file(temp_dir.path(), "ghosts.json", TEST_CATALOG_JSON);
    let mappings = write_file(temp_dir.path(), "mappings.toml", TEST_MAPPINGS_TOML);
    (catalog, mappings, temp_dir)
}

/// Path to the phasmbase binary
pub fn phasmbase_bin() -> &'static str {
    env!("CARGO_BIN_EXE_phasmbase")
}

/// Command with an isolated config directory so the user's config is never read.
pub fn phasmbase_command(config_dir: &Path) -> Command {
    let mut cmd = Command::new(phasmbase_bin());
    cmd.env("PHASMBASE_CONFIG_DIR", config_dir);
    cmd.env_remove("RUST_LOG");
    cmd
}

/// Runs a command and parses its stdout as JSON, asserting exit code 0.
pub fn run_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().expect("Failed to execute command");
    assert_eq!(
        output.status.code(),
        Some(0),
        "Should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).expect("Should parse JSON output")
}

/// Finds an entity view in a JSON snapshot by its English name.
pub fn entity_view<'a>(snapshot: &'a serde_json::Value, english: &str) -> &'a serde_json::Value {
    snapshot["entities"]
        .as_array()
        .expect("entities array")
        .iter()
        .find(|view| {
            view["id"]
                .as_str()
                .is_some_and(|id| id.ends_with(&format!("[{english}]")))
        })
        .unwrap_or_else(|| panic!("no entity named {english}"))
}
