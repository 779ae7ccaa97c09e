//! End-to-end tests for `phasmbase toggles` command.
#![allow(unused_variables)] // Temp dirs must be kept alive even if not directly accessed

use phasmbase::parser::parse_mappings_str;
use tempfile::TempDir;

mod fixtures;
use fixtures::*;

#[test]
fn test_toggles_builtin_json() {
    let config_dir = TempDir::new().unwrap();
    let result = run_json(phasmbase_command(config_dir.path()).args(["toggles", "--json"]));

    let rows = result.as_array().unwrap();
    let ids: Vec<&str> = rows.iter().filter_map(|r| r["id"].as_str()).collect();
    assert_eq!(&ids[..3], &["speed-slow", "speed-norm", "speed-fast"]);
    assert!(ids.contains(&"microphone-scream"));
    assert!(ids.contains(&"breaker-off"));

    let breaker = rows.iter().find(|r| r["id"] == "breaker-off").unwrap();
    assert_eq!(breaker["kind"], "feature");
    assert_eq!(breaker["mimic_imitates"], false);
    assert_eq!(breaker["reverse"], serde_json::json!(["Джинн", "Jinn"]));
}

#[test]
fn test_toggles_custom_mappings() {
    let (catalog, mappings, data_dir) = create_temp_data_files();
    let config_dir = TempDir::new().unwrap();

    let result = run_json(phasmbase_command(config_dir.path()).args([
        "toggles",
        "--catalog",
        catalog.to_str().unwrap(),
        "--mappings",
        mappings.to_str().unwrap(),
        "--json",
    ]));

    let ids: Vec<&str> = result
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|r| r["id"].as_str())
        .collect();
    assert_eq!(
        ids,
        vec![
            "speed-slow",
            "speed-norm",
            "speed-fast",
            "breaker-off",
            "double-interaction",
            "microphone-scream",
            "radio-hiss",
        ]
    );
}

#[test]
fn test_toggles_plain_output() {
    let config_dir = TempDir::new().unwrap();
    let output = phasmbase_command(config_dir.path())
        .args(["toggles"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("speed-fast"));
    assert!(stdout.contains("gray: Джинн, Jinn"));
}

#[test]
fn test_toggles_toml_dump_reloads() {
    let (catalog, mappings, data_dir) = create_temp_data_files();
    let config_dir = TempDir::new().unwrap();

    let output = phasmbase_command(config_dir.path())
        .args([
            "toggles",
            "--mappings",
            mappings.to_str().unwrap(),
            "--toml",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    let dumped = parse_mappings_str(&String::from_utf8_lossy(&output.stdout)).unwrap();
    assert_eq!(dumped, test_mappings());

    // The dump is a valid mappings file for later runs
    let copy = write_file(data_dir.path(), "copy.toml", &String::from_utf8_lossy(&output.stdout));
    let result = run_json(phasmbase_command(config_dir.path()).args([
        "inspect",
        "--catalog",
        catalog.to_str().unwrap(),
        "--mappings",
        copy.to_str().unwrap(),
        "--toggle",
        "breaker-off",
        "--json",
    ]));
    assert_eq!(entity_view(&result, "Jinn")["mode"], "gray");
}

#[test]
fn test_toggles_toml_and_json_conflict() {
    let config_dir = TempDir::new().unwrap();
    let output = phasmbase_command(config_dir.path())
        .args(["toggles", "--toml", "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}
