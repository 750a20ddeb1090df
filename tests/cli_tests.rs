//! Integration tests for the ringkeys command line.

mod fixtures;

use fixtures::*;
use ringkeys::config::DecoderConfig;
use ringkeys::models::{CircleGeometry, Dimension};
use ringkeys::services::gesture_synth::synthesize;
use serde_json::Value;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Runs the binary with an isolated config directory.
fn ringkeys(args: &[&str], config_dir: &TempDir) -> Output {
    Command::new(ringkeys_bin())
        .args(args)
        .env("RINGKEYS_CONFIG_DIR", config_dir.path())
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute command")
}

fn json_stdout(output: &Output) -> Value {
    serde_json::from_slice(&output.stdout).expect("Output should be valid JSON")
}

#[test]
fn test_classify_json() {
    let config_dir = TempDir::new().unwrap();

    let output = ringkeys(&["classify", "--x", "540", "--y", "100", "--json"], &config_dir);
    assert_eq!(output.status.code(), Some(0));
    let result = json_stdout(&output);
    assert_eq!(result["zone"], "N");
    assert_eq!(result["in_bounds"], true);

    let output = ringkeys(&["classify", "--x", "540", "--y", "360", "--json"], &config_dir);
    assert_eq!(json_stdout(&output)["zone"], "CENTER");
}

#[test]
fn test_classify_human_output() {
    let config_dir = TempDir::new().unwrap();

    let output = ringkeys(&["classify", "--x", "900", "--y", "360"], &config_dir);

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("sector E"));
}

#[test]
fn test_inspect_builtin_layout() {
    let config_dir = TempDir::new().unwrap();

    let output = ringkeys(&["inspect", "--json"], &config_dir);

    assert_eq!(output.status.code(), Some(0));
    let result = json_stdout(&output);
    assert_eq!(result["name"], "English");
    assert_eq!(result["total_layers"], 3);
    assert_eq!(result["layers"].as_array().unwrap().len(), 3);
}

#[test]
fn test_inspect_layout_file() {
    let config_dir = TempDir::new().unwrap();
    let (path, _dir) = create_temp_layout_file(&test_layout_basic());

    let output = ringkeys(
        &["inspect", "--layout", path.to_str().unwrap(), "--json"],
        &config_dir,
    );

    let result = json_stdout(&output);
    assert_eq!(result["name"], "Basic");
    assert_eq!(result["total_entries"], 2);
}

#[test]
fn test_type_builtin_layout() {
    let config_dir = TempDir::new().unwrap();

    let output = ringkeys(&["type", "-g", "N", "-g", "N,NE", "--json"], &config_dir);

    assert_eq!(output.status.code(), Some(0));
    let result = json_stdout(&output);
    assert_eq!(result["layout"], "English");
    assert_eq!(result["text"], "eh");
    assert_eq!(result["gestures"].as_array().unwrap().len(), 2);
}

#[test]
fn test_type_with_loop() {
    let config_dir = TempDir::new().unwrap();

    let output = ringkeys(&["type", "-g", "N@1", "--json"], &config_dir);

    let result = json_stdout(&output);
    assert_eq!(result["text"], "1");
    assert_eq!(result["gestures"][0]["layer"], 1);
}

#[test]
fn test_type_unmapped_sequence_commits_nothing() {
    let config_dir = TempDir::new().unwrap();
    let (path, _dir) = create_temp_layout_file(&test_layout_basic());

    let output = ringkeys(
        &["type", "--layout", path.to_str().unwrap(), "-g", "N,S", "--json"],
        &config_dir,
    );

    assert_eq!(output.status.code(), Some(0));
    let result = json_stdout(&output);
    assert_eq!(result["text"], "");
    assert_eq!(result["gestures"][0]["effect"]["effect"], "nothing");
}

#[test]
fn test_type_phone_field_starts_on_number_keypad() {
    let config_dir = TempDir::new().unwrap();

    let output = ringkeys(&["type", "-g", "N", "--field", "phone", "--json"], &config_dir);

    assert_eq!(json_stdout(&output)["keypad"], "number");
}

#[test]
fn test_type_enter_performs_ime_action() {
    let config_dir = TempDir::new().unwrap();

    // NE,SW is enter on the built-in layout
    let output = ringkeys(
        &["type", "-g", "NE,SW", "--ime-action", "search", "--json"],
        &config_dir,
    );
    assert_eq!(output.status.code(), Some(0));
    let result = json_stdout(&output);
    assert_eq!(result["text"], "");
    assert_eq!(result["gestures"][0]["effect"]["effect"], "editor_action");
    assert_eq!(result["gestures"][0]["effect"]["action"], "search");

    let output = ringkeys(
        &["type", "-g", "NE,SW", "--ime-action", "search", "--no-enter-action", "--json"],
        &config_dir,
    );
    assert_eq!(json_stdout(&output)["text"], "\n");
}

#[test]
fn test_type_invalid_gesture_is_validation_error() {
    let config_dir = TempDir::new().unwrap();

    let output = ringkeys(&["type", "-g", "N,UP"], &config_dir);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_layout_is_io_error() {
    let config_dir = TempDir::new().unwrap();

    let output = ringkeys(
        &["type", "--layout", "/nonexistent/layout.yaml", "-g", "N"],
        &config_dir,
    );

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Layout file not found"));
}

#[test]
fn test_replay_trace() {
    let config_dir = TempDir::new().unwrap();
    let geometry = CircleGeometry::for_keypad(Dimension::new(400, 300), &DecoderConfig::default());
    let mut events = synthesize(&geometry, &seq("N,NE"), 0);
    events.extend(synthesize(&geometry, &seq("S"), 0));
    let (path, _dir) = create_temp_trace_file(&events, 400, 300);

    let output = ringkeys(
        &["replay", "--trace", path.to_str().unwrap(), "--json"],
        &config_dir,
    );

    assert_eq!(output.status.code(), Some(0));
    let result = json_stdout(&output);
    assert_eq!(result["text"], "hi");
}

#[test]
fn test_replay_missing_trace_is_io_error() {
    let config_dir = TempDir::new().unwrap();

    let output = ringkeys(&["replay", "--trace", "/nonexistent/trace.json"], &config_dir);

    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_config_show_defaults() {
    let config_dir = TempDir::new().unwrap();

    let output = ringkeys(&["config", "show", "--json"], &config_dir);

    assert_eq!(output.status.code(), Some(0));
    let result = json_stdout(&output);
    assert_eq!(result["decoder"]["dead_zone_ratio"], 0.3);
    assert_eq!(result["decoder"]["rotation_offset_degrees"], 22.5);
}

#[test]
fn test_config_set_persists() {
    let config_dir = TempDir::new().unwrap();

    let output = ringkeys(
        &["config", "set", "--dead-zone-ratio", "0.25", "--emoticon-keyboard", "emoji"],
        &config_dir,
    );
    assert_eq!(output.status.code(), Some(0));

    let output = ringkeys(&["config", "show", "--json"], &config_dir);
    let result = json_stdout(&output);
    assert_eq!(result["decoder"]["dead_zone_ratio"], 0.25);
    assert_eq!(result["input"]["emoticon_keyboard"], "emoji");
}

#[test]
fn test_config_set_dead_zone_hysteresis_ratio() {
    let config_dir = TempDir::new().unwrap();

    let output = ringkeys(
        &["config", "set", "--dead-zone-hysteresis-ratio", "0.2"],
        &config_dir,
    );
    assert_eq!(output.status.code(), Some(0));

    let output = ringkeys(&["config", "show", "--json"], &config_dir);
    let ratio = json_stdout(&output)["decoder"]["dead_zone_hysteresis_ratio"]
        .as_f64()
        .unwrap();
    assert!((ratio - 0.2).abs() < 1e-6);

    let output = ringkeys(
        &["config", "set", "--dead-zone-hysteresis-ratio", "1.0"],
        &config_dir,
    );
    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_config_set_rejects_invalid_ratio() {
    let config_dir = TempDir::new().unwrap();

    let output = ringkeys(&["config", "set", "--dead-zone-ratio", "1.5"], &config_dir);

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_explicit_config_file() {
    let config_dir = TempDir::new().unwrap();
    let config_path = config_dir.path().join("custom.toml");
    let config_arg = config_path.to_str().unwrap();

    let output = ringkeys(
        &["--config", config_arg, "config", "set", "--hysteresis-degrees", "8"],
        &config_dir,
    );
    assert_eq!(output.status.code(), Some(0));
    assert!(config_path.exists());

    let output = ringkeys(&["--config", config_arg, "config", "show", "--json"], &config_dir);
    assert_eq!(json_stdout(&output)["decoder"]["hysteresis_degrees"], 8.0);
}
