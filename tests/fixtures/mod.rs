//! Shared test fixtures for decoder and CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use ringkeys::decoder::TouchEvent;
use ringkeys::models::{
    ActionEntry, CircleGeometry, CustomKeycode, KeyboardActionType, LayerData, LayerLevel,
    LayoutData, MovementSequence, Point,
};
use ringkeys::parser::TouchTrace;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Parses a sequence literal such as `"N,NE"`.
pub fn seq(s: &str) -> MovementSequence {
    s.parse().expect("valid sequence literal")
}

/// Ring used by decoder tests: centered at (200, 200), dead zone 30, outer 120.
pub fn test_geometry() -> CircleGeometry {
    CircleGeometry::new(Point::new(200.0, 200.0), 30.0, 120.0)
}

/// Minimal two-letter layout: `[N] -> "e"`, `[S] -> "t"`.
pub fn test_layout_basic() -> LayoutData {
    LayoutData {
        name: "Basic".to_string(),
        layers: vec![LayerData {
            layer: LayerLevel::FIRST,
            actions: vec![
                ActionEntry::text(seq("N"), "e"),
                ActionEntry::text(seq("S"), "t"),
            ],
        }],
    }
}

/// Layout with three layers, modifiers and control actions.
///
/// Layer 0:
/// - `[N] -> "e"`, `[S] -> "t"`, `[E] -> "ß"` (caps `"SS"`), `[N,NE] -> "h"`
/// - `[W] -> SHIFT_TOGGLE`, `[SW] -> ctrl (one-shot)`, `[SE] -> enter`
/// - `[E,W] -> delete`, `[NW] -> switch to layer 2 for one gesture`
/// - `[NE,SW] -> emoticon keyboard`, `[SW,NE] -> hide keyboard`
///
/// Layer 1: `[N] -> "1"`; layer 2: `[N] -> "@"`.
pub fn test_layout_full() -> LayoutData {
    let mut ctrl = ActionEntry::text(seq("SW"), "");
    ctrl.action_type = Some(KeyboardActionType::InputKey);
    ctrl.key_code = 113;

    let mut enter = ActionEntry::text(seq("SE"), "");
    enter.action_type = Some(KeyboardActionType::InputKey);
    enter.key_code = 66;

    let mut delete = ActionEntry::text(seq("E,W"), "");
    delete.action_type = Some(KeyboardActionType::Delete);

    let mut switch = ActionEntry::text(seq("NW"), "");
    switch.action_type = Some(KeyboardActionType::SwitchLayer);
    switch.key_code = 2;

    let mut sharp_s = ActionEntry::text(seq("E"), "ß");
    sharp_s.caps_text = "SS".to_string();

    LayoutData {
        name: "Full".to_string(),
        layers: vec![
            LayerData {
                layer: LayerLevel::FIRST,
                actions: vec![
                    ActionEntry::text(seq("N"), "e"),
                    ActionEntry::text(seq("S"), "t"),
                    ActionEntry::text(seq("N,NE"), "h"),
                    sharp_s,
                    ActionEntry::custom(seq("W"), CustomKeycode::ShiftToggle),
                    ctrl,
                    enter,
                    delete,
                    switch,
                    ActionEntry::custom(seq("NE,SW"), CustomKeycode::SwitchToEmoticonKeyboard),
                    ActionEntry::custom(seq("SW,NE"), CustomKeycode::HideKeyboard),
                ],
            },
            LayerData {
                layer: LayerLevel::SECOND,
                actions: vec![ActionEntry::text(seq("N"), "1")],
            },
            LayerData {
                layer: LayerLevel::THIRD,
                actions: vec![ActionEntry::text(seq("N"), "@")],
            },
        ],
    }
}

/// Writes a layout as YAML to a temp directory.
///
/// The `TempDir` must be kept alive while the file is used.
pub fn create_temp_layout_file(layout: &LayoutData) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("layout.yaml");
    let yaml = serde_yml::to_string(layout).expect("Failed to serialize layout");
    fs::write(&path, yaml).expect("Failed to write layout");
    (path, temp_dir)
}

/// Writes a touch trace as JSON to a temp directory.
pub fn create_temp_trace_file(
    events: &[TouchEvent],
    width: u32,
    height: u32,
) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("trace.json");
    let trace = TouchTrace {
        width: Some(width),
        height: Some(height),
        events: events.to_vec(),
    };
    let json = serde_json::to_string_pretty(&trace).expect("Failed to serialize trace");
    fs::write(&path, json).expect("Failed to write trace");
    (path, temp_dir)
}

/// Path to the ringkeys binary.
pub fn ringkeys_bin() -> &'static str {
    env!("CARGO_BIN_EXE_ringkeys")
}
