//! Recorded touch-event traces.
//!
//! A trace is a JSON or YAML document: either a bare list of events or an
//! object with an `events` list and an optional keypad size.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::decoder::TouchEvent;
use crate::parser::layout::FileFormat;

/// A recorded gesture session.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TouchTrace {
    /// Keypad width the trace was recorded at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    /// Keypad height the trace was recorded at
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    /// Events in delivery order
    #[serde(default)]
    pub events: Vec<TouchEvent>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TraceDocument {
    Events(Vec<TouchEvent>),
    Trace(TouchTrace),
}

/// Parses a trace file.
pub fn parse_trace_file(path: &Path) -> Result<TouchTrace> {
    let format = FileFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace file: {}", path.display()))?;
    parse_trace_str(&content, format)
        .with_context(|| format!("Failed to parse trace file: {}", path.display()))
}

/// Parses trace content already in memory.
pub fn parse_trace_str(content: &str, format: FileFormat) -> Result<TouchTrace> {
    let trace = match format.parse::<TraceDocument>(content)? {
        TraceDocument::Events(events) => TouchTrace {
            events,
            ..TouchTrace::default()
        },
        TraceDocument::Trace(trace) => trace,
    };
    Ok(trace)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::TouchPhase;

    #[test]
    fn test_bare_event_list() {
        let json = r#"[
            {"phase":"down","x":10.0,"y":20.0,"timestamp_ms":0},
            {"phase":"up","x":10.0,"y":20.0}
        ]"#;
        let trace = parse_trace_str(json, FileFormat::Json).unwrap();
        assert_eq!(trace.events.len(), 2);
        assert_eq!(trace.events[1].phase, TouchPhase::Up);
        assert_eq!(trace.events[1].timestamp_ms, 0);
        assert_eq!(trace.width, None);
    }

    #[test]
    fn test_trace_with_size() {
        let yaml = "width: 400\nheight: 300\nevents:\n  - { phase: down, x: 200, y: 150 }\n  - { phase: cancel, x: 0, y: 0 }\n";
        let trace = parse_trace_str(yaml, FileFormat::Yaml).unwrap();
        assert_eq!(trace.width, Some(400));
        assert_eq!(trace.events[1].phase, TouchPhase::Cancel);
    }

    #[test]
    fn test_bad_phase_is_rejected() {
        let json = r#"[{"phase":"hover","x":1.0,"y":1.0}]"#;
        assert!(parse_trace_str(json, FileFormat::Json).is_err());
    }
}
