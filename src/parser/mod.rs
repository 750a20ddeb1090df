//! Parsing for layout and trace files.
//!
//! This module reads keyboard layouts and recorded touch traces from YAML or
//! JSON documents.

pub mod layout;
pub mod trace;

// Re-export commonly used functions
pub use layout::{parse_layout_file, parse_layout_str, FileFormat};
pub use trace::{parse_trace_file, parse_trace_str, TouchTrace};
