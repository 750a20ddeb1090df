//! Service layer around the decoder.
//!
//! This module contains the pieces a host wires the decoder into: the shared
//! action-map store, the text-input sink, layout loading and synthetic
//! gesture generation.

pub mod action_map_store;
pub mod gesture_synth;
pub mod layouts;
pub mod text_input;

// Re-export commonly used types and functions
pub use action_map_store::ActionMapStore;
pub use layouts::LayoutService;
pub use text_input::{
    EditorInfo, FieldClass, ImeAction, KeypadKind, Selection, SinkEvent, TextBuffer, TextInput,
};
