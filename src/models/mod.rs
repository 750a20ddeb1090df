//! Data models for the gesture decoder.
//!
//! This module contains the geometric primitives, movement sequences, actions
//! and the layered action map. Models are independent of the decoder's
//! per-gesture state and of any host platform.

pub mod action;
pub mod action_map;
pub mod geometry;
pub mod keycode;
pub mod layout;
pub mod movement;
pub mod sector;

// Re-export all model types
pub use action::{KeyboardAction, KeyboardActionType, LayerLevel, MAX_LAYERS};
pub use action_map::{ActionMap, ActionMapBuilder, LayoutError};
pub use geometry::{measure_keypad, CircleGeometry, Dimension, Orientation, Point};
pub use keycode::CustomKeycode;
pub use layout::{ActionEntry, LayerData, LayoutData};
pub use movement::{MovementSequence, SequenceError};
pub use sector::{Sector, Zone, SECTOR_COUNT, SECTOR_WIDTH_DEGREES};
