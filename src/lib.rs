//! RingKeys Library
//!
//! Gesture decoding for a circular keyboard: touch points are classified
//! into eight sectors around a dead zone, accumulated into movement
//! sequences, and resolved against a layered action map into text, key
//! events and keyboard control actions.

// Module declarations
pub mod cli;
pub mod config;
pub mod constants;
pub mod decoder;
pub mod models;
pub mod parser;
pub mod platform;
pub mod services;

pub use config::Config;
pub use decoder::{Decoder, TouchEvent, TouchPhase};
