//! CLI command handlers for RingKeys.
//!
//! This module provides headless, scriptable access to the decoder for
//! automation, testing, and layout authoring.

pub mod classify;
pub mod common;
pub mod config;
pub mod inspect;
pub mod replay;
pub mod session;
pub mod typing;

// Re-export types used by main.rs and tests
pub use classify::ClassifyArgs;
pub use common::{CliError, CliResult, ExitCode};
pub use config::ConfigArgs;
pub use inspect::InspectArgs;
pub use replay::ReplayArgs;
pub use typing::TypeArgs;
