//! Application-wide constants.
//!
//! This module defines constants used throughout the application,
//! including the application name and version information.

/// The display name of the application (human-readable, with proper capitalization).
pub const APP_NAME: &str = "RingKeys";

/// The binary name of the application (used in command examples, lowercase).
pub const APP_BINARY_NAME: &str = "ringkeys";

/// Directory under the platform config dir holding `config.toml`.
pub const CONFIG_DIR_NAME: &str = APP_NAME;

/// Environment variable overriding the config directory.
pub const CONFIG_DIR_ENV: &str = "RINGKEYS_CONFIG_DIR";

/// Keypad size assumed by the CLI when none is given (portrait phone keypad).
pub const DEFAULT_KEYPAD_WIDTH: u32 = 1080;

/// See [`DEFAULT_KEYPAD_WIDTH`].
pub const DEFAULT_KEYPAD_HEIGHT: u32 = 720;
