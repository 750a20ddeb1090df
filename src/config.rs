//! Configuration management for the decoder and CLI.
//!
//! This module handles loading, validating, and saving configuration in TOML
//! format with platform-specific directory resolution.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{CONFIG_DIR_ENV, CONFIG_DIR_NAME};
use crate::models::SECTOR_WIDTH_DEGREES;

/// Geometry and classification tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecoderConfig {
    /// Dead-zone radius as a fraction of the outer radius (0.0 - 1.0)
    #[serde(default = "default_dead_zone_ratio")]
    pub dead_zone_ratio: f32,
    /// Outer radius as a fraction of half the keypad's shorter side (0.0 - 1.0]
    #[serde(default = "default_ring_ratio")]
    pub ring_ratio: f32,
    /// Angular band past a sector edge that still counts as the previous sector
    #[serde(default = "default_hysteresis_degrees")]
    pub hysteresis_degrees: f32,
    /// Radial band around the dead-zone edge, as a fraction of the dead-zone
    /// radius, that keeps the previous zone (0.0 - 1.0)
    #[serde(default = "default_dead_zone_hysteresis_ratio")]
    pub dead_zone_hysteresis_ratio: f32,
    /// Rotation applied before dividing the ring so spokes fall between sectors
    #[serde(default = "default_rotation_offset_degrees")]
    pub rotation_offset_degrees: f32,
}

fn default_dead_zone_ratio() -> f32 {
    0.3
}

fn default_ring_ratio() -> f32 {
    0.9
}

fn default_hysteresis_degrees() -> f32 {
    5.0
}

fn default_dead_zone_hysteresis_ratio() -> f32 {
    0.1
}

fn default_rotation_offset_degrees() -> f32 {
    SECTOR_WIDTH_DEGREES / 2.0
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            dead_zone_ratio: default_dead_zone_ratio(),
            ring_ratio: default_ring_ratio(),
            hysteresis_degrees: default_hysteresis_degrees(),
            dead_zone_hysteresis_ratio: default_dead_zone_hysteresis_ratio(),
            rotation_offset_degrees: default_rotation_offset_degrees(),
        }
    }
}

impl DecoderConfig {
    /// Validates ratios and angles.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..1.0).contains(&self.dead_zone_ratio) {
            anyhow::bail!(
                "dead_zone_ratio must be in [0.0, 1.0), got {}",
                self.dead_zone_ratio
            );
        }
        if !(self.ring_ratio > 0.0 && self.ring_ratio <= 1.0) {
            anyhow::bail!("ring_ratio must be in (0.0, 1.0], got {}", self.ring_ratio);
        }
        let max_hysteresis = SECTOR_WIDTH_DEGREES / 2.0;
        if !(0.0..max_hysteresis).contains(&self.hysteresis_degrees) {
            anyhow::bail!(
                "hysteresis_degrees must be in [0.0, {}), got {}",
                max_hysteresis,
                self.hysteresis_degrees
            );
        }
        if !(0.0..1.0).contains(&self.dead_zone_hysteresis_ratio) {
            anyhow::bail!(
                "dead_zone_hysteresis_ratio must be in [0.0, 1.0), got {}",
                self.dead_zone_hysteresis_ratio
            );
        }
        if !self.rotation_offset_degrees.is_finite() {
            anyhow::bail!("rotation_offset_degrees must be a finite number");
        }
        Ok(())
    }
}

/// Host input settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InputConfig {
    /// Input-method id to hand over to for the emoticon keyboard action
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoticon_keyboard: Option<String>,
}

/// Path configuration for file system locations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct PathConfig {
    /// Layout file used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<PathBuf>,
}

/// Application configuration.
///
/// # File Location
///
/// - Linux: `~/.config/RingKeys/config.toml`
/// - macOS: `~/Library/Application Support/RingKeys/config.toml`
/// - Windows: `%APPDATA%\RingKeys\config.toml`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Classification tuning
    #[serde(default)]
    pub decoder: DecoderConfig,
    /// Host input settings
    #[serde(default)]
    pub input: InputConfig,
    /// File system paths
    #[serde(default)]
    pub paths: PathConfig,
}

impl Config {
    /// Creates a new Config with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Gets the platform-specific config directory path.
    ///
    /// `RINGKEYS_CONFIG_DIR` overrides the platform location.
    pub fn config_dir() -> Result<PathBuf> {
        if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to determine config directory")?
            .join(CONFIG_DIR_NAME);

        Ok(config_dir)
    }

    /// Gets the full path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Loads configuration from the platform config file.
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    /// Loads configuration from an explicit path; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        config
            .validate()
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        Ok(config)
    }

    /// Saves configuration to the platform config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Saves configuration to an explicit path using temp file + rename.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.validate()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        let temp_path = path.with_extension("toml.tmp");

        fs::write(&temp_path, content).with_context(|| {
            format!("Failed to write temp config file: {}", temp_path.display())
        })?;

        fs::rename(&temp_path, path).with_context(|| {
            format!("Failed to rename temp config file to: {}", path.display())
        })?;

        Ok(())
    }

    /// Validates configuration values.
    ///
    /// Checks:
    /// - decoder ratios and angles are in range
    /// - the default layout path exists (if set)
    /// - the emoticon keyboard id is not blank (if set)
    pub fn validate(&self) -> Result<()> {
        self.decoder.validate()?;

        if let Some(layout) = &self.paths.layout {
            if !layout.exists() {
                anyhow::bail!("Layout file does not exist: {}", layout.display());
            }
        }

        if let Some(id) = &self.input.emoticon_keyboard {
            if id.trim().is_empty() {
                anyhow::bail!("emoticon_keyboard must not be blank");
            }
        }

        Ok(())
    }
}
