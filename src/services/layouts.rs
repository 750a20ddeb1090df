//! Layout loading service.
//!
//! This module centralizes where layouts come from: a file on disk, the
//! configured default, or the layout built into the binary.

use anyhow::{Context, Result};
use std::path::Path;
use tracing::debug;

use crate::models::{ActionMap, LayoutData};
use crate::parser::{self, FileFormat};

/// The built-in English layout.
const DEFAULT_LAYOUT_YAML: &str = include_str!("../data/default_layout.yaml");

/// Service for turning layout files into action maps.
pub struct LayoutService;

impl LayoutService {
    /// Loads layout data from a YAML or JSON file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use std::path::Path;
    /// use ringkeys::services::LayoutService;
    ///
    /// let layout = LayoutService::load(Path::new("english.yaml"))?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    pub fn load(path: &Path) -> Result<LayoutData> {
        parser::parse_layout_file(path)
            .with_context(|| format!("Failed to load layout from {}", path.display()))
    }

    /// The layout compiled into the binary.
    pub fn builtin() -> Result<LayoutData> {
        parser::parse_layout_str(DEFAULT_LAYOUT_YAML, FileFormat::Yaml)
            .context("Failed to parse built-in layout")
    }

    /// Loads `path`, or the built-in layout when no path is given.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<LayoutData> {
        match path {
            Some(path) => Self::load(path),
            None => Self::builtin(),
        }
    }

    /// Loads a layout and builds its action map.
    pub fn load_map(path: Option<&Path>) -> Result<ActionMap> {
        let layout = Self::load_or_builtin(path)?;
        let map = ActionMap::from_layout(&layout)
            .with_context(|| format!("Invalid layout '{}'", layout.name))?;

        debug!(
            layout = map.name(),
            layers = map.total_layers(),
            entries = map.len(),
            "layout loaded"
        );
        Ok(map)
    }
}
