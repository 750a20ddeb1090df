//! Layout file parsing.
//!
//! Layouts are YAML or JSON documents deserializing into [`LayoutData`]; the
//! format is picked from the file extension.
//!
//! # File Format
//!
//! ```yaml
//! name: English
//! layers:
//!   - layer: 0
//!     actions:
//!       - { sequence: [N], text: "e" }
//!       - { sequence: [N, NE], text: "h", caps_text: "H" }
//!       - { sequence: [E, W], type: delete }
//!       - { sequence: [S, N], custom: shift_toggle }
//!       - { sequence: [NE, SW], type: input_key, key_code: 66 }
//! ```

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::models::LayoutData;

/// Serialization format of a layout or trace file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// `.yaml` / `.yml`
    Yaml,
    /// `.json`
    Json,
}

impl FileFormat {
    /// Picks the format from the path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        match extension.as_deref() {
            Some("yaml" | "yml") => Ok(Self::Yaml),
            Some("json") => Ok(Self::Json),
            Some(other) => anyhow::bail!(
                "Unsupported file extension '.{}' for {} (expected .yaml, .yml or .json)",
                other,
                path.display()
            ),
            None => anyhow::bail!(
                "Cannot determine format of {} (expected .yaml, .yml or .json)",
                path.display()
            ),
        }
    }

    /// Deserializes `content` in this format.
    pub fn parse<T: serde::de::DeserializeOwned>(self, content: &str) -> Result<T> {
        match self {
            Self::Yaml => serde_yml::from_str(content).context("Failed to parse YAML"),
            Self::Json => serde_json::from_str(content).context("Failed to parse JSON"),
        }
    }
}

/// Parses a layout file.
///
/// When the document has no `name`, the file stem is used.
pub fn parse_layout_file(path: &Path) -> Result<LayoutData> {
    let format = FileFormat::from_path(path)?;
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read layout file: {}", path.display()))?;

    let mut layout = parse_layout_str(&content, format)
        .with_context(|| format!("Failed to parse layout file: {}", path.display()))?;

    if layout.name.trim().is_empty() {
        if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
            layout.name = stem.to_string();
        }
    }

    Ok(layout)
}

/// Parses layout content already in memory.
pub fn parse_layout_str(content: &str, format: FileFormat) -> Result<LayoutData> {
    format.parse(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CustomKeycode, KeyboardActionType, LayerLevel, MovementSequence, Sector};
    use tempfile::TempDir;

    const YAML: &str = r#"
name: Tiny
layers:
  - layer: 0
    actions:
      - { sequence: [N], text: "e" }
      - { sequence: [N, NE], text: "h", caps_text: "H" }
      - { sequence: [E, W], type: delete }
      - { sequence: [S, N], custom: shift_toggle }
  - layer: 1
    actions:
      - { sequence: [N], text: "1" }
"#;

    #[test]
    fn test_parse_yaml() {
        let layout = parse_layout_str(YAML, FileFormat::Yaml).unwrap();
        assert_eq!(layout.name, "Tiny");
        assert_eq!(layout.layers.len(), 2);
        assert_eq!(layout.layers[1].layer, LayerLevel::SECOND);

        let actions = &layout.layers[0].actions;
        assert_eq!(
            actions[1].sequence,
            MovementSequence::new(vec![Sector::N, Sector::NE]).unwrap()
        );
        assert_eq!(actions[1].caps_text, "H");
        assert_eq!(actions[2].action_type, Some(KeyboardActionType::Delete));
        assert_eq!(actions[3].custom, Some(CustomKeycode::ShiftToggle));
    }

    #[test]
    fn test_parse_json() {
        let json = r#"{"name":"J","layers":[{"layer":0,"actions":[{"sequence":["S"],"text":"t"}]}]}"#;
        let layout = parse_layout_str(json, FileFormat::Json).unwrap();
        assert_eq!(layout.layers[0].actions[0].text, "t");
    }

    #[test]
    fn test_self_transition_is_rejected() {
        let yaml = "layers:\n  - layer: 0\n    actions:\n      - { sequence: [N, N], text: x }\n";
        assert!(parse_layout_str(yaml, FileFormat::Yaml).is_err());
    }

    #[test]
    fn test_unknown_sector_is_rejected() {
        let yaml = "layers:\n  - layer: 0\n    actions:\n      - { sequence: [UP], text: x }\n";
        assert!(parse_layout_str(yaml, FileFormat::Yaml).is_err());
    }

    #[test]
    fn test_format_from_extension() {
        assert_eq!(FileFormat::from_path(Path::new("a.YML")).unwrap(), FileFormat::Yaml);
        assert_eq!(FileFormat::from_path(Path::new("a.json")).unwrap(), FileFormat::Json);
        assert!(FileFormat::from_path(Path::new("a.md")).is_err());
        assert!(FileFormat::from_path(Path::new("layout")).is_err());
    }

    #[test]
    fn test_name_falls_back_to_file_stem() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("dvorakish.yaml");
        fs::write(
            &path,
            "layers:\n  - layer: 0\n    actions:\n      - { sequence: [N], text: e }\n",
        )
        .unwrap();

        let layout = parse_layout_file(&path).unwrap();
        assert_eq!(layout.name, "dvorakish");
    }

    #[test]
    fn test_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let err = parse_layout_file(&temp_dir.path().join("nope.yaml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read layout file"));
    }
}
