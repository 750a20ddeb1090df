//! Parsed layout data: the collaborator-supplied tree an `ActionMap` is built
//! from.

use serde::{Deserialize, Serialize};

use crate::models::action::{KeyboardAction, KeyboardActionType, LayerLevel};
use crate::models::action_map::LayoutError;
use crate::models::keycode::CustomKeycode;
use crate::models::movement::MovementSequence;

/// A complete layout: display name plus per-layer action tables.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LayoutData {
    /// Human-readable layout name (e.g., "English")
    #[serde(default)]
    pub name: String,
    /// Layer tables
    #[serde(default)]
    pub layers: Vec<LayerData>,
}

/// One layer's movement-sequence → action table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerData {
    /// Which layer these actions belong to
    pub layer: LayerLevel,
    /// Entries in authoring order
    #[serde(default)]
    pub actions: Vec<ActionEntry>,
}

/// One movement sequence and the action it triggers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionEntry {
    /// Movement sequence key
    pub sequence: MovementSequence,
    /// Action kind (defaults to text input, or custom when `custom` is set)
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub action_type: Option<KeyboardActionType>,
    /// Primary text
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub text: String,
    /// Caps-lock text
    #[serde(default, alias = "caps_lock_text", skip_serializing_if = "String::is_empty")]
    pub caps_text: String,
    /// Raw key code
    #[serde(default)]
    pub key_code: i32,
    /// Extra key flags
    #[serde(default)]
    pub key_flags: i32,
    /// Named custom key code; overrides `key_code`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom: Option<CustomKeycode>,
}

impl ActionEntry {
    /// Text entry shorthand.
    pub fn text(sequence: MovementSequence, text: impl Into<String>) -> Self {
        Self {
            sequence,
            action_type: None,
            text: text.into(),
            caps_text: String::new(),
            key_code: 0,
            key_flags: 0,
            custom: None,
        }
    }

    /// Custom action shorthand.
    #[must_use]
    pub fn custom(sequence: MovementSequence, code: CustomKeycode) -> Self {
        Self {
            custom: Some(code),
            ..Self::text(sequence, "")
        }
    }

    /// Converts the entry into the action stored in the map.
    pub fn to_action(&self, layer: LayerLevel) -> Result<KeyboardAction, LayoutError> {
        let (action_type, key_code) = match self.custom {
            Some(code) => (KeyboardActionType::CustomKey, code.key_code()),
            None => (
                self.action_type.unwrap_or(KeyboardActionType::InputText),
                self.key_code,
            ),
        };

        if action_type == KeyboardActionType::CustomKey
            && CustomKeycode::from_key_code(key_code).is_none()
        {
            return Err(LayoutError::InvalidCustomKey {
                sequence: self.sequence.to_string(),
                key_code,
            });
        }

        Ok(KeyboardAction {
            action_type,
            text: self.text.clone(),
            caps_lock_text: self.caps_text.clone(),
            key_code,
            key_flags: self.key_flags,
            layer,
        })
    }
}
