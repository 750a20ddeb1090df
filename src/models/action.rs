//! Keyboard actions and layer levels.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::keycode::CustomKeycode;

/// Maximum number of layers a layout may define.
pub const MAX_LAYERS: u8 = 6;

/// Zero-based ordinal selecting which action table a sequence resolves
/// against.
///
/// Layer `n` is reached by looping `n` times back through the center during
/// one gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerLevel(u8);

impl LayerLevel {
    /// The default layer.
    pub const FIRST: LayerLevel = LayerLevel(0);
    /// One loop.
    pub const SECOND: LayerLevel = LayerLevel(1);
    /// Two loops.
    pub const THIRD: LayerLevel = LayerLevel(2);

    /// Layer at the given zero-based index.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        Self(index)
    }

    /// Zero-based index.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Layer reached after `loops` additional loops from this one.
    #[must_use]
    pub const fn escalate(self, loops: u8) -> Self {
        Self(self.0.saturating_add(loops))
    }

    /// Clamps to the last of `total_layers` layers.
    #[must_use]
    pub fn clamp_to(self, total_layers: usize) -> Self {
        let last = total_layers.saturating_sub(1).min(usize::from(u8::MAX)) as u8;
        Self(self.0.min(last))
    }
}

impl fmt::Display for LayerLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("first"),
            1 => f.write_str("second"),
            2 => f.write_str("third"),
            3 => f.write_str("fourth"),
            4 => f.write_str("fifth"),
            5 => f.write_str("sixth"),
            n => write!(f, "layer {}", u16::from(n) + 1),
        }
    }
}

/// What a resolved action does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyboardActionType {
    /// Commit the action's text (or caps text when capitalized)
    #[default]
    InputText,
    /// Send a raw platform key event; modifier keys become one-shot modifiers
    InputKey,
    /// Delete the selection, or one character before the cursor
    Delete,
    /// Move the cursor by sending the action's DPAD key code
    MoveCursor,
    /// Perform the `CustomKeycode` effect named by the key code
    CustomKey,
    /// Latch the layer given by the key code for the next gesture
    SwitchLayer,
    /// Do nothing
    NoOp,
}

/// A resolved keyboard action.
///
/// Owned by the `ActionMap` and immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct KeyboardAction {
    /// Action kind
    #[serde(rename = "type")]
    pub action_type: KeyboardActionType,
    /// Primary text
    #[serde(default)]
    pub text: String,
    /// Text used while shift or caps is latched; empty means "uppercase `text`"
    #[serde(default)]
    pub caps_lock_text: String,
    /// Raw key code (platform code, custom sentinel, or target layer)
    #[serde(default)]
    pub key_code: i32,
    /// Extra meta bits sent with key events
    #[serde(default)]
    pub key_flags: i32,
    /// Layer this action was defined under
    #[serde(default)]
    pub layer: LayerLevel,
}

impl KeyboardAction {
    /// Explicit no-op.
    #[must_use]
    pub fn no_op() -> Self {
        Self {
            action_type: KeyboardActionType::NoOp,
            ..Self::default()
        }
    }

    /// Text input action.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            action_type: KeyboardActionType::InputText,
            text: text.into(),
            ..Self::default()
        }
    }

    /// Raw key event action.
    #[must_use]
    pub fn key(key_code: i32) -> Self {
        Self {
            action_type: KeyboardActionType::InputKey,
            key_code,
            ..Self::default()
        }
    }

    /// Custom meta action.
    #[must_use]
    pub fn custom(code: CustomKeycode) -> Self {
        Self {
            action_type: KeyboardActionType::CustomKey,
            key_code: code.key_code(),
            ..Self::default()
        }
    }

    /// Delete action.
    #[must_use]
    pub fn delete() -> Self {
        Self {
            action_type: KeyboardActionType::Delete,
            ..Self::default()
        }
    }

    /// Cursor movement by DPAD key.
    #[must_use]
    pub fn move_cursor(dpad_key_code: i32) -> Self {
        Self {
            action_type: KeyboardActionType::MoveCursor,
            key_code: dpad_key_code,
            ..Self::default()
        }
    }

    /// One-shot layer switch.
    #[must_use]
    pub fn switch_layer(target: LayerLevel) -> Self {
        Self {
            action_type: KeyboardActionType::SwitchLayer,
            key_code: target.index() as i32,
            ..Self::default()
        }
    }

    /// Sets the caps-lock variant.
    pub fn with_caps(mut self, caps_lock_text: impl Into<String>) -> Self {
        self.caps_lock_text = caps_lock_text.into();
        self
    }

    /// Sets the defining layer.
    #[must_use]
    pub const fn on_layer(mut self, layer: LayerLevel) -> Self {
        self.layer = layer;
        self
    }

    /// The custom key code, if this action's code is in the custom range.
    #[must_use]
    pub fn custom_keycode(&self) -> Option<CustomKeycode> {
        CustomKeycode::from_key_code(self.key_code)
    }

    /// Text to commit for the current capitalization.
    #[must_use]
    pub fn text_for(&self, capitalized: bool) -> String {
        if !capitalized {
            return self.text.clone();
        }
        if self.caps_lock_text.is_empty() {
            self.text.to_uppercase()
        } else {
            self.caps_lock_text.clone()
        }
    }
}
