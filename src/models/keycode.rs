//! Custom meta-action key codes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Meta actions encoded as negative key codes.
///
/// Platform key codes are never negative, so the two ranges cannot collide.
/// Conversion from the raw value is an exhaustive match; there is no runtime
/// lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CustomKeycode {
    /// Extend the selection one character left
    MoveCurrentEndPointLeft,
    /// Extend the selection one character right
    MoveCurrentEndPointRight,
    /// Extend the selection one line up
    MoveCurrentEndPointUp,
    /// Extend the selection one line down
    MoveCurrentEndPointDown,
    /// Anchor a new, empty selection at the moving end
    SelectionStart,
    /// Select the whole field
    SelectAll,
    /// Swap the selection anchor and moving end
    ToggleSelectionAnchor,
    /// Cycle shift latch: off -> shift -> caps -> off
    ShiftToggle,
    /// Show the main letter keypad
    SwitchToMainKeypad,
    /// Show the number keypad
    SwitchToNumberKeypad,
    /// Show the symbols keypad
    SwitchToSymbolsKeypad,
    /// Show the selection keypad
    SwitchToSelectionKeypad,
    /// Hand over to the configured emoticon keyboard
    SwitchToEmoticonKeyboard,
    /// Hide the keyboard
    HideKeyboard,
}

impl CustomKeycode {
    /// Every custom key code, in sentinel order (-1, -2, ...).
    pub const ALL: [CustomKeycode; 14] = [
        CustomKeycode::MoveCurrentEndPointLeft,
        CustomKeycode::MoveCurrentEndPointRight,
        CustomKeycode::MoveCurrentEndPointUp,
        CustomKeycode::MoveCurrentEndPointDown,
        CustomKeycode::SelectionStart,
        CustomKeycode::SelectAll,
        CustomKeycode::ToggleSelectionAnchor,
        CustomKeycode::ShiftToggle,
        CustomKeycode::SwitchToMainKeypad,
        CustomKeycode::SwitchToNumberKeypad,
        CustomKeycode::SwitchToSymbolsKeypad,
        CustomKeycode::SwitchToSelectionKeypad,
        CustomKeycode::SwitchToEmoticonKeyboard,
        CustomKeycode::HideKeyboard,
    ];

    /// The negative sentinel value.
    #[must_use]
    pub const fn key_code(self) -> i32 {
        match self {
            CustomKeycode::MoveCurrentEndPointLeft => -1,
            CustomKeycode::MoveCurrentEndPointRight => -2,
            CustomKeycode::MoveCurrentEndPointUp => -3,
            CustomKeycode::MoveCurrentEndPointDown => -4,
            CustomKeycode::SelectionStart => -5,
            CustomKeycode::SelectAll => -6,
            CustomKeycode::ToggleSelectionAnchor => -7,
            CustomKeycode::ShiftToggle => -8,
            CustomKeycode::SwitchToMainKeypad => -9,
            CustomKeycode::SwitchToNumberKeypad => -10,
            CustomKeycode::SwitchToSymbolsKeypad => -11,
            CustomKeycode::SwitchToSelectionKeypad => -12,
            CustomKeycode::SwitchToEmoticonKeyboard => -13,
            CustomKeycode::HideKeyboard => -14,
        }
    }

    /// Parses a raw key code; `None` for anything outside the custom range.
    #[must_use]
    pub const fn from_key_code(value: i32) -> Option<Self> {
        let code = match value {
            -1 => CustomKeycode::MoveCurrentEndPointLeft,
            -2 => CustomKeycode::MoveCurrentEndPointRight,
            -3 => CustomKeycode::MoveCurrentEndPointUp,
            -4 => CustomKeycode::MoveCurrentEndPointDown,
            -5 => CustomKeycode::SelectionStart,
            -6 => CustomKeycode::SelectAll,
            -7 => CustomKeycode::ToggleSelectionAnchor,
            -8 => CustomKeycode::ShiftToggle,
            -9 => CustomKeycode::SwitchToMainKeypad,
            -10 => CustomKeycode::SwitchToNumberKeypad,
            -11 => CustomKeycode::SwitchToSymbolsKeypad,
            -12 => CustomKeycode::SwitchToSelectionKeypad,
            -13 => CustomKeycode::SwitchToEmoticonKeyboard,
            -14 => CustomKeycode::HideKeyboard,
            _ => return None,
        };
        Some(code)
    }

    /// Whether a raw key code lies in the custom (negative) range.
    #[must_use]
    pub const fn is_custom_range(value: i32) -> bool {
        value < 0
    }
}

impl TryFrom<i32> for CustomKeycode {
    type Error = i32;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::from_key_code(value).ok_or(value)
    }
}

impl From<CustomKeycode> for i32 {
    fn from(code: CustomKeycode) -> Self {
        code.key_code()
    }
}

impl fmt::Display for CustomKeycode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CustomKeycode::MoveCurrentEndPointLeft => "MOVE_CURRENT_END_POINT_LEFT",
            CustomKeycode::MoveCurrentEndPointRight => "MOVE_CURRENT_END_POINT_RIGHT",
            CustomKeycode::MoveCurrentEndPointUp => "MOVE_CURRENT_END_POINT_UP",
            CustomKeycode::MoveCurrentEndPointDown => "MOVE_CURRENT_END_POINT_DOWN",
            CustomKeycode::SelectionStart => "SELECTION_START",
            CustomKeycode::SelectAll => "SELECT_ALL",
            CustomKeycode::ToggleSelectionAnchor => "TOGGLE_SELECTION_ANCHOR",
            CustomKeycode::ShiftToggle => "SHIFT_TOGGLE",
            CustomKeycode::SwitchToMainKeypad => "SWITCH_TO_MAIN_KEYPAD",
            CustomKeycode::SwitchToNumberKeypad => "SWITCH_TO_NUMBER_KEYPAD",
            CustomKeycode::SwitchToSymbolsKeypad => "SWITCH_TO_SYMBOLS_KEYPAD",
            CustomKeycode::SwitchToSelectionKeypad => "SWITCH_TO_SELECTION_KEYPAD",
            CustomKeycode::SwitchToEmoticonKeyboard => "SWITCH_TO_EMOTICON_KEYBOARD",
            CustomKeycode::HideKeyboard => "HIDE_KEYBOARD",
        };
        f.write_str(name)
    }
}
