//! Resolution of a finished gesture into an action and its effect.
//!
//! [`dispatch`] picks the action (layer selection, fallback to the first
//! layer, no-op for unknown sequences) and updates the modifier state.
//! The returned [`Effect`] is then applied to the text-input collaborator
//! with [`Effect::apply`]; keeping the two apart lets the decision be tested
//! without a sink.

use serde::Serialize;
use tracing::{debug, warn};

use crate::decoder::modifier::ModifierState;
use crate::models::{
    ActionMap, CustomKeycode, KeyboardAction, KeyboardActionType, LayerLevel, MovementSequence,
};
use crate::platform::{
    modifier_meta_for_key, KEYCODE_A, KEYCODE_DPAD_DOWN, KEYCODE_DPAD_LEFT, KEYCODE_DPAD_RIGHT,
    KEYCODE_DPAD_UP, KEYCODE_ENTER, META_CTRL_ON, META_SHIFT_ON,
};
use crate::services::text_input::{EditorInfo, ImeAction, KeypadKind, TextInput};

/// What applying a resolved action does to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    /// Nothing reaches the sink
    Nothing,
    /// Commit text
    CommitText {
        /// Text to commit
        text: String,
    },
    /// Key-down followed by key-up
    SendKey {
        /// Platform key code
        key_code: i32,
        /// Meta state sent with both events
        meta: i32,
    },
    /// Perform the field's editor action in place of an enter key
    EditorAction {
        /// Action to perform
        action: ImeAction,
    },
    /// Delete the selection or one character
    Delete,
    /// Collapse the selection onto its moving end
    CollapseSelection,
    /// Swap the selection's anchor and moving end
    SwapSelectionAnchor,
    /// Show a keypad
    SwitchKeypad {
        /// Keypad to show
        keypad: KeypadKind,
    },
    /// Hand over to the emoticon keyboard
    SwitchToEmoticonKeyboard,
    /// Hide the keyboard
    HideKeyboard,
    /// Modifier state changed; no sink call
    ModifierChanged,
    /// Resolve the next gesture starting from this layer
    LatchLayer {
        /// Layer for the next gesture
        layer: LayerLevel,
    },
}

impl Effect {
    /// Whether this effect only changes modifier or layer state. Such
    /// dispatches keep the transient modifier alive for the next action.
    #[must_use]
    pub const fn is_modifier_toggle(&self) -> bool {
        matches!(self, Effect::ModifierChanged | Effect::LatchLayer { .. })
    }

    /// Applies the effect to the sink.
    ///
    /// `emoticon_keyboard` is the configured input-method id; when it is
    /// missing or not installed the sink falls back to the previous input
    /// method. Latch and modifier effects are the caller's business and do
    /// nothing here.
    pub fn apply(&self, sink: &mut dyn TextInput, emoticon_keyboard: Option<&str>) {
        match self {
            Effect::Nothing | Effect::ModifierChanged | Effect::LatchLayer { .. } => {}
            Effect::CommitText { text } => sink.commit_text(text),
            Effect::SendKey { key_code, meta } => {
                sink.send_key_down(*key_code, *meta);
                sink.send_key_up(*key_code, *meta);
            }
            Effect::EditorAction { action } => sink.perform_editor_action(*action),
            Effect::Delete => sink.delete_selection_or_char(),
            Effect::CollapseSelection => {
                let selection = sink.selection();
                sink.set_selection(selection.end, selection.end);
            }
            Effect::SwapSelectionAnchor => {
                let selection = sink.selection();
                sink.set_selection(selection.end, selection.start);
            }
            Effect::SwitchKeypad { keypad } => sink.switch_keypad(*keypad),
            Effect::SwitchToEmoticonKeyboard => match emoticon_keyboard {
                Some(id) if sink.switch_input_method(id) => {}
                Some(id) => {
                    warn!(
                        id,
                        "emoticon keyboard not installed, switching to previous input method"
                    );
                    sink.switch_to_previous_input_method();
                }
                None => {
                    warn!("no emoticon keyboard configured, switching to previous input method");
                    sink.switch_to_previous_input_method();
                }
            },
            Effect::HideKeyboard => sink.hide_self(),
        }
    }
}

/// Outcome of resolving one gesture.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// Sequence that was looked up (`None` for a gesture that never left the
    /// dead zone)
    pub sequence: Option<MovementSequence>,
    /// Layer consulted first
    pub layer: LayerLevel,
    /// Whether the action came from the first-layer fallback
    pub fell_back: bool,
    /// Resolved action, or the no-op action
    pub action: KeyboardAction,
    /// Effect to apply
    pub effect: Effect,
}

/// Resolves a finished gesture.
///
/// The target layer is `base` escalated by `loops`, clamped to the map's
/// layer count. An empty gesture resolves to the no-op action. Every
/// dispatch except a modifier or layer toggle consumes the transient
/// modifier, including empty and unmapped gestures.
pub fn dispatch(
    map: &ActionMap,
    sequence: Option<&MovementSequence>,
    loops: u8,
    base: LayerLevel,
    editor: &EditorInfo,
    modifiers: &mut ModifierState,
) -> Resolution {
    let layer = base.escalate(loops).clamp_to(map.total_layers());

    let Some(sequence) = sequence else {
        modifiers.clear_transient();
        return Resolution {
            sequence: None,
            layer,
            fell_back: false,
            action: KeyboardAction::no_op(),
            effect: Effect::Nothing,
        };
    };

    let (action, fell_back) = lookup(map, layer, sequence);
    let effect = effect_for(&action, editor, modifiers);
    if !effect.is_modifier_toggle() {
        modifiers.clear_transient();
    }

    debug!(
        %sequence,
        %layer,
        fell_back,
        action = ?action.action_type,
        ?effect,
        "resolved gesture"
    );

    Resolution {
        sequence: Some(sequence.clone()),
        layer,
        fell_back,
        action,
        effect,
    }
}

/// Exact lookup on `layer`, then on the first layer, then no-op.
fn lookup(
    map: &ActionMap,
    layer: LayerLevel,
    sequence: &MovementSequence,
) -> (KeyboardAction, bool) {
    if let Some(action) = map.resolve(layer, sequence) {
        return (action.clone(), false);
    }
    if layer != LayerLevel::FIRST {
        if let Some(action) = map.resolve(LayerLevel::FIRST, sequence) {
            return (action.clone(), true);
        }
    }
    (KeyboardAction::no_op(), false)
}

fn effect_for(
    action: &KeyboardAction,
    editor: &EditorInfo,
    modifiers: &mut ModifierState,
) -> Effect {
    match action.action_type {
        KeyboardActionType::InputText => {
            let text = action.text_for(modifiers.are_characters_capitalized());
            if text.is_empty() {
                Effect::Nothing
            } else {
                Effect::CommitText { text }
            }
        }
        KeyboardActionType::InputKey => input_key_effect(action, editor, modifiers),
        KeyboardActionType::Delete => Effect::Delete,
        KeyboardActionType::MoveCursor => Effect::SendKey {
            key_code: action.key_code,
            meta: action.key_flags,
        },
        KeyboardActionType::CustomKey => custom_effect(action, modifiers),
        KeyboardActionType::SwitchLayer => match u8::try_from(action.key_code) {
            Ok(index) => Effect::LatchLayer {
                layer: LayerLevel::new(index),
            },
            Err(_) => Effect::Nothing,
        },
        KeyboardActionType::NoOp => Effect::Nothing,
    }
}

fn input_key_effect(
    action: &KeyboardAction,
    editor: &EditorInfo,
    modifiers: &mut ModifierState,
) -> Effect {
    if CustomKeycode::is_custom_range(action.key_code) {
        return custom_effect(action, modifiers);
    }
    if let Some(meta) = modifier_meta_for_key(action.key_code) {
        modifiers.add_transient(meta);
        return Effect::ModifierChanged;
    }
    if action.key_code == KEYCODE_ENTER {
        if let Some(ime_action) = editor.enter_action() {
            return Effect::EditorAction { action: ime_action };
        }
    }
    Effect::SendKey {
        key_code: action.key_code,
        meta: modifiers.meta_state() | action.key_flags,
    }
}

fn custom_effect(action: &KeyboardAction, modifiers: &mut ModifierState) -> Effect {
    let Some(code) = action.custom_keycode() else {
        warn!(key_code = action.key_code, "unknown custom key code");
        return Effect::Nothing;
    };

    let extend = |key_code| Effect::SendKey {
        key_code,
        meta: META_SHIFT_ON,
    };
    match code {
        CustomKeycode::MoveCurrentEndPointLeft => extend(KEYCODE_DPAD_LEFT),
        CustomKeycode::MoveCurrentEndPointRight => extend(KEYCODE_DPAD_RIGHT),
        CustomKeycode::MoveCurrentEndPointUp => extend(KEYCODE_DPAD_UP),
        CustomKeycode::MoveCurrentEndPointDown => extend(KEYCODE_DPAD_DOWN),
        CustomKeycode::SelectionStart => Effect::CollapseSelection,
        CustomKeycode::SelectAll => Effect::SendKey {
            key_code: KEYCODE_A,
            meta: META_CTRL_ON,
        },
        CustomKeycode::ToggleSelectionAnchor => Effect::SwapSelectionAnchor,
        CustomKeycode::ShiftToggle => {
            modifiers.toggle_shift();
            Effect::ModifierChanged
        }
        CustomKeycode::SwitchToMainKeypad => Effect::SwitchKeypad {
            keypad: KeypadKind::Main,
        },
        CustomKeycode::SwitchToNumberKeypad => Effect::SwitchKeypad {
            keypad: KeypadKind::Number,
        },
        CustomKeycode::SwitchToSymbolsKeypad => Effect::SwitchKeypad {
            keypad: KeypadKind::Symbols,
        },
        CustomKeycode::SwitchToSelectionKeypad => Effect::SwitchKeypad {
            keypad: KeypadKind::Selection,
        },
        CustomKeycode::SwitchToEmoticonKeyboard => Effect::SwitchToEmoticonKeyboard,
        CustomKeycode::HideKeyboard => Effect::HideKeyboard,
    }
}
