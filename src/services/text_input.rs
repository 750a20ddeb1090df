//! Output side of the decoder: the text-input collaborator.
//!
//! The decoder never edits text itself. Resolved actions are applied through
//! the [`TextInput`] trait, which a host implements over its real input
//! connection. [`TextBuffer`] is an in-memory implementation used by the CLI
//! and tests; it records every call it receives.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::platform::{
    has_meta, KEYCODE_A, KEYCODE_DEL, KEYCODE_DPAD_DOWN, KEYCODE_DPAD_LEFT, KEYCODE_DPAD_RIGHT,
    KEYCODE_DPAD_UP, KEYCODE_ENTER, KEYCODE_FORWARD_DEL, KEYCODE_SPACE, KEYCODE_TAB, META_CTRL_ON,
    META_SHIFT_ON,
};

/// Keypads the host can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeypadKind {
    /// Letters
    #[default]
    Main,
    /// Digits
    Number,
    /// Punctuation and symbols
    Symbols,
    /// Selection and cursor editing
    Selection,
}

impl fmt::Display for KeypadKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeypadKind::Main => f.write_str("main"),
            KeypadKind::Number => f.write_str("number"),
            KeypadKind::Symbols => f.write_str("symbols"),
            KeypadKind::Selection => f.write_str("selection"),
        }
    }
}

/// Input class of the field an input session is started for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldClass {
    /// Free text
    #[default]
    Text,
    /// Numeric entry
    Number,
    /// Phone number entry
    Phone,
    /// Date and/or time entry
    DateTime,
}

impl FieldClass {
    /// Keypad shown when a session starts on a field of this class.
    #[must_use]
    pub const fn initial_keypad(self) -> KeypadKind {
        match self {
            FieldClass::Number | FieldClass::Phone | FieldClass::DateTime => KeypadKind::Number,
            FieldClass::Text => KeypadKind::Main,
        }
    }
}

impl FromStr for FieldClass {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(FieldClass::Text),
            "number" => Ok(FieldClass::Number),
            "phone" => Ok(FieldClass::Phone),
            "datetime" | "date_time" | "date" | "time" => Ok(FieldClass::DateTime),
            other => Err(format!("Unknown field class: {other}")),
        }
    }
}

/// Editor action a field advertises for its enter key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImeAction {
    /// No action given
    #[default]
    Unspecified,
    /// Explicitly no action
    None,
    /// Go to the target of the text
    Go,
    /// Run a search
    Search,
    /// Send the text
    Send,
    /// Move to the next field
    Next,
    /// Close the keyboard
    Done,
    /// Move to the previous field
    Previous,
}

impl ImeAction {
    /// Platform `IME_ACTION_*` value.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            ImeAction::Unspecified => 0,
            ImeAction::None => 1,
            ImeAction::Go => 2,
            ImeAction::Search => 3,
            ImeAction::Send => 4,
            ImeAction::Next => 5,
            ImeAction::Done => 6,
            ImeAction::Previous => 7,
        }
    }

    /// Whether the field wants this action performed instead of a newline.
    #[must_use]
    pub const fn is_editor_action(self) -> bool {
        !matches!(self, ImeAction::Unspecified | ImeAction::None)
    }
}

impl fmt::Display for ImeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImeAction::Unspecified => "unspecified",
            ImeAction::None => "none",
            ImeAction::Go => "go",
            ImeAction::Search => "search",
            ImeAction::Send => "send",
            ImeAction::Next => "next",
            ImeAction::Done => "done",
            ImeAction::Previous => "previous",
        };
        f.write_str(name)
    }
}

impl FromStr for ImeAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "unspecified" => Ok(ImeAction::Unspecified),
            "none" => Ok(ImeAction::None),
            "go" => Ok(ImeAction::Go),
            "search" => Ok(ImeAction::Search),
            "send" => Ok(ImeAction::Send),
            "next" => Ok(ImeAction::Next),
            "done" => Ok(ImeAction::Done),
            "previous" => Ok(ImeAction::Previous),
            other => Err(format!("Unknown IME action: {other}")),
        }
    }
}

/// What the host knows about the field an input session starts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EditorInfo {
    /// Input class
    #[serde(default)]
    pub field: FieldClass,
    /// Action advertised for the enter key
    #[serde(default)]
    pub ime_action: ImeAction,
    /// Field asked for a plain enter key even though it advertises an action
    #[serde(default)]
    pub no_enter_action: bool,
}

impl EditorInfo {
    /// Field of the given class without an enter action.
    #[must_use]
    pub const fn new(field: FieldClass) -> Self {
        Self {
            field,
            ime_action: ImeAction::Unspecified,
            no_enter_action: false,
        }
    }

    /// Sets the advertised enter action.
    #[must_use]
    pub const fn with_ime_action(mut self, action: ImeAction, no_enter_action: bool) -> Self {
        self.ime_action = action;
        self.no_enter_action = no_enter_action;
        self
    }

    /// Editor action an enter key should perform, or `None` for a raw enter
    /// key event.
    #[must_use]
    pub const fn enter_action(&self) -> Option<ImeAction> {
        if self.ime_action.is_editor_action() && !self.no_enter_action {
            Some(self.ime_action)
        } else {
            None
        }
    }
}

/// Selection in character offsets. `start` is the anchor, `end` the moving
/// end; `start > end` is a backwards selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Selection {
    /// Anchor
    pub start: usize,
    /// Moving end (the cursor)
    pub end: usize,
}

impl Selection {
    /// Collapsed selection at `offset`.
    #[must_use]
    pub const fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Whether anchor and moving end coincide.
    #[must_use]
    pub const fn is_collapsed(self) -> bool {
        self.start == self.end
    }

    /// Lower and upper bound regardless of direction.
    #[must_use]
    pub fn bounds(self) -> (usize, usize) {
        (self.start.min(self.end), self.start.max(self.end))
    }
}

/// Operations the decoder needs from the host's text field.
pub trait TextInput {
    /// Inserts text, replacing the selection.
    fn commit_text(&mut self, text: &str);

    /// Sends a key-down event with the given meta state.
    fn send_key_down(&mut self, key_code: i32, meta: i32);

    /// Sends a key-up event with the given meta state.
    fn send_key_up(&mut self, key_code: i32, meta: i32);

    /// Deletes the selection, or the character before the cursor.
    fn delete_selection_or_char(&mut self);

    /// Current selection.
    fn selection(&self) -> Selection;

    /// Sets the selection anchor and moving end.
    fn set_selection(&mut self, start: usize, end: usize);

    /// Shows another keypad.
    fn switch_keypad(&mut self, kind: KeypadKind);

    /// Hides the keyboard.
    fn hide_self(&mut self);

    /// Switches to another input method. Returns `false` if it is not
    /// installed.
    fn switch_input_method(&mut self, id: &str) -> bool;

    /// Switches back to whatever input method was active before this one.
    fn switch_to_previous_input_method(&mut self);

    /// Performs the field's editor action (search, send, next, ...).
    fn perform_editor_action(&mut self, action: ImeAction);
}

/// One recorded call on a [`TextBuffer`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SinkEvent {
    /// `commit_text`
    CommitText {
        /// Committed text
        text: String,
    },
    /// `send_key_down`
    KeyDown {
        /// Platform key code
        key_code: i32,
        /// Meta state
        meta: i32,
    },
    /// `send_key_up`
    KeyUp {
        /// Platform key code
        key_code: i32,
        /// Meta state
        meta: i32,
    },
    /// `delete_selection_or_char`
    Delete,
    /// `set_selection`
    SetSelection {
        /// Anchor
        start: usize,
        /// Moving end
        end: usize,
    },
    /// `switch_keypad`
    SwitchKeypad {
        /// Keypad shown
        keypad: KeypadKind,
    },
    /// `hide_self`
    Hide,
    /// `switch_input_method`
    SwitchInputMethod {
        /// Requested id
        id: String,
        /// Whether the switch happened
        switched: bool,
    },
    /// `switch_to_previous_input_method`
    SwitchToPreviousInputMethod,
    /// `perform_editor_action`
    EditorAction {
        /// Action performed
        action: ImeAction,
    },
}

/// In-memory text field.
///
/// Interprets the key events the decoder sends (delete, enter, tab, space,
/// arrows with shift extending the selection, ctrl+A) so that replaying a
/// gesture trace produces the text a real field would show.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TextBuffer {
    text: String,
    selection: Selection,
    keypad: KeypadKind,
    hidden: bool,
    installed_input_methods: Vec<String>,
    active_input_method: Option<String>,
    log: Vec<SinkEvent>,
}

impl TextBuffer {
    /// Empty buffer on the main keypad.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Buffer pre-filled with text, cursor at the end.
    pub fn with_text(text: impl Into<String>) -> Self {
        let text = text.into();
        let len = text.chars().count();
        Self {
            text,
            selection: Selection::caret(len),
            ..Self::default()
        }
    }

    /// Registers an input method the buffer will accept switching to.
    pub fn install_input_method(&mut self, id: impl Into<String>) {
        self.installed_input_methods.push(id.into());
    }

    /// Current contents.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Keypad currently shown.
    #[must_use]
    pub fn keypad(&self) -> KeypadKind {
        self.keypad
    }

    /// Whether `hide_self` was called.
    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Input method switched to, if any.
    #[must_use]
    pub fn active_input_method(&self) -> Option<&str> {
        self.active_input_method.as_deref()
    }

    /// Every call received, in order.
    #[must_use]
    pub fn log(&self) -> &[SinkEvent] {
        &self.log
    }

    /// Committed texts only, in order.
    #[must_use]
    pub fn commits(&self) -> Vec<&str> {
        self.log
            .iter()
            .filter_map(|event| match event {
                SinkEvent::CommitText { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn char_len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.text
            .char_indices()
            .nth(chars)
            .map_or(self.text.len(), |(index, _)| index)
    }

    fn replace_range(&mut self, from: usize, to: usize, with: &str) {
        let start = self.byte_offset(from);
        let end = self.byte_offset(to);
        self.text.replace_range(start..end, with);
        self.selection = Selection::caret(from + with.chars().count());
    }

    fn delete_forward(&mut self) {
        let (lo, hi) = self.selection.bounds();
        if lo != hi {
            self.replace_range(lo, hi, "");
        } else if hi < self.char_len() {
            self.replace_range(lo, hi + 1, "");
        }
    }

    fn line_start(&self, offset: usize) -> usize {
        self.text
            .chars()
            .take(offset)
            .enumerate()
            .filter(|(_, c)| *c == '\n')
            .last()
            .map_or(0, |(index, _)| index + 1)
    }

    fn line_end(&self, offset: usize) -> usize {
        self.text
            .chars()
            .enumerate()
            .skip(offset)
            .find(|(_, c)| *c == '\n')
            .map_or(self.char_len(), |(index, _)| index)
    }

    /// Offset reached by one arrow press from `from`.
    fn arrow_target(&self, key_code: i32, from: usize) -> usize {
        match key_code {
            KEYCODE_DPAD_LEFT => from.saturating_sub(1),
            KEYCODE_DPAD_RIGHT => (from + 1).min(self.char_len()),
            KEYCODE_DPAD_UP => {
                let start = self.line_start(from);
                if start == 0 {
                    return 0;
                }
                let column = from - start;
                let prev_start = self.line_start(start - 1);
                (prev_start + column).min(start - 1)
            }
            KEYCODE_DPAD_DOWN => {
                let end = self.line_end(from);
                if end == self.char_len() {
                    return end;
                }
                let column = from - self.line_start(from);
                let next_start = end + 1;
                (next_start + column).min(self.line_end(next_start))
            }
            _ => from,
        }
    }

    fn apply_key(&mut self, key_code: i32, meta: i32) {
        match key_code {
            KEYCODE_DEL => self.delete_backward(),
            KEYCODE_FORWARD_DEL => self.delete_forward(),
            KEYCODE_ENTER => self.insert("\n"),
            KEYCODE_TAB => self.insert("\t"),
            KEYCODE_SPACE => self.insert(" "),
            KEYCODE_A if has_meta(meta, META_CTRL_ON) => {
                self.selection = Selection {
                    start: 0,
                    end: self.char_len(),
                };
            }
            KEYCODE_DPAD_LEFT | KEYCODE_DPAD_RIGHT | KEYCODE_DPAD_UP | KEYCODE_DPAD_DOWN => {
                let target = self.arrow_target(key_code, self.selection.end);
                self.selection = if has_meta(meta, META_SHIFT_ON) {
                    Selection {
                        start: self.selection.start,
                        end: target,
                    }
                } else {
                    Selection::caret(target)
                };
            }
            _ => {}
        }
    }

    fn insert(&mut self, text: &str) {
        let (lo, hi) = self.selection.bounds();
        self.replace_range(lo, hi, text);
    }

    fn delete_backward(&mut self) {
        let (lo, hi) = self.selection.bounds();
        if lo != hi {
            self.replace_range(lo, hi, "");
        } else if lo > 0 {
            self.replace_range(lo - 1, hi, "");
        }
    }
}

impl TextInput for TextBuffer {
    fn commit_text(&mut self, text: &str) {
        self.log.push(SinkEvent::CommitText {
            text: text.to_string(),
        });
        self.insert(text);
    }

    fn send_key_down(&mut self, key_code: i32, meta: i32) {
        self.log.push(SinkEvent::KeyDown { key_code, meta });
        self.apply_key(key_code, meta);
    }

    fn send_key_up(&mut self, key_code: i32, meta: i32) {
        self.log.push(SinkEvent::KeyUp { key_code, meta });
    }

    fn delete_selection_or_char(&mut self) {
        self.log.push(SinkEvent::Delete);
        self.delete_backward();
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn set_selection(&mut self, start: usize, end: usize) {
        self.log.push(SinkEvent::SetSelection { start, end });
        let len = self.char_len();
        self.selection = Selection {
            start: start.min(len),
            end: end.min(len),
        };
    }

    fn switch_keypad(&mut self, kind: KeypadKind) {
        self.log.push(SinkEvent::SwitchKeypad { keypad: kind });
        self.keypad = kind;
    }

    fn hide_self(&mut self) {
        self.log.push(SinkEvent::Hide);
        self.hidden = true;
    }

    fn switch_input_method(&mut self, id: &str) -> bool {
        let switched = self.installed_input_methods.iter().any(|m| m == id);
        self.log.push(SinkEvent::SwitchInputMethod {
            id: id.to_string(),
            switched,
        });
        if switched {
            self.active_input_method = Some(id.to_string());
        }
        switched
    }

    fn switch_to_previous_input_method(&mut self) {
        self.log.push(SinkEvent::SwitchToPreviousInputMethod);
        self.active_input_method = None;
    }

    fn perform_editor_action(&mut self, action: ImeAction) {
        self.log.push(SinkEvent::EditorAction { action });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commit_replaces_selection() {
        let mut buffer = TextBuffer::with_text("hello");
        buffer.set_selection(1, 4);
        buffer.commit_text("ipp");
        assert_eq!(buffer.text(), "hippo");
        assert_eq!(buffer.selection(), Selection::caret(4));
    }

    #[test]
    fn test_delete_char_and_selection() {
        let mut buffer = TextBuffer::with_text("abc");
        buffer.delete_selection_or_char();
        assert_eq!(buffer.text(), "ab");

        buffer.set_selection(2, 0);
        buffer.delete_selection_or_char();
        assert_eq!(buffer.text(), "");

        buffer.delete_selection_or_char();
        assert_eq!(buffer.text(), "");
    }

    #[test]
    fn test_multibyte_offsets() {
        let mut buffer = TextBuffer::with_text("größe");
        buffer.delete_selection_or_char();
        buffer.set_selection(2, 2);
        buffer.delete_selection_or_char();
        assert_eq!(buffer.text(), "göß", "offsets are characters, not bytes");
    }

    #[test]
    fn test_key_events() {
        let mut buffer = TextBuffer::with_text("ab");
        buffer.send_key_down(KEYCODE_ENTER, 0);
        buffer.send_key_down(KEYCODE_SPACE, 0);
        buffer.send_key_down(KEYCODE_DEL, 0);
        assert_eq!(buffer.text(), "ab\n");

        buffer.send_key_down(KEYCODE_A, META_CTRL_ON);
        assert_eq!(buffer.selection(), Selection { start: 0, end: 3 });
    }

    #[test]
    fn test_arrows_with_shift_extend() {
        let mut buffer = TextBuffer::with_text("abcd");
        buffer.send_key_down(KEYCODE_DPAD_LEFT, META_SHIFT_ON);
        buffer.send_key_down(KEYCODE_DPAD_LEFT, META_SHIFT_ON);
        assert_eq!(buffer.selection(), Selection { start: 4, end: 2 });

        buffer.send_key_down(KEYCODE_DPAD_RIGHT, 0);
        assert_eq!(buffer.selection(), Selection::caret(3));
    }

    #[test]
    fn test_vertical_arrows_keep_column() {
        let mut buffer = TextBuffer::with_text("abc\nde");
        buffer.send_key_down(KEYCODE_DPAD_UP, 0);
        assert_eq!(buffer.selection(), Selection::caret(2));

        buffer.send_key_down(KEYCODE_DPAD_DOWN, 0);
        assert_eq!(buffer.selection(), Selection::caret(6));

        buffer.send_key_down(KEYCODE_DPAD_UP, 0);
        buffer.send_key_down(KEYCODE_DPAD_UP, 0);
        assert_eq!(buffer.selection(), Selection::caret(0));
    }

    #[test]
    fn test_switch_input_method() {
        let mut buffer = TextBuffer::new();
        assert!(!buffer.switch_input_method("emoji"));
        assert_eq!(buffer.active_input_method(), None);

        buffer.install_input_method("emoji");
        assert!(buffer.switch_input_method("emoji"));
        assert_eq!(buffer.active_input_method(), Some("emoji"));
    }

    #[test]
    fn test_log_records_calls() {
        let mut buffer = TextBuffer::new();
        buffer.commit_text("e");
        buffer.switch_keypad(KeypadKind::Symbols);
        buffer.hide_self();
        assert_eq!(
            buffer.log(),
            &[
                SinkEvent::CommitText {
                    text: "e".to_string()
                },
                SinkEvent::SwitchKeypad {
                    keypad: KeypadKind::Symbols
                },
                SinkEvent::Hide,
            ]
        );
        assert_eq!(buffer.commits(), vec!["e"]);
        assert!(buffer.is_hidden());
        assert_eq!(buffer.keypad(), KeypadKind::Symbols);
    }

    #[test]
    fn test_field_class_keypad() {
        assert_eq!(FieldClass::Phone.initial_keypad(), KeypadKind::Number);
        assert_eq!(FieldClass::Text.initial_keypad(), KeypadKind::Main);
        assert_eq!("date".parse::<FieldClass>(), Ok(FieldClass::DateTime));
    }

    #[test]
    fn test_enter_action_needs_action_and_no_flag() {
        let editor = EditorInfo::new(FieldClass::Text);
        assert_eq!(editor.enter_action(), None);

        let search = editor.with_ime_action(ImeAction::Search, false);
        assert_eq!(search.enter_action(), Some(ImeAction::Search));

        let flagged = editor.with_ime_action(ImeAction::Search, true);
        assert_eq!(flagged.enter_action(), None);

        let none = editor.with_ime_action(ImeAction::None, false);
        assert_eq!(none.enter_action(), None);
    }

    #[test]
    fn test_ime_action_codes_and_names() {
        assert_eq!(ImeAction::Go.code(), 2);
        assert_eq!(ImeAction::Previous.code(), 7);
        assert_eq!("Send".parse::<ImeAction>(), Ok(ImeAction::Send));
        assert_eq!(ImeAction::Next.to_string(), "next");
        assert!("enter".parse::<ImeAction>().is_err());
    }

    #[test]
    fn test_editor_action_is_logged() {
        let mut buffer = TextBuffer::with_text("query");
        buffer.perform_editor_action(ImeAction::Search);
        assert_eq!(
            buffer.log(),
            &[SinkEvent::EditorAction {
                action: ImeAction::Search
            }]
        );
        assert_eq!(buffer.text(), "query", "editor actions do not edit text");
    }
}
