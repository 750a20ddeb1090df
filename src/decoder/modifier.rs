//! Shift/caps latches and the transient per-action modifier.

use serde::{Deserialize, Serialize};

use crate::platform::{META_CAPS_LOCK_ON, META_SHIFT_ON};

/// Session-scoped modifier state.
///
/// The two latches persist across actions until toggled; the transient meta
/// bits (one-shot ctrl/alt) apply to the next dispatched action only. The
/// shift-toggle cycle keeps at most one latch active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ModifierState {
    shift_latched: bool,
    caps_latched: bool,
    #[serde(default)]
    transient_meta: i32,
}

impl ModifierState {
    /// Neither latch active, no transient modifier.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            shift_latched: false,
            caps_latched: false,
            transient_meta: 0,
        }
    }

    /// State with explicit latches, as restored by a host.
    #[must_use]
    pub const fn with_latches(shift_latched: bool, caps_latched: bool) -> Self {
        Self {
            shift_latched,
            caps_latched,
            transient_meta: 0,
        }
    }

    /// Whether the shift latch is active.
    #[must_use]
    pub const fn is_shift_latched(&self) -> bool {
        self.shift_latched
    }

    /// Whether the caps latch is active.
    #[must_use]
    pub const fn is_caps_latched(&self) -> bool {
        self.caps_latched
    }

    /// True while either latch is active.
    #[must_use]
    pub const fn are_characters_capitalized(&self) -> bool {
        self.shift_latched || self.caps_latched
    }

    /// Advances the latch cycle: off -> shift -> caps -> off.
    pub fn toggle_shift(&mut self) {
        (self.shift_latched, self.caps_latched) = match (self.shift_latched, self.caps_latched) {
            (false, false) => (true, false),
            (true, false) => (false, true),
            // Caps, or both set by a host restore
            (_, true) => (false, false),
        };
    }

    /// Pending one-shot meta bits.
    #[must_use]
    pub const fn transient_meta(&self) -> i32 {
        self.transient_meta
    }

    /// ORs one-shot meta bits into the transient modifier.
    pub fn add_transient(&mut self, meta: i32) {
        self.transient_meta |= meta;
    }

    /// Drops the transient modifier after a dispatched action.
    pub fn clear_transient(&mut self) {
        self.transient_meta = 0;
    }

    /// Clears everything; called on input-session start.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Platform meta bits for a key event sent in this state.
    #[must_use]
    pub const fn meta_state(&self) -> i32 {
        let mut meta = self.transient_meta;
        if self.shift_latched {
            meta |= META_SHIFT_ON;
        }
        if self.caps_latched {
            meta |= META_CAPS_LOCK_ON;
        }
        meta
    }
}
