//! Host platform key-event encoding.
//!
//! Key codes and meta-state bits use the Android `KeyEvent` numbering so that
//! resolved actions can be injected unchanged by an Android host. Nothing in
//! the decoder interprets these values beyond the constants named here; the
//! abstract modifier state is translated to meta bits only at the sink
//! boundary.

/// Tab key.
pub const KEYCODE_TAB: i32 = 61;
/// Enter key.
pub const KEYCODE_ENTER: i32 = 66;
/// Backspace.
pub const KEYCODE_DEL: i32 = 67;
/// Forward delete.
pub const KEYCODE_FORWARD_DEL: i32 = 112;
/// Space bar.
pub const KEYCODE_SPACE: i32 = 62;
/// Letter A (used with ctrl for select-all).
pub const KEYCODE_A: i32 = 29;

/// Directional pad up.
pub const KEYCODE_DPAD_UP: i32 = 19;
/// Directional pad down.
pub const KEYCODE_DPAD_DOWN: i32 = 20;
/// Directional pad left.
pub const KEYCODE_DPAD_LEFT: i32 = 21;
/// Directional pad right.
pub const KEYCODE_DPAD_RIGHT: i32 = 22;

/// Left alt modifier key.
pub const KEYCODE_ALT_LEFT: i32 = 57;
/// Right alt modifier key.
pub const KEYCODE_ALT_RIGHT: i32 = 58;
/// Left ctrl modifier key.
pub const KEYCODE_CTRL_LEFT: i32 = 113;
/// Right ctrl modifier key.
pub const KEYCODE_CTRL_RIGHT: i32 = 114;

/// Shift is pressed.
pub const META_SHIFT_ON: i32 = 0x1;
/// Alt is pressed.
pub const META_ALT_ON: i32 = 0x02;
/// Ctrl is pressed.
pub const META_CTRL_ON: i32 = 0x1000;
/// Caps lock is on.
pub const META_CAPS_LOCK_ON: i32 = 0x0010_0000;

/// Meta bit a modifier key contributes when used as a one-shot modifier.
#[must_use]
pub const fn modifier_meta_for_key(key_code: i32) -> Option<i32> {
    match key_code {
        KEYCODE_CTRL_LEFT | KEYCODE_CTRL_RIGHT => Some(META_CTRL_ON),
        KEYCODE_ALT_LEFT | KEYCODE_ALT_RIGHT => Some(META_ALT_ON),
        _ => None,
    }
}

/// Whether `meta` has every bit of `flag` set.
#[must_use]
pub const fn has_meta(meta: i32, flag: i32) -> bool {
    meta & flag == flag
}
