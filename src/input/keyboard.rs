//! Keyboard key state and text capture

use tracing::debug;

use super::bits::BitVector;
use super::edge::{ButtonState, EdgeTracker, Signal};
use crate::error::InputError;

/// Key code in the GLFW numbering (`0..=348`)
///
/// Codes between the named constants are unused by most layouts but still
/// tracked, so the universe stays a dense range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Key(pub u16);

impl Key {
    pub const SPACE: Key = Key(32);
    pub const APOSTROPHE: Key = Key(39);
    pub const COMMA: Key = Key(44);
    pub const MINUS: Key = Key(45);
    pub const PERIOD: Key = Key(46);
    pub const SLASH: Key = Key(47);
    pub const NUM_0: Key = Key(48);
    pub const NUM_1: Key = Key(49);
    pub const NUM_2: Key = Key(50);
    pub const NUM_3: Key = Key(51);
    pub const NUM_4: Key = Key(52);
    pub const NUM_5: Key = Key(53);
    pub const NUM_6: Key = Key(54);
    pub const NUM_7: Key = Key(55);
    pub const NUM_8: Key = Key(56);
    pub const NUM_9: Key = Key(57);
    pub const SEMICOLON: Key = Key(59);
    pub const EQUAL: Key = Key(61);
    pub const A: Key = Key(65);
    pub const B: Key = Key(66);
    pub const C: Key = Key(67);
    pub const D: Key = Key(68);
    pub const E: Key = Key(69);
    pub const F: Key = Key(70);
    pub const G: Key = Key(71);
    pub const H: Key = Key(72);
    pub const I: Key = Key(73);
    pub const J: Key = Key(74);
    pub const K: Key = Key(75);
    pub const L: Key = Key(76);
    pub const M: Key = Key(77);
    pub const N: Key = Key(78);
    pub const O: Key = Key(79);
    pub const P: Key = Key(80);
    pub const Q: Key = Key(81);
    pub const R: Key = Key(82);
    pub const S: Key = Key(83);
    pub const T: Key = Key(84);
    pub const U: Key = Key(85);
    pub const V: Key = Key(86);
    pub const W: Key = Key(87);
    pub const X: Key = Key(88);
    pub const Y: Key = Key(89);
    pub const Z: Key = Key(90);
    pub const LEFT_BRACKET: Key = Key(91);
    pub const BACKSLASH: Key = Key(92);
    pub const RIGHT_BRACKET: Key = Key(93);
    pub const GRAVE_ACCENT: Key = Key(96);

    pub const ESCAPE: Key = Key(256);
    pub const ENTER: Key = Key(257);
    pub const TAB: Key = Key(258);
    pub const BACKSPACE: Key = Key(259);
    pub const INSERT: Key = Key(260);
    pub const DELETE: Key = Key(261);
    pub const RIGHT: Key = Key(262);
    pub const LEFT: Key = Key(263);
    pub const DOWN: Key = Key(264);
    pub const UP: Key = Key(265);
    pub const PAGE_UP: Key = Key(266);
    pub const PAGE_DOWN: Key = Key(267);
    pub const HOME: Key = Key(268);
    pub const END: Key = Key(269);
    pub const CAPS_LOCK: Key = Key(280);
    pub const SCROLL_LOCK: Key = Key(281);
    pub const NUM_LOCK: Key = Key(282);
    pub const PRINT_SCREEN: Key = Key(283);
    pub const PAUSE: Key = Key(284);

    /// F1; F2..F25 follow consecutively
    pub const F1: Key = Key(290);
    pub const F12: Key = Key(301);
    pub const F25: Key = Key(314);

    /// Keypad 0; keypad 1..9 follow consecutively
    pub const KP_0: Key = Key(320);
    pub const KP_DECIMAL: Key = Key(330);
    pub const KP_DIVIDE: Key = Key(331);
    pub const KP_MULTIPLY: Key = Key(332);
    pub const KP_SUBTRACT: Key = Key(333);
    pub const KP_ADD: Key = Key(334);
    pub const KP_ENTER: Key = Key(335);
    pub const KP_EQUAL: Key = Key(336);

    pub const LEFT_SHIFT: Key = Key(340);
    pub const LEFT_CONTROL: Key = Key(341);
    pub const LEFT_ALT: Key = Key(342);
    pub const LEFT_SUPER: Key = Key(343);
    pub const RIGHT_SHIFT: Key = Key(344);
    pub const RIGHT_CONTROL: Key = Key(345);
    pub const RIGHT_ALT: Key = Key(346);
    pub const RIGHT_SUPER: Key = Key(347);
    pub const MENU: Key = Key(348);

    /// Function key `F{n}` for `n` in `1..=25`
    pub const fn function(n: u16) -> Key {
        Key(Self::F1.0 + n - 1)
    }

    /// Keypad digit key
    pub const fn keypad(digit: u16) -> Key {
        Key(Self::KP_0.0 + digit)
    }

    /// Returns the key when `code` is inside the key universe
    pub fn new(code: u16) -> Option<Key> {
        Self::from_index(code as usize)
    }
}

impl Signal for Key {
    const COUNT: usize = 349;

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    fn from_index(index: usize) -> Option<Self> {
        (index < Self::COUNT).then(|| Key(index as u16))
    }
}

/// Keyboard state for the current frame plus the text capture buffer
///
/// Key state and text capture are independent: the key queries work the same
/// whether or not text is being captured.
#[derive(Debug)]
pub struct KeyboardState {
    keys: EdgeTracker<Key>,
    text: String,
    capture_text: bool,
    bound: bool,
}

impl KeyboardState {
    pub fn new() -> Self {
        Self {
            keys: EdgeTracker::new(),
            text: String::new(),
            capture_text: false,
            bound: false,
        }
    }

    /// Attaches the keyboard to a live session. Called by the input context
    /// on init.
    pub fn bind(&mut self) {
        self.bound = true;
    }

    /// Detaches from the session, dropping key state and pending text
    pub fn unbind(&mut self) {
        self.bound = false;
        self.capture_text = false;
        self.text.clear();
        self.keys.reset();
    }

    pub fn is_bound(&self) -> bool {
        self.bound
    }

    /// Advances one frame from the sampled "keys currently down" image
    pub fn update(&mut self, keys_down: &BitVector) {
        self.keys.tick(keys_down);
    }

    /// Returns `true` if the key is currently held down.
    pub fn pressed(&self, key: Key) -> bool {
        self.keys.is_active(key)
    }

    /// Returns `true` if the key was pressed this frame.
    pub fn just_pressed(&self, key: Key) -> bool {
        self.keys.just_activated(key)
    }

    /// Returns `true` if the key was released this frame.
    pub fn just_released(&self, key: Key) -> bool {
        self.keys.just_deactivated(key)
    }

    pub fn state(&self, key: Key) -> ButtonState {
        self.keys.state(key)
    }

    pub fn any_pressed(&self) -> bool {
        self.keys.any_active()
    }

    /// All keys currently held, ascending
    pub fn pressed_keys(&self) -> Vec<Key> {
        self.keys.active().collect()
    }

    /// Keys pressed this frame, ascending
    pub fn just_pressed_keys(&self) -> Vec<Key> {
        self.keys.activated().collect()
    }

    /// Keys released this frame, ascending
    pub fn just_released_keys(&self) -> Vec<Key> {
        self.keys.deactivated().collect()
    }

    /// Allocation-free form of [`pressed_keys`](Self::pressed_keys)
    pub fn pressed_keys_into(&self, dst: &mut [Key]) -> usize {
        self.keys.active_into(dst)
    }

    /// Allocation-free form of [`just_pressed_keys`](Self::just_pressed_keys)
    pub fn just_pressed_keys_into(&self, dst: &mut [Key]) -> usize {
        self.keys.activated_into(dst)
    }

    /// Allocation-free form of [`just_released_keys`](Self::just_released_keys)
    pub fn just_released_keys_into(&self, dst: &mut [Key]) -> usize {
        self.keys.deactivated_into(dst)
    }

    /// Underlying tracker, for iterator access to the bulk queries
    pub fn tracker(&self) -> &EdgeTracker<Key> {
        &self.keys
    }

    /// Enables or disables text capture.
    ///
    /// Disabling drops any text not yet read. Fails when the keyboard is not
    /// bound to a session. Hosts toggle capture through
    /// [`InputContext::set_text_capture`](super::InputContext::set_text_capture)
    /// so the event side drops its pending text too.
    pub(crate) fn set_text_capture(&mut self, enabled: bool) -> Result<(), InputError> {
        if !self.bound {
            return Err(InputError::NotInitialized {
                operation: "set_text_capture",
            });
        }

        if !enabled {
            self.text.clear();
        }
        if self.capture_text != enabled {
            debug!(enabled, "Text capture toggled");
        }
        self.capture_text = enabled;
        Ok(())
    }

    pub fn is_capturing_text(&self) -> bool {
        self.capture_text
    }

    /// Appends one character if text capture is enabled
    pub fn receive_char(&mut self, c: char) {
        if self.capture_text {
            self.text.push(c);
        }
    }

    /// Appends text if text capture is enabled
    pub fn receive_text(&mut self, text: &str) {
        if self.capture_text {
            self.text.push_str(text);
        }
    }

    /// Consumes the captured text. A second call without new input returns
    /// an empty string.
    pub fn read_text(&mut self) -> String {
        std::mem::take(&mut self.text)
    }

    /// Captured text not yet consumed
    pub fn pending_text(&self) -> &str {
        &self.text
    }
}

impl Default for KeyboardState {
    fn default() -> Self {
        Self::new()
    }
}
