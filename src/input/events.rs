//! Discrete device events delivered by the platform

use super::keyboard::Key;
use super::pointer::MouseButton;

/// One raw input notification, as produced by a window event source
///
/// Events only describe what happened. They become visible to queries once a
/// [`RawSampler`](super::sampler::RawSampler) has folded them into a sample
/// and the context has run its next update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    /// Key went down or up
    Key { key: Key, pressed: bool },

    /// Pointer button went down or up
    MouseButton { button: MouseButton, pressed: bool },

    /// Absolute cursor position
    CursorMoved { x: f32, y: f32 },

    /// Wheel or touchpad scroll, in pixels
    Scroll { dx: f32, dy: f32 },

    /// One committed text character
    Text(char),
}

impl RawEvent {
    /// Key event from a raw code, `None` outside the key universe
    pub fn key(code: u16, pressed: bool) -> Option<Self> {
        Key::new(code).map(|key| Self::Key { key, pressed })
    }

    /// Button event from a raw code, `None` outside the button universe
    pub fn mouse_button(code: u8, pressed: bool) -> Option<Self> {
        MouseButton::new(code).map(|button| Self::MouseButton { button, pressed })
    }
}
