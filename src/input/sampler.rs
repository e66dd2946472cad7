//! Accumulates raw events into per-frame sample images

use glam::Vec2;

use super::bits::BitVector;
use super::edge::Signal;
use super::events::RawEvent;
use super::keyboard::Key;
use super::pointer::PointerSample;

/// Event-source side of the input pipeline
///
/// Holds the "currently down" images for keys and pointer buttons, the last
/// cursor position, the scroll sum and text received since the last frame.
/// Events may arrive any number of times between two updates; the context
/// reads the images and drains the transient parts once per frame.
///
/// Text events are only recorded while text capture is on. Turning capture
/// off drops whatever text is still pending.
#[derive(Debug, Clone)]
pub struct RawSampler {
    keys: BitVector,
    pointer: PointerSample,
    text: String,
    capture_text: bool,
}

impl RawSampler {
    pub fn new() -> Self {
        Self {
            keys: BitVector::new(Key::COUNT),
            pointer: PointerSample::default(),
            text: String::new(),
            capture_text: false,
        }
    }

    /// Folds one event into the sample
    pub fn apply(&mut self, event: &RawEvent) {
        match *event {
            RawEvent::Key { key, pressed } => self.keys.set_to(key.index(), pressed),
            RawEvent::MouseButton { button, pressed } => {
                if pressed {
                    self.pointer.buttons |= button.mask();
                } else {
                    self.pointer.buttons &= !button.mask();
                }
            }
            RawEvent::CursorMoved { x, y } => self.pointer.position = Vec2::new(x, y),
            RawEvent::Scroll { dx, dy } => self.pointer.scroll += Vec2::new(dx, dy),
            RawEvent::Text(c) if self.capture_text => self.text.push(c),
            RawEvent::Text(_) => {}
        }
    }

    pub fn apply_all<'a>(&mut self, events: impl IntoIterator<Item = &'a RawEvent>) {
        for event in events {
            self.apply(event);
        }
    }

    /// Keys currently held down
    pub fn keys(&self) -> &BitVector {
        &self.keys
    }

    pub fn pointer(&self) -> &PointerSample {
        &self.pointer
    }

    /// Pointer sample, for the consumer to take the scroll accumulator
    pub fn pointer_mut(&mut self) -> &mut PointerSample {
        &mut self.pointer
    }

    /// Text received since the last drain
    pub fn pending_text(&self) -> &str {
        &self.text
    }

    /// Drops the pending text but keeps the buffer's allocation
    pub fn clear_text(&mut self) {
        self.text.clear();
    }

    /// Starts or stops recording text events
    pub fn set_text_capture(&mut self, enabled: bool) {
        if !enabled {
            self.text.clear();
        }
        self.capture_text = enabled;
    }

    pub fn is_capturing_text(&self) -> bool {
        self.capture_text
    }

    /// Releases every key and button, for example when the window loses
    /// focus and release events will never arrive
    pub fn release_all(&mut self) {
        self.keys.clear_all();
        self.pointer.buttons = 0;
    }
}

impl Default for RawSampler {
    fn default() -> Self {
        Self::new()
    }
}
