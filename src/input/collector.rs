//! Raw input collection from winit events

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, Ime, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use super::events::RawEvent;
use super::keyboard::Key;
use super::pointer::MouseButton;
use super::sampler::RawSampler;
use crate::config::PointerConfig;

/// Conversion settings for window events
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollectorSettings {
    /// Pixels per scroll line for wheels that report line deltas
    pub scroll_line_pixels: f32,
    /// Window DPI scale factor
    pub scale_factor: f64,
    /// Report cursor positions in logical rather than physical pixels
    pub logical: bool,
}

impl CollectorSettings {
    pub fn from_config(pointer: &PointerConfig) -> Self {
        Self {
            scroll_line_pixels: pointer.scroll_line_pixels,
            logical: pointer.logical_coordinates,
            ..Self::default()
        }
    }
}

impl Default for CollectorSettings {
    fn default() -> Self {
        Self {
            scroll_line_pixels: 20.0,
            scale_factor: 1.0,
            logical: true,
        }
    }
}

/// Translates one window event into raw input events, passing each to `emit`.
///
/// A key press may yield a key event followed by its committed text. Events
/// that carry no input, or codes outside the signal universes, emit nothing.
pub fn translate(event: &WindowEvent, settings: &CollectorSettings, mut emit: impl FnMut(RawEvent)) {
    match event {
        WindowEvent::KeyboardInput { event, .. } => {
            let pressed = event.state == ElementState::Pressed;
            if let PhysicalKey::Code(code) = event.physical_key
                && let Some(key) = key_from_code(code)
            {
                emit(RawEvent::Key { key, pressed });
            }
            if pressed && let Some(text) = &event.text {
                text.chars()
                    .filter(|c| !c.is_control())
                    .for_each(|c| emit(RawEvent::Text(c)));
            }
        }

        WindowEvent::Ime(Ime::Commit(text)) => {
            text.chars().for_each(|c| emit(RawEvent::Text(c)));
        }

        WindowEvent::MouseInput { state, button, .. } => {
            if let Some(button) = button_from_winit(*button) {
                emit(RawEvent::MouseButton {
                    button,
                    pressed: *state == ElementState::Pressed,
                });
            }
        }

        WindowEvent::CursorMoved { position, .. } => {
            let (x, y) = cursor_position(*position, settings);
            emit(RawEvent::CursorMoved { x, y });
        }

        WindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy) = scroll_pixels(*delta, settings);
            emit(RawEvent::Scroll { dx, dy });
        }

        _ => {}
    }
}

/// Cursor position in the configured coordinate space
pub fn cursor_position(position: PhysicalPosition<f64>, settings: &CollectorSettings) -> (f32, f32) {
    if settings.logical {
        let logical = position.to_logical::<f64>(settings.scale_factor);
        (logical.x as f32, logical.y as f32)
    } else {
        (position.x as f32, position.y as f32)
    }
}

/// Converts a wheel delta to consistent pixel units
pub fn scroll_pixels(delta: MouseScrollDelta, settings: &CollectorSettings) -> (f32, f32) {
    match delta {
        MouseScrollDelta::LineDelta(x, y) => {
            (x * settings.scroll_line_pixels, y * settings.scroll_line_pixels)
        }
        MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
    }
}

pub fn button_from_winit(button: winit::event::MouseButton) -> Option<MouseButton> {
    use winit::event::MouseButton as WB;
    match button {
        WB::Left => Some(MouseButton::LEFT),
        WB::Right => Some(MouseButton::RIGHT),
        WB::Middle => Some(MouseButton::MIDDLE),
        WB::Back => Some(MouseButton::BACK),
        WB::Forward => Some(MouseButton::FORWARD),
        WB::Other(code) => MouseButton::new(u8::try_from(code).ok()?),
    }
}

/// Maps a physical key to its key code. Keys without a code return `None`.
pub fn key_from_code(code: KeyCode) -> Option<Key> {
    use winit::keyboard::KeyCode as WK;
    let key = match code {
        WK::Space => Key::SPACE,
        WK::Quote => Key::APOSTROPHE,
        WK::Comma => Key::COMMA,
        WK::Minus => Key::MINUS,
        WK::Period => Key::PERIOD,
        WK::Slash => Key::SLASH,
        WK::Semicolon => Key::SEMICOLON,
        WK::Equal => Key::EQUAL,
        WK::BracketLeft => Key::LEFT_BRACKET,
        WK::Backslash => Key::BACKSLASH,
        WK::BracketRight => Key::RIGHT_BRACKET,
        WK::Backquote => Key::GRAVE_ACCENT,

        WK::Digit0 => Key::NUM_0,
        WK::Digit1 => Key::NUM_1,
        WK::Digit2 => Key::NUM_2,
        WK::Digit3 => Key::NUM_3,
        WK::Digit4 => Key::NUM_4,
        WK::Digit5 => Key::NUM_5,
        WK::Digit6 => Key::NUM_6,
        WK::Digit7 => Key::NUM_7,
        WK::Digit8 => Key::NUM_8,
        WK::Digit9 => Key::NUM_9,

        WK::KeyA => Key::A,
        WK::KeyB => Key::B,
        WK::KeyC => Key::C,
        WK::KeyD => Key::D,
        WK::KeyE => Key::E,
        WK::KeyF => Key::F,
        WK::KeyG => Key::G,
        WK::KeyH => Key::H,
        WK::KeyI => Key::I,
        WK::KeyJ => Key::J,
        WK::KeyK => Key::K,
        WK::KeyL => Key::L,
        WK::KeyM => Key::M,
        WK::KeyN => Key::N,
        WK::KeyO => Key::O,
        WK::KeyP => Key::P,
        WK::KeyQ => Key::Q,
        WK::KeyR => Key::R,
        WK::KeyS => Key::S,
        WK::KeyT => Key::T,
        WK::KeyU => Key::U,
        WK::KeyV => Key::V,
        WK::KeyW => Key::W,
        WK::KeyX => Key::X,
        WK::KeyY => Key::Y,
        WK::KeyZ => Key::Z,

        WK::Escape => Key::ESCAPE,
        WK::Enter => Key::ENTER,
        WK::Tab => Key::TAB,
        WK::Backspace => Key::BACKSPACE,
        WK::Insert => Key::INSERT,
        WK::Delete => Key::DELETE,
        WK::ArrowRight => Key::RIGHT,
        WK::ArrowLeft => Key::LEFT,
        WK::ArrowDown => Key::DOWN,
        WK::ArrowUp => Key::UP,
        WK::PageUp => Key::PAGE_UP,
        WK::PageDown => Key::PAGE_DOWN,
        WK::Home => Key::HOME,
        WK::End => Key::END,
        WK::CapsLock => Key::CAPS_LOCK,
        WK::ScrollLock => Key::SCROLL_LOCK,
        WK::NumLock => Key::NUM_LOCK,
        WK::PrintScreen => Key::PRINT_SCREEN,
        WK::Pause => Key::PAUSE,

        WK::F1 => Key::function(1),
        WK::F2 => Key::function(2),
        WK::F3 => Key::function(3),
        WK::F4 => Key::function(4),
        WK::F5 => Key::function(5),
        WK::F6 => Key::function(6),
        WK::F7 => Key::function(7),
        WK::F8 => Key::function(8),
        WK::F9 => Key::function(9),
        WK::F10 => Key::function(10),
        WK::F11 => Key::function(11),
        WK::F12 => Key::function(12),
        WK::F13 => Key::function(13),
        WK::F14 => Key::function(14),
        WK::F15 => Key::function(15),
        WK::F16 => Key::function(16),
        WK::F17 => Key::function(17),
        WK::F18 => Key::function(18),
        WK::F19 => Key::function(19),
        WK::F20 => Key::function(20),
        WK::F21 => Key::function(21),
        WK::F22 => Key::function(22),
        WK::F23 => Key::function(23),
        WK::F24 => Key::function(24),
        WK::F25 => Key::function(25),

        WK::Numpad0 => Key::keypad(0),
        WK::Numpad1 => Key::keypad(1),
        WK::Numpad2 => Key::keypad(2),
        WK::Numpad3 => Key::keypad(3),
        WK::Numpad4 => Key::keypad(4),
        WK::Numpad5 => Key::keypad(5),
        WK::Numpad6 => Key::keypad(6),
        WK::Numpad7 => Key::keypad(7),
        WK::Numpad8 => Key::keypad(8),
        WK::Numpad9 => Key::keypad(9),
        WK::NumpadDecimal => Key::KP_DECIMAL,
        WK::NumpadDivide => Key::KP_DIVIDE,
        WK::NumpadMultiply => Key::KP_MULTIPLY,
        WK::NumpadSubtract => Key::KP_SUBTRACT,
        WK::NumpadAdd => Key::KP_ADD,
        WK::NumpadEnter => Key::KP_ENTER,
        WK::NumpadEqual => Key::KP_EQUAL,

        WK::ShiftLeft => Key::LEFT_SHIFT,
        WK::ControlLeft => Key::LEFT_CONTROL,
        WK::AltLeft => Key::LEFT_ALT,
        WK::SuperLeft => Key::LEFT_SUPER,
        WK::ShiftRight => Key::RIGHT_SHIFT,
        WK::ControlRight => Key::RIGHT_CONTROL,
        WK::AltRight => Key::RIGHT_ALT,
        WK::SuperRight => Key::RIGHT_SUPER,
        WK::ContextMenu => Key::MENU,

        _ => return None,
    };
    Some(key)
}

/// Collects winit window events into a [`RawSampler`]
#[derive(Debug, Default)]
pub struct InputCollector {
    sampler: RawSampler,
    settings: CollectorSettings,
}

impl InputCollector {
    pub fn new(settings: CollectorSettings) -> Self {
        Self {
            sampler: RawSampler::new(),
            settings,
        }
    }

    /// Update scale factor (DPI scaling)
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.settings.scale_factor = scale_factor;
    }

    /// Handle a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                self.set_scale_factor(*scale_factor);
            }
            // Release events for keys held while unfocused never arrive
            WindowEvent::Focused(false) => self.sampler.release_all(),
            _ => {
                let sampler = &mut self.sampler;
                translate(event, &self.settings, |raw| sampler.apply(&raw));
            }
        }
    }

    pub fn settings(&self) -> &CollectorSettings {
        &self.settings
    }

    pub fn sampler(&self) -> &RawSampler {
        &self.sampler
    }

    pub fn sampler_mut(&mut self) -> &mut RawSampler {
        &mut self.sampler
    }
}
