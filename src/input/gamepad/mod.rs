//! Gamepad devices
//!
//! A [`GamepadBackend`] stands in for the platform: it answers which hardware
//! slots hold a compatible device and reads their state. [`GamepadState`] is
//! one connected device, [`GamepadRegistry`] owns them all and picks the
//! default one.

#[cfg(feature = "gilrs")]
mod gilrs_backend;
mod registry;
mod scripted;

#[cfg(feature = "gilrs")]
pub use gilrs_backend::GilrsGamepads;
pub use registry::GamepadRegistry;
pub use scripted::ScriptedGamepads;

use super::edge::{ButtonState, EdgeTracker, Signal};
use crate::error::InputError;

/// Number of hardware slots scanned for gamepads
pub const MAX_GAMEPADS: usize = 16;

/// Gamepad buttons, in the standard layout order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GamepadButton {
    A,
    B,
    X,
    Y,
    LeftBumper,
    RightBumper,
    Back,
    Start,
    Guide,
    LeftThumb,
    RightThumb,
    DpadUp,
    DpadRight,
    DpadDown,
    DpadLeft,
}

impl GamepadButton {
    pub const ALL: [GamepadButton; 15] = [
        Self::A,
        Self::B,
        Self::X,
        Self::Y,
        Self::LeftBumper,
        Self::RightBumper,
        Self::Back,
        Self::Start,
        Self::Guide,
        Self::LeftThumb,
        Self::RightThumb,
        Self::DpadUp,
        Self::DpadRight,
        Self::DpadDown,
        Self::DpadLeft,
    ];

    #[inline]
    pub fn mask(self) -> u32 {
        1 << self as u32
    }
}

impl Signal for GamepadButton {
    const COUNT: usize = 15;

    #[inline]
    fn index(self) -> usize {
        self as usize
    }

    #[inline]
    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

/// Continuous gamepad axes. Sticks report `-1..=1`, triggers rest at `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GamepadAxis {
    LeftX,
    LeftY,
    RightX,
    RightY,
    LeftTrigger,
    RightTrigger,
}

impl GamepadAxis {
    pub const COUNT: usize = 6;

    pub const ALL: [GamepadAxis; Self::COUNT] = [
        Self::LeftX,
        Self::LeftY,
        Self::RightX,
        Self::RightY,
        Self::LeftTrigger,
        Self::RightTrigger,
    ];
}

/// Raw device state read from a backend for one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GamepadSnapshot {
    /// One bit per [`GamepadButton`]
    pub buttons: u32,
    pub axes: [f32; GamepadAxis::COUNT],
}

/// Platform side of gamepad handling
///
/// Slots are small integers in `0..MAX_GAMEPADS`. A backend may report a slot
/// as empty at any time and may later reuse it for a different device.
pub trait GamepadBackend {
    /// Pumps pending platform events. Called once per frame before any
    /// other method.
    fn poll(&mut self) {}

    /// True when `slot` holds a connected device with a gamepad mapping
    fn is_gamepad(&self, slot: usize) -> bool;

    /// Identity of the device currently in `slot`, or `None` when empty.
    ///
    /// Changes whenever a different device, or the same device after a
    /// reconnect, takes the slot.
    fn connection_id(&self, slot: usize) -> Option<u64>;

    /// Human-readable device name, read once at connect
    fn name(&self, slot: usize) -> Option<String>;

    /// Reads the device state into `out`. Returns `false` when the device is
    /// no longer connected, in which case `out` is left untouched.
    fn read_state(&mut self, slot: usize, out: &mut GamepadSnapshot) -> bool;

    /// Releases any platform handle held for `slot`
    fn release(&mut self, _slot: usize) {}

    /// Short backend name for logs and diagnostics
    fn backend_name(&self) -> &'static str;
}

/// Opens the platform gamepad backend when built with the `gilrs` feature,
/// otherwise an empty [`ScriptedGamepads`]
pub fn default_backend() -> Result<Box<dyn GamepadBackend>, InputError> {
    #[cfg(feature = "gilrs")]
    {
        Ok(Box::new(GilrsGamepads::new()?))
    }
    #[cfg(not(feature = "gilrs"))]
    {
        Ok(Box::new(ScriptedGamepads::new()))
    }
}

/// One connected gamepad
///
/// Created when a slot reports a compatible device and dropped by the
/// registry once the device reports disconnected. A slot reused by another
/// device yields a fresh `GamepadState` with no memory of the old one.
#[derive(Debug, Clone)]
pub struct GamepadState {
    id: usize,
    connection: u64,
    name: String,
    connected: bool,
    buttons: EdgeTracker<GamepadButton>,
    axes: [f32; GamepadAxis::COUNT],
    snapshot: GamepadSnapshot,
}

impl GamepadState {
    /// Opens the device at `slot`. Returns `None` if it cannot be read.
    pub fn connect(slot: usize, backend: &mut dyn GamepadBackend) -> Option<Self> {
        let connection = backend.connection_id(slot)?;
        let mut snapshot = GamepadSnapshot::default();
        if !backend.read_state(slot, &mut snapshot) {
            return None;
        }

        let name = backend
            .name(slot)
            .unwrap_or_else(|| format!("Gamepad {slot}"));

        // Buttons held at connect show up as pressed on the first update
        Some(Self {
            id: slot,
            connection,
            name,
            connected: true,
            buttons: EdgeTracker::new(),
            axes: snapshot.axes,
            snapshot,
        })
    }

    /// Resamples buttons and axes. A device that stopped answering samples
    /// as all buttons up; its axes keep their last values.
    pub fn update(&mut self, backend: &mut dyn GamepadBackend) {
        self.connected = backend.read_state(self.id, &mut self.snapshot);
        if self.connected {
            self.buttons.tick_mask(self.snapshot.buttons);
            self.axes = self.snapshot.axes;
        } else {
            self.buttons.tick_mask(0);
        }
    }

    /// Hardware slot this device occupies
    pub fn id(&self) -> usize {
        self.id
    }

    /// Backend identity of the device captured at connect
    pub fn connection_id(&self) -> u64 {
        self.connection
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn pressed(&self, button: GamepadButton) -> bool {
        self.buttons.is_active(button)
    }

    pub fn just_pressed(&self, button: GamepadButton) -> bool {
        self.buttons.just_activated(button)
    }

    pub fn just_released(&self, button: GamepadButton) -> bool {
        self.buttons.just_deactivated(button)
    }

    pub fn state(&self, button: GamepadButton) -> ButtonState {
        self.buttons.state(button)
    }

    /// Bit mask of buttons held down
    pub fn buttons(&self) -> u32 {
        self.buttons.current().low_u32()
    }

    /// Bit mask of buttons pressed this frame
    pub fn buttons_down(&self) -> u32 {
        let (now, before) = (self.buttons(), self.buttons.previous().low_u32());
        (now ^ before) & now
    }

    /// Bit mask of buttons released this frame
    pub fn buttons_up(&self) -> u32 {
        let (now, before) = (self.buttons(), self.buttons.previous().low_u32());
        (now ^ before) & before
    }

    pub fn pressed_buttons(&self) -> impl Iterator<Item = GamepadButton> + '_ {
        self.buttons.active()
    }

    pub fn just_pressed_buttons(&self) -> impl Iterator<Item = GamepadButton> + '_ {
        self.buttons.activated()
    }

    pub fn just_released_buttons(&self) -> impl Iterator<Item = GamepadButton> + '_ {
        self.buttons.deactivated()
    }

    /// Current value of an axis
    pub fn axis(&self, axis: GamepadAxis) -> f32 {
        self.axes[axis as usize]
    }

    pub fn axes(&self) -> &[f32; GamepadAxis::COUNT] {
        &self.axes
    }

    pub fn tracker(&self) -> &EdgeTracker<GamepadButton> {
        &self.buttons
    }
}
