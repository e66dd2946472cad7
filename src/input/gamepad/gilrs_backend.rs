use gilrs::{Axis, Button, EventType, Gamepad, GamepadId, Gilrs, MappingSource};

use super::{GamepadAxis, GamepadBackend, GamepadButton, GamepadSnapshot, MAX_GAMEPADS};
use crate::error::InputError;

const BUTTONS: [(Button, GamepadButton); 15] = [
    (Button::South, GamepadButton::A),
    (Button::East, GamepadButton::B),
    (Button::West, GamepadButton::X),
    (Button::North, GamepadButton::Y),
    (Button::LeftTrigger, GamepadButton::LeftBumper),
    (Button::RightTrigger, GamepadButton::RightBumper),
    (Button::Select, GamepadButton::Back),
    (Button::Start, GamepadButton::Start),
    (Button::Mode, GamepadButton::Guide),
    (Button::LeftThumb, GamepadButton::LeftThumb),
    (Button::RightThumb, GamepadButton::RightThumb),
    (Button::DPadUp, GamepadButton::DpadUp),
    (Button::DPadRight, GamepadButton::DpadRight),
    (Button::DPadDown, GamepadButton::DpadDown),
    (Button::DPadLeft, GamepadButton::DpadLeft),
];

/// Gamepad backend over the `gilrs` crate
///
/// gilrs hands out its own ids; they are mapped onto slots by value and ids
/// past `MAX_GAMEPADS` are ignored. gilrs hands a reconnecting device its old
/// id, so every `Connected` event bumps the slot's generation instead.
pub struct GilrsGamepads {
    gilrs: Gilrs,
    ids: [Option<GamepadId>; MAX_GAMEPADS],
    generations: [u64; MAX_GAMEPADS],
    connections: u64,
}

impl GilrsGamepads {
    pub fn new() -> Result<Self, InputError> {
        let gilrs = Gilrs::new().map_err(|e| InputError::Backend(e.to_string()))?;
        let mut backend = Self {
            gilrs,
            ids: [None; MAX_GAMEPADS],
            generations: [0; MAX_GAMEPADS],
            connections: 0,
        };
        backend.refresh_ids();
        Ok(backend)
    }

    fn refresh_ids(&mut self) {
        self.ids = [None; MAX_GAMEPADS];
        for (id, _) in self.gilrs.gamepads() {
            if let Some(slot) = self.ids.get_mut(usize::from(id)) {
                *slot = Some(id);
            }
        }
    }

    fn gamepad(&self, slot: usize) -> Option<Gamepad<'_>> {
        let id = (*self.ids.get(slot)?)?;
        self.gilrs.connected_gamepad(id)
    }
}

impl GamepadBackend for GilrsGamepads {
    fn poll(&mut self) {
        while let Some(event) = self.gilrs.next_event() {
            if matches!(event.event, EventType::Connected)
                && let Some(generation) = self.generations.get_mut(usize::from(event.id))
            {
                self.connections += 1;
                *generation = self.connections;
            }
        }
        self.refresh_ids();
    }

    fn is_gamepad(&self, slot: usize) -> bool {
        self.gamepad(slot)
            .is_some_and(|pad| !matches!(pad.mapping_source(), MappingSource::None))
    }

    fn connection_id(&self, slot: usize) -> Option<u64> {
        self.gamepad(slot).map(|_| self.generations[slot])
    }

    fn name(&self, slot: usize) -> Option<String> {
        self.gamepad(slot).map(|pad| pad.name().to_string())
    }

    fn read_state(&mut self, slot: usize, out: &mut GamepadSnapshot) -> bool {
        let Some(pad) = self.gamepad(slot) else {
            return false;
        };

        out.buttons = BUTTONS
            .iter()
            .filter(|(b, _)| pad.is_pressed(*b))
            .fold(0, |mask, (_, button)| mask | button.mask());

        // Stick y grows upwards in gilrs, downwards here
        out.axes[GamepadAxis::LeftX as usize] = pad.value(Axis::LeftStickX);
        out.axes[GamepadAxis::LeftY as usize] = -pad.value(Axis::LeftStickY);
        out.axes[GamepadAxis::RightX as usize] = pad.value(Axis::RightStickX);
        out.axes[GamepadAxis::RightY as usize] = -pad.value(Axis::RightStickY);
        out.axes[GamepadAxis::LeftTrigger as usize] = trigger(&pad, Button::LeftTrigger2);
        out.axes[GamepadAxis::RightTrigger as usize] = trigger(&pad, Button::RightTrigger2);
        true
    }

    fn backend_name(&self) -> &'static str {
        "gilrs"
    }
}

/// Analog trigger rescaled from `0..=1` to `-1..=1`
fn trigger(pad: &Gamepad<'_>, button: Button) -> f32 {
    let value = pad.button_data(button).map_or(0.0, |data| data.value());
    value * 2.0 - 1.0
}
