use super::{GamepadAxis, GamepadBackend, GamepadButton, GamepadSnapshot, MAX_GAMEPADS};

#[derive(Debug, Clone)]
struct Device {
    connection: u64,
    name: String,
    mapped: bool,
    snapshot: GamepadSnapshot,
}

/// In-memory gamepad backend driven by explicit calls
///
/// Used for headless runs and tests. Devices are plugged into slots with
/// [`connect`](Self::connect) and their state is edited directly.
#[derive(Debug, Clone, Default)]
pub struct ScriptedGamepads {
    slots: [Option<Device>; MAX_GAMEPADS],
    released: Vec<usize>,
    connections: u64,
}

impl ScriptedGamepads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plugs a gamepad into `slot` with every button up and axes centred.
    /// Each call counts as a new device, even when the slot is occupied.
    pub fn connect(&mut self, slot: usize, name: &str) {
        self.plug(slot, name, true);
    }

    /// Plugs a device without a gamepad mapping into `slot`
    pub fn connect_joystick(&mut self, slot: usize, name: &str) {
        self.plug(slot, name, false);
    }

    fn plug(&mut self, slot: usize, name: &str, mapped: bool) {
        let mut snapshot = GamepadSnapshot::default();
        snapshot.axes[GamepadAxis::LeftTrigger as usize] = -1.0;
        snapshot.axes[GamepadAxis::RightTrigger as usize] = -1.0;
        self.connections += 1;
        self.slots[slot] = Some(Device {
            connection: self.connections,
            name: name.to_string(),
            mapped,
            snapshot,
        });
    }

    pub fn disconnect(&mut self, slot: usize) {
        self.slots[slot] = None;
    }

    pub fn press(&mut self, slot: usize, button: GamepadButton) {
        if let Some(device) = self.slots[slot].as_mut() {
            device.snapshot.buttons |= button.mask();
        }
    }

    pub fn release(&mut self, slot: usize, button: GamepadButton) {
        if let Some(device) = self.slots[slot].as_mut() {
            device.snapshot.buttons &= !button.mask();
        }
    }

    pub fn set_axis(&mut self, slot: usize, axis: GamepadAxis, value: f32) {
        if let Some(device) = self.slots[slot].as_mut() {
            device.snapshot.axes[axis as usize] = value;
        }
    }

    /// Slots handed back through [`GamepadBackend::release`], oldest first
    pub fn released_slots(&self) -> &[usize] {
        &self.released
    }
}

impl GamepadBackend for ScriptedGamepads {
    fn is_gamepad(&self, slot: usize) -> bool {
        self.slots
            .get(slot)
            .and_then(Option::as_ref)
            .is_some_and(|d| d.mapped)
    }

    fn connection_id(&self, slot: usize) -> Option<u64> {
        self.slots.get(slot)?.as_ref().map(|d| d.connection)
    }

    fn name(&self, slot: usize) -> Option<String> {
        self.slots.get(slot)?.as_ref().map(|d| d.name.clone())
    }

    fn read_state(&mut self, slot: usize, out: &mut GamepadSnapshot) -> bool {
        match self.slots.get(slot).and_then(Option::as_ref) {
            Some(device) => {
                *out = device.snapshot;
                true
            }
            None => false,
        }
    }

    fn release(&mut self, slot: usize) {
        self.released.push(slot);
    }

    fn backend_name(&self) -> &'static str {
        "scripted"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_joystick_is_not_a_gamepad() {
        let mut pads = ScriptedGamepads::new();
        pads.connect(0, "Pad");
        pads.connect_joystick(1, "Stick");
        assert!(pads.is_gamepad(0));
        assert!(!pads.is_gamepad(1));
        assert!(!pads.is_gamepad(2));
        assert!(!pads.is_gamepad(MAX_GAMEPADS + 4));
    }

    #[test]
    fn test_read_state_reflects_edits() {
        let mut pads = ScriptedGamepads::new();
        pads.connect(2, "Pad");
        pads.press(2, GamepadButton::X);
        pads.set_axis(2, GamepadAxis::LeftY, 1.0);

        let mut out = GamepadSnapshot::default();
        assert!(pads.read_state(2, &mut out));
        assert_eq!(out.buttons, GamepadButton::X.mask());
        assert_eq!(out.axes[GamepadAxis::LeftY as usize], 1.0);
        assert_eq!(out.axes[GamepadAxis::LeftTrigger as usize], -1.0);

        pads.disconnect(2);
        assert_eq!(pads.connection_id(2), None);
        let before = out;
        assert!(!pads.read_state(2, &mut out));
        assert_eq!(out, before);
    }

    #[test]
    fn test_replug_gets_new_connection_id() {
        let mut pads = ScriptedGamepads::new();
        pads.connect(0, "Pad");
        let first = pads.connection_id(0);
        pads.connect(0, "Pad");
        assert!(first.is_some());
        assert_ne!(pads.connection_id(0), first);
    }
}
