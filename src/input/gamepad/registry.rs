use tracing::{debug, info};

use super::{GamepadBackend, GamepadState, MAX_GAMEPADS};

/// Connected gamepads indexed by hardware slot
///
/// The default gamepad is the occupied slot with the lowest id. It is
/// recomputed on every [`scan`](Self::scan) and is `None` once the registry
/// is empty.
#[derive(Debug)]
pub struct GamepadRegistry {
    slots: [Option<GamepadState>; MAX_GAMEPADS],
    default: Option<usize>,
}

impl Default for GamepadRegistry {
    fn default() -> Self {
        Self {
            slots: std::array::from_fn(|_| None),
            default: None,
        }
    }
}

impl GamepadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reconciles the registry with the backend.
    ///
    /// Gamepads that reported disconnected on their last update, or whose
    /// slot now holds a different device, are removed and their slots
    /// released. Newly attached compatible devices are added. Returns true
    /// when the set of gamepads changed.
    pub fn scan(&mut self, backend: &mut dyn GamepadBackend) -> bool {
        let mut changed = false;

        for (slot, entry) in self.slots.iter_mut().enumerate() {
            let live = backend.connection_id(slot);
            if entry
                .as_ref()
                .is_some_and(|pad| !pad.is_connected() || live != Some(pad.connection_id()))
            {
                if let Some(pad) = entry.take() {
                    info!(slot, name = pad.name(), "Gamepad disconnected");
                }
                backend.release(slot);
                changed = true;
            }

            if entry.is_none()
                && backend.is_gamepad(slot)
                && let Some(pad) = GamepadState::connect(slot, backend)
            {
                info!(
                    slot,
                    name = pad.name(),
                    backend = backend.backend_name(),
                    "Gamepad connected"
                );
                *entry = Some(pad);
                changed = true;
            }
        }

        self.update_default();
        changed
    }

    fn update_default(&mut self) {
        let lowest = self.slots.iter().position(Option::is_some);
        if lowest != self.default {
            debug!(from = ?self.default, to = ?lowest, "Default gamepad changed");
            self.default = lowest;
        }
    }

    /// Resamples every registered gamepad
    pub fn update(&mut self, backend: &mut dyn GamepadBackend) {
        for pad in self.slots.iter_mut().flatten() {
            pad.update(backend);
        }
    }

    /// Drops every gamepad and releases its slot
    pub fn dispose(&mut self, backend: &mut dyn GamepadBackend) {
        for (slot, entry) in self.slots.iter_mut().enumerate() {
            if entry.take().is_some() {
                backend.release(slot);
            }
        }
        self.default = None;
    }

    /// Gamepad in slot `id`, if any
    pub fn get(&self, id: usize) -> Option<&GamepadState> {
        self.slots.get(id)?.as_ref()
    }

    /// The lowest-id connected gamepad
    pub fn default_gamepad(&self) -> Option<&GamepadState> {
        self.get(self.default?)
    }

    pub fn default_id(&self) -> Option<usize> {
        self.default
    }

    /// Registered gamepads in ascending slot order
    pub fn iter(&self) -> impl Iterator<Item = &GamepadState> {
        self.slots.iter().flatten()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.default.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::gamepad::{GamepadButton, ScriptedGamepads};

    #[test]
    fn test_default_is_lowest_slot() {
        let mut pads = ScriptedGamepads::new();
        let mut registry = GamepadRegistry::new();
        assert!(registry.default_gamepad().is_none());

        pads.connect(2, "Second");
        assert!(registry.scan(&mut pads));
        assert_eq!(registry.default_id(), Some(2));

        pads.connect(0, "First");
        assert!(registry.scan(&mut pads));
        assert_eq!(registry.default_id(), Some(0));
        assert_eq!(registry.default_gamepad().map(|p| p.name()), Some("First"));
        assert_eq!(registry.len(), 2);

        let ids: Vec<_> = registry.iter().map(|p| p.id()).collect();
        assert_eq!(ids, vec![0, 2]);
    }

    #[test]
    fn test_disconnect_moves_default() {
        let mut pads = ScriptedGamepads::new();
        let mut registry = GamepadRegistry::new();
        pads.connect(0, "First");
        pads.connect(2, "Second");
        registry.scan(&mut pads);

        pads.disconnect(0);
        registry.update(&mut pads);
        // Still registered until the next scan
        assert!(registry.get(0).is_some_and(|p| !p.is_connected()));

        assert!(registry.scan(&mut pads));
        assert!(registry.get(0).is_none());
        assert_eq!(registry.default_id(), Some(2));
        assert_eq!(pads.released_slots(), &[0]);
    }

    #[test]
    fn test_replaced_device_starts_fresh() {
        let mut pads = ScriptedGamepads::new();
        let mut registry = GamepadRegistry::new();
        pads.connect(0, "Old");
        registry.scan(&mut pads);
        pads.press(0, GamepadButton::A);
        registry.update(&mut pads);

        // Swapped within one frame, so no update ever sees the slot empty
        pads.disconnect(0);
        pads.connect(0, "New");
        assert!(registry.scan(&mut pads));
        registry.update(&mut pads);

        let pad = registry.get(0).expect("slot 0 is occupied");
        assert_eq!(pad.name(), "New");
        assert!(!pad.pressed(GamepadButton::A));
        assert!(!pad.just_released(GamepadButton::A));
        assert_eq!(pads.released_slots(), &[0]);
    }

    #[test]
    fn test_default_cleared_when_empty() {
        let mut pads = ScriptedGamepads::new();
        let mut registry = GamepadRegistry::new();
        pads.connect(5, "Only");
        registry.scan(&mut pads);

        pads.disconnect(5);
        registry.update(&mut pads);
        registry.scan(&mut pads);
        assert!(registry.is_empty());
        assert_eq!(registry.default_id(), None);
    }

    #[test]
    fn test_incompatible_devices_are_skipped() {
        let mut pads = ScriptedGamepads::new();
        let mut registry = GamepadRegistry::new();
        pads.connect_joystick(0, "Stick");
        assert!(!registry.scan(&mut pads));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_scan_without_changes() {
        let mut pads = ScriptedGamepads::new();
        let mut registry = GamepadRegistry::new();
        pads.connect(1, "Pad");
        assert!(registry.scan(&mut pads));
        assert!(!registry.scan(&mut pads));
    }

    #[test]
    fn test_update_feeds_every_pad() {
        let mut pads = ScriptedGamepads::new();
        let mut registry = GamepadRegistry::new();
        pads.connect(0, "A");
        pads.connect(1, "B");
        registry.scan(&mut pads);

        pads.press(1, GamepadButton::Y);
        registry.update(&mut pads);
        assert!(registry.get(1).is_some_and(|p| p.just_pressed(GamepadButton::Y)));
        assert!(registry.get(0).is_some_and(|p| !p.pressed(GamepadButton::Y)));
    }

    #[test]
    fn test_dispose_releases_all() {
        let mut pads = ScriptedGamepads::new();
        let mut registry = GamepadRegistry::new();
        pads.connect(3, "A");
        pads.connect(7, "B");
        registry.scan(&mut pads);

        registry.dispose(&mut pads);
        assert!(registry.is_empty());
        assert_eq!(pads.released_slots(), &[3, 7]);
    }
}
