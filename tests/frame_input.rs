//! End-to-end tests driving the input context through raw events

use frame_input::config::{InputConfig, ScanPolicy};
use frame_input::input::{
    ButtonState, GamepadAxis, GamepadBackend, GamepadButton, GamepadSnapshot, InputContext, Key,
    MouseButton, RawEvent, RawSampler, ScriptedGamepads,
};
use glam::Vec2;
use std::cell::RefCell;
use std::rc::Rc;

/// Scripted backend shared with the test so devices can be plugged in
/// while the context owns it
#[derive(Clone, Default)]
struct SharedPads(Rc<RefCell<ScriptedGamepads>>);

impl SharedPads {
    fn with<R>(&self, f: impl FnOnce(&mut ScriptedGamepads) -> R) -> R {
        f(&mut self.0.borrow_mut())
    }
}

impl GamepadBackend for SharedPads {
    fn is_gamepad(&self, slot: usize) -> bool {
        self.0.borrow().is_gamepad(slot)
    }

    fn connection_id(&self, slot: usize) -> Option<u64> {
        self.0.borrow().connection_id(slot)
    }

    fn name(&self, slot: usize) -> Option<String> {
        self.0.borrow().name(slot)
    }

    fn read_state(&mut self, slot: usize, out: &mut GamepadSnapshot) -> bool {
        self.0.borrow_mut().read_state(slot, out)
    }

    fn release(&mut self, slot: usize) {
        GamepadBackend::release(&mut *self.0.borrow_mut(), slot);
    }

    fn backend_name(&self) -> &'static str {
        "shared"
    }
}

fn setup(config: InputConfig) -> (InputContext, RawSampler, SharedPads) {
    let pads = SharedPads::default();
    let mut input = InputContext::new(config);
    input.init(Box::new(pads.clone())).expect("fresh context");
    (input, RawSampler::new(), pads)
}

fn key(key: Key, pressed: bool) -> RawEvent {
    RawEvent::Key { key, pressed }
}

#[test]
fn test_key_press_and_release_across_frames() {
    let (mut input, mut sampler, _) = setup(InputConfig::builtin("test"));

    sampler.apply(&key(Key::W, true));
    input.update(&mut sampler, 0.016).unwrap();
    assert!(input.keyboard().just_pressed(Key::W));
    assert!(input.keyboard().pressed(Key::W));

    sampler.apply(&key(Key::W, false));
    input.update(&mut sampler, 0.016).unwrap();
    assert!(!input.keyboard().just_pressed(Key::W));
    assert!(input.keyboard().just_released(Key::W));
    assert!(!input.keyboard().pressed(Key::W));

    input.update(&mut sampler, 0.016).unwrap();
    assert_eq!(input.keyboard().state(Key::W), ButtonState::Released);
}

#[test]
fn test_press_and_release_within_one_frame_is_invisible() {
    let (mut input, mut sampler, _) = setup(InputConfig::builtin("test"));
    sampler.apply(&key(Key::ESCAPE, true));
    sampler.apply(&key(Key::ESCAPE, false));
    input.update(&mut sampler, 0.016).unwrap();
    assert!(!input.keyboard().any_pressed());
    assert!(input.keyboard().just_pressed_keys().is_empty());
}

#[test]
fn test_bulk_key_lists() {
    let (mut input, mut sampler, _) = setup(InputConfig::builtin("test"));
    sampler.apply_all(&[key(Key::A, true), key(Key::F12, true), key(Key::MENU, true)]);
    input.update(&mut sampler, 0.016).unwrap();

    sampler.apply(&key(Key::A, false));
    sampler.apply(&key(Key::SPACE, true));
    input.update(&mut sampler, 0.016).unwrap();

    let keyboard = input.keyboard();
    assert_eq!(keyboard.pressed_keys(), vec![Key::SPACE, Key::F12, Key::MENU]);
    assert_eq!(keyboard.just_pressed_keys(), vec![Key::SPACE]);
    assert_eq!(keyboard.just_released_keys(), vec![Key::A]);

    let mut buffer = [Key::default(); 2];
    assert_eq!(keyboard.pressed_keys_into(&mut buffer), 2);
    assert_eq!(buffer, [Key::SPACE, Key::F12]);
}

#[test]
fn test_text_capture_round_trip() {
    let (mut input, mut sampler, _) = setup(InputConfig::builtin("test"));
    input.set_text_capture(&mut sampler, true).unwrap();

    sampler.apply_all(&[RawEvent::Text('H'), RawEvent::Text('i')]);
    input.update(&mut sampler, 0.016).unwrap();
    assert_eq!(input.keyboard_mut().read_text(), "Hi");
    assert_eq!(input.keyboard_mut().read_text(), "");

    sampler.apply(&RawEvent::Text('x'));
    input.update(&mut sampler, 0.016).unwrap();
    input.set_text_capture(&mut sampler, false).unwrap();
    input.set_text_capture(&mut sampler, true).unwrap();

    sampler.apply(&RawEvent::Text('y'));
    input.update(&mut sampler, 0.016).unwrap();
    assert_eq!(input.keyboard_mut().read_text(), "y");
}

#[test]
fn test_disable_drops_text_not_yet_updated() {
    let (mut input, mut sampler, _) = setup(InputConfig::builtin("test"));
    input.set_text_capture(&mut sampler, true).unwrap();
    sampler.apply(&RawEvent::Text('o'));

    input.set_text_capture(&mut sampler, false).unwrap();
    input.set_text_capture(&mut sampler, true).unwrap();
    sampler.apply(&RawEvent::Text('n'));
    input.update(&mut sampler, 0.016).unwrap();

    assert_eq!(input.keyboard_mut().read_text(), "n");
}

#[test]
fn test_text_typed_before_enable_is_not_captured() {
    let (mut input, mut sampler, _) = setup(InputConfig::builtin("test"));
    sampler.apply(&RawEvent::Text('x'));

    input.set_text_capture(&mut sampler, true).unwrap();
    input.update(&mut sampler, 0.016).unwrap();

    assert_eq!(input.keyboard_mut().read_text(), "");
}

#[test]
fn test_text_is_dropped_while_not_capturing() {
    let (mut input, mut sampler, _) = setup(InputConfig::builtin("test"));
    sampler.apply(&RawEvent::Text('q'));
    input.update(&mut sampler, 0.016).unwrap();
    assert_eq!(input.keyboard().pending_text(), "");
    assert_eq!(sampler.pending_text(), "");
}

#[test]
fn test_scroll_sums_within_a_frame() {
    let (mut input, mut sampler, _) = setup(InputConfig::builtin("test"));
    sampler.apply(&RawEvent::Scroll { dx: 0.0, dy: 1.0 });
    sampler.apply(&RawEvent::Scroll { dx: 0.0, dy: 2.0 });
    input.update(&mut sampler, 0.016).unwrap();
    assert_eq!(input.pointer().scroll(), Vec2::new(0.0, 3.0));

    input.update(&mut sampler, 0.016).unwrap();
    assert_eq!(input.pointer().scroll(), Vec2::ZERO);
}

#[test]
fn test_pointer_movement_and_buttons() {
    let (mut input, mut sampler, _) = setup(InputConfig::builtin("test"));
    sampler.apply(&RawEvent::CursorMoved { x: 10.0, y: 10.0 });
    input.update(&mut sampler, 0.016).unwrap();

    sampler.apply(&RawEvent::CursorMoved { x: 13.0, y: 6.0 });
    sampler.apply(&RawEvent::MouseButton {
        button: MouseButton::LEFT,
        pressed: true,
    });
    input.update(&mut sampler, 0.016).unwrap();

    let pointer = input.pointer();
    assert_eq!(pointer.movement(), Vec2::new(3.0, -4.0));
    assert!(pointer.just_pressed(MouseButton::LEFT));
    assert_eq!(pointer.buttons_down(), MouseButton::LEFT.mask());
}

#[test]
fn test_default_gamepad_follows_lowest_slot() {
    let (mut input, mut sampler, pads) = setup(InputConfig::builtin("test"));
    assert!(input.gamepad().is_none());

    pads.with(|p| p.connect(2, "Second"));
    input.update(&mut sampler, 0.016).unwrap();
    assert_eq!(input.gamepad().map(|p| p.id()), Some(2));

    pads.with(|p| p.connect(0, "First"));
    input.update(&mut sampler, 0.016).unwrap();
    assert_eq!(input.gamepad().map(|p| p.id()), Some(0));

    pads.with(|p| p.disconnect(0));
    // Disconnect is noticed by update, removal happens on the next scan
    input.update(&mut sampler, 0.016).unwrap();
    input.update(&mut sampler, 0.016).unwrap();
    assert_eq!(input.gamepad().map(|p| p.id()), Some(2));
    assert!(input.gamepad_at(0).is_none());
    assert_eq!(pads.with(|p| p.released_slots().to_vec()), vec![0]);
}

#[test]
fn test_gamepad_edges_and_axes() {
    let (mut input, mut sampler, pads) = setup(InputConfig::builtin("test"));
    pads.with(|p| p.connect(0, "Pad"));
    input.update(&mut sampler, 0.016).unwrap();

    pads.with(|p| {
        p.press(0, GamepadButton::A);
        p.set_axis(0, GamepadAxis::LeftX, -0.75);
    });
    input.update(&mut sampler, 0.016).unwrap();

    let pad = input.gamepad().expect("connected");
    assert_eq!(pad.name(), "Pad");
    assert!(pad.just_pressed(GamepadButton::A));
    assert_eq!(pad.axis(GamepadAxis::LeftX), -0.75);
}

#[test]
fn test_gamepad_swapped_in_one_frame_is_a_new_device() {
    let (mut input, mut sampler, pads) = setup(InputConfig::builtin("test"));
    pads.with(|p| {
        p.connect(0, "Old");
        p.press(0, GamepadButton::B);
    });
    input.update(&mut sampler, 0.016).unwrap();
    input.update(&mut sampler, 0.016).unwrap();
    assert!(input.gamepad().is_some_and(|p| p.pressed(GamepadButton::B)));

    pads.with(|p| {
        p.disconnect(0);
        p.connect(0, "New");
    });
    input.update(&mut sampler, 0.016).unwrap();

    let pad = input.gamepad().expect("slot 0 is occupied");
    assert_eq!(pad.name(), "New");
    assert_eq!(pad.buttons(), 0);
    assert_eq!(pad.buttons_up(), 0);
}

#[test]
fn test_on_demand_scan_waits_for_rescan() {
    let mut config = InputConfig::builtin("test");
    config.gamepad.scan = ScanPolicy::OnDemand;
    let (mut input, mut sampler, pads) = setup(config);

    pads.with(|p| p.connect(1, "Late"));
    input.update(&mut sampler, 0.016).unwrap();
    assert_eq!(input.gamepads().count(), 0);

    let ids: Vec<usize> = input.gamepads_rescan().unwrap().map(|p| p.id()).collect();
    assert_eq!(ids, vec![1]);
}

#[test]
fn test_dispose_releases_gamepads() {
    let (mut input, _, pads) = setup(InputConfig::builtin("test"));
    pads.with(|p| {
        p.connect(0, "A");
        p.connect(4, "B");
    });
    input.rescan().unwrap();

    input.dispose();
    assert!(!input.is_initialized());
    assert_eq!(input.gamepads().count(), 0);
    assert_eq!(pads.with(|p| p.released_slots().to_vec()), vec![0, 4]);
}
