//! Edge detection self-test

use crate::health::check::{CheckResult, SystemCheck};
use crate::input::{BitVector, ButtonState, EdgeTracker, Key, Signal};

/// Drives a press, hold, release sequence through the bit engine and checks
/// the derived states
#[derive(Default)]
pub struct EdgeEngineCheck;

impl EdgeEngineCheck {
    pub fn new() -> Self {
        Self
    }
}

impl SystemCheck for EdgeEngineCheck {
    fn name(&self) -> &'static str {
        "Edge Engine"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates bit vector arithmetic and per-frame edge detection")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();

        let mut previous = BitVector::new(200);
        let mut current = BitVector::new(200);
        for bit in [1, 2, 3] {
            previous.set(bit);
        }
        for bit in [2, 3, 4] {
            current.set(bit);
        }
        let pressed: Vec<_> = previous.xor_and(&current).iter().collect();
        let released: Vec<_> = current.xor_and(&previous).iter().collect();
        if pressed != [4] || released != [1] {
            details.push(format!("✗ xor_and: pressed {pressed:?}, released {released:?}"));
            return CheckResult::fail("Bit vector edge arithmetic is wrong").with_details(details);
        }
        details.push("✓ xor_and yields {4} pressed, {1} released".to_string());

        let key = Key::MENU;
        let mut sample = BitVector::new(Key::COUNT);
        let mut tracker = EdgeTracker::<Key>::new();
        let mut observed = Vec::new();
        for down in [true, true, false, false] {
            sample.set_to(key.index(), down);
            tracker.tick(&sample);
            observed.push(tracker.state(key));
        }

        let expected = [
            ButtonState::JustPressed,
            ButtonState::Pressed,
            ButtonState::JustReleased,
            ButtonState::Released,
        ];
        let held = observed.iter().filter(|s| s.is_down()).count();
        let edges = observed
            .iter()
            .filter(|s| s.is_just_pressed() || s.is_just_released())
            .count();
        if observed != expected || held != 2 || edges != 2 {
            details.push(format!("✗ Key sequence: {observed:?}"));
            return CheckResult::fail("Edge tracker states are wrong").with_details(details);
        }
        details.push(format!("✓ Key {} cycles through all four states", key.0));

        CheckResult::pass("Edge detection operational").with_details(details)
    }
}
