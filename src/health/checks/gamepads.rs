//! Gamepad backend health check

use crate::health::check::{CheckResult, SystemCheck};
use crate::input::GamepadRegistry;
use crate::input::gamepad::default_backend;

/// Opens the default gamepad backend and lists the connected devices
#[derive(Default)]
pub struct GamepadScanCheck;

impl GamepadScanCheck {
    pub fn new() -> Self {
        Self
    }
}

impl SystemCheck for GamepadScanCheck {
    fn name(&self) -> &'static str {
        "Gamepads"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Opens the gamepad backend and scans every slot")
    }

    fn check(&self) -> CheckResult {
        let mut backend = match default_backend() {
            Ok(backend) => backend,
            Err(e) => return CheckResult::warn(format!("Backend unavailable: {e}")),
        };

        backend.poll();
        let mut registry = GamepadRegistry::new();
        registry.scan(backend.as_mut());

        let details: Vec<String> = registry
            .iter()
            .map(|pad| {
                let marker = if registry.default_id() == Some(pad.id()) {
                    " (default)"
                } else {
                    ""
                };
                format!("Slot {}: {}{}", pad.id(), pad.name(), marker)
            })
            .collect();

        let message = format!(
            "{} backend, {} gamepad(s) connected",
            backend.backend_name(),
            registry.len()
        );
        registry.dispose(backend.as_mut());
        CheckResult::pass(message).with_details(details)
    }
}
