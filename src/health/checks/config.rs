//! Configuration health check

use crate::config::{InputConfig, PROFILES};
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that configuration can be loaded for all profiles
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Creates a config check over the shipped profiles
    pub fn new() -> Self {
        Self {
            profiles: PROFILES.to_vec(),
        }
    }

    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates input profile loading from files and environment")
    }

    fn check(&self) -> CheckResult {
        let mut details = Vec::new();
        let mut failed = 0;

        for profile in &self.profiles {
            match InputConfig::load(profile) {
                Ok(config) => details.push(format!(
                    "✓ Profile '{}': scan {:?}, text capture {}, {} px per scroll line",
                    profile,
                    config.gamepad.scan,
                    config.keyboard.capture_text,
                    config.pointer.scroll_line_pixels
                )),
                Err(e) => {
                    details.push(format!("✗ Profile '{profile}': {e}"));
                    failed += 1;
                }
            }
        }

        let env_ok = match InputConfig::load_from_env() {
            Ok(config) => {
                details.push(format!("✓ Environment: profile '{}' loaded", config.profile));
                true
            }
            Err(e) => {
                details.push(format!("⚠ Environment: {e}"));
                false
            }
        };

        if failed > 0 {
            CheckResult::fail(format!("{failed} profile(s) failed to load")).with_details(details)
        } else if !env_ok {
            CheckResult::warn("Profiles load, environment overrides do not").with_details(details)
        } else {
            CheckResult::pass(format!("{} profiles validated", self.profiles.len()))
                .with_details(details)
        }
    }
}
