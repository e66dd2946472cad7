//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that build metadata was captured
#[derive(Default)]
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates build metadata (rustc, target, timestamp)")
    }

    fn check(&self) -> CheckResult {
        let details = build_info::detailed_info()
            .lines()
            .map(str::to_string)
            .collect();

        let missing = build_info::missing_fields();
        if missing.is_empty() {
            CheckResult::pass(build_info::version_string()).with_details(details)
        } else {
            CheckResult::warn(format!("Missing: {}", missing.join(", "))).with_details(details)
        }
    }
}
