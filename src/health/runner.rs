//! Runner for orchestrating health checks

use std::time::Instant;

use tracing::{error, info, warn};

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Results from running a health check suite
#[derive(Debug)]
pub struct HealthCheckReport {
    /// Individual check results with their system names
    pub results: Vec<(String, CheckResult)>,
    pub total: usize,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl HealthCheckReport {
    /// Returns true if all checks passed (no failures)
    pub fn is_healthy(&self) -> bool {
        self.failed == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warned > 0
    }

    /// Result of the check called `name`
    pub fn get(&self, name: &str) -> Option<&CheckResult> {
        self.results
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, result)| result)
    }

    /// Worst status in the report, `Pass` when empty
    pub fn status(&self) -> CheckStatus {
        self.results
            .iter()
            .map(|(_, result)| result.status)
            .max()
            .unwrap_or(CheckStatus::Pass)
    }

    /// Process exit code: 0 = all pass, 1 = any fail, 2 = any warn (but no fail)
    pub fn exit_code(&self) -> i32 {
        match self.status() {
            CheckStatus::Pass => 0,
            CheckStatus::Fail => 1,
            CheckStatus::Warn => 2,
        }
    }
}

/// Orchestrates running health checks and collecting results
#[derive(Default)]
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a check to the runner
    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Runs all registered checks in order and returns a report
    pub fn run(self) -> HealthCheckReport {
        let mut results = Vec::with_capacity(self.checks.len());
        let (mut passed, mut warned, mut failed) = (0, 0, 0);

        for check in self.checks {
            let name = check.name();
            let start = Instant::now();
            let result = check.check().with_duration(start.elapsed());

            match result.status {
                CheckStatus::Pass => {
                    passed += 1;
                    info!(check = name, message = %result.message, "Health check passed");
                }
                CheckStatus::Warn => {
                    warned += 1;
                    warn!(check = name, message = %result.message, "Health check warned");
                }
                CheckStatus::Fail => {
                    failed += 1;
                    error!(check = name, message = %result.message, "Health check failed");
                }
            }

            results.push((name.to_string(), result));
        }

        HealthCheckReport {
            total: results.len(),
            results,
            passed,
            warned,
            failed,
        }
    }
}
