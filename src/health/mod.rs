//! Health checks for validating the input stack
//!
//! Used by `input-probe health` and by the integration tests to confirm the
//! configuration, build metadata, edge engine and gamepad backend all work
//! on the current machine.
//!
//! # Example
//!
//! ```no_run
//! use frame_input::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(EdgeEngineCheck::new())
//!     .run();
//!
//! std::process::exit(report.exit_code());
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs all default health checks and returns a report
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::EdgeEngineCheck::new())
        .add_check(checks::GamepadScanCheck::new())
        .run()
}
