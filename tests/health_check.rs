//! Integration tests for the health check system

use frame_input::health::{self, CheckStatus, HealthCheckRunner, SystemCheck, checks::*};

#[test]
fn test_all_health_checks() {
    let report = health::run_all_checks();

    // Print report for debugging if tests fail
    if !report.is_healthy() {
        eprintln!("\n{}", health::format_report(&report));
    }

    assert!(
        report.is_healthy(),
        "Health checks failed: {} failures, {} warnings",
        report.failed,
        report.warned
    );
    assert_eq!(report.total, 4);
}

#[test]
fn test_config_check() {
    let result = ConfigCheck::new().check();
    assert!(
        result.status.is_ok(),
        "Config check failed: {}",
        result.message
    );
}

#[test]
fn test_config_check_tolerates_unknown_profile() {
    // Profile files are optional; field defaults fill in
    let result = ConfigCheck::with_profiles(vec!["missing"]).check();
    assert!(result.status.is_ok(), "{}", result.message);
}

#[test]
fn test_build_info_check() {
    let result = BuildInfoCheck::new().check();
    assert_eq!(result.status, CheckStatus::Pass, "{}", result.message);
    assert!(!result.details.is_empty());
}

#[test]
fn test_edge_engine_check() {
    let result = EdgeEngineCheck::new().check();
    assert_eq!(result.status, CheckStatus::Pass, "{:?}", result.details);
}

#[test]
fn test_gamepad_scan_check() {
    // Without hardware the scan passes with zero devices; a missing backend
    // only warns
    let result = GamepadScanCheck::new().check();
    assert!(
        result.status.is_ok(),
        "Gamepad check failed: {}",
        result.message
    );
}

#[test]
fn test_runner_collects_all_checks() {
    let report = HealthCheckRunner::new()
        .add_check(ConfigCheck::new())
        .add_check(EdgeEngineCheck::new())
        .run();

    assert_eq!(report.total, 2, "Expected 2 checks in report");
    assert_eq!(report.passed + report.warned + report.failed, report.total);
    assert!(report.get("Edge Engine").is_some());
}

#[test]
fn test_report_exit_codes() {
    let report = HealthCheckRunner::new().add_check(ConfigCheck::new()).run();

    if report.failed > 0 {
        assert_eq!(report.exit_code(), 1);
    } else if report.warned > 0 {
        assert_eq!(report.exit_code(), 2);
    } else {
        assert_eq!(report.exit_code(), 0);
    }
}
