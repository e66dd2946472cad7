//! Build-time information
//!
//! Metadata captured by `build.rs` through vergen, reported by the probe
//! binary and the health checks.

/// Build timestamp (when the binary was compiled)
pub const BUILD_TIMESTAMP: &str = env!("VERGEN_BUILD_TIMESTAMP");

/// Cargo optimization level (0, 1, 2, 3, s, z)
pub const CARGO_OPT_LEVEL: &str = env!("VERGEN_CARGO_OPT_LEVEL");

/// Target triple (e.g., x86_64-unknown-linux-gnu, x86_64-apple-darwin)
pub const CARGO_TARGET_TRIPLE: &str = env!("VERGEN_CARGO_TARGET_TRIPLE");

/// Rust compiler version (e.g., 1.85.0)
pub const RUSTC_SEMVER: &str = env!("VERGEN_RUSTC_SEMVER");

/// Rust channel (stable, beta, or nightly)
pub const RUSTC_CHANNEL: &str = env!("VERGEN_RUSTC_CHANNEL");

/// Crate version from Cargo.toml
pub const PKG_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Whether the crate was built with the gilrs gamepad backend
pub const GAMEPAD_BACKEND: &str = if cfg!(feature = "gilrs") {
    "gilrs"
} else {
    "scripted"
};

/// Returns a formatted build version string
///
/// Format: `{version}+{target_triple}-opt{opt_level}`
pub fn version_string() -> String {
    format!("{PKG_VERSION}+{CARGO_TARGET_TRIPLE}-opt{CARGO_OPT_LEVEL}")
}

/// Returns a detailed build info string
pub fn detailed_info() -> String {
    format!(
        "Version: {}\nBuilt: {}\nTarget: {}\nOptimization: {}\nRustc: {} ({})\nGamepads: {}",
        PKG_VERSION,
        BUILD_TIMESTAMP,
        CARGO_TARGET_TRIPLE,
        CARGO_OPT_LEVEL,
        RUSTC_SEMVER,
        RUSTC_CHANNEL,
        GAMEPAD_BACKEND
    )
}

/// Build fields that came out empty, by name
pub fn missing_fields() -> Vec<&'static str> {
    [
        ("build timestamp", BUILD_TIMESTAMP),
        ("opt level", CARGO_OPT_LEVEL),
        ("target triple", CARGO_TARGET_TRIPLE),
        ("rustc version", RUSTC_SEMVER),
        ("rustc channel", RUSTC_CHANNEL),
    ]
    .into_iter()
    .filter(|(_, value)| value.is_empty())
    .map(|(name, _)| name)
    .collect()
}
