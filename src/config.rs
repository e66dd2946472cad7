//! Input configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::PathBuf;

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// Profiles shipped in `config/`
pub const PROFILES: [&str; 2] = ["debug", "release"];

/// Keyboard configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardConfig {
    /// Whether text capture starts enabled
    pub capture_text: bool,
}

/// Pointer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PointerConfig {
    /// Pixels per scroll line for wheels reporting line deltas
    pub scroll_line_pixels: f32,
    /// Report cursor positions divided by the window scale factor
    pub logical_coordinates: bool,
}

impl Default for PointerConfig {
    fn default() -> Self {
        Self {
            scroll_line_pixels: 20.0,
            logical_coordinates: true,
        }
    }
}

/// When the gamepad registry reconciles with the hardware
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanPolicy {
    /// Scan at the start of every update
    #[default]
    EveryFrame,
    /// Scan at init and on explicit rescan only
    OnDemand,
}

/// Gamepad configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GamepadConfig {
    pub scan: ScanPolicy,
}

/// Input configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    #[serde(default)]
    pub keyboard: KeyboardConfig,
    #[serde(default)]
    pub pointer: PointerConfig,
    #[serde(default)]
    pub gamepad: GamepadConfig,
}

impl InputConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Sources, later ones overriding earlier ones:
    /// 1. config/{profile}.toml
    /// 2. Environment variables with prefix INPUT_ (e.g., INPUT_POINTER__SCROLL_LINE_PIXELS=40)
    ///
    /// Config files are searched for next to the executable first, then in
    /// the current directory.
    pub fn load(profile: &str) -> Result<Self, InputError> {
        let mut builder = Config::builder();

        if let Some(dir) = Self::find_config_dir() {
            let profile_path = dir.join(profile);
            builder = builder.add_source(File::from(profile_path.as_path()).required(false));
        } else {
            builder = builder.add_source(File::with_name(&format!("config/{profile}")).required(false));
        }

        // Use __ as separator for nested fields (e.g., INPUT_GAMEPAD__SCAN)
        builder = builder.add_source(
            Environment::with_prefix("INPUT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.set_override("profile", profile)?.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        let cwd_config = PathBuf::from("config");
        cwd_config.exists().then_some(cwd_config)
    }

    /// Loads configuration using the INPUT_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, InputError> {
        let profile = std::env::var("INPUT_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Built-in values, used when no configuration can be loaded
    pub fn builtin(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            keyboard: KeyboardConfig::default(),
            pointer: PointerConfig::default(),
            gamepad: GamepadConfig::default(),
        }
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|_| Self::builtin("release"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_values() {
        let config = InputConfig::builtin("debug");
        assert_eq!(config.profile, "debug");
        assert!(!config.keyboard.capture_text);
        assert_eq!(config.pointer.scroll_line_pixels, 20.0);
        assert!(config.pointer.logical_coordinates);
        assert_eq!(config.gamepad.scan, ScanPolicy::EveryFrame);
    }

    #[test]
    fn test_missing_profile_falls_back_to_field_defaults() {
        let config = InputConfig::load("no-such-profile").expect("file is optional");
        assert_eq!(config.profile, "no-such-profile");
        assert_eq!(config.pointer, PointerConfig::default());
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let config: InputConfig = Config::builder()
            .add_source(config::File::from_str(
                "profile = \"custom\"\n[gamepad]\nscan = \"on_demand\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .and_then(Config::try_deserialize)
            .expect("valid toml");
        assert_eq!(config.gamepad.scan, ScanPolicy::OnDemand);
        assert_eq!(config.keyboard, KeyboardConfig::default());
    }
}
