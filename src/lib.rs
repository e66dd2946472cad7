//! Frame Input
//!
//! Per-frame input state tracking for interactive applications: keyboard,
//! pointer and gamepad state with press/release edge detection.

/// Build-time information (rustc, target, timestamp)
pub mod build_info;

/// Input profiles loaded from files and environment
pub mod config;

/// Library error type
pub mod error;

/// Startup health checks
pub mod health;

/// Device state, edge detection and the input context
pub mod input;

pub use crate::config::InputConfig;
pub use error::InputError;
pub use input::InputContext;
