//! Library error type

use thiserror::Error;

/// Errors reported by the input context and its collaborators
///
/// Only lifecycle mistakes and setup failures are errors. Missing devices and
/// empty text buffers are ordinary `None`/empty results.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("{operation} called before the input context was initialized")]
    NotInitialized { operation: &'static str },
    #[error("input context is already initialized")]
    AlreadyInitialized,
    #[error("failed to load input configuration: {0}")]
    Config(#[from] config::ConfigError),
    #[error("gamepad backend unavailable: {0}")]
    Backend(String),
}
