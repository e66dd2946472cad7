//! Built-in health checks

pub mod build_info;
pub mod config;
pub mod edge_engine;
pub mod gamepads;

pub use build_info::BuildInfoCheck;
pub use self::config::ConfigCheck;
pub use edge_engine::EdgeEngineCheck;
pub use gamepads::GamepadScanCheck;
