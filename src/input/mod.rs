//! Per-frame input state tracking
//!
//! Every discrete input (key, pointer button, gamepad button) is one bit in a
//! fixed-size [`BitVector`]. An [`EdgeTracker`] keeps the current and previous
//! frame's bits and derives "held", "just pressed" and "just released" from
//! them, singly or in bulk, without allocating.
//!
//! # Architecture
//!
//! ```text
//! Raw Input (winit) → InputCollector → RawEvent → RawSampler
//!                                                     ↓ once per frame
//!                      GamepadBackend ──────────► InputContext::update
//!                                                     ↓
//!                              KeyboardState / PointerState / GamepadRegistry
//!                                                     ↓
//!                                                 queries
//! ```
//!
//! # Usage
//!
//! ```no_run
//! use frame_input::config::InputConfig;
//! use frame_input::input::{InputContext, Key, RawSampler, ScriptedGamepads};
//!
//! let mut input = InputContext::new(InputConfig::default());
//! input.init(Box::new(ScriptedGamepads::new()))?;
//! let mut sampler = RawSampler::new();
//!
//! // Each frame, after feeding window events into the sampler
//! input.update(&mut sampler, 1.0 / 60.0)?;
//! if input.keyboard().just_pressed(Key::SPACE) {
//!     // jump
//! }
//! # Ok::<(), frame_input::error::InputError>(())
//! ```

pub mod bits;
pub mod collector;
pub mod context;
pub mod edge;
pub mod events;
pub mod gamepad;
pub mod keyboard;
pub mod pointer;
pub mod sampler;

// Re-export public API
pub use bits::{BitVector, SetBits};
pub use collector::{CollectorSettings, InputCollector};
pub use context::InputContext;
pub use edge::{ButtonState, EdgeTracker, Signal};
pub use events::RawEvent;
#[cfg(feature = "gilrs")]
pub use gamepad::GilrsGamepads;
pub use gamepad::{
    GamepadAxis, GamepadBackend, GamepadButton, GamepadRegistry, GamepadSnapshot, GamepadState,
    MAX_GAMEPADS, ScriptedGamepads,
};
pub use keyboard::{Key, KeyboardState};
pub use pointer::{MouseButton, PointerSample, PointerState};
pub use sampler::RawSampler;
