//! Input context: the per-session owner of all device state

use tracing::{debug, info, trace, warn};

use super::gamepad::{GamepadBackend, GamepadRegistry, GamepadState};
use super::keyboard::KeyboardState;
use super::pointer::PointerState;
use super::sampler::RawSampler;
use crate::config::{InputConfig, ScanPolicy};
use crate::error::InputError;

/// Keyboard, pointer and gamepad state for one window session
///
/// The host owns the context and drives it once per frame:
///
/// ```text
/// init(backend) ─► update(sampler, dt) ─► queries ─► update ... ─► dispose()
/// ```
///
/// Queries read the state produced by the most recent `update` and never
/// change it. Nothing here is shared between threads.
pub struct InputContext {
    config: InputConfig,
    keyboard: KeyboardState,
    pointer: PointerState,
    gamepads: GamepadRegistry,
    backend: Option<Box<dyn GamepadBackend>>,
    frame: u64,
    last_delta: f32,
}

impl InputContext {
    pub fn new(config: InputConfig) -> Self {
        Self {
            config,
            keyboard: KeyboardState::new(),
            pointer: PointerState::new(),
            gamepads: GamepadRegistry::new(),
            backend: None,
            frame: 0,
            last_delta: 0.0,
        }
    }

    /// Binds the context to a session and runs the first gamepad scan
    pub fn init(&mut self, backend: Box<dyn GamepadBackend>) -> Result<(), InputError> {
        if self.backend.is_some() {
            warn!("Input context initialized twice");
            return Err(InputError::AlreadyInitialized);
        }

        self.keyboard.bind();
        self.keyboard
            .set_text_capture(self.config.keyboard.capture_text)?;

        let backend = self.backend.insert(backend);
        self.gamepads.scan(backend.as_mut());
        self.frame = 0;
        self.last_delta = 0.0;

        info!(
            profile = %self.config.profile,
            backend = backend.backend_name(),
            gamepads = self.gamepads.len(),
            "Input context initialized"
        );
        Ok(())
    }

    /// Advances every device by one frame.
    ///
    /// Reads the key and button images from `sampler`, drains its scroll
    /// and text, then polls gamepads. `delta` is the elapsed time since the
    /// previous frame in seconds; it is only recorded.
    pub fn update(&mut self, sampler: &mut RawSampler, delta: f32) -> Result<(), InputError> {
        let Some(backend) = self.backend.as_deref_mut() else {
            return Err(not_initialized("update"));
        };

        self.frame += 1;
        self.last_delta = delta;

        self.keyboard.update(sampler.keys());
        // Picks up the capture state applied at init
        if sampler.is_capturing_text() != self.keyboard.is_capturing_text() {
            sampler.set_text_capture(self.keyboard.is_capturing_text());
        }
        self.keyboard.receive_text(sampler.pending_text());
        sampler.clear_text();
        self.pointer.update(sampler.pointer_mut());

        backend.poll();
        if self.config.gamepad.scan == ScanPolicy::EveryFrame {
            self.gamepads.scan(backend);
        }
        self.gamepads.update(backend);

        trace!(
            frame = self.frame,
            keys_down = self.keyboard.tracker().activated().count(),
            keys_up = self.keyboard.tracker().deactivated().count(),
            buttons_down = self.pointer.buttons_down(),
            buttons_up = self.pointer.buttons_up(),
            "Input frame"
        );
        Ok(())
    }

    /// Releases every gamepad and unbinds the session. The context can be
    /// initialized again afterwards.
    pub fn dispose(&mut self) {
        let Some(mut backend) = self.backend.take() else {
            debug!("Dispose on an uninitialized input context");
            return;
        };

        self.gamepads.dispose(backend.as_mut());
        self.keyboard.unbind();
        self.pointer.reset();
        info!(frames = self.frame, "Input context disposed");
    }

    pub fn is_initialized(&self) -> bool {
        self.backend.is_some()
    }

    /// Enables or disables text capture on both the keyboard and the event
    /// side. Text arriving while capture is off is never seen, and disabling
    /// drops everything not yet read.
    pub fn set_text_capture(
        &mut self,
        sampler: &mut RawSampler,
        enabled: bool,
    ) -> Result<(), InputError> {
        self.keyboard.set_text_capture(enabled)?;
        sampler.set_text_capture(enabled);
        Ok(())
    }

    /// Reconciles the gamepad list with the hardware now, whatever the scan
    /// policy. Returns true when the list changed.
    pub fn rescan(&mut self) -> Result<bool, InputError> {
        let Some(backend) = self.backend.as_deref_mut() else {
            return Err(not_initialized("rescan"));
        };
        backend.poll();
        Ok(self.gamepads.scan(backend))
    }

    /// Rescans, then lists the gamepads in ascending id order
    pub fn gamepads_rescan(&mut self) -> Result<impl Iterator<Item = &GamepadState>, InputError> {
        self.rescan()?;
        Ok(self.gamepads.iter())
    }

    /// The default gamepad: the connected one with the lowest id
    pub fn gamepad(&self) -> Option<&GamepadState> {
        self.gamepads.default_gamepad()
    }

    pub fn gamepad_at(&self, id: usize) -> Option<&GamepadState> {
        self.gamepads.get(id)
    }

    /// Connected gamepads in ascending id order
    pub fn gamepads(&self) -> impl Iterator<Item = &GamepadState> {
        self.gamepads.iter()
    }

    pub fn gamepad_registry(&self) -> &GamepadRegistry {
        &self.gamepads
    }

    pub fn keyboard(&self) -> &KeyboardState {
        &self.keyboard
    }

    /// Mutable keyboard access, for reading captured text
    pub fn keyboard_mut(&mut self) -> &mut KeyboardState {
        &mut self.keyboard
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// Number of updates since init
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Elapsed time passed to the last update, in seconds
    pub fn last_delta(&self) -> f32 {
        self.last_delta
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    /// Name of the bound gamepad backend
    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.as_ref().map(|b| b.backend_name())
    }
}

impl Drop for InputContext {
    fn drop(&mut self) {
        self.dispose();
    }
}

fn not_initialized(operation: &'static str) -> InputError {
    warn!(operation, "Input context used before init");
    InputError::NotInitialized { operation }
}
