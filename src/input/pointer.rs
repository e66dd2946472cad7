//! Pointer (mouse) position, scroll and button state

use glam::Vec2;

use super::edge::{ButtonState, EdgeTracker, Signal};

/// Pointer button code in `0..32`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct MouseButton(pub u8);

impl MouseButton {
    pub const LEFT: MouseButton = MouseButton(0);
    pub const RIGHT: MouseButton = MouseButton(1);
    pub const MIDDLE: MouseButton = MouseButton(2);
    pub const BACK: MouseButton = MouseButton(3);
    pub const FORWARD: MouseButton = MouseButton(4);

    pub fn new(code: u8) -> Option<MouseButton> {
        Self::from_index(code as usize)
    }

    #[inline]
    pub fn mask(self) -> u32 {
        1 << self.0
    }
}

impl Signal for MouseButton {
    const COUNT: usize = 32;

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }

    #[inline]
    fn from_index(index: usize) -> Option<Self> {
        (index < Self::COUNT).then(|| MouseButton(index as u8))
    }
}

/// Pointer input as accumulated by the event source between two frames
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerSample {
    /// Latest absolute position
    pub position: Vec2,
    /// Sum of all scroll deltas since the last frame
    pub scroll: Vec2,
    /// Buttons currently down, one bit per button code
    pub buttons: u32,
}

/// Pointer state for the current frame
#[derive(Debug, Clone, Default)]
pub struct PointerState {
    position: Vec2,
    previous: Vec2,
    scroll: Vec2,
    buttons: EdgeTracker<MouseButton>,
}

impl PointerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advances one frame. Takes the sample's scroll accumulator, leaving it
    /// at zero for the next frame.
    pub fn update(&mut self, sample: &mut PointerSample) {
        self.previous = self.position;
        self.position = sample.position;
        self.scroll = std::mem::take(&mut sample.scroll);
        self.buttons.tick_mask(sample.buttons);
    }

    /// Forgets buttons, movement and scroll; the position is kept
    pub fn reset(&mut self) {
        self.previous = self.position;
        self.scroll = Vec2::ZERO;
        self.buttons.reset();
    }

    /// Position sampled this frame
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Position change since the previous frame
    pub fn movement(&self) -> Vec2 {
        self.position - self.previous
    }

    /// Scroll accumulated over the last frame. The y component is usually the
    /// meaningful one.
    pub fn scroll(&self) -> Vec2 {
        self.scroll
    }

    pub fn pressed(&self, button: MouseButton) -> bool {
        self.buttons.is_active(button)
    }

    pub fn just_pressed(&self, button: MouseButton) -> bool {
        self.buttons.just_activated(button)
    }

    pub fn just_released(&self, button: MouseButton) -> bool {
        self.buttons.just_deactivated(button)
    }

    pub fn state(&self, button: MouseButton) -> ButtonState {
        self.buttons.state(button)
    }

    /// Bit mask of buttons held down
    pub fn buttons(&self) -> u32 {
        self.buttons.current().low_u32()
    }

    /// Bit mask of buttons pressed this frame
    pub fn buttons_down(&self) -> u32 {
        let (now, before) = (self.buttons(), self.buttons.previous().low_u32());
        (now ^ before) & now
    }

    /// Bit mask of buttons released this frame
    pub fn buttons_up(&self) -> u32 {
        let (now, before) = (self.buttons(), self.buttons.previous().low_u32());
        (now ^ before) & before
    }

    pub fn pressed_buttons(&self) -> impl Iterator<Item = MouseButton> + '_ {
        self.buttons.active()
    }

    pub fn just_pressed_buttons(&self) -> impl Iterator<Item = MouseButton> + '_ {
        self.buttons.activated()
    }

    pub fn just_released_buttons(&self) -> impl Iterator<Item = MouseButton> + '_ {
        self.buttons.deactivated()
    }

    pub fn tracker(&self) -> &EdgeTracker<MouseButton> {
        &self.buttons
    }
}
