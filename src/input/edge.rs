//! Double-buffered edge detection over a fixed signal universe

use std::marker::PhantomData;

use super::bits::{BitVector, SetBits};

/// A discrete input with a dense index in `0..COUNT`
pub trait Signal: Copy + 'static {
    /// Size of the signal universe
    const COUNT: usize;

    /// Dense index of this signal
    fn index(self) -> usize;

    /// Signal for a dense index, `None` outside the universe
    fn from_index(index: usize) -> Option<Self>;
}

/// Button state derived from the current and previous bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ButtonState {
    #[default]
    Released,
    /// Pressed this frame (edge)
    JustPressed,
    /// Held down (multiple frames)
    Pressed,
    /// Released this frame (edge)
    JustReleased,
}

impl ButtonState {
    /// Decodes the `(previous, current)` bit pair
    #[inline]
    pub fn from_bits(previous: bool, current: bool) -> Self {
        match (previous, current) {
            (false, false) => Self::Released,
            (false, true) => Self::JustPressed,
            (true, true) => Self::Pressed,
            (true, false) => Self::JustReleased,
        }
    }

    /// Returns true if button is currently down (just pressed or held)
    pub fn is_down(self) -> bool {
        matches!(self, Self::JustPressed | Self::Pressed)
    }

    /// Returns true if button was just pressed this frame
    pub fn is_just_pressed(self) -> bool {
        matches!(self, Self::JustPressed)
    }

    /// Returns true if button was just released this frame
    pub fn is_just_released(self) -> bool {
        matches!(self, Self::JustReleased)
    }
}

/// Tracks `current` and `previous` bit images for every signal of type `T`.
///
/// Each [`tick`](Self::tick) copies `current` into `previous` and then the
/// fresh sample into `current`. Buffers are copied in place, never swapped,
/// so their addresses stay stable for the tracker's lifetime.
#[derive(Debug, Clone)]
pub struct EdgeTracker<T: Signal> {
    current: BitVector,
    previous: BitVector,
    _signal: PhantomData<fn() -> T>,
}

impl<T: Signal> EdgeTracker<T> {
    /// Creates a tracker with every signal inactive
    pub fn new() -> Self {
        Self {
            current: BitVector::new(T::COUNT),
            previous: BitVector::new(T::COUNT),
            _signal: PhantomData,
        }
    }

    /// Advances one frame using `sample` as the new current image.
    ///
    /// `sample` must not have more words than the tracker's universe.
    #[inline]
    pub fn tick(&mut self, sample: &BitVector) {
        self.previous.copy_from(&self.current);
        self.current.copy_from(sample);
    }

    /// Advances one frame from a native 32-bit button mask
    #[inline]
    pub fn tick_mask(&mut self, mask: u32) {
        self.previous.copy_from(&self.current);
        self.current.set_low_u32(mask);
    }

    /// Forgets both frames
    pub fn reset(&mut self) {
        self.current.clear_all();
        self.previous.clear_all();
    }

    pub fn current(&self) -> &BitVector {
        &self.current
    }

    pub fn previous(&self) -> &BitVector {
        &self.previous
    }

    #[inline]
    pub fn is_active(&self, signal: T) -> bool {
        self.current.get(signal.index())
    }

    #[inline]
    pub fn just_activated(&self, signal: T) -> bool {
        let i = signal.index();
        self.current.get(i) && !self.previous.get(i)
    }

    #[inline]
    pub fn just_deactivated(&self, signal: T) -> bool {
        let i = signal.index();
        self.previous.get(i) && !self.current.get(i)
    }

    #[inline]
    pub fn state(&self, signal: T) -> ButtonState {
        let i = signal.index();
        ButtonState::from_bits(self.previous.get(i), self.current.get(i))
    }

    /// True when any signal is active this frame
    #[inline]
    pub fn any_active(&self) -> bool {
        !self.current.is_empty()
    }

    /// Bit set of 0→1 transitions, `previous.xor_and(current)`
    pub fn just_activated_set(&self) -> BitVector {
        if self.current.is_empty() {
            return BitVector::new(T::COUNT);
        }
        self.previous.xor_and(&self.current)
    }

    /// Bit set of 1→0 transitions, `current.xor_and(previous)`
    pub fn just_deactivated_set(&self) -> BitVector {
        if self.previous.is_empty() {
            return BitVector::new(T::COUNT);
        }
        self.current.xor_and(&self.previous)
    }

    /// Active signals in ascending index order
    pub fn active(&self) -> impl Iterator<Item = T> + '_ {
        self.current.iter().filter_map(T::from_index)
    }

    /// Signals that became active this frame, without allocating
    pub fn activated(&self) -> impl Iterator<Item = T> + '_ {
        let (from, to) = if self.current.is_empty() {
            (&[][..], &[][..])
        } else {
            (self.previous.words(), self.current.words())
        };
        edges::<T>(from, to)
    }

    /// Signals that became inactive this frame, without allocating
    pub fn deactivated(&self) -> impl Iterator<Item = T> + '_ {
        let (from, to) = if self.previous.is_empty() {
            (&[][..], &[][..])
        } else {
            (self.current.words(), self.previous.words())
        };
        edges::<T>(from, to)
    }

    /// Writes active signals into `dst`, returning how many were written
    pub fn active_into(&self, dst: &mut [T]) -> usize {
        fill(dst, self.active())
    }

    /// Writes newly active signals into `dst`, returning how many were written
    pub fn activated_into(&self, dst: &mut [T]) -> usize {
        fill(dst, self.activated())
    }

    /// Writes newly inactive signals into `dst`, returning how many were written
    pub fn deactivated_into(&self, dst: &mut [T]) -> usize {
        fill(dst, self.deactivated())
    }
}

impl<T: Signal> Default for EdgeTracker<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Word-wise `(from ^ to) & to` decoded into signals
fn edges<'a, T: Signal>(from: &'a [u64], to: &'a [u64]) -> impl Iterator<Item = T> + 'a {
    SetBits::new(from.iter().zip(to).map(|(&f, &t)| (f ^ t) & t)).filter_map(T::from_index)
}

fn fill<T>(dst: &mut [T], items: impl Iterator<Item = T>) -> usize {
    let mut written = 0;
    for (slot, item) in dst.iter_mut().zip(items) {
        *slot = item;
        written += 1;
    }
    written
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct Code(usize);

    impl Signal for Code {
        const COUNT: usize = 130;

        fn index(self) -> usize {
            self.0
        }

        fn from_index(index: usize) -> Option<Self> {
            (index < Self::COUNT).then_some(Code(index))
        }
    }

    fn sample(bits: &[usize]) -> BitVector {
        let mut v = BitVector::new(Code::COUNT);
        for &b in bits {
            v.set(b);
        }
        v
    }

    #[test]
    fn test_button_state_predicates() {
        let states = [
            ButtonState::from_bits(false, false),
            ButtonState::from_bits(false, true),
            ButtonState::from_bits(true, true),
            ButtonState::from_bits(true, false),
        ];
        let down: Vec<bool> = states.iter().map(|s| s.is_down()).collect();
        let pressed: Vec<bool> = states.iter().map(|s| s.is_just_pressed()).collect();
        let released: Vec<bool> = states.iter().map(|s| s.is_just_released()).collect();
        assert_eq!(down, [false, true, true, false]);
        assert_eq!(pressed, [false, true, false, false]);
        assert_eq!(released, [false, false, false, true]);
    }

    #[test]
    fn test_untouched_signals_stay_inactive() {
        let mut tracker = EdgeTracker::<Code>::new();
        for _ in 0..5 {
            tracker.tick(&sample(&[1]));
            let idle = Code(100);
            assert!(!tracker.is_active(idle));
            assert!(!tracker.just_activated(idle));
            assert!(!tracker.just_deactivated(idle));
        }
    }

    #[test]
    fn test_press_then_release() {
        let mut tracker = EdgeTracker::<Code>::new();
        let key = Code(70);

        tracker.tick(&sample(&[70]));
        assert!(tracker.is_active(key));
        assert!(tracker.just_activated(key));
        assert_eq!(tracker.state(key), ButtonState::JustPressed);

        tracker.tick(&sample(&[]));
        assert!(!tracker.is_active(key));
        assert!(!tracker.just_activated(key));
        assert!(tracker.just_deactivated(key));
        assert_eq!(tracker.state(key), ButtonState::JustReleased);
    }

    #[test]
    fn test_hold_is_not_an_edge() {
        let mut tracker = EdgeTracker::<Code>::new();
        tracker.tick(&sample(&[5]));
        tracker.tick(&sample(&[5]));
        assert_eq!(tracker.state(Code(5)), ButtonState::Pressed);
        assert_eq!(tracker.activated().count(), 0);
        assert_eq!(tracker.deactivated().count(), 0);
    }

    #[test]
    fn test_bulk_edges_match_xor_and() {
        let mut tracker = EdgeTracker::<Code>::new();
        tracker.tick(&sample(&[1, 2, 3]));
        tracker.tick(&sample(&[2, 3, 4, 129]));

        let pressed: Vec<_> = tracker.activated().collect();
        let released: Vec<_> = tracker.deactivated().collect();
        assert_eq!(pressed, vec![Code(4), Code(129)]);
        assert_eq!(released, vec![Code(1)]);

        let set: Vec<_> = tracker.just_activated_set().iter().collect();
        assert_eq!(set, vec![4, 129]);
        let set: Vec<_> = tracker.just_deactivated_set().iter().collect();
        assert_eq!(set, vec![1]);
    }

    #[test]
    fn test_bulk_extraction_is_idempotent_within_a_frame() {
        let mut tracker = EdgeTracker::<Code>::new();
        tracker.tick(&sample(&[9, 64]));

        let mut first = [Code(0); 4];
        let mut second = [Code(0); 4];
        let n1 = tracker.activated_into(&mut first);
        let n2 = tracker.activated_into(&mut second);
        assert_eq!(n1, 2);
        assert_eq!(&first[..n1], &second[..n2]);
    }

    #[test]
    fn test_empty_frames_short_circuit() {
        let mut tracker = EdgeTracker::<Code>::new();
        tracker.tick(&sample(&[]));
        assert!(tracker.just_activated_set().is_empty());
        assert!(tracker.just_deactivated_set().is_empty());
        assert!(!tracker.any_active());
    }

    #[test]
    fn test_tick_mask() {
        let mut tracker = EdgeTracker::<Code>::new();
        tracker.tick_mask(0b011);
        tracker.tick_mask(0b110);
        assert!(tracker.just_activated(Code(2)));
        assert!(tracker.just_deactivated(Code(0)));
        assert_eq!(tracker.state(Code(1)), ButtonState::Pressed);
    }

    #[test]
    fn test_reset_clears_both_frames() {
        let mut tracker = EdgeTracker::<Code>::new();
        tracker.tick(&sample(&[3]));
        tracker.reset();
        assert_eq!(tracker.state(Code(3)), ButtonState::Released);
        assert!(tracker.previous().is_empty());
    }
}
