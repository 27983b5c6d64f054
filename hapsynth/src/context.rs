//! This module provides objects to reason about the haptic processing context:
//! the time of the current tick and the rest position of the knob.

use crate::Position;

/// The context a haptic mode runs in for one tick.
///
/// `center` is a read-only view of the owning parameter's current value, not a
/// frozen snapshot: the parameter rebuilds the context every tick, so centered
/// modes always pull toward wherever the parameter logically sits right now.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HapticContext {
    /// Monotonic time of this tick, in milliseconds.  Wraps around.
    pub now_ms: u32,
    /// The owning parameter's raw value
    pub center: Position,
}

impl HapticContext {
    /// Create a new `HapticContext`
    pub const fn new(now_ms: u32, center: Position) -> Self {
        Self { now_ms, center }
    }
    /// Returns true during the second half of each 10ms texture period.
    ///
    /// The phase flips every 5ms, at the points where `now_ms / 5` rounds to
    /// the next integer.
    pub fn texture_phase(&self) -> bool {
        (self.now_ms.wrapping_add(2) / 5) % 2 == 1
    }
}
