use fixed::types::I16F16;

use crate::Position;

/// Fixed-point representation of a smoothed knob position
pub type SmoothedFxP = I16F16;

const DECAY: SmoothedFxP = SmoothedFxP::lit("0.99");
const GAIN: SmoothedFxP = SmoothedFxP::lit("0.01");

/// A one-pole lowpass over the knob position, advanced once per tick.
///
/// The estimate starts at zero, not at the first reading, so a knob resting
/// far from zero reads as moving until the estimate catches up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Smoother {
    estimate: SmoothedFxP,
}

impl Smoother {
    /// The current smoothed position
    pub fn estimate(&self) -> SmoothedFxP {
        self.estimate
    }
    /// Return how far `position` sits from the estimate (truncated toward
    /// zero), then fold `position` into the estimate.
    pub fn advance(&mut self, position: Position) -> i32 {
        let pos = SmoothedFxP::from_num(position);
        let delta = pos - self.estimate;
        self.estimate = self.estimate * DECAY + pos * GAIN;
        let magnitude = delta.abs().to_num::<i32>();
        if delta.is_negative() {
            -magnitude
        } else {
            magnitude
        }
    }
}
