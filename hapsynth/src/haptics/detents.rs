use super::*;
use crate::error::ConfigError;
use crate::util::{rescale, to_magnitude};
use crate::{Position, POSITION_MAX};
use num_traits::float::FloatCore;

/// Distance from a notch, in counts, inside which no force is applied
pub const DETENT_DEAD_ZONE: f32 = 16.0;

/// Evenly spaced notches across the full travel of the knob.
///
/// Outside of a small dead zone the knob is pulled toward the nearest notch,
/// strongest (192) right next to the dead zone and weakening to 64 at the
/// edge of the notch's capture window, which gives the "click" into place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Detents {
    count: u8,
    size: f32,
}

impl Detents {
    /// Create `count` notches.  The first and last notch sit at either end of
    /// travel, so `count` must be at least 2.
    pub fn new(count: u8) -> Result<Self, ConfigError> {
        if count < 2 {
            return Err(ConfigError::TooFewDetents(count));
        }
        Ok(Self {
            count,
            size: (POSITION_MAX as f32 + 1.0) / (count - 1) as f32,
        })
    }
    /// The number of notches
    pub fn count(&self) -> u8 {
        self.count
    }
    /// The distance between two notches
    pub fn size(&self) -> f32 {
        self.size
    }
    /// The notch nearest to `position`
    pub fn notch(&self, position: Position) -> f32 {
        FloatCore::round(position as f32 / self.size) * self.size
    }
}

impl Haptic for Detents {
    fn update(&mut self, _: &HapticContext, sample: KnobSample) -> MotorCommand {
        let position = sample.position as f32;
        let notch = self.notch(sample.position);
        let half = self.size / 2.0;
        let min = (notch - half).clamp(0.0, POSITION_MAX as f32) as i32;
        let max = (notch + half).clamp(0.0, POSITION_MAX as f32) as i32;
        let p = i32::from(sample.position);
        if position > notch + DETENT_DEAD_ZONE {
            MotorCommand::reverse(to_magnitude(rescale(p, notch as i32, max, 192, 64)))
        } else if position < notch - DETENT_DEAD_ZONE {
            MotorCommand::forward(to_magnitude(rescale(p, min, notch as i32, 64, 192)))
        } else {
            MotorCommand::OFF
        }
    }
}
