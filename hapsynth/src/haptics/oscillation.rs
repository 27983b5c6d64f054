use super::*;
use crate::util::{rescale, to_magnitude};
use crate::POSITION_MAX;
use num_traits::float::FloatCore;

/// Swing amplitude, in counts, at or below which the pendulum comes to rest
pub const OSCILLATION_REST: f32 = 8.0;

/// How close to either end of travel the swing is reversed
pub const OSCILLATION_LIMIT: u16 = 8;

/// A damped pendulum around the parameter's value.
///
/// While held, the knob moves freely and the distance from the center is
/// recorded as the swing amplitude.  Once released, the motor throws the knob
/// back through the center; whenever it overshoots the center by the current
/// amplitude (or nears either end of travel) the direction flips and the
/// amplitude is damped, until the swing dies out.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Oscillation {
    direction: i8,
    displacement: f32,
    damping: f32,
}

impl Default for Oscillation {
    fn default() -> Self {
        Self::new(0.75)
    }
}

impl Oscillation {
    /// Create a new pendulum at rest that keeps `damping` of its amplitude on
    /// every reversal
    pub fn new(damping: f32) -> Self {
        Self {
            direction: 0,
            displacement: 0.0,
            damping: damping.clamp(0.0, 1.0),
        }
    }
    /// The current swing amplitude, in counts
    pub fn displacement(&self) -> f32 {
        self.displacement
    }
    /// True while the pendulum is still swinging
    pub fn is_swinging(&self) -> bool {
        self.displacement > OSCILLATION_REST
    }
    fn reverse(&mut self, direction: i8) {
        self.direction = direction;
        self.displacement *= self.damping;
    }
}

impl Haptic for Oscillation {
    fn update(&mut self, context: &HapticContext, sample: KnobSample) -> MotorCommand {
        let center = context.center.min(POSITION_MAX) as f32;
        let position = sample.position as f32;
        if sample.touching {
            self.displacement = FloatCore::abs(position - center);
            self.direction = if position > center { 1 } else { -1 };
            return MotorCommand::OFF;
        }
        if !self.is_swinging() {
            return MotorCommand::OFF;
        }
        if self.direction > 0 {
            if position < center - self.displacement || sample.position < OSCILLATION_LIMIT {
                self.reverse(-1);
            }
        } else if self.direction < 0
            && (position > center + self.displacement
                || sample.position > POSITION_MAX - OSCILLATION_LIMIT)
        {
            self.reverse(1);
        }
        let speed = to_magnitude(rescale(
            self.displacement as i32,
            0,
            i32::from(POSITION_MAX),
            64,
            255,
        ));
        match self.direction {
            d if d > 0 => MotorCommand::reverse(speed),
            d if d < 0 => MotorCommand::forward(speed),
            _ => MotorCommand::OFF,
        }
    }
}
