use super::*;
use crate::util::{rescale, to_magnitude};
use crate::POSITION_MAX;

/// Deviation from center, in counts, inside which no force is applied
pub const ELASTICITY_DEAD_ZONE: i32 = 8;

/// A spring pulling the knob back to the parameter's value.
///
/// The force grows linearly from 64 just outside the dead zone to full scale
/// at the end of travel on that side of the center.  The center comes from
/// [HapticContext::center], so the spring always returns to wherever the
/// parameter currently sits.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Elasticity;

impl Haptic for Elasticity {
    fn update(&mut self, context: &HapticContext, sample: KnobSample) -> MotorCommand {
        let center = i32::from(context.center.min(POSITION_MAX));
        let deviation = i32::from(sample.position) - center;
        if deviation > ELASTICITY_DEAD_ZONE {
            let travel = i32::from(POSITION_MAX) - center;
            MotorCommand::reverse(to_magnitude(rescale(deviation, 0, travel, 64, 256)))
        } else if deviation < -ELASTICITY_DEAD_ZONE {
            MotorCommand::forward(to_magnitude(rescale(-deviation, 0, center, 64, 256)))
        } else {
            MotorCommand::OFF
        }
    }
}
