use super::*;

/// The "Position" haptic mode: a free-spinning knob.  Never applies force.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Free;

impl Haptic for Free {
    fn update(&mut self, _: &HapticContext, _: KnobSample) -> MotorCommand {
        MotorCommand::OFF
    }
}
