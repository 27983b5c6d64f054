use super::*;
use crate::util::to_magnitude;

/// Velocity below which the knob turns freely, in counts per tick relative to
/// the smoothed position
pub const FRICTION_THRESHOLD: i32 = 2;

/// Resistance against turning the knob while it is held.
///
/// The resisting force is strongest for slow movements and fades as the knob
/// is spun faster, like static friction breaking loose.  The smoothed position
/// keeps tracking while the knob is released.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Friction {
    smoother: Smoother,
}

impl Friction {
    /// The smoothed position estimate
    pub fn smoother(&self) -> &Smoother {
        &self.smoother
    }
}

impl Haptic for Friction {
    fn update(&mut self, _: &HapticContext, sample: KnobSample) -> MotorCommand {
        let velocity = self.smoother.advance(sample.position);
        if !sample.touching {
            return MotorCommand::OFF;
        }
        let resistance = to_magnitude(255 - velocity.abs().min(255));
        if velocity > FRICTION_THRESHOLD {
            MotorCommand::reverse(resistance)
        } else if velocity < -FRICTION_THRESHOLD {
            MotorCommand::forward(resistance)
        } else {
            MotorCommand::OFF
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;

    fn settled(position: u16) -> Friction {
        let mut friction = Friction::default();
        for _ in 0..5000 {
            friction.update(&HapticContext::default(), KnobSample::new(position, true));
        }
        friction
    }

    #[test]
    fn opposes_motion() {
        let mut friction = settled(500);
        let up = friction.update(&HapticContext::default(), KnobSample::new(510, true));
        assert_eq!(up.direction(), Direction::Reverse);
        assert!((245..=246).contains(&up.magnitude()));
        let mut friction = settled(500);
        let down = friction.update(&HapticContext::default(), KnobSample::new(490, true));
        assert_eq!(down.direction(), Direction::Forward);
        assert!((245..=246).contains(&down.magnitude()));
    }
    #[test]
    fn slow_motion_is_free() {
        let mut friction = settled(500);
        let cmd = friction.update(&HapticContext::default(), KnobSample::new(502, true));
        assert!(cmd.is_off());
    }
    #[test]
    fn released_is_off_but_keeps_tracking() {
        let mut friction = settled(500);
        let before = *friction.smoother();
        let cmd = friction.update(&HapticContext::default(), KnobSample::new(900, false));
        assert!(cmd.is_off());
        assert_ne!(*friction.smoother(), before);
    }
    #[test]
    fn fast_spin_fades_out() {
        let mut friction = Friction::default();
        let cmd = friction.update(&HapticContext::default(), KnobSample::new(800, true));
        assert_eq!(cmd, MotorCommand::reverse(0));
    }
}
