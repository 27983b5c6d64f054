use super::*;
use crate::util::to_magnitude;

/// A ratchet/sandpaper feel.
///
/// While the knob moves away from its smoothed position, the motor buzzes
/// back and forth with a 10ms period, harder the faster the knob moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Texture {
    smoother: Smoother,
}

impl Texture {
    /// The smoothed position estimate
    pub fn smoother(&self) -> &Smoother {
        &self.smoother
    }
}

impl Haptic for Texture {
    fn update(&mut self, context: &HapticContext, sample: KnobSample) -> MotorCommand {
        let distance = self.smoother.advance(sample.position).abs();
        if distance <= 1 {
            return MotorCommand::OFF;
        }
        let vibration = to_magnitude((distance * 4).clamp(32, 255));
        if context.texture_phase() {
            MotorCommand::reverse(vibration)
        } else {
            MotorCommand::forward(vibration)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Direction;

    fn settled(position: u16) -> Texture {
        let mut texture = Texture::default();
        let context = HapticContext::default();
        for _ in 0..5000 {
            texture.update(&context, KnobSample::new(position, true));
        }
        texture
    }

    #[test]
    fn resting_knob_is_quiet() {
        let mut texture = settled(400);
        let cmd = texture.update(&HapticContext::new(3, 0), KnobSample::new(400, true));
        assert!(cmd.is_off());
    }
    #[test]
    fn moving_knob_vibrates_with_timer() {
        let mut texture = settled(400);
        let first = texture.update(&HapticContext::new(0, 0), KnobSample::new(410, true));
        assert_eq!(first.direction(), Direction::Forward);
        // 4x the ~10 count distance from the smoothed position
        assert!((36..=40).contains(&first.magnitude()));
        let second = texture.update(&HapticContext::new(5, 0), KnobSample::new(410, true));
        assert_eq!(second.direction(), Direction::Reverse);
    }
    #[test]
    fn vibration_is_clamped() {
        let mut texture = settled(400);
        let small = texture.update(&HapticContext::new(0, 0), KnobSample::new(403, true));
        assert_eq!(small.magnitude(), 32);
        let mut texture = settled(0);
        let big = texture.update(&HapticContext::new(0, 0), KnobSample::new(1000, true));
        assert_eq!(big.magnitude(), 255);
    }
    #[test]
    fn smoothed_estimate_stabilizes() {
        let mut texture = Texture::default();
        let context = HapticContext::default();
        for _ in 0..5000 {
            texture.update(&context, KnobSample::new(700, false));
        }
        let estimate = texture.smoother().estimate();
        texture.update(&context, KnobSample::new(700, false));
        assert_eq!(texture.smoother().estimate(), estimate);
    }
}
