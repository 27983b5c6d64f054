//! Motor drive commands and the H-bridge capability they are applied to.

/// Which way the motor pushes the knob.
///
/// `Forward` turns the knob toward higher positions and `Reverse` toward lower
/// positions.  On the reference hardware `Reverse` is `IN1` low / `IN2` high.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Direction {
    /// Drive toward `POSITION_MAX`
    Forward,
    /// Drive toward zero
    Reverse,
    /// Coast, no force applied
    #[default]
    Off,
}

/// A single motor command, produced once per haptic tick and consumed
/// immediately.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MotorCommand {
    direction: Direction,
    magnitude: u8,
}

impl MotorCommand {
    /// No force
    pub const OFF: Self = Self {
        direction: Direction::Off,
        magnitude: 0,
    };
    /// Push toward higher positions with PWM duty `magnitude`
    pub const fn forward(magnitude: u8) -> Self {
        Self {
            direction: Direction::Forward,
            magnitude,
        }
    }
    /// Push toward lower positions with PWM duty `magnitude`
    pub const fn reverse(magnitude: u8) -> Self {
        Self {
            direction: Direction::Reverse,
            magnitude,
        }
    }
    /// The direction of this command
    pub const fn direction(&self) -> Direction {
        self.direction
    }
    /// The PWM duty of this command.  Always zero when [Self::is_off].
    pub const fn magnitude(&self) -> u8 {
        self.magnitude
    }
    /// True if no force is applied
    pub fn is_off(&self) -> bool {
        self.direction == Direction::Off
    }
    /// Send this command to a motor driver
    pub fn apply<M: MotorDriver + ?Sized>(&self, motor: &mut M) {
        match self.direction {
            Direction::Off => motor.stop(),
            dir => motor.drive(dir, self.magnitude),
        }
    }
}

/// The capability required of the motor H-bridge driver.
pub trait MotorDriver {
    /// Set the bridge direction pins and the PWM duty.  `direction` is never
    /// [Direction::Off].
    fn drive(&mut self, direction: Direction, magnitude: u8);
    /// Set the PWM duty to zero
    fn stop(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::MockMotor;
    #[test]
    fn apply_routes_off_to_stop() {
        let mut motor = MockMotor::default();
        MotorCommand::OFF.apply(&mut motor);
        assert_eq!(motor.stops, 1);
        assert_eq!(motor.last, None);
        MotorCommand::reverse(120).apply(&mut motor);
        assert_eq!(motor.last, Some((Direction::Reverse, 120)));
        assert_eq!(motor.stops, 1);
    }
}
