//! This module contains the haptic modes: strategies that turn a knob sample
//! into a motor command to simulate a physical feel.
//!
//! Every parameter owns one instance of each of the six modes in a
//! [HapticModes] table, so switching modes keeps each mode's internal state
//! (smoothing estimates, pendulum swing) intact.

use crate::context::HapticContext;
use crate::error::ConfigError;
use crate::motor::MotorCommand;
use crate::KnobSample;

mod detents;
mod elasticity;
mod free;
mod friction;
mod oscillation;
mod smoothing;
mod texture;

pub use detents::Detents;
pub use elasticity::Elasticity;
pub use free::Free;
pub use friction::Friction;
pub use oscillation::Oscillation;
pub use smoothing::{SmoothedFxP, Smoother};
pub use texture::Texture;

/// A haptic mode
///
/// This is the central abstraction of this module.  A haptic mode is called at
/// a fixed, externally driven rate with the latest knob sample and returns the
/// force the motor should apply until the next tick.  Modes may keep state
/// between ticks, but never block.
pub trait Haptic {
    /// Within the provided `context`, process one `sample` and return the
    /// motor command for this tick.
    fn update(&mut self, context: &HapticContext, sample: KnobSample) -> MotorCommand;
}

/// Names one of the six haptic modes.  The discriminant is the mode's index in
/// a [HapticModes] table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum HapticModeKind {
    /// A free-spinning knob with no force feedback
    #[default]
    Position = 0,
    /// Notches the knob snaps into
    Detents = 1,
    /// Ratchet/sandpaper vibration while turning
    Texture = 2,
    /// Resistance while turning
    Friction = 3,
    /// A spring back to the parameter's value
    Elasticity = 4,
    /// A damped pendulum around the parameter's value
    Oscillation = 5,
}

/// The number of haptic modes
pub const HAPTIC_MODE_COUNT: usize = 6;

impl HapticModeKind {
    /// Every mode, in table order
    pub const ALL: [Self; HAPTIC_MODE_COUNT] = [
        Self::Position,
        Self::Detents,
        Self::Texture,
        Self::Friction,
        Self::Elasticity,
        Self::Oscillation,
    ];
    /// Human readable name
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Position => "Position",
            Self::Detents => "Detents",
            Self::Texture => "Texture",
            Self::Friction => "Friction",
            Self::Elasticity => "Elasticity",
            Self::Oscillation => "Oscillation",
        }
    }
    /// Index of this mode in a [HapticModes] table
    pub const fn index(self) -> usize {
        self as usize
    }
    /// True for the modes that pull the knob back toward the parameter's
    /// value.  In these modes turning the knob does not change the value.
    pub const fn is_centered(self) -> bool {
        matches!(self, Self::Elasticity | Self::Oscillation)
    }
}

impl TryFrom<u8> for HapticModeKind {
    type Error = ConfigError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .get(value as usize)
            .copied()
            .ok_or(ConfigError::UnknownHapticMode(value))
    }
}

/// One concrete haptic mode
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum HapticMode {
    /// See [HapticModeKind::Position]
    Position(Free),
    /// See [HapticModeKind::Detents]
    Detents(Detents),
    /// See [HapticModeKind::Texture]
    Texture(Texture),
    /// See [HapticModeKind::Friction]
    Friction(Friction),
    /// See [HapticModeKind::Elasticity]
    Elasticity(Elasticity),
    /// See [HapticModeKind::Oscillation]
    Oscillation(Oscillation),
}

impl HapticMode {
    /// Which mode this is
    pub const fn kind(&self) -> HapticModeKind {
        match self {
            Self::Position(_) => HapticModeKind::Position,
            Self::Detents(_) => HapticModeKind::Detents,
            Self::Texture(_) => HapticModeKind::Texture,
            Self::Friction(_) => HapticModeKind::Friction,
            Self::Elasticity(_) => HapticModeKind::Elasticity,
            Self::Oscillation(_) => HapticModeKind::Oscillation,
        }
    }
}

impl Haptic for HapticMode {
    fn update(&mut self, context: &HapticContext, sample: KnobSample) -> MotorCommand {
        match self {
            Self::Position(m) => m.update(context, sample),
            Self::Detents(m) => m.update(context, sample),
            Self::Texture(m) => m.update(context, sample),
            Self::Friction(m) => m.update(context, sample),
            Self::Elasticity(m) => m.update(context, sample),
            Self::Oscillation(m) => m.update(context, sample),
        }
    }
}

/// The per-parameter table of all six haptic modes, plus which one is active.
///
/// Entry `i` always holds the mode whose [HapticModeKind::index] is `i`.
#[derive(Clone, Debug, PartialEq)]
pub struct HapticModes {
    modes: [HapticMode; HAPTIC_MODE_COUNT],
    active: HapticModeKind,
}

impl HapticModes {
    /// Build the table with `detents` notches for the detent mode.  The
    /// [HapticModeKind::Position] mode starts active.
    pub fn new(detents: u8) -> Result<Self, ConfigError> {
        Ok(Self {
            modes: [
                HapticMode::Position(Free),
                HapticMode::Detents(Detents::new(detents)?),
                HapticMode::Texture(Texture::default()),
                HapticMode::Friction(Friction::default()),
                HapticMode::Elasticity(Elasticity),
                HapticMode::Oscillation(Oscillation::default()),
            ],
            active: HapticModeKind::Position,
        })
    }
    /// The active mode
    pub fn active(&self) -> HapticModeKind {
        self.active
    }
    /// Make `kind` the active mode.  No mode's state is reset.
    pub fn select(&mut self, kind: HapticModeKind) {
        self.active = kind;
    }
    /// Look up one mode of the table
    pub fn get(&self, kind: HapticModeKind) -> &HapticMode {
        &self.modes[kind.index()]
    }
}

impl Haptic for HapticModes {
    fn update(&mut self, context: &HapticContext, sample: KnobSample) -> MotorCommand {
        self.modes[self.active.index()].update(context, sample)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_indexed_by_kind() {
        let modes = HapticModes::new(5).unwrap();
        for kind in HapticModeKind::ALL {
            assert_eq!(modes.get(kind).kind(), kind);
        }
        assert_eq!(modes.active(), HapticModeKind::Position);
    }
    #[test]
    fn table_rejects_single_detent() {
        assert_eq!(HapticModes::new(1), Err(ConfigError::TooFewDetents(1)));
    }
    #[test]
    fn kind_from_u8() {
        assert_eq!(HapticModeKind::try_from(4), Ok(HapticModeKind::Elasticity));
        assert_eq!(
            HapticModeKind::try_from(6),
            Err(ConfigError::UnknownHapticMode(6))
        );
    }
    #[test]
    fn dispatches_to_active_mode() {
        let mut modes = HapticModes::new(5).unwrap();
        let context = HapticContext::new(0, 512);
        let sample = KnobSample::new(300, false);
        assert!(modes.update(&context, sample).is_off());
        modes.select(HapticModeKind::Detents);
        assert_eq!(
            modes.update(&context, sample),
            MotorCommand::reverse(148)
        );
    }
    #[test]
    fn switching_preserves_mode_state() {
        let mut modes = HapticModes::new(5).unwrap();
        let context = HapticContext::new(0, 512);
        modes.select(HapticModeKind::Texture);
        for _ in 0..50 {
            modes.update(&context, KnobSample::new(700, true));
        }
        let before = *modes.get(HapticModeKind::Texture);
        modes.select(HapticModeKind::Friction);
        modes.update(&context, KnobSample::new(10, true));
        modes.select(HapticModeKind::Texture);
        assert_eq!(modes.get(HapticModeKind::Texture), &before);
    }
}
