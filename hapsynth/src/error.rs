use core::fmt;

/// Errors detected while building the controller at startup.
///
/// None of the runtime operations in this crate can fail; every error here is
/// a configuration mistake that should stop the firmware before the first
/// knob tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A detent haptic mode needs at least two notches.  Contains the count
    /// that was requested.
    TooFewDetents(u8),
    /// A parameter default lies outside of `0..=POSITION_MAX`
    DefaultOutOfRange(u16),
    /// The parameter table is not ordered by [crate::ParamId].  Contains the
    /// table index that was out of place.
    MisorderedParamTable(usize),
    /// A numeric haptic mode did not name one of the six modes
    UnknownHapticMode(u8),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TooFewDetents(n) => write!(f, "detent mode needs at least 2 notches, got {}", n),
            Self::DefaultOutOfRange(v) => write!(f, "parameter default {} out of range", v),
            Self::MisorderedParamTable(i) => write!(f, "parameter table entry {} out of order", i),
            Self::UnknownHapticMode(m) => write!(f, "unknown haptic mode {}", m),
        }
    }
}
