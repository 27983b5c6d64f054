//! This crate contains the real-time core of a motorized-knob synthesizer
//! controller.  A single rotary sensor both sets synthesizer parameters and
//! drives a DC motor that simulates the physical feel of the knob (detents,
//! springs, friction, texture and a damped pendulum), while a small polyphonic
//! voice allocator and pitch engine turn note events into oscillator
//! frequencies and envelope triggers.
//!
//! The crate is `no_std` and never allocates.  It does not own any audio DSP
//! or hardware: the synthesis engine and the motor H-bridge are reached through
//! the narrow [engine::SynthEngine] and [motor::MotorDriver] traits, so the
//! firmware (or a test) supplies the actual implementation.
//!
//! Most users will only need the [controller::Controller], which composes the
//! [param::ParamBank], [voicealloc::VoiceAllocator] and [pitch::PitchEngine]
//! and routes knob samples and MIDI events to them.  The individual haptic
//! strategies live in the [haptics] module.

#![no_std]
#![warn(missing_docs)]

#[cfg(test)]
extern crate std;

mod error;
mod float_approx;
pub mod util;

pub mod context;
pub mod controller;
pub mod engine;
pub mod haptics;
pub mod motor;
pub mod param;
pub mod pitch;
pub mod voicealloc;

#[cfg(test)]
mod mock;

pub use controller::Controller;
pub use engine::SynthEngine;
pub use error::ConfigError;
pub use haptics::{Haptic, HapticModeKind};
pub use motor::{Direction, MotorCommand, MotorDriver};
pub use param::{ParamId, Parameter};
pub use pitch::PitchEngine;
pub use voicealloc::{Voice, VoiceAllocator};

/// True if using libm for floating-point math, false if using internal
/// approximation functions
pub const USE_LIBM: bool = cfg!(feature = "libm");

/// A raw knob position as read from the sensor, `0..=POSITION_MAX`
pub type Position = u16;

/// The largest position the sensor reports (10 bit ADC)
pub const POSITION_MAX: Position = 1023;

/// The number of voices in the synthesis voice pool
pub const VOICES: usize = 8;

/// One reading of the knob sensor: the position and whether a finger is on the
/// knob.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KnobSample {
    /// Knob position, always within `0..=POSITION_MAX`
    pub position: Position,
    /// True while the capacitive touch sensor reports contact
    pub touching: bool,
}

impl KnobSample {
    /// Create a new sample, clamping `position` into `0..=POSITION_MAX`
    pub fn new(position: u16, touching: bool) -> Self {
        Self {
            position: position.min(POSITION_MAX),
            touching,
        }
    }
}
