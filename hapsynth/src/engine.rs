//! The capability this crate needs from the synthesis engine.
//!
//! The audio graph itself (oscillators, mixers, filters, envelopes, effects)
//! is out of scope; the controller only tunes voices, gates their envelopes,
//! asks whether a voice is still audible and pushes mapped parameter values.

use crate::param::ParamId;

/// A polyphonic synthesis engine with [crate::VOICES] voices, each with a main
/// oscillator, a sub oscillator, an amplitude envelope and a filter envelope.
///
/// Voice indices passed to these methods are always `< VOICES`.
pub trait SynthEngine {
    /// Set the main oscillator frequency of `voice`, in Hz
    fn set_oscillator_frequency(&mut self, voice: usize, hz: f32);
    /// Set the sub oscillator frequency of `voice`, in Hz
    fn set_sub_oscillator_frequency(&mut self, voice: usize, hz: f32);
    /// Open the gate of the amplitude envelope of `voice`
    fn amp_envelope_on(&mut self, voice: usize);
    /// Close the gate of the amplitude envelope of `voice` (begin release)
    fn amp_envelope_off(&mut self, voice: usize);
    /// Open the gate of the filter envelope of `voice`
    fn filter_envelope_on(&mut self, voice: usize);
    /// Close the gate of the filter envelope of `voice`
    fn filter_envelope_off(&mut self, voice: usize);
    /// True while the amplitude envelope of `voice` is still producing output,
    /// including during its release stage
    fn is_envelope_active(&self, voice: usize) -> bool;
    /// Apply the mapped value of a knob parameter.  See [ParamId] for the
    /// unit of each parameter.
    fn set_param(&mut self, param: ParamId, value: f32);
}
