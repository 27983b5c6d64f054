//! Note to frequency conversion under global pitch bend and octave shift.

use crate::SynthEngine;

/// The MIDI note number of A440
pub const A4: u8 = 69;
/// Frequency of [A4], in Hz
pub const A4_FREQ: f32 = 440.0;
/// Pitch bend value at full deflection (14 bit MIDI, centered on zero)
pub const PITCH_BEND_FULL_SCALE: i16 = 8192;
/// Pitch bend at full deflection, in semitones
pub const PITCH_BEND_RANGE: f32 = 2.0;

/// Returns 2^x, using libm or the internal approximation depending on the
/// `libm` feature
pub(crate) fn exp2(x: f32) -> f32 {
    #[cfg(not(feature = "libm"))]
    let ret = crate::float_approx::exp2_approx(x);
    #[cfg(feature = "libm")]
    let ret = <f32 as num_traits::Float>::exp2(x);
    ret
}

/// Convert a (fractional) MIDI note number to a frequency in Hz
pub fn midi_note_to_frequency(note: f32) -> f32 {
    A4_FREQ * exp2((note - A4 as f32) / 12.0)
}

/// The frequency of `note` with `pitch_bend` (±8192 for ±2 semitones) and an
/// octave shift of `octave` applied:
///
/// ```text
/// f = 440 * 2^((note + bend/8192 * 2 + octave * 12 - 69) / 12)
/// ```
pub fn frequency(note: u8, pitch_bend: i16, octave: f32) -> f32 {
    let bend = pitch_bend as f32 / PITCH_BEND_FULL_SCALE as f32 * PITCH_BEND_RANGE;
    midi_note_to_frequency(note as f32 + bend + octave * 12.0)
}

/// Holds the global pitch state shared by every voice and retunes voices on
/// the synthesis engine.
///
/// Frequencies are a pure function of (note, bend, octave) and recomputed
/// instantly - there is no portamento.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PitchEngine {
    pitch_bend: i16,
    octave: f32,
}

impl PitchEngine {
    /// Create a new `PitchEngine` with the bend centered and no octave shift
    pub const fn new() -> Self {
        Self {
            pitch_bend: 0,
            octave: 0.0,
        }
    }
    /// The current pitch bend, in `-8192..=8191`
    pub fn pitch_bend(&self) -> i16 {
        self.pitch_bend
    }
    /// Set the pitch bend.  Values are clamped to `-8192..=8191`.
    pub fn set_pitch_bend(&mut self, value: i16) {
        self.pitch_bend = value.clamp(-PITCH_BEND_FULL_SCALE, PITCH_BEND_FULL_SCALE - 1);
    }
    /// The current octave shift
    pub fn octave(&self) -> f32 {
        self.octave
    }
    /// Set the octave shift, in octaves.  Fractional values detune.
    pub fn set_octave(&mut self, octave: f32) {
        self.octave = octave;
    }
    /// The frequency `note` should currently sound at, in Hz
    pub fn frequency(&self, note: u8) -> f32 {
        frequency(note, self.pitch_bend, self.octave)
    }
    /// Tune the main and sub oscillators of `voice` to `note`.  The sub
    /// oscillator always sits exactly one octave below.
    pub fn retune<E: SynthEngine + ?Sized>(&self, engine: &mut E, voice: usize, note: u8) {
        let freq = self.frequency(note);
        engine.set_oscillator_frequency(voice, freq);
        engine.set_sub_oscillator_frequency(voice, freq / 2.0);
    }
}
