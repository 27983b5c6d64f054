//! Recording stand-ins for the synthesis engine and the motor driver

use crate::param::{ParamId, PARAM_COUNT};
use crate::{Direction, MotorDriver, SynthEngine, VOICES};

/// Amplitude envelopes stay active after their gate closes until
/// [MockEngine::finish_release] is called, like a real release tail.
#[derive(Default)]
pub(crate) struct MockEngine {
    pub osc: [f32; VOICES],
    pub sub: [f32; VOICES],
    pub amp_gate: [bool; VOICES],
    pub filt_gate: [bool; VOICES],
    pub active: [bool; VOICES],
    pub params: [Option<f32>; PARAM_COUNT],
    pub param_writes: usize,
}

impl MockEngine {
    pub fn finish_release(&mut self, voice: usize) {
        if !self.amp_gate[voice] {
            self.active[voice] = false;
        }
    }
    pub fn param(&self, id: ParamId) -> Option<f32> {
        self.params[id as usize]
    }
}

impl SynthEngine for MockEngine {
    fn set_oscillator_frequency(&mut self, voice: usize, hz: f32) {
        self.osc[voice] = hz;
    }
    fn set_sub_oscillator_frequency(&mut self, voice: usize, hz: f32) {
        self.sub[voice] = hz;
    }
    fn amp_envelope_on(&mut self, voice: usize) {
        self.amp_gate[voice] = true;
        self.active[voice] = true;
    }
    fn amp_envelope_off(&mut self, voice: usize) {
        self.amp_gate[voice] = false;
    }
    fn filter_envelope_on(&mut self, voice: usize) {
        self.filt_gate[voice] = true;
    }
    fn filter_envelope_off(&mut self, voice: usize) {
        self.filt_gate[voice] = false;
    }
    fn is_envelope_active(&self, voice: usize) -> bool {
        self.active[voice]
    }
    fn set_param(&mut self, param: ParamId, value: f32) {
        self.params[param as usize] = Some(value);
        self.param_writes += 1;
    }
}

#[derive(Default)]
pub(crate) struct MockMotor {
    pub last: Option<(Direction, u8)>,
    pub stops: usize,
}

impl MotorDriver for MockMotor {
    fn drive(&mut self, direction: Direction, magnitude: u8) {
        self.last = Some((direction, magnitude));
    }
    fn stop(&mut self) {
        self.last = None;
        self.stops += 1;
    }
}
