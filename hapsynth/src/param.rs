//! Knob parameters: the raw value each parameter holds, its haptic modes, and
//! the curve mapping the raw value onto a synthesis engine setting.

use arrayvec::ArrayVec;

use crate::context::HapticContext;
use crate::error::ConfigError;
use crate::haptics::{Haptic, HapticModeKind, HapticModes};
use crate::motor::MotorCommand;
use crate::{KnobSample, Position, POSITION_MAX};

/// Maps a raw knob value onto an engine setting
pub type Mapping = fn(Position) -> f32;

/// Identifies one of the knob parameters.  The discriminant is the
/// parameter's index in [PARAM_SPECS].
///
/// The documentation of each variant gives the unit of the value passed to
/// [crate::SynthEngine::set_param] by the default mapping.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ParamId {
    /// Octave shift applied to every voice, -1 to +1.  Handled by the
    /// [crate::PitchEngine] rather than sent to the engine.
    VcoFrequency,
    /// Pulse width, 0 to 1
    VcoPwm,
    /// LFO modulation of the pulse width, 0 to 1
    VcoPwmLfoAmount,
    /// Sub oscillator level, 0 to 1
    MixerSub,
    /// Noise level, 0 to 1
    MixerNoise,
    /// Filter cutoff, 20Hz to 20kHz
    FilterFrequency,
    /// Filter resonance, 0 to 1
    FilterResonance,
    /// Filter input drive, 0 to 1
    FilterDrive,
    /// Filter envelope modulation depth, -1 to +1
    FilterEgAmount,
    /// Filter LFO modulation depth, 0 to 1
    FilterLfoAmount,
    /// Envelope attack, in milliseconds
    EgAttack,
    /// Envelope decay, in milliseconds
    EgDecay,
    /// Envelope sustain level, 0 to 1
    EgSustain,
    /// Envelope release, in milliseconds
    EgRelease,
    /// LFO rate, in Hz
    LfoRate,
}

/// The number of knob parameters
pub const PARAM_COUNT: usize = 15;

impl ParamId {
    /// Every parameter, in table order
    pub const ALL: [Self; PARAM_COUNT] = [
        Self::VcoFrequency,
        Self::VcoPwm,
        Self::VcoPwmLfoAmount,
        Self::MixerSub,
        Self::MixerNoise,
        Self::FilterFrequency,
        Self::FilterResonance,
        Self::FilterDrive,
        Self::FilterEgAmount,
        Self::FilterLfoAmount,
        Self::EgAttack,
        Self::EgDecay,
        Self::EgSustain,
        Self::EgRelease,
        Self::LfoRate,
    ];
    /// The static description of this parameter
    pub fn spec(self) -> &'static ParamSpec {
        &PARAM_SPECS[self as usize]
    }
    /// Human readable name
    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

/// The static description of a parameter, used to build a [Parameter]
#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    /// Which parameter this describes
    pub id: ParamId,
    /// Human readable name
    pub name: &'static str,
    /// Raw value on reset
    pub default: Position,
    /// Number of notches in the detent haptic mode
    pub detents: u8,
    /// Default raw value to engine setting curve
    pub mapping: Mapping,
}

impl ParamSpec {
    const fn new(
        id: ParamId,
        name: &'static str,
        default: Position,
        detents: u8,
        mapping: Mapping,
    ) -> Self {
        Self {
            id,
            name,
            default,
            detents,
            mapping,
        }
    }
}

/// Description of every parameter, indexed by [ParamId]
pub const PARAM_SPECS: [ParamSpec; PARAM_COUNT] = [
    ParamSpec::new(ParamId::VcoFrequency, "VCO Frequency", 512, 3, bipolar),
    ParamSpec::new(ParamId::VcoPwm, "VCO PWM", 512, 5, unipolar),
    ParamSpec::new(ParamId::VcoPwmLfoAmount, "VCO PWM LFO Amount", 0, 5, unipolar),
    ParamSpec::new(ParamId::MixerSub, "Mixer Sub", 0, 5, unipolar),
    ParamSpec::new(ParamId::MixerNoise, "Mixer Noise", 0, 5, unipolar),
    ParamSpec::new(ParamId::FilterFrequency, "Filter Frequency", 1023, 5, cutoff_hz),
    ParamSpec::new(ParamId::FilterResonance, "Filter Resonance", 0, 4, unipolar),
    ParamSpec::new(ParamId::FilterDrive, "Filter Drive", 0, 5, unipolar),
    ParamSpec::new(ParamId::FilterEgAmount, "Filter EG Amount", 512, 5, bipolar),
    ParamSpec::new(ParamId::FilterLfoAmount, "Filter LFO Amount", 0, 5, unipolar),
    ParamSpec::new(ParamId::EgAttack, "EG Attack", 0, 9, envelope_ms),
    ParamSpec::new(ParamId::EgDecay, "EG Decay", 0, 9, envelope_ms),
    ParamSpec::new(ParamId::EgSustain, "EG Sustain", 1023, 5, unipolar),
    ParamSpec::new(ParamId::EgRelease, "EG Release", 0, 9, envelope_ms),
    ParamSpec::new(ParamId::LfoRate, "LFO Rate", 0, 9, lfo_hz),
];

/// Longest envelope stage reachable with [envelope_ms]
pub const ENVELOPE_MAX_MS: f32 = 5000.0;
/// Fastest LFO rate reachable with [lfo_hz]
pub const LFO_MAX_HZ: f32 = 20.0;
/// Lowest filter cutoff reachable with [cutoff_hz]
pub const CUTOFF_MIN_HZ: f32 = 20.0;

/// `0..=1023` onto `0.0..=1.0`
pub fn unipolar(raw: Position) -> f32 {
    raw.min(POSITION_MAX) as f32 / POSITION_MAX as f32
}

/// `0..=1023` onto `-1.0..=1.0`, with 512 exactly zero
pub fn bipolar(raw: Position) -> f32 {
    const MID: f32 = 512.0;
    let offset = raw.min(POSITION_MAX) as f32 - MID;
    if offset >= 0.0 {
        offset / (POSITION_MAX as f32 - MID)
    } else {
        offset / MID
    }
}

/// Exponential cutoff curve, 20Hz to 20kHz (ten octaves)
pub fn cutoff_hz(raw: Position) -> f32 {
    // log2(20000 / 20)
    const OCTAVES: f32 = 9.965_784;
    CUTOFF_MIN_HZ * crate::pitch::exp2(unipolar(raw) * OCTAVES)
}

/// Quadratic envelope time curve, 0 to [ENVELOPE_MAX_MS]
pub fn envelope_ms(raw: Position) -> f32 {
    let x = unipolar(raw);
    x * x * ENVELOPE_MAX_MS
}

/// Quadratic LFO rate curve, 0 to [LFO_MAX_HZ]
pub fn lfo_hz(raw: Position) -> f32 {
    let x = unipolar(raw);
    x * x * LFO_MAX_HZ
}

/// What a parameter produced for one knob sample
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnobResponse {
    /// The force to apply to the knob
    pub motor: MotorCommand,
    /// The mapped setting, if the sample changed the parameter's value
    pub setting: Option<f32>,
}

/// A knob parameter.
///
/// Owns a raw value in `0..=POSITION_MAX`, the value it resets to, one of
/// each haptic mode tuned for this parameter, and the curve that turns the raw
/// value into an engine setting.
#[derive(Clone, Debug)]
pub struct Parameter {
    id: ParamId,
    raw: Position,
    default: Position,
    modes: HapticModes,
    mapping: Mapping,
}

impl Parameter {
    /// Build a parameter from its description.  The raw value starts at the
    /// default.
    pub fn new(spec: &ParamSpec) -> Result<Self, ConfigError> {
        if spec.default > POSITION_MAX {
            return Err(ConfigError::DefaultOutOfRange(spec.default));
        }
        Ok(Self {
            id: spec.id,
            raw: spec.default,
            default: spec.default,
            modes: HapticModes::new(spec.detents)?,
            mapping: spec.mapping,
        })
    }
    /// Replace the mapping curve
    pub fn with_mapping(mut self, mapping: Mapping) -> Self {
        self.mapping = mapping;
        self
    }
    /// Which parameter this is
    pub fn id(&self) -> ParamId {
        self.id
    }
    /// The current raw value
    pub fn raw_value(&self) -> Position {
        self.raw
    }
    /// The value [Self::reset] restores
    pub fn default_value(&self) -> Position {
        self.default
    }
    /// Restore the default raw value.  The engine is not refreshed; the caller
    /// pushes [Self::mapped_value] once it has reset everything it needs to.
    pub fn reset(&mut self) {
        self.raw = self.default;
    }
    /// The engine setting for the current raw value
    pub fn mapped_value(&self) -> f32 {
        (self.mapping)(self.raw)
    }
    /// The active haptic mode
    pub fn haptic_mode(&self) -> HapticModeKind {
        self.modes.active()
    }
    /// Switch haptic mode, keeping every mode's internal state
    pub fn select_haptic_mode(&mut self, kind: HapticModeKind) {
        self.modes.select(kind);
    }
    /// The haptic mode table
    pub fn modes(&self) -> &HapticModes {
        &self.modes
    }
    /// Process one knob sample.
    ///
    /// Unless the active mode is centered, the sample's position becomes the
    /// new raw value and is mapped exactly once.  The haptic mode then runs
    /// with the (possibly updated) raw value as its center.
    pub fn update(&mut self, now_ms: u32, sample: KnobSample) -> KnobResponse {
        let accepted = !self.modes.active().is_centered();
        if accepted {
            self.raw = sample.position.min(POSITION_MAX);
        }
        let context = HapticContext::new(now_ms, self.raw);
        let motor = self.modes.update(&context, sample);
        KnobResponse {
            motor,
            setting: accepted.then(|| self.mapped_value()),
        }
    }
}

/// Every knob parameter, indexed by [ParamId]
#[derive(Clone, Debug)]
pub struct ParamBank {
    params: ArrayVec<Parameter, PARAM_COUNT>,
}

impl ParamBank {
    /// Build every parameter from [PARAM_SPECS]
    pub fn new() -> Result<Self, ConfigError> {
        Self::from_specs(&PARAM_SPECS)
    }
    /// Build every parameter from a custom table.  Entry `i` must describe
    /// the parameter whose discriminant is `i`.
    pub fn from_specs(specs: &[ParamSpec; PARAM_COUNT]) -> Result<Self, ConfigError> {
        let mut params = ArrayVec::new();
        for (i, spec) in specs.iter().enumerate() {
            if spec.id as usize != i {
                return Err(ConfigError::MisorderedParamTable(i));
            }
            params.push(Parameter::new(spec)?);
        }
        Ok(Self { params })
    }
    /// Look up a parameter
    pub fn get(&self, id: ParamId) -> &Parameter {
        &self.params[id as usize]
    }
    /// Look up a parameter mutably
    pub fn get_mut(&mut self, id: ParamId) -> &mut Parameter {
        &mut self.params[id as usize]
    }
    /// Iterate over every parameter in table order
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }
    /// Reset every parameter to its default
    pub fn reset_all(&mut self) {
        for param in self.params.iter_mut() {
            param.reset();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_matches_ids() {
        for (i, spec) in PARAM_SPECS.iter().enumerate() {
            assert_eq!(spec.id as usize, i);
            assert_eq!(ParamId::ALL[i], spec.id);
            assert!(spec.default <= POSITION_MAX);
            assert!(spec.detents >= 2);
        }
        assert_eq!(ParamId::FilterResonance.name(), "Filter Resonance");
    }
    #[test]
    fn per_parameter_tuning() {
        let bank = ParamBank::new().unwrap();
        let detents = |id: ParamId| match bank.get(id).modes().get(HapticModeKind::Detents) {
            crate::haptics::HapticMode::Detents(d) => d.count(),
            _ => unreachable!(),
        };
        assert_eq!(detents(ParamId::VcoFrequency), 3);
        assert_eq!(detents(ParamId::FilterResonance), 4);
        assert_eq!(detents(ParamId::EgAttack), 9);
        assert_eq!(detents(ParamId::LfoRate), 9);
        assert_eq!(detents(ParamId::MixerSub), 5);
        assert_eq!(bank.get(ParamId::FilterFrequency).default_value(), 1023);
        assert_eq!(bank.get(ParamId::FilterEgAmount).default_value(), 512);
        assert_eq!(bank.get(ParamId::EgAttack).default_value(), 0);
    }
    #[test]
    fn misordered_table_is_rejected() {
        let mut specs = PARAM_SPECS;
        specs.swap(2, 3);
        assert_eq!(
            ParamBank::from_specs(&specs).unwrap_err(),
            ConfigError::MisorderedParamTable(2)
        );
        let mut specs = PARAM_SPECS;
        specs[4].detents = 1;
        assert_eq!(
            ParamBank::from_specs(&specs).unwrap_err(),
            ConfigError::TooFewDetents(1)
        );
        let mut spec = PARAM_SPECS[0];
        spec.default = 2000;
        assert_eq!(
            Parameter::new(&spec).unwrap_err(),
            ConfigError::DefaultOutOfRange(2000)
        );
    }
    #[test]
    fn bank_iterates_in_table_order() {
        let mut bank = ParamBank::new().unwrap();
        assert_eq!(bank.iter().count(), PARAM_COUNT);
        for (param, id) in bank.iter().zip(ParamId::ALL) {
            assert_eq!(param.id(), id);
        }
        bank.get_mut(ParamId::MixerNoise).update(0, KnobSample::new(300, false));
        bank.reset_all();
        assert!(bank.iter().all(|p| p.raw_value() == p.default_value()));
    }
    #[test]
    fn reset_is_idempotent() {
        let mut param = Parameter::new(ParamId::EgSustain.spec()).unwrap();
        param.update(0, KnobSample::new(100, true));
        assert_eq!(param.raw_value(), 100);
        param.reset();
        param.reset();
        assert_eq!(param.raw_value(), param.default_value());
        assert_eq!(param.raw_value(), 1023);
    }
    #[test]
    fn update_maps_accepted_positions() {
        let mut param = Parameter::new(ParamId::MixerSub.spec()).unwrap();
        let response = param.update(0, KnobSample::new(1023, true));
        assert_eq!(response.setting, Some(1.0));
        assert!(response.motor.is_off());
        assert_eq!(param.raw_value(), 1023);
    }
    #[test]
    fn centered_modes_keep_value() {
        let mut param = Parameter::new(ParamId::VcoPwm.spec()).unwrap();
        param.select_haptic_mode(HapticModeKind::Elasticity);
        let response = param.update(0, KnobSample::new(800, true));
        assert_eq!(response.setting, None);
        assert_eq!(param.raw_value(), 512);
        assert_eq!(response.motor.direction(), crate::Direction::Reverse);
    }
    #[test]
    fn custom_mapping() {
        fn doubled(raw: Position) -> f32 {
            raw as f32 * 2.0
        }
        let mut param = Parameter::new(ParamId::LfoRate.spec())
            .unwrap()
            .with_mapping(doubled);
        let response = param.update(0, KnobSample::new(10, false));
        assert_eq!(response.setting, Some(20.0));
    }
    #[test]
    fn curves() {
        assert_eq!(unipolar(0), 0.0);
        assert_eq!(unipolar(1023), 1.0);
        assert_eq!(bipolar(512), 0.0);
        assert_eq!(bipolar(0), -1.0);
        assert_eq!(bipolar(1023), 1.0);
        assert_eq!(envelope_ms(1023), ENVELOPE_MAX_MS);
        assert_eq!(lfo_hz(0), 0.0);
        assert!((cutoff_hz(0) - 20.0).abs() < 0.01);
        assert!((cutoff_hz(1023) - 20000.0).abs() < 20.0);
    }
    #[test]
    fn mode_switch_round_trip_keeps_state() {
        let mut param = Parameter::new(ParamId::FilterDrive.spec()).unwrap();
        param.select_haptic_mode(HapticModeKind::Friction);
        for _ in 0..20 {
            param.update(0, KnobSample::new(600, true));
        }
        let friction = *param.modes().get(HapticModeKind::Friction);
        param.select_haptic_mode(HapticModeKind::Texture);
        param.update(0, KnobSample::new(100, true));
        param.select_haptic_mode(HapticModeKind::Friction);
        assert_eq!(*param.modes().get(HapticModeKind::Friction), friction);
        assert_eq!(param.haptic_mode(), HapticModeKind::Friction);
    }
}
