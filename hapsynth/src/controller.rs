//! The top level object tying the knob, the parameters, the voices and the
//! pitch state to a synthesis engine and a motor driver.

use wmidi::{Channel, MidiMessage};

use crate::error::ConfigError;
use crate::haptics::HapticModeKind;
use crate::motor::{MotorCommand, MotorDriver};
use crate::param::{ParamBank, ParamId};
use crate::pitch::{PitchEngine, PITCH_BEND_FULL_SCALE};
use crate::voicealloc::VoiceAllocator;
use crate::{KnobSample, SynthEngine, POSITION_MAX};

/// Routes knob samples and note events.
///
/// Knob samples go to the selected parameter, which is run in the globally
/// selected haptic mode; the resulting force is sent to the motor and any
/// accepted value is pushed to the engine.  Note events go to the voice
/// allocator, and pitch changes retune every voice.
///
/// All methods take `&mut self`, so the host serializes knob ticks and note
/// events simply by owning the controller.
pub struct Controller<E: SynthEngine, M: MotorDriver> {
    engine: E,
    motor: M,
    params: ParamBank,
    selected: ParamId,
    haptic_mode: HapticModeKind,
    voices: VoiceAllocator,
    pitch: PitchEngine,
    channel: Option<Channel>,
}

impl<E: SynthEngine, M: MotorDriver> Controller<E, M> {
    /// Create a new controller listening on every MIDI channel, with the first
    /// parameter selected in [HapticModeKind::Position] mode.  Every parameter
    /// default is pushed to `engine`.
    pub fn new(engine: E, motor: M) -> Result<Self, ConfigError> {
        let mut ret = Self {
            engine,
            motor,
            params: ParamBank::new()?,
            selected: ParamId::VcoFrequency,
            haptic_mode: HapticModeKind::Position,
            voices: VoiceAllocator::new(),
            pitch: PitchEngine::new(),
            channel: None,
        };
        ret.reset();
        Ok(ret)
    }
    /// Only accept note and pitch events on `channel`
    pub fn with_channel(mut self, channel: Channel) -> Self {
        self.channel = Some(channel);
        self
    }
    /// Start with `param` selected
    pub fn with_param(mut self, param: ParamId) -> Self {
        self.select_param(param);
        self
    }
    /// Start in haptic mode `mode`
    pub fn with_haptic_mode(mut self, mode: HapticModeKind) -> Self {
        self.set_haptic_mode(mode);
        self
    }
    /// The MIDI channel filter, `None` for omni
    pub fn channel(&self) -> Option<Channel> {
        self.channel
    }
    /// The synthesis engine
    pub fn engine(&self) -> &E {
        &self.engine
    }
    /// The synthesis engine, mutably
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
    /// The motor driver
    pub fn motor(&self) -> &M {
        &self.motor
    }
    /// The parameter bank
    pub fn params(&self) -> &ParamBank {
        &self.params
    }
    /// The voice allocator
    pub fn voices(&self) -> &VoiceAllocator {
        &self.voices
    }
    /// The global pitch state
    pub fn pitch(&self) -> &PitchEngine {
        &self.pitch
    }
    /// Consume the controller, returning the engine and motor driver
    pub fn into_inner(self) -> (E, M) {
        (self.engine, self.motor)
    }
    /// Bind the knob to `param`.  The global haptic mode carries over.
    pub fn select_param(&mut self, param: ParamId) {
        log::info!("selected {}", param.name());
        self.selected = param;
        self.params.get_mut(param).select_haptic_mode(self.haptic_mode);
    }
    /// The parameter the knob is bound to
    pub fn selected_param(&self) -> ParamId {
        self.selected
    }
    /// Change the global haptic mode
    pub fn set_haptic_mode(&mut self, mode: HapticModeKind) {
        log::info!("haptic mode {}", mode.name());
        self.haptic_mode = mode;
        self.params.get_mut(self.selected).select_haptic_mode(mode);
    }
    /// The global haptic mode
    pub fn haptic_mode(&self) -> HapticModeKind {
        self.haptic_mode
    }
    /// Reset every parameter to its default and the octave shift to zero, push
    /// every default to the engine and retune all voices.  The pitch bend
    /// follows the physical wheel and is left alone.
    pub fn reset(&mut self) {
        log::info!("reset");
        self.params.reset_all();
        for id in ParamId::ALL {
            let value = self.params.get(id).mapped_value();
            self.apply_setting(id, value);
        }
    }
    /// Reset a single parameter to its default and push it to the engine
    pub fn reset_param(&mut self, param: ParamId) {
        self.params.get_mut(param).reset();
        let value = self.params.get(param).mapped_value();
        self.apply_setting(param, value);
    }
    /// Process one knob reading taken at `now_ms`.  Returns the motor command,
    /// which has already been applied to the motor driver.
    pub fn knob_sample(&mut self, position: u16, touching: bool, now_ms: u32) -> MotorCommand {
        if position > POSITION_MAX {
            log::warn!("knob position {} clamped to {}", position, POSITION_MAX);
        }
        let response = self
            .params
            .get_mut(self.selected)
            .update(now_ms, KnobSample::new(position, touching));
        if let Some(value) = response.setting {
            log::trace!("{} = {}", self.selected.name(), value);
            self.apply_setting(self.selected, value);
        }
        response.motor.apply(&mut self.motor);
        response.motor
    }
    /// Start a note.  Events on a filtered-out channel are ignored.  Velocity
    /// is not used.
    pub fn note_on(&mut self, channel: Channel, note: u8, _velocity: u8) {
        if self.accepts(channel) {
            self.voices.note_on(&mut self.engine, &self.pitch, note);
        }
    }
    /// Release a note.  Events on a filtered-out channel are ignored.
    pub fn note_off(&mut self, channel: Channel, note: u8, _velocity: u8) {
        if self.accepts(channel) {
            self.voices.note_off(&mut self.engine, note);
        }
    }
    /// Set the pitch bend, centered on zero (`-8192..=8191`), and retune every
    /// voice.  Events on a filtered-out channel are ignored.
    pub fn pitch_change(&mut self, channel: Channel, value: i16) {
        if self.accepts(channel) {
            self.pitch.set_pitch_bend(value);
            self.voices.retune_all(&mut self.engine, &self.pitch);
        }
    }
    /// Set the octave shift and retune every voice
    pub fn set_octave(&mut self, octave: f32) {
        self.pitch.set_octave(octave);
        self.voices.retune_all(&mut self.engine, &self.pitch);
    }
    /// Release every voice
    pub fn all_notes_off(&mut self) {
        self.voices.all_notes_off(&mut self.engine);
    }
    /// Dispatch an already parsed MIDI message.  A note on with velocity zero
    /// is treated as a note off.  Other messages are ignored.
    pub fn handle_midi(&mut self, msg: &MidiMessage) {
        match *msg {
            MidiMessage::NoteOn(ch, note, vel) if u8::from(vel) == 0 => {
                self.note_off(ch, u8::from(note), 0)
            }
            MidiMessage::NoteOn(ch, note, vel) => self.note_on(ch, u8::from(note), u8::from(vel)),
            MidiMessage::NoteOff(ch, note, vel) => {
                self.note_off(ch, u8::from(note), u8::from(vel))
            }
            MidiMessage::PitchBendChange(ch, value) => {
                let centered = u16::from(value) as i16 - PITCH_BEND_FULL_SCALE;
                self.pitch_change(ch, centered)
            }
            _ => {}
        }
    }
    fn accepts(&self, channel: Channel) -> bool {
        self.channel.map_or(true, |c| c == channel)
    }
    fn apply_setting(&mut self, param: ParamId, value: f32) {
        match param {
            ParamId::VcoFrequency => self.set_octave(value),
            _ => self.engine.set_param(param, value),
        }
    }
}
