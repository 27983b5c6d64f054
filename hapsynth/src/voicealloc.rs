//! Fixed-size polyphonic voice allocation with note stealing.

use crate::pitch::PitchEngine;
use crate::{SynthEngine, VOICES};

/// One slot of the voice pool.  A voice is sounding whenever the synthesis
/// engine reports its envelope as active; this struct only tracks the note it
/// was last assigned and whether that note's key is still down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Voice {
    index: usize,
    note: Option<u8>,
    held: bool,
}

impl Voice {
    const fn new(index: usize) -> Self {
        Self {
            index,
            note: None,
            held: false,
        }
    }
    /// Position of this voice in the pool, and the voice index used with the
    /// [SynthEngine]
    pub fn index(&self) -> usize {
        self.index
    }
    /// The most recently assigned note, or `None` if the voice was never used
    pub fn note(&self) -> Option<u8> {
        self.note
    }
    /// True between the note-on and the note-off of the assigned note
    pub fn is_held(&self) -> bool {
        self.held
    }
}

/// How [VoiceAllocator::find_voice] picked a voice
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Allocation {
    /// The voice's envelope was idle
    Free(usize),
    /// Every voice was sounding and this one was taken over
    Stolen(usize),
}

impl Allocation {
    /// The chosen voice index
    pub fn index(self) -> usize {
        match self {
            Self::Free(i) | Self::Stolen(i) => i,
        }
    }
}

/// Assigns notes to the [VOICES] voices of the synthesis engine
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VoiceAllocator {
    voices: [Voice; VOICES],
}

impl Default for VoiceAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceAllocator {
    /// Create a pool of idle voices
    pub fn new() -> Self {
        Self {
            voices: core::array::from_fn(Voice::new),
        }
    }
    /// The voice table, in index order
    pub fn voices(&self) -> &[Voice; VOICES] {
        &self.voices
    }
    /// Look up a single voice
    pub fn voice(&self, index: usize) -> Option<&Voice> {
        self.voices.get(index)
    }
    /// Choose the voice for a new note.
    ///
    /// The first voice (by index) whose envelope is inactive wins.  Failing
    /// that, the released voice playing the highest note is stolen, and if
    /// every key is still down the held voice with the highest note is.  Ties
    /// go to the lowest index.
    pub fn find_voice<E: SynthEngine + ?Sized>(&self, engine: &E) -> Allocation {
        if let Some(voice) = self
            .voices
            .iter()
            .find(|v| !engine.is_envelope_active(v.index))
        {
            return Allocation::Free(voice.index);
        }
        let highest = |held: bool| {
            self.voices
                .iter()
                .filter(|v| v.held == held)
                .fold(None, |best: Option<&Voice>, v| match best {
                    Some(b) if v.note <= b.note => Some(b),
                    _ => Some(v),
                })
        };
        let stolen = highest(false).or_else(|| highest(true)).map_or(0, |v| v.index);
        Allocation::Stolen(stolen)
    }
    /// Start `note` on a voice, retuning it through `pitch` and opening both
    /// envelopes.  Returns the voice index used.
    pub fn note_on<E: SynthEngine + ?Sized>(
        &mut self,
        engine: &mut E,
        pitch: &PitchEngine,
        note: u8,
    ) -> usize {
        let allocation = self.find_voice(engine);
        let index = allocation.index();
        match allocation {
            Allocation::Free(_) => log::debug!("note {} on voice {}", note, index),
            Allocation::Stolen(_) => log::debug!(
                "note {} steals voice {} from note {:?}",
                note,
                index,
                self.voices[index].note
            ),
        }
        let voice = &mut self.voices[index];
        voice.note = Some(note);
        voice.held = true;
        pitch.retune(engine, index, note);
        engine.amp_envelope_on(index);
        engine.filter_envelope_on(index);
        index
    }
    /// Release every voice assigned `note`.  Returns how many voices were
    /// released.
    pub fn note_off<E: SynthEngine + ?Sized>(&mut self, engine: &mut E, note: u8) -> usize {
        let mut released = 0;
        for voice in self.voices.iter_mut().filter(|v| v.note == Some(note)) {
            voice.held = false;
            engine.amp_envelope_off(voice.index);
            engine.filter_envelope_off(voice.index);
            released += 1;
        }
        if released == 0 {
            log::warn!("note off for {} with no voice assigned", note);
        }
        released
    }
    /// Release every voice that has ever been assigned a note
    pub fn all_notes_off<E: SynthEngine + ?Sized>(&mut self, engine: &mut E) {
        for voice in self.voices.iter_mut().filter(|v| v.note.is_some()) {
            voice.held = false;
            engine.amp_envelope_off(voice.index);
            engine.filter_envelope_off(voice.index);
        }
    }
    /// Recompute the frequency of every voice that has been assigned a note
    pub fn retune_all<E: SynthEngine + ?Sized>(&self, engine: &mut E, pitch: &PitchEngine) {
        for voice in self.voices.iter() {
            if let Some(note) = voice.note {
                pitch.retune(engine, voice.index, note);
            }
        }
    }
}
