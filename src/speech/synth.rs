//! Speech synthesizer abstraction
//!
//! The pipeline talks to the platform voice through this trait so the
//! fallback logic can be exercised against fakes, and so a different
//! system engine can be swapped in without touching the pipeline.

use crate::Result;

/// Per-utterance parameters taken from the active voice preference
///
/// Rate and pitch are multipliers where 1.0 is the platform's normal value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeakParams {
    pub rate: f32,
    pub pitch: f32,
}

impl Default for SpeakParams {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
        }
    }
}

/// A voice offered by the system speech engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SystemVoice {
    pub id: String,
    pub name: String,
    pub female: bool,
}

/// System speech synthesizer
///
/// The universally available baseline backend; every composed message can
/// reach the user through this even when nothing else is configured.
pub trait Synth: Send {
    /// Speak text, cancelling any utterance already in flight
    fn speak(&mut self, text: &str, params: &SpeakParams) -> Result<()>;

    /// Cancel/silence current speech
    fn cancel(&mut self) -> Result<()>;

    /// Whether an utterance dispatched here is still playing
    fn is_speaking(&self) -> bool;

    /// Voices the engine offers; empty when enumeration is unsupported
    fn voices(&self) -> Vec<SystemVoice> {
        Vec::new()
    }

    /// Switch to a voice by id
    fn set_voice(&mut self, voice_id: &str) -> Result<()> {
        let _ = voice_id;
        Ok(())
    }
}
