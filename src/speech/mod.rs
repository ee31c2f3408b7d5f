//! Speech output system

pub mod backends;
pub mod pipeline;
pub mod selector;
pub mod synth;

pub use pipeline::{SpeakOutcome, SpeechPipeline};
pub use selector::{pick_default_voice, VoiceBackend};
pub use synth::{SpeakParams, Synth, SystemVoice};
