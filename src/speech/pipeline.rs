//! Speech output pipeline
//!
//! Turns the rendered message into audio through the active backend, with
//! ordered fallback: remote neural voice when selected and ready, custom
//! clip when selected and supplied, and the system voice as the universal
//! baseline. A non-empty message never ends in a silent no-op; if even the
//! system voice is missing, the user gets a notice.

use crate::notify::Notifier;
use crate::speech::backends::custom::CustomVoice;
use crate::speech::backends::remote::{ElevenLabsClient, RemoteState, RemoteSynth};
use crate::speech::backends::system::SystemSynth;
use crate::speech::selector::VoiceBackend;
use crate::speech::synth::{SpeakParams, Synth, SystemVoice};
use crate::state::settings::VoiceSettings;
use crate::{audio, Result};
use log::{info, warn};

/// Which path a speak request took
///
/// Exactly one of the audible variants is produced per non-empty request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOutcome {
    /// Empty buffer; nothing happened
    Empty,
    /// Remote synthesis succeeded
    Remote,
    /// Custom clip played
    Custom,
    /// System voice dispatched
    System,
    /// A system engine exists but the dispatch failed
    Failed,
    /// No speech capability available at all
    Unsupported,
}

/// The speech output pipeline
pub struct SpeechPipeline {
    system: Option<Box<dyn Synth>>,
    remote: Box<dyn RemoteSynth>,
    custom: CustomVoice,
}

impl SpeechPipeline {
    /// Build the pipeline with the real platform backends
    ///
    /// A missing system engine is not fatal here; it surfaces as a
    /// "not supported" notice at speak time.
    pub fn new() -> Self {
        let system: Option<Box<dyn Synth>> = match SystemSynth::new() {
            Ok(synth) => {
                info!("System speech backend ready");
                Some(Box::new(synth))
            }
            Err(e) => {
                warn!("System speech unavailable: {}", e);
                None
            }
        };

        Self {
            system,
            remote: Box::new(ElevenLabsClient::new()),
            custom: CustomVoice::new(),
        }
    }

    /// Build the pipeline from explicit backends (tests, embedding)
    pub fn with_backends(system: Option<Box<dyn Synth>>, remote: Box<dyn RemoteSynth>) -> Self {
        Self {
            system,
            remote,
            custom: CustomVoice::new(),
        }
    }

    /// The remote provider interface
    pub fn remote(&self) -> &dyn RemoteSynth {
        self.remote.as_ref()
    }

    /// The custom voice clip
    pub fn custom(&self) -> &CustomVoice {
        &self.custom
    }

    pub fn custom_mut(&mut self) -> &mut CustomVoice {
        &mut self.custom
    }

    /// Voices offered by the system engine; empty when it is absent
    pub fn system_voices(&self) -> Vec<SystemVoice> {
        self.system
            .as_ref()
            .map(|s| s.voices())
            .unwrap_or_default()
    }

    /// Switch the system engine to a voice by id
    pub fn set_system_voice(&mut self, voice_id: &str) -> Result<()> {
        if let Some(synth) = self.system.as_mut() {
            synth.set_voice(voice_id)?;
        }
        Ok(())
    }

    /// Whether a system utterance is still playing
    pub fn is_speaking(&self) -> bool {
        self.system.as_ref().is_some_and(|s| s.is_speaking())
    }

    /// Silence any in-flight system speech
    pub fn cancel(&mut self) {
        if let Some(synth) = self.system.as_mut() {
            if let Err(e) = synth.cancel() {
                warn!("Failed to cancel speech: {}", e);
            }
        }
    }

    /// Speak the rendered message through the active backend
    ///
    /// All failures are handled here: logged, surfaced as a notice, and
    /// converted into the next fallback step. Nothing propagates.
    pub fn speak(
        &mut self,
        text: &str,
        voice: &VoiceSettings,
        remote_state: &RemoteState,
        audio_feedback: bool,
        notifier: &mut Notifier,
    ) -> SpeakOutcome {
        if text.is_empty() {
            return SpeakOutcome::Empty;
        }

        if voice.selected_voice == VoiceBackend::Remote && remote_state.is_ready() {
            if let (Some(api_key), Some(remote_voice)) =
                (remote_state.api_key(), remote_state.current_voice())
            {
                match self
                    .remote
                    .speak(text, &remote_voice.id, api_key, voice.speech_rate)
                {
                    Ok(()) => return SpeakOutcome::Remote,
                    Err(e) => {
                        warn!("Remote synthesis failed: {}", e);
                        notifier.push("Remote synthesis failed, using system voice");
                    }
                }
            }
        }

        if voice.selected_voice == VoiceBackend::Custom {
            if self.custom.is_ready() {
                match self.custom.play(voice.speech_rate) {
                    Ok(()) => return SpeakOutcome::Custom,
                    Err(e) => {
                        warn!("Custom voice playback failed: {}", e);
                        notifier.push("Custom voice playback failed, using system voice");
                    }
                }
            } else {
                notifier.push("Custom voice not set up, using system voice");
            }
        }

        match self.system.as_mut() {
            Some(synth) => {
                let params = SpeakParams {
                    rate: voice.speech_rate,
                    pitch: voice.voice_pitch,
                };
                if let Err(e) = synth.speak(text, &params) {
                    warn!("System speech failed: {}", e);
                    notifier.push("Speech synthesis failed");
                    return SpeakOutcome::Failed;
                }
                if audio_feedback {
                    // Best effort; a missing audio device must not block speech
                    if let Err(e) = audio::click() {
                        warn!("Feedback click failed: {}", e);
                    }
                }
                SpeakOutcome::System
            }
            None => {
                notifier.push("Speech synthesis is not supported on this system");
                SpeakOutcome::Unsupported
            }
        }
    }
}

impl Default for SpeechPipeline {
    fn default() -> Self {
        Self::new()
    }
}
