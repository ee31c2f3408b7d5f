//! System TTS backend using the tts crate
//!
//! The final fallback in the output pipeline: whatever the platform offers
//! (Speech Dispatcher on Linux, AVFoundation on macOS, SAPI on Windows)
//! through the `tts` crate's unified interface.

use crate::speech::synth::{SpeakParams, Synth, SystemVoice};
use crate::{Result, VoicelinkError};
use log::{debug, error, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tts::{Gender, Tts};

/// Fixed output volume as a fraction of the platform maximum
const OUTPUT_VOLUME: f32 = 0.8;

/// System speech synthesizer
pub struct SystemSynth {
    tts: Tts,

    /// True from dispatch until the utterance-end callback fires
    speaking: Arc<AtomicBool>,

    /// Whether the platform delivers utterance callbacks
    callbacks: bool,
}

impl SystemSynth {
    /// Create the platform TTS engine
    ///
    /// Fails when the platform has no speech capability at all; the
    /// pipeline treats that as "system backend absent", not a crash.
    pub fn new() -> Result<Self> {
        debug!("Creating system TTS backend");

        let mut tts = Tts::default()
            .map_err(|e| VoicelinkError::Speech(format!("Failed to initialize TTS: {}", e)))?;

        let speaking = Arc::new(AtomicBool::new(false));
        let callbacks = tts.supported_features().utterance_callbacks;

        if callbacks {
            let flag = Arc::clone(&speaking);
            tts.on_utterance_end(Some(Box::new(move |_| {
                flag.store(false, Ordering::Relaxed);
            })))
            .map_err(|e| {
                VoicelinkError::Speech(format!("Failed to register utterance callback: {}", e))
            })?;
        } else {
            warn!("Utterance callbacks not supported; speaking state is best-effort");
        }

        debug!("System TTS backend created");

        Ok(Self {
            tts,
            speaking,
            callbacks,
        })
    }

    /// Map a multiplier (1.0 = normal) into the platform's value range
    fn scale(multiplier: f32, min: f32, normal: f32, max: f32) -> f32 {
        (normal * multiplier).clamp(min, max)
    }

    fn apply_params(&mut self, params: &SpeakParams) -> Result<()> {
        let features = self.tts.supported_features();

        if features.rate {
            let rate = Self::scale(
                params.rate,
                self.tts.min_rate(),
                self.tts.normal_rate(),
                self.tts.max_rate(),
            );
            self.tts
                .set_rate(rate)
                .map_err(|e| VoicelinkError::Speech(format!("Failed to set rate: {}", e)))?;
        }

        if features.pitch {
            let pitch = Self::scale(
                params.pitch,
                self.tts.min_pitch(),
                self.tts.normal_pitch(),
                self.tts.max_pitch(),
            );
            self.tts
                .set_pitch(pitch)
                .map_err(|e| VoicelinkError::Speech(format!("Failed to set pitch: {}", e)))?;
        }

        if features.volume {
            let volume = (self.tts.max_volume() * OUTPUT_VOLUME)
                .clamp(self.tts.min_volume(), self.tts.max_volume());
            self.tts
                .set_volume(volume)
                .map_err(|e| VoicelinkError::Speech(format!("Failed to set volume: {}", e)))?;
        }

        Ok(())
    }
}

impl Synth for SystemSynth {
    fn speak(&mut self, text: &str, params: &SpeakParams) -> Result<()> {
        if text.is_empty() {
            return Ok(());
        }

        self.apply_params(params)?;

        debug!("Speaking: {}", text);
        // interrupt = true: a new speak cancels the one in flight
        self.tts.speak(text, true).map_err(|e| {
            error!("Failed to speak: {}", e);
            VoicelinkError::Speech(format!("Speak failed: {}", e))
        })?;

        if self.callbacks {
            self.speaking.store(true, Ordering::Relaxed);
        }

        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        debug!("Cancelling speech");
        self.tts.stop().map_err(|e| {
            error!("Failed to cancel speech: {}", e);
            VoicelinkError::Speech(format!("Cancel failed: {}", e))
        })?;
        self.speaking.store(false, Ordering::Relaxed);
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        if self.callbacks {
            self.speaking.load(Ordering::Relaxed)
        } else {
            self.tts.is_speaking().unwrap_or(false)
        }
    }

    fn voices(&self) -> Vec<SystemVoice> {
        match self.tts.voices() {
            Ok(voices) => voices
                .into_iter()
                .map(|v| SystemVoice {
                    id: v.id(),
                    name: v.name(),
                    female: v.gender() == Some(Gender::Female),
                })
                .collect(),
            Err(e) => {
                warn!("Voice enumeration not available: {}", e);
                Vec::new()
            }
        }
    }

    fn set_voice(&mut self, voice_id: &str) -> Result<()> {
        let voices = self
            .tts
            .voices()
            .map_err(|e| VoicelinkError::Speech(format!("Failed to get voices: {}", e)))?;

        match voices.iter().find(|v| v.id() == voice_id) {
            Some(voice) => {
                debug!("Selecting voice: {}", voice.name());
                self.tts
                    .set_voice(voice)
                    .map_err(|e| VoicelinkError::Speech(format!("Failed to set voice: {}", e)))
            }
            None => {
                warn!("Voice {:?} not found; keeping current voice", voice_id);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_synth() {
        // May fail on systems without speech-dispatcher or in headless CI
        match SystemSynth::new() {
            Ok(synth) => {
                assert!(!synth.is_speaking());
            }
            Err(e) => println!("TTS initialization failed (may be expected in CI): {}", e),
        }
    }

    #[test]
    fn test_scale_clamps_to_range() {
        assert_eq!(SystemSynth::scale(1.0, 0.0, 50.0, 100.0), 50.0);
        assert_eq!(SystemSynth::scale(2.0, 0.0, 50.0, 100.0), 100.0);
        assert_eq!(SystemSynth::scale(4.0, 0.0, 50.0, 100.0), 100.0);
        assert_eq!(SystemSynth::scale(0.0, 10.0, 50.0, 100.0), 10.0);
    }
}
