//! Application state
//!
//! [`Session`] owns everything a running instance needs: the persisted
//! settings, the message buffer, conversation history, the speech pipeline
//! and its remote voice state, live mode, and the notification queue.
//! Every user-facing operation goes through a `Session` method so that
//! persistence and notices stay consistent.

pub mod settings;

use crate::catalog::{self, Category, Symbol};
use crate::error::VoicelinkError;
use crate::history::{ConversationHistory, PatternMonitor};
use crate::live::LiveConversation;
use crate::message::{MessageBuffer, SavedPhrase};
use crate::notify::Notifier;
use crate::scenario::Scenario;
use crate::speech::backends::remote::{ConnectionStatus, RemoteState};
use crate::speech::pipeline::{SpeakOutcome, SpeechPipeline};
use crate::speech::selector::{pick_default_voice, VoiceBackend};
use crate::storage::{keys, LocalStore};
use crate::Result;
use log::{info, warn};
use settings::{AppSettings, GridSize, TouchTargetSize, UserData, VoiceSettings};
use std::path::Path;

pub struct Session {
    pub store: LocalStore,
    pub settings: AppSettings,
    pub voice: VoiceSettings,
    pub user_data: UserData,
    pub user_preferences: serde_json::Value,
    pub buffer: MessageBuffer,
    pub history: ConversationHistory,
    pub patterns: PatternMonitor,
    pub remote: RemoteState,
    pub pipeline: SpeechPipeline,
    pub live: LiveConversation,
    pub notifier: Notifier,
    pub current_category: Category,
    pub current_emotion: Option<String>,
}

impl Session {
    pub fn new(store: LocalStore) -> Self {
        Self::with_pipeline(store, SpeechPipeline::new())
    }

    /// Build a session around an already constructed pipeline
    ///
    /// Loads every persisted document, falling back to defaults when a key
    /// is absent or unreadable, then primes the remote and system backends
    /// from the stored voice preference.
    pub fn with_pipeline(store: LocalStore, pipeline: SpeechPipeline) -> Self {
        let settings: AppSettings = store.get(keys::SETTINGS).unwrap_or_default();
        let user_data: UserData = store.get(keys::USER_DATA).unwrap_or_default();
        let voice: VoiceSettings = store
            .get(keys::VOICE_SETTINGS)
            .or_else(|| user_data.voice_settings.clone())
            .unwrap_or_default();
        let user_preferences: serde_json::Value = store
            .get(keys::USER_PREFERENCES)
            .unwrap_or(serde_json::Value::Null);

        let mut session = Self {
            store,
            settings,
            voice,
            user_data,
            user_preferences,
            buffer: MessageBuffer::new(),
            history: ConversationHistory::new(),
            patterns: PatternMonitor::new(),
            remote: RemoteState::new(),
            pipeline,
            live: LiveConversation::new(),
            notifier: Notifier::new(),
            current_category: Category::Core,
            current_emotion: None,
        };
        session.restore_backends();
        session
    }

    fn restore_backends(&mut self) {
        if let Some(api_key) = self.store.get::<String>(keys::API_KEY) {
            self.remote.set_key(api_key);
            if self.remote.refresh(self.pipeline.remote()) {
                info!("Remote voices loaded: {}", self.remote.voices().len());
                if let Some(id) = self.voice.eleven_labs_voice.clone() {
                    if let Err(e) = self.remote.select_voice(&id) {
                        warn!("Stored remote voice no longer available: {}", e);
                    }
                }
            }
        }
        if let Some(path) = self.voice.custom_voice.clone() {
            if let Err(e) = self.pipeline.custom_mut().load(&path) {
                warn!("Stored custom voice clip unusable: {}", e);
            }
        }
        if let Some(id) = self.voice.system_voice.clone() {
            if let Err(e) = self.pipeline.set_system_voice(&id) {
                warn!("Stored system voice unavailable: {}", e);
            }
        }
    }

    // ---- Message composition ----

    /// Append a symbol from the catalog to the message being composed
    pub fn add_symbol(&mut self, category: Category, id: &str) -> Result<&'static Symbol> {
        let symbol = catalog::find(category, id).ok_or_else(|| {
            VoicelinkError::Config(format!("no symbol '{}' in {}", id, category))
        })?;
        self.buffer.append(symbol);
        Ok(symbol)
    }

    /// Speak the composed message through the pipeline
    ///
    /// Audible outcomes are appended to conversation history; symbol usage
    /// is recorded when analytics are enabled. The buffer is left intact.
    pub fn speak_message(&mut self) -> SpeakOutcome {
        let text = self.buffer.render_text();
        let outcome = self.pipeline.speak(
            &text,
            &self.voice,
            &self.remote,
            self.settings.audio_feedback,
            &mut self.notifier,
        );
        if matches!(
            outcome,
            SpeakOutcome::Remote | SpeakOutcome::Custom | SpeakOutcome::System
        ) {
            self.history.push(&text);
            if self.settings.usage_analytics {
                for symbol in self.buffer.symbols() {
                    self.patterns.record(symbol.label);
                }
            }
        }
        outcome
    }

    pub fn clear_message(&mut self) {
        self.buffer.clear();
        self.notifier.push("Message cleared");
    }

    /// Save the composed message as a reusable phrase
    pub fn save_phrase(&mut self) -> Result<()> {
        let phrase = SavedPhrase::from_buffer(&self.buffer)
            .ok_or_else(|| VoicelinkError::Config("nothing to save".to_string()))?;
        let mut phrases = self.saved_phrases();
        phrases.push(phrase);
        self.store.set(keys::SAVED_PHRASES, &phrases)?;
        self.notifier.push("Phrase saved");
        Ok(())
    }

    pub fn saved_phrases(&self) -> Vec<SavedPhrase> {
        self.store.get(keys::SAVED_PHRASES).unwrap_or_default()
    }

    /// Copy the composed message to the system clipboard
    pub fn share_message(&mut self) -> Result<()> {
        if self.buffer.is_empty() {
            self.notifier.push("Nothing to share");
            return Ok(());
        }
        crate::clipboard::copy_to_clipboard(&self.buffer.render_text())?;
        self.notifier.push("Message copied to clipboard");
        Ok(())
    }

    // ---- Voice selection ----

    /// Switch the active voice backend
    ///
    /// A remote selection that cannot come up (no key, unreachable service)
    /// falls back to the system voice rather than leaving speech broken.
    pub fn select_voice(&mut self, backend: VoiceBackend) -> Result<()> {
        match backend {
            VoiceBackend::Remote => {
                if !self.remote.is_ready() {
                    self.remote.refresh(self.pipeline.remote());
                }
                if !self.remote.is_ready() {
                    self.voice.selected_voice = VoiceBackend::System;
                    self.resolve_system_voice();
                    self.save_voice_settings()?;
                    self.notifier
                        .push("Remote voice unavailable, using system voice");
                    return Ok(());
                }
                self.voice.selected_voice = VoiceBackend::Remote;
                if let Some(v) = self.remote.current_voice() {
                    self.voice.eleven_labs_voice = Some(v.id.clone());
                }
            }
            VoiceBackend::Custom => {
                if !self.pipeline.custom().is_ready() {
                    self.notifier.push("No custom voice uploaded yet");
                }
                self.voice.selected_voice = VoiceBackend::Custom;
            }
            VoiceBackend::System => {
                self.voice.selected_voice = VoiceBackend::System;
                self.resolve_system_voice();
            }
        }
        self.save_voice_settings()?;
        self.notifier
            .push(format!("Voice changed to {}", self.voice.selected_voice));
        Ok(())
    }

    /// Ensure a concrete system voice is active, choosing one if none is set
    fn resolve_system_voice(&mut self) {
        if let Some(id) = self.voice.system_voice.clone() {
            if self.pipeline.set_system_voice(&id).is_ok() {
                return;
            }
            warn!("Stored system voice '{}' unavailable, re-selecting", id);
        }
        let voices = self.pipeline.system_voices();
        if let Some(choice) = pick_default_voice(&voices) {
            let id = choice.id.clone();
            if self.pipeline.set_system_voice(&id).is_ok() {
                self.voice.system_voice = Some(id);
            }
        }
    }

    /// Pick a specific system voice by id
    pub fn select_system_voice(&mut self, voice_id: &str) -> Result<()> {
        self.pipeline.set_system_voice(voice_id)?;
        self.voice.system_voice = Some(voice_id.to_string());
        self.save_voice_settings()
    }

    /// Pick a specific remote voice by id
    pub fn select_remote_voice(&mut self, voice_id: &str) -> Result<()> {
        self.remote.select_voice(voice_id)?;
        self.voice.eleven_labs_voice = Some(voice_id.to_string());
        self.save_voice_settings()
    }

    pub fn set_rate(&mut self, rate: f32) -> Result<()> {
        self.voice.speech_rate = VoiceSettings::clamp_rate(rate);
        self.save_voice_settings()
    }

    pub fn set_pitch(&mut self, pitch: f32) -> Result<()> {
        self.voice.voice_pitch = VoiceSettings::clamp_pitch(pitch);
        self.save_voice_settings()
    }

    // ---- Remote voice service ----

    /// Store or remove the remote service API key
    ///
    /// An empty or absent key clears the credential. A new key triggers a
    /// voice refresh so the outcome is visible immediately.
    pub fn set_api_key(&mut self, key: Option<&str>) -> Result<()> {
        match key.map(str::trim).filter(|k| !k.is_empty()) {
            None => {
                self.store.remove(keys::API_KEY)?;
                self.remote.clear_key();
                self.notifier.push("API key removed");
            }
            Some(k) => {
                self.store.set(keys::API_KEY, &k.to_string())?;
                self.remote.set_key(k.to_string());
                if self.remote.refresh(self.pipeline.remote()) {
                    self.notifier.push(format!(
                        "Connected, {} remote voices available",
                        self.remote.voices().len()
                    ));
                } else {
                    self.notifier
                        .push("Could not reach the remote voice service");
                }
            }
        }
        Ok(())
    }

    pub fn test_connection(&self) -> Result<ConnectionStatus> {
        let key = self
            .remote
            .api_key()
            .ok_or_else(|| VoicelinkError::Config("no API key configured".to_string()))?;
        Ok(self.pipeline.remote().test_connection(key))
    }

    /// Register an audio clip as the custom voice
    pub fn upload_custom_voice(&mut self, path: &Path) -> Result<()> {
        self.pipeline.custom_mut().load(path)?;
        self.voice.custom_voice = Some(path.to_path_buf());
        self.save_voice_settings()?;
        self.notifier.push("Custom voice uploaded");
        Ok(())
    }

    // ---- Settings ----

    /// Flip a boolean setting by name; returns the new value
    pub fn toggle_setting(&mut self, name: &str) -> Result<bool> {
        let (value, label): (&mut bool, &str) = match name {
            "labels" => (&mut self.settings.show_symbol_labels, "Symbol labels"),
            "audio" => (&mut self.settings.audio_feedback, "Audio feedback"),
            "history" => (
                &mut self.settings.conversation_history,
                "Conversation history",
            ),
            "analytics" => (&mut self.settings.usage_analytics, "Usage analytics"),
            "autosave" => (&mut self.settings.auto_save, "Auto-save"),
            "predictions" => (&mut self.settings.smart_predictions, "Smart predictions"),
            "learning" => (&mut self.settings.learning_mode, "Learning mode"),
            "contrast" => (
                &mut self.settings.accessibility.high_contrast,
                "High contrast",
            ),
            "largetext" => (&mut self.settings.accessibility.large_text, "Large text"),
            "motion" => (
                &mut self.settings.accessibility.reduced_motion,
                "Reduced motion",
            ),
            other => {
                return Err(VoicelinkError::Config(format!(
                    "unknown setting: {}",
                    other
                )))
            }
        };
        *value = !*value;
        let enabled = *value;
        let message = format!(
            "{} {}",
            label,
            if enabled { "enabled" } else { "disabled" }
        );
        self.save_settings()?;
        self.notifier.push(message);
        Ok(enabled)
    }

    pub fn set_grid_size(&mut self, size: GridSize) -> Result<()> {
        self.settings.grid_size = size;
        self.save_settings()?;
        self.notifier
            .push(format!("Grid set to {} columns", size.columns()));
        Ok(())
    }

    pub fn set_touch_target_size(&mut self, size: TouchTargetSize) -> Result<()> {
        self.settings.touch_target_size = size;
        self.save_settings()?;
        self.notifier.push(format!(
            "Touch targets set to {}px minimum",
            size.min_height_px()
        ));
        Ok(())
    }

    pub fn select_emotion(&mut self, emotion: Option<&str>) {
        self.current_emotion = emotion.map(str::to_string);
        match &self.current_emotion {
            Some(e) => self.notifier.push(format!("Emotion: {}", e)),
            None => self.notifier.push("Emotion cleared"),
        }
    }

    // ---- Live conversation mode ----

    /// Enter or leave live mode; returns whether it is active afterwards
    pub fn toggle_live_mode(&mut self) -> Result<bool> {
        if self.live.is_active() {
            self.live.deactivate();
            self.notifier.push("Live mode off");
            Ok(false)
        } else {
            self.live.activate();
            if !self.live.has_recognizer() {
                self.notifier
                    .push("Speech recognition is not supported on this platform");
            }
            self.notifier.push("Live mode on");
            Ok(true)
        }
    }

    pub fn toggle_recording(&mut self) -> Result<bool> {
        let recording = self.live.toggle_recording()?;
        self.notifier.push(if recording {
            "Recording started"
        } else {
            "Recording stopped"
        });
        Ok(recording)
    }

    pub fn select_scenario(&mut self, key: &str) -> Result<&'static Scenario> {
        let scenario = self.live.select_scenario(key)?;
        self.notifier.push(format!("Scenario: {}", scenario.name));
        Ok(scenario)
    }

    pub fn transcript(&mut self) -> String {
        self.live.pump();
        self.live.transcript()
    }

    // ---- Persistence ----

    pub fn save_settings(&self) -> Result<()> {
        self.store.set(keys::SETTINGS, &self.settings)
    }

    pub fn save_voice_settings(&mut self) -> Result<()> {
        self.store.set(keys::VOICE_SETTINGS, &self.voice)?;
        self.user_data.voice_settings = Some(self.voice.clone());
        self.store.set(keys::USER_DATA, &self.user_data)
    }

    /// Remove everything persisted and reset in-memory state
    pub fn clear_all_data(&mut self) -> Result<()> {
        self.store.clear()?;
        self.settings = AppSettings::default();
        self.voice = VoiceSettings::default();
        self.user_data = UserData::default();
        self.user_preferences = serde_json::Value::Null;
        self.buffer = MessageBuffer::new();
        self.history = ConversationHistory::new();
        self.patterns = PatternMonitor::new();
        self.remote.clear_key();
        self.current_emotion = None;
        self.notifier.push("All data cleared");
        Ok(())
    }
}
