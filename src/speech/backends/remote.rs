//! Remote neural voice backend (ElevenLabs HTTP API)
//!
//! Higher quality than the system engine when configured, but never allowed
//! to block message delivery: every failure here is reported back as a
//! signal so the pipeline can fall through to the system voice.

use crate::{audio, Result, VoicelinkError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Read;
use std::time::Duration;

const API_BASE: &str = "https://api.elevenlabs.io";
const MODEL_ID: &str = "eleven_monolingual_v1";
const STABILITY: f32 = 0.5;
const SIMILARITY_BOOST: f32 = 0.5;

/// Without a timeout an unreachable provider would hang the session
/// instead of falling through to the system voice.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cap on a synthesis payload, to bound memory on a misbehaving server
const MAX_AUDIO_BYTES: u64 = 50 * 1024 * 1024;

/// A voice offered by the remote provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteVoice {
    pub id: String,
    pub name: String,
    pub description: String,
    pub category: String,
}

/// Result of a connectivity probe, categorized for diagnostics
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionStatus {
    Connected { voice_count: usize },
    Unauthorized,
    Error(u16),
    Unreachable,
}

impl fmt::Display for ConnectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConnectionStatus::Connected { voice_count } => {
                write!(f, "connected ({} voices)", voice_count)
            }
            ConnectionStatus::Unauthorized => write!(f, "unauthorized"),
            ConnectionStatus::Error(status) => write!(f, "error:{}", status),
            ConnectionStatus::Unreachable => write!(f, "unreachable"),
        }
    }
}

/// Remote voice provider operations
///
/// The pipeline and session depend on this trait, not on the HTTP client,
/// so fallback behavior can be tested without a network.
pub trait RemoteSynth: Send {
    /// List the voices available to this credential
    fn fetch_voices(&self, api_key: &str) -> Result<Vec<RemoteVoice>>;

    /// Synthesize text with a voice and play the result at `playback_rate`
    fn speak(&self, text: &str, voice_id: &str, api_key: &str, playback_rate: f32) -> Result<()>;

    /// Probe connectivity without mutating any state
    fn test_connection(&self, api_key: &str) -> ConnectionStatus;
}

// Wire format for GET /v1/voices
#[derive(Deserialize)]
struct VoicesResponse {
    voices: Vec<VoiceEntry>,
}

#[derive(Deserialize)]
struct VoiceEntry {
    voice_id: String,
    name: String,
    #[serde(default)]
    labels: VoiceLabels,
    #[serde(default)]
    category: String,
}

#[derive(Deserialize, Default)]
struct VoiceLabels {
    description: Option<String>,
}

impl VoiceEntry {
    fn into_voice(self) -> RemoteVoice {
        RemoteVoice {
            id: self.voice_id,
            name: self.name,
            description: self
                .labels
                .description
                .unwrap_or_else(|| "Remote voice".to_string()),
            category: self.category,
        }
    }
}

fn describe_request_error(e: ureq::Error) -> String {
    match e {
        ureq::Error::Status(code, _) => format!("status {}", code),
        ureq::Error::Transport(t) => format!("network error: {}", t),
    }
}

/// ElevenLabs HTTP client
pub struct ElevenLabsClient {
    agent: ureq::Agent,
}

impl ElevenLabsClient {
    pub fn new() -> Self {
        Self {
            agent: ureq::AgentBuilder::new().timeout(REQUEST_TIMEOUT).build(),
        }
    }

    /// Request synthesis and return the encoded audio payload
    fn synthesize(&self, text: &str, voice_id: &str, api_key: &str) -> Result<Vec<u8>> {
        debug!("Synthesizing {} chars with remote voice {}", text.len(), voice_id);

        let response = self
            .agent
            .post(&format!("{}/v1/text-to-speech/{}", API_BASE, voice_id))
            .set("Accept", "audio/mpeg")
            .set("Content-Type", "application/json")
            .set("xi-api-key", api_key)
            .send_json(serde_json::json!({
                "text": text,
                "model_id": MODEL_ID,
                "voice_settings": {
                    "stability": STABILITY,
                    "similarity_boost": SIMILARITY_BOOST,
                },
            }))
            .map_err(|e| {
                VoicelinkError::Remote(format!("synthesis failed: {}", describe_request_error(e)))
            })?;

        let mut bytes = Vec::new();
        response
            .into_reader()
            .take(MAX_AUDIO_BYTES)
            .read_to_end(&mut bytes)
            .map_err(|e| VoicelinkError::Remote(format!("failed to read audio payload: {}", e)))?;

        if bytes.is_empty() {
            return Err(VoicelinkError::Remote("empty audio payload".to_string()));
        }

        Ok(bytes)
    }
}

impl Default for ElevenLabsClient {
    fn default() -> Self {
        Self::new()
    }
}

impl RemoteSynth for ElevenLabsClient {
    fn fetch_voices(&self, api_key: &str) -> Result<Vec<RemoteVoice>> {
        let response = self
            .agent
            .get(&format!("{}/v1/voices", API_BASE))
            .set("xi-api-key", api_key)
            .call()
            .map_err(|e| {
                VoicelinkError::Remote(format!(
                    "voice list request failed: {}",
                    describe_request_error(e)
                ))
            })?;

        let parsed: VoicesResponse = response
            .into_json()
            .map_err(|e| VoicelinkError::Remote(format!("malformed voice list: {}", e)))?;

        Ok(parsed.voices.into_iter().map(VoiceEntry::into_voice).collect())
    }

    fn speak(&self, text: &str, voice_id: &str, api_key: &str, playback_rate: f32) -> Result<()> {
        let payload = self.synthesize(text, voice_id, api_key)?;
        audio::play_encoded(payload, playback_rate)
    }

    fn test_connection(&self, api_key: &str) -> ConnectionStatus {
        let request = self
            .agent
            .get(&format!("{}/v1/voices", API_BASE))
            .set("xi-api-key", api_key);

        match request.call() {
            Ok(response) => match response.into_json::<VoicesResponse>() {
                Ok(parsed) => ConnectionStatus::Connected {
                    voice_count: parsed.voices.len(),
                },
                Err(_) => ConnectionStatus::Unreachable,
            },
            Err(ureq::Error::Status(401, _)) => ConnectionStatus::Unauthorized,
            Err(ureq::Error::Status(status, _)) => ConnectionStatus::Error(status),
            Err(ureq::Error::Transport(_)) => ConnectionStatus::Unreachable,
        }
    }
}

/// Credential and voice-list state for the remote backend
///
/// `ready` is true only once a key is present and at least one voice has
/// been fetched. Refresh failures leave the prior voice list untouched.
#[derive(Default)]
pub struct RemoteState {
    api_key: Option<String>,
    voices: Vec<RemoteVoice>,
    current: Option<String>,
    ready: bool,
}

impl RemoteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Remove the credential; readiness is cleared with it
    pub fn clear_key(&mut self) {
        self.api_key = None;
        self.ready = false;
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn voices(&self) -> &[RemoteVoice] {
        &self.voices
    }

    /// The currently selected remote voice, if any
    pub fn current_voice(&self) -> Option<&RemoteVoice> {
        let id = self.current.as_deref()?;
        self.voices.iter().find(|v| v.id == id)
    }

    /// Select a remote voice by id
    pub fn select_voice(&mut self, voice_id: &str) -> Result<()> {
        if !self.voices.iter().any(|v| v.id == voice_id) {
            return Err(VoicelinkError::Remote(format!(
                "unknown remote voice: {}",
                voice_id
            )));
        }
        self.current = Some(voice_id.to_string());
        Ok(())
    }

    /// Reload the voice list from the provider
    ///
    /// Returns true when the backend ends up ready. Never propagates the
    /// underlying failure; it is logged and readiness goes false.
    pub fn refresh(&mut self, api: &dyn RemoteSynth) -> bool {
        let Some(api_key) = self.api_key.clone() else {
            debug!("No remote API key configured");
            self.ready = false;
            return false;
        };

        match api.fetch_voices(&api_key) {
            Ok(voices) if !voices.is_empty() => {
                let current_still_valid = self
                    .current
                    .as_deref()
                    .is_some_and(|id| voices.iter().any(|v| v.id == id));
                if !current_still_valid {
                    self.current = Some(voices[0].id.clone());
                }
                info!("Loaded {} remote voices", voices.len());
                self.voices = voices;
                self.ready = true;
                true
            }
            Ok(_) => {
                warn!("Remote voice list is empty");
                self.ready = false;
                false
            }
            Err(e) => {
                warn!("Failed to load remote voices: {}", e);
                self.ready = false;
                false
            }
        }
    }
}
