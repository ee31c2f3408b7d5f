//! Integration tests for the speech output pipeline and session
//!
//! Both speech backends sit behind traits, so these tests drive the full
//! fallback chain with in-memory fakes and assert on exactly which backend
//! was asked to speak, with what text and parameters.

use std::sync::{Arc, Mutex};
use tempfile::tempdir;
use voicelink::catalog::{self, Category};
use voicelink::notify::Notifier;
use voicelink::speech::backends::remote::{
    ConnectionStatus, RemoteState, RemoteSynth, RemoteVoice,
};
use voicelink::speech::pipeline::{SpeakOutcome, SpeechPipeline};
use voicelink::speech::selector::VoiceBackend;
use voicelink::speech::synth::{SpeakParams, Synth};
use voicelink::state::settings::VoiceSettings;
use voicelink::state::Session;
use voicelink::storage::LocalStore;
use voicelink::{Result, VoicelinkError};

/// Records every utterance dispatched to the "system engine"
#[derive(Clone, Default)]
struct FakeSynth {
    spoken: Arc<Mutex<Vec<(String, f32, f32)>>>,
}

impl Synth for FakeSynth {
    fn speak(&mut self, text: &str, params: &SpeakParams) -> Result<()> {
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), params.rate, params.pitch));
        Ok(())
    }

    fn cancel(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        false
    }
}

/// Scripted remote provider that records synthesis requests
#[derive(Clone)]
struct FakeRemote {
    voices: Vec<RemoteVoice>,
    fetch_fails: bool,
    speak_fails: bool,
    speak_calls: Arc<Mutex<Vec<(String, String, f32)>>>,
}

impl FakeRemote {
    fn with_voice(id: &str) -> Self {
        Self {
            voices: vec![RemoteVoice {
                id: id.to_string(),
                name: "Rachel".to_string(),
                description: "Remote voice".to_string(),
                category: "premade".to_string(),
            }],
            fetch_fails: false,
            speak_fails: false,
            speak_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn unreachable() -> Self {
        Self {
            voices: Vec::new(),
            fetch_fails: true,
            speak_fails: true,
            speak_calls: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl RemoteSynth for FakeRemote {
    fn fetch_voices(&self, _api_key: &str) -> Result<Vec<RemoteVoice>> {
        if self.fetch_fails {
            Err(VoicelinkError::Remote("network error".to_string()))
        } else {
            Ok(self.voices.clone())
        }
    }

    fn speak(&self, text: &str, voice_id: &str, _api_key: &str, playback_rate: f32) -> Result<()> {
        self.speak_calls.lock().unwrap().push((
            text.to_string(),
            voice_id.to_string(),
            playback_rate,
        ));
        if self.speak_fails {
            Err(VoicelinkError::Remote("status 500".to_string()))
        } else {
            Ok(())
        }
    }

    fn test_connection(&self, _api_key: &str) -> ConnectionStatus {
        if self.fetch_fails {
            ConnectionStatus::Unreachable
        } else {
            ConnectionStatus::Connected {
                voice_count: self.voices.len(),
            }
        }
    }
}

fn ready_remote_state(remote: &FakeRemote) -> RemoteState {
    let mut state = RemoteState::new();
    state.set_key("sk-test".to_string());
    assert!(state.refresh(remote));
    state
}

#[test]
fn test_remote_success_skips_system() {
    let synth = FakeSynth::default();
    let remote = FakeRemote::with_voice("v1");
    let remote_state = ready_remote_state(&remote);
    let mut pipeline =
        SpeechPipeline::with_backends(Some(Box::new(synth.clone())), Box::new(remote.clone()));
    let mut notifier = Notifier::new();

    let voice = VoiceSettings {
        selected_voice: VoiceBackend::Remote,
        ..Default::default()
    };
    let outcome = pipeline.speak("Hello there", &voice, &remote_state, false, &mut notifier);

    assert_eq!(outcome, SpeakOutcome::Remote);
    let calls = remote.speak_calls.lock().unwrap();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0], ("Hello there".to_string(), "v1".to_string(), 1.0));
    assert!(synth.spoken.lock().unwrap().is_empty());
}

#[test]
fn test_remote_failure_falls_back_to_system() {
    let synth = FakeSynth::default();
    let mut remote = FakeRemote::with_voice("v1");
    let remote_state = ready_remote_state(&remote);
    remote.speak_fails = true;
    let mut pipeline =
        SpeechPipeline::with_backends(Some(Box::new(synth.clone())), Box::new(remote.clone()));
    let mut notifier = Notifier::new();

    let voice = VoiceSettings {
        selected_voice: VoiceBackend::Remote,
        speech_rate: 1.5,
        voice_pitch: 0.8,
        ..Default::default()
    };
    let outcome = pipeline.speak("I want help", &voice, &remote_state, false, &mut notifier);

    assert_eq!(outcome, SpeakOutcome::System);
    // The remote backend was tried exactly once before falling back
    assert_eq!(remote.speak_calls.lock().unwrap().len(), 1);
    let spoken = synth.spoken.lock().unwrap();
    assert_eq!(spoken.as_slice(), &[("I want help".to_string(), 1.5, 0.8)]);
    // The user was told about the fallback
    assert!(notifier
        .take()
        .iter()
        .any(|n| n.contains("using system voice")));
}

#[test]
fn test_remote_not_ready_goes_straight_to_system() {
    let synth = FakeSynth::default();
    let remote = FakeRemote::unreachable();
    let mut remote_state = RemoteState::new();
    remote_state.set_key("sk-test".to_string());
    assert!(!remote_state.refresh(&remote));

    let mut pipeline =
        SpeechPipeline::with_backends(Some(Box::new(synth.clone())), Box::new(remote.clone()));
    let mut notifier = Notifier::new();

    let voice = VoiceSettings {
        selected_voice: VoiceBackend::Remote,
        ..Default::default()
    };
    let outcome = pipeline.speak("Hello", &voice, &remote_state, false, &mut notifier);

    assert_eq!(outcome, SpeakOutcome::System);
    // No synthesis request went out at all
    assert!(remote.speak_calls.lock().unwrap().is_empty());
    assert_eq!(synth.spoken.lock().unwrap().len(), 1);
}

#[test]
fn test_empty_message_is_a_no_op() {
    let synth = FakeSynth::default();
    let mut pipeline = SpeechPipeline::with_backends(
        Some(Box::new(synth.clone())),
        Box::new(FakeRemote::unreachable()),
    );
    let mut notifier = Notifier::new();

    let outcome = pipeline.speak(
        "",
        &VoiceSettings::default(),
        &RemoteState::new(),
        false,
        &mut notifier,
    );

    assert_eq!(outcome, SpeakOutcome::Empty);
    assert!(synth.spoken.lock().unwrap().is_empty());
    assert!(notifier.is_empty());
}

#[test]
fn test_no_system_engine_reports_unsupported() {
    let mut pipeline =
        SpeechPipeline::with_backends(None, Box::new(FakeRemote::unreachable()));
    let mut notifier = Notifier::new();

    let outcome = pipeline.speak(
        "Hello",
        &VoiceSettings::default(),
        &RemoteState::new(),
        false,
        &mut notifier,
    );

    assert_eq!(outcome, SpeakOutcome::Unsupported);
    assert!(notifier
        .take()
        .iter()
        .any(|n| n.contains("not supported")));
}

struct BrokenSynth;

impl Synth for BrokenSynth {
    fn speak(&mut self, _text: &str, _params: &SpeakParams) -> Result<()> {
        Err(VoicelinkError::Speech("engine refused".to_string()))
    }

    fn cancel(&mut self) -> Result<()> {
        Ok(())
    }

    fn is_speaking(&self) -> bool {
        false
    }
}

#[test]
fn test_system_dispatch_failure_is_not_unsupported() {
    let mut pipeline = SpeechPipeline::with_backends(
        Some(Box::new(BrokenSynth)),
        Box::new(FakeRemote::unreachable()),
    );
    let mut notifier = Notifier::new();

    let outcome = pipeline.speak(
        "Hello",
        &VoiceSettings::default(),
        &RemoteState::new(),
        false,
        &mut notifier,
    );

    // An engine that exists but errors is a failure, not a missing capability
    assert_eq!(outcome, SpeakOutcome::Failed);
    assert!(notifier
        .take()
        .iter()
        .any(|n| n.contains("Speech synthesis failed")));
}

#[test]
fn test_custom_without_clip_falls_back_to_system() {
    let synth = FakeSynth::default();
    let mut pipeline = SpeechPipeline::with_backends(
        Some(Box::new(synth.clone())),
        Box::new(FakeRemote::unreachable()),
    );
    let mut notifier = Notifier::new();

    let voice = VoiceSettings {
        selected_voice: VoiceBackend::Custom,
        ..Default::default()
    };
    let outcome = pipeline.speak("Hi", &voice, &RemoteState::new(), false, &mut notifier);

    assert_eq!(outcome, SpeakOutcome::System);
    assert!(notifier
        .take()
        .iter()
        .any(|n| n.contains("Custom voice not set up")));
}

// ---- Session-level behavior ----

fn session_with(synth: FakeSynth, remote: FakeRemote) -> (Session, tempfile::TempDir) {
    let dir = tempdir().unwrap();
    let store = LocalStore::with_dir(dir.path().to_path_buf()).unwrap();
    let pipeline = SpeechPipeline::with_backends(Some(Box::new(synth)), Box::new(remote));
    (Session::with_pipeline(store, pipeline), dir)
}

#[test]
fn test_session_speak_records_history() {
    let synth = FakeSynth::default();
    let (mut session, _dir) = session_with(synth.clone(), FakeRemote::unreachable());
    session.settings.audio_feedback = false;

    for id in ["i", "want", "help"] {
        session.add_symbol(Category::Core, id).unwrap();
    }
    let outcome = session.speak_message();

    assert_eq!(outcome, SpeakOutcome::System);
    let spoken = synth.spoken.lock().unwrap();
    assert_eq!(spoken.as_slice(), &[("I want help".to_string(), 1.0, 1.0)]);
    assert_eq!(session.history.len(), 1);
    assert_eq!(session.history.recent(1)[0].text, "I want help");
    // Analytics are on by default, so each symbol was counted
    assert!(!session.patterns.is_empty());
    // Speaking does not clear the buffer
    assert_eq!(session.buffer.len(), 3);
}

#[test]
fn test_session_remote_selection_without_credential_falls_back() {
    let (mut session, _dir) = session_with(FakeSynth::default(), FakeRemote::unreachable());

    session.select_voice(VoiceBackend::Remote).unwrap();

    assert_eq!(session.voice.selected_voice, VoiceBackend::System);
    assert!(session
        .notifier
        .take()
        .iter()
        .any(|n| n.contains("Remote voice unavailable")));
}

#[test]
fn test_session_remote_selection_with_credential() {
    let remote = FakeRemote::with_voice("v1");
    let (mut session, _dir) = session_with(FakeSynth::default(), remote);
    session.set_api_key(Some("sk-test")).unwrap();

    session.select_voice(VoiceBackend::Remote).unwrap();

    assert_eq!(session.voice.selected_voice, VoiceBackend::Remote);
    assert_eq!(session.voice.eleven_labs_voice.as_deref(), Some("v1"));
}

#[test]
fn test_session_unknown_symbol_is_rejected() {
    let (mut session, _dir) = session_with(FakeSynth::default(), FakeRemote::unreachable());

    assert!(session.add_symbol(Category::Core, "no-such-id").is_err());
    assert!(session.buffer.is_empty());
}

#[test]
fn test_session_rate_and_pitch_are_clamped_and_saved() {
    let (mut session, _dir) = session_with(FakeSynth::default(), FakeRemote::unreachable());

    session.set_rate(99.0).unwrap();
    session.set_pitch(0.01).unwrap();
    assert_eq!(session.voice.speech_rate, 4.0);
    assert_eq!(session.voice.voice_pitch, 0.5);

    let persisted: VoiceSettings = session
        .store
        .get(voicelink::storage::keys::VOICE_SETTINGS)
        .unwrap();
    assert_eq!(persisted.speech_rate, 4.0);
}

#[test]
fn test_session_live_mode_without_recognition_is_non_fatal() {
    let (mut session, _dir) = session_with(FakeSynth::default(), FakeRemote::unreachable());

    // No recognition engine exists here; live mode must still come up
    assert!(session.toggle_live_mode().unwrap());
    let notices = session.notifier.take();
    assert!(notices.iter().any(|n| n.contains("not supported")));
    assert!(notices.iter().any(|n| n == "Live mode on"));

    assert!(!session.toggle_live_mode().unwrap());
}

#[test]
fn test_session_search_is_exact_before_partial() {
    // "eat" matches the symbol id exactly and also appears inside labels
    let results = catalog::search("eat");
    assert!(!results.is_empty());
    assert_eq!(results[0].id, "eat");
}
