//! Integration tests for the local key/value store
//!
//! Each test opens a store in its own temporary directory so nothing
//! touches the real data directory.

use tempfile::tempdir;
use voicelink::state::settings::{AppSettings, GridSize, VoiceSettings};
use voicelink::storage::{keys, LocalStore};

#[test]
fn test_round_trip_settings() {
    let dir = tempdir().unwrap();
    let store = LocalStore::with_dir(dir.path().to_path_buf()).unwrap();

    let mut settings = AppSettings::default();
    settings.grid_size = GridSize::Large;
    settings.audio_feedback = false;
    store.set(keys::SETTINGS, &settings).unwrap();

    let loaded: AppSettings = store.get(keys::SETTINGS).expect("settings persisted");
    assert_eq!(loaded, settings);
}

#[test]
fn test_missing_key_is_none() {
    let dir = tempdir().unwrap();
    let store = LocalStore::with_dir(dir.path().to_path_buf()).unwrap();

    assert!(store.get::<AppSettings>(keys::SETTINGS).is_none());
}

#[test]
fn test_corrupt_document_falls_back_to_none() {
    let dir = tempdir().unwrap();
    let store = LocalStore::with_dir(dir.path().to_path_buf()).unwrap();

    std::fs::write(
        dir.path().join(format!("{}.json", keys::VOICE_SETTINGS)),
        "{not json",
    )
    .unwrap();

    assert!(store.get::<VoiceSettings>(keys::VOICE_SETTINGS).is_none());
}

#[test]
fn test_set_replaces_whole_document() {
    let dir = tempdir().unwrap();
    let store = LocalStore::with_dir(dir.path().to_path_buf()).unwrap();

    let mut voice = VoiceSettings::default();
    voice.speech_rate = 1.5;
    voice.system_voice = Some("en-1".to_string());
    store.set(keys::VOICE_SETTINGS, &voice).unwrap();

    // Writing a default document drops the earlier fields entirely
    store
        .set(keys::VOICE_SETTINGS, &VoiceSettings::default())
        .unwrap();
    let loaded: VoiceSettings = store.get(keys::VOICE_SETTINGS).unwrap();
    assert_eq!(loaded.speech_rate, 1.0);
    assert_eq!(loaded.system_voice, None);
}

#[test]
fn test_remove_is_idempotent() {
    let dir = tempdir().unwrap();
    let store = LocalStore::with_dir(dir.path().to_path_buf()).unwrap();

    store
        .set(keys::API_KEY, &"sk-test".to_string())
        .unwrap();
    store.remove(keys::API_KEY).unwrap();
    assert!(store.get::<String>(keys::API_KEY).is_none());

    // Removing a key that is already gone is not an error
    store.remove(keys::API_KEY).unwrap();
}

#[test]
fn test_clear_removes_every_key() {
    let dir = tempdir().unwrap();
    let store = LocalStore::with_dir(dir.path().to_path_buf()).unwrap();

    store.set(keys::SETTINGS, &AppSettings::default()).unwrap();
    store
        .set(keys::API_KEY, &"sk-test".to_string())
        .unwrap();

    store.clear().unwrap();
    assert!(store.get::<AppSettings>(keys::SETTINGS).is_none());
    assert!(store.get::<String>(keys::API_KEY).is_none());
}
