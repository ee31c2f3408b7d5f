//! Speech backends

// System TTS via the tts crate (cross-platform)
pub mod system;

// Remote neural voices (ElevenLabs HTTP API)
pub mod remote;

// User-supplied custom voice clip
pub mod custom;
