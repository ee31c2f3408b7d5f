//! Voice backend identifiers and system-voice selection

use crate::speech::synth::SystemVoice;
use crate::{Result, VoicelinkError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three speech-output mechanisms
///
/// The serialized strings are part of the persisted settings format; a
/// stored `"elevenlabs"` selection must keep parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceBackend {
    System,
    #[serde(rename = "elevenlabs", alias = "remote")]
    Remote,
    Custom,
}

impl fmt::Display for VoiceBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            VoiceBackend::System => "system",
            VoiceBackend::Remote => "remote",
            VoiceBackend::Custom => "custom",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for VoiceBackend {
    type Err = VoicelinkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "system" => Ok(VoiceBackend::System),
            "remote" | "elevenlabs" => Ok(VoiceBackend::Remote),
            "custom" => Ok(VoiceBackend::Custom),
            other => Err(VoicelinkError::Config(format!(
                "unknown voice backend: {}",
                other
            ))),
        }
    }
}

/// Pick a default system voice by the child-friendly-name heuristic
///
/// Prefers a voice whose name mentions "child" or "kid", then a female
/// voice, then whatever the platform lists first.
pub fn pick_default_voice(voices: &[SystemVoice]) -> Option<&SystemVoice> {
    voices
        .iter()
        .find(|v| {
            let name = v.name.to_lowercase();
            name.contains("child") || name.contains("kid")
        })
        .or_else(|| voices.iter().find(|v| v.female))
        .or_else(|| voices.first())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voice(id: &str, name: &str, female: bool) -> SystemVoice {
        SystemVoice {
            id: id.to_string(),
            name: name.to_string(),
            female,
        }
    }

    #[test]
    fn test_backend_parse() {
        assert_eq!("system".parse::<VoiceBackend>().unwrap(), VoiceBackend::System);
        assert_eq!("remote".parse::<VoiceBackend>().unwrap(), VoiceBackend::Remote);
        assert_eq!("elevenlabs".parse::<VoiceBackend>().unwrap(), VoiceBackend::Remote);
        assert_eq!("Custom".parse::<VoiceBackend>().unwrap(), VoiceBackend::Custom);
    }

    #[test]
    fn test_backend_parse_rejects_unknown() {
        assert!("robot".parse::<VoiceBackend>().is_err());
        assert!("".parse::<VoiceBackend>().is_err());
    }

    #[test]
    fn test_pick_prefers_child_voice() {
        let voices = vec![
            voice("a", "Alex", false),
            voice("b", "Kids Voice 1", false),
            voice("c", "Samantha", true),
        ];
        assert_eq!(pick_default_voice(&voices).unwrap().id, "b");
    }

    #[test]
    fn test_pick_falls_back_to_female_then_first() {
        let voices = vec![voice("a", "Alex", false), voice("c", "Samantha", true)];
        assert_eq!(pick_default_voice(&voices).unwrap().id, "c");

        let voices = vec![voice("a", "Alex", false), voice("b", "Daniel", false)];
        assert_eq!(pick_default_voice(&voices).unwrap().id, "a");

        assert!(pick_default_voice(&[]).is_none());
    }
}
