//! Custom voice backend
//!
//! Holds a user-supplied audio clip. The backend can be selected before a
//! clip exists; until one is loaded it reports not-ready and the pipeline
//! falls through to the system voice.

use crate::{audio, Result};
use log::debug;
use std::path::{Path, PathBuf};

/// User-uploaded voice clip
#[derive(Default)]
pub struct CustomVoice {
    clip: Option<PathBuf>,
}

impl CustomVoice {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a clip, verifying it decodes as audio first
    pub fn load(&mut self, path: &Path) -> Result<()> {
        audio::probe_file(path)?;
        debug!("Custom voice clip loaded from {:?}", path);
        self.clip = Some(path.to_path_buf());
        Ok(())
    }

    /// Whether a clip has been supplied
    pub fn is_ready(&self) -> bool {
        self.clip.is_some()
    }

    pub fn clip_path(&self) -> Option<&Path> {
        self.clip.as_deref()
    }

    /// Play the clip at the configured rate
    pub fn play(&self, playback_rate: f32) -> Result<()> {
        let path = self
            .clip
            .as_deref()
            .ok_or_else(|| crate::VoicelinkError::Speech("no custom voice clip loaded".into()))?;
        audio::play_file(path, playback_rate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_starts_not_ready() {
        let voice = CustomVoice::new();
        assert!(!voice.is_ready());
        assert!(voice.play(1.0).is_err());
    }

    #[test]
    fn test_load_rejects_non_audio() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not audio at all").unwrap();

        let mut voice = CustomVoice::new();
        assert!(voice.load(file.path()).is_err());
        assert!(!voice.is_ready());
    }
}
