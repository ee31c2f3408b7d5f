//! Persisted local key-value store
//!
//! One JSON file per key under the platform data directory. Every write is
//! a whole-object replace of a single key, done synchronously after the
//! mutating user action; there are no transactional guarantees and none are
//! needed. Malformed files are treated as absent so corrupted state can
//! never crash a session.

use crate::{Result, VoicelinkError};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Store keys; part of the on-disk format, do not rename
pub mod keys {
    pub const API_KEY: &str = "elevenlabs_api_key";
    pub const USER_DATA: &str = "voicelinkUserData";
    pub const SETTINGS: &str = "voicelink_settings";
    pub const VOICE_SETTINGS: &str = "voicelink_voice_settings";
    pub const USER_PREFERENCES: &str = "userPreferences";
    pub const SAVED_PHRASES: &str = "savedPhrases";
}

/// JSON key-value store rooted in a single directory
pub struct LocalStore {
    dir: PathBuf,
}

impl LocalStore {
    /// Open the store in the platform data directory, creating it if needed
    pub fn open() -> Result<Self> {
        let dir = dirs::data_dir()
            .ok_or_else(|| VoicelinkError::Storage("could not find data directory".to_string()))?
            .join("voicelink");
        Self::with_dir(dir)
    }

    /// Open the store rooted at an explicit directory
    pub fn with_dir(dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&dir)
            .map_err(|e| VoicelinkError::Storage(format!("failed to create {:?}: {}", dir, e)))?;
        debug!("Local store at {:?}", dir);
        Ok(Self { dir })
    }

    /// Store directory, for display
    pub fn path(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Read and deserialize a key
    ///
    /// Absent files and malformed JSON both yield `None`; corruption is
    /// logged and the caller substitutes defaults.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.file_for(key);
        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("Malformed data for key {:?}, using defaults: {}", key, e);
                None
            }
        }
    }

    /// Serialize and write a key, replacing any previous value
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let path = self.file_for(key);
        let contents = serde_json::to_string_pretty(value)?;
        fs::write(&path, contents)
            .map_err(|e| VoicelinkError::Storage(format!("failed to write {:?}: {}", path, e)))?;
        debug!("Wrote key {:?}", key);
        Ok(())
    }

    /// Delete a key; absent keys are not an error
    pub fn remove(&self, key: &str) -> Result<()> {
        let path = self.file_for(key);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VoicelinkError::Storage(format!(
                "failed to remove {:?}: {}",
                path, e
            ))),
        }
    }

    /// Delete every stored key
    pub fn clear(&self) -> Result<()> {
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            if entry.path().extension().is_some_and(|ext| ext == "json") {
                fs::remove_file(entry.path())?;
            }
        }
        Ok(())
    }
}
