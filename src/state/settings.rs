//! Persisted settings and preferences
//!
//! Three documents, each a whole-object replace in the local store:
//! app settings (`voicelink_settings`), voice settings
//! (`voicelink_voice_settings`), and user data (`voicelinkUserData`).
//! Field names serialize camelCase; the serialized shape is part of the
//! on-disk format.

use crate::speech::selector::VoiceBackend;
use chrono::Timelike;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Speech rate multiplier bounds
pub const MIN_RATE: f32 = 0.25;
pub const MAX_RATE: f32 = 4.0;

/// Voice pitch multiplier bounds
pub const MIN_PITCH: f32 = 0.5;
pub const MAX_PITCH: f32 = 2.0;

/// Symbol grid density
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridSize {
    Small,
    Medium,
    Large,
}

impl GridSize {
    /// Grid columns for this density
    pub fn columns(&self) -> u8 {
        match self {
            GridSize::Small => 4,
            GridSize::Medium => 6,
            GridSize::Large => 8,
        }
    }
}

impl FromStr for GridSize {
    type Err = crate::VoicelinkError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "small" => Ok(GridSize::Small),
            "medium" => Ok(GridSize::Medium),
            "large" => Ok(GridSize::Large),
            other => Err(crate::VoicelinkError::Config(format!(
                "unknown grid size: {}",
                other
            ))),
        }
    }
}

/// Minimum tap-target size for symbol tiles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TouchTargetSize {
    Small,
    Medium,
    Large,
    ExtraLarge,
}

impl TouchTargetSize {
    /// Minimum tile height in pixels
    pub fn min_height_px(&self) -> u16 {
        match self {
            TouchTargetSize::Small => 44,
            TouchTargetSize::Medium => 60,
            TouchTargetSize::Large => 80,
            TouchTargetSize::ExtraLarge => 100,
        }
    }
}

impl FromStr for TouchTargetSize {
    type Err = crate::VoicelinkError;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().as_str() {
            "small" => Ok(TouchTargetSize::Small),
            "medium" => Ok(TouchTargetSize::Medium),
            "large" => Ok(TouchTargetSize::Large),
            "extra-large" | "xl" => Ok(TouchTargetSize::ExtraLarge),
            other => Err(crate::VoicelinkError::Config(format!(
                "unknown touch target size: {}",
                other
            ))),
        }
    }
}

/// Accessibility toggles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AccessibilityMode {
    pub high_contrast: bool,
    pub large_text: bool,
    pub reduced_motion: bool,
}

/// Application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppSettings {
    pub grid_size: GridSize,
    pub show_symbol_labels: bool,
    pub audio_feedback: bool,
    pub conversation_history: bool,
    pub usage_analytics: bool,
    pub auto_save: bool,
    pub smart_predictions: bool,
    pub learning_mode: bool,
    pub touch_target_size: TouchTargetSize,
    pub accessibility: AccessibilityMode,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            grid_size: GridSize::Medium,
            show_symbol_labels: true,
            audio_feedback: true,
            conversation_history: false,
            usage_analytics: true,
            auto_save: true,
            smart_predictions: true,
            learning_mode: true,
            touch_target_size: TouchTargetSize::Medium,
            accessibility: AccessibilityMode::default(),
        }
    }
}

/// Voice preference: active backend plus per-backend parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VoiceSettings {
    pub selected_voice: VoiceBackend,
    pub speech_rate: f32,
    pub voice_pitch: f32,
    pub system_voice: Option<String>,
    pub eleven_labs_voice: Option<String>,
    pub custom_voice: Option<PathBuf>,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            selected_voice: VoiceBackend::System,
            speech_rate: 1.0,
            voice_pitch: 1.0,
            system_voice: None,
            eleven_labs_voice: None,
            custom_voice: None,
        }
    }
}

impl VoiceSettings {
    /// Clamp a rate multiplier to the supported range
    pub fn clamp_rate(rate: f32) -> f32 {
        rate.clamp(MIN_RATE, MAX_RATE)
    }

    /// Clamp a pitch multiplier to the supported range
    pub fn clamp_pitch(pitch: f32) -> f32 {
        pitch.clamp(MIN_PITCH, MAX_PITCH)
    }
}

/// Coarse time of day, used for conversation context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        if hour < 12 {
            TimeOfDay::Morning
        } else if hour < 18 {
            TimeOfDay::Afternoon
        } else {
            TimeOfDay::Evening
        }
    }

    pub fn now() -> Self {
        Self::from_hour(chrono::Local::now().hour())
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        };
        write!(f, "{}", name)
    }
}

/// Ambient conversation context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ConversationContext {
    pub location: String,
    pub time_of_day: TimeOfDay,
    pub recent_topics: Vec<String>,
}

impl Default for ConversationContext {
    fn default() -> Self {
        Self {
            location: "home".to_string(),
            time_of_day: TimeOfDay::now(),
            recent_topics: Vec::new(),
        }
    }
}

/// The `voicelinkUserData` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserData {
    pub conversation_context: ConversationContext,
    /// Voice settings snapshot; the dedicated key takes precedence on load
    pub voice_settings: Option<VoiceSettings>,
}
