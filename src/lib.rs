//! VoiceLink - symbol-based communication aid
//!
//! A console AAC (augmentative and alternative communication) tool: users
//! compose messages from a categorized symbol grid and speak them through
//! the system voice, a remote neural voice service, or an uploaded custom
//! voice clip, with automatic fallback between them.

pub mod audio;
pub mod catalog;
pub mod clipboard;
pub mod error;
pub mod history;
pub mod live;
pub mod message;
pub mod notify;
pub mod scenario;
pub mod speech;
pub mod state;
pub mod storage;

pub use error::{Result, VoicelinkError};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "voicelink";
