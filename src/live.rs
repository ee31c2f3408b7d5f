//! Live conversation mode
//!
//! Wraps platform speech recognition to produce a running transcript and
//! offer scenario-based phrase suggestions. Recognition sits behind the
//! `Recognizer` trait; transcript fragments arrive over a channel so the
//! controller never blocks on the platform.

use crate::scenario::{self, Scenario};
use crate::{Result, VoicelinkError};
use log::{debug, info};
use std::sync::mpsc::{Receiver, Sender};

/// A partial or final transcript fragment from the recognizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptEvent {
    pub text: String,
    pub is_final: bool,
}

/// Continuous speech recognition handle
///
/// Implementations push `TranscriptEvent`s into the channel handed to them
/// at construction. `stop` is the only cancellation path.
pub trait Recognizer: Send {
    fn start(&mut self) -> Result<()>;
    fn stop(&mut self);
}

/// Probe for a platform speech recognition backend
///
/// No continuous recognition engine ships with this build, so the probe
/// reports unsupported; callers surface the standard non-fatal notice and
/// live mode stays usable for scenario browsing.
pub fn create_recognizer(_events: Sender<TranscriptEvent>) -> Result<Box<dyn Recognizer>> {
    Err(VoicelinkError::Speech(
        "speech recognition is not supported on this platform".to_string(),
    ))
}

/// Live conversation controller state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiveState {
    Inactive,
    Active { recording: bool },
}

/// Live conversation controller
///
/// State machine: inactive → active(not recording) ⇄ active(recording)
/// → inactive. Starting and stopping recognition happens exactly on the
/// recording transitions.
pub struct LiveConversation {
    state: LiveState,
    recognizer: Option<Box<dyn Recognizer>>,
    events: Option<Receiver<TranscriptEvent>>,
    /// Finalized transcript text
    committed: String,
    /// Latest interim fragment, replaced until finalized
    pending: String,
    scenario: Option<&'static Scenario>,
}

impl LiveConversation {
    pub fn new() -> Self {
        Self {
            state: LiveState::Inactive,
            recognizer: None,
            events: None,
            committed: String::new(),
            pending: String::new(),
            scenario: None,
        }
    }

    pub fn state(&self) -> LiveState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state != LiveState::Inactive
    }

    pub fn is_recording(&self) -> bool {
        self.state == LiveState::Active { recording: true }
    }

    /// Enter live mode
    ///
    /// Missing recognition does not fail activation; the mode comes up
    /// without a recognizer so scenarios remain browsable, and the caller
    /// can check `has_recognizer` to tell the user.
    pub fn activate(&mut self) {
        if self.is_active() {
            return;
        }
        self.state = LiveState::Active { recording: false };

        if self.recognizer.is_none() {
            let (tx, rx) = std::sync::mpsc::channel();
            match create_recognizer(tx) {
                Ok(recognizer) => {
                    self.recognizer = Some(recognizer);
                    self.events = Some(rx);
                }
                Err(e) => {
                    info!("Live mode activated without recognition: {}", e);
                }
            }
        }
        info!("Live mode activated");
    }

    /// Whether a recognition backend is available for recording
    pub fn has_recognizer(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Supply a recognition backend and its event channel
    ///
    /// Used by tests and by embedders that bring their own engine.
    pub fn attach_recognizer(
        &mut self,
        recognizer: Box<dyn Recognizer>,
        events: Receiver<TranscriptEvent>,
    ) {
        self.recognizer = Some(recognizer);
        self.events = Some(events);
    }

    /// Leave live mode, stopping recognition if it is running
    pub fn deactivate(&mut self) {
        if self.is_recording() {
            if let Some(recognizer) = self.recognizer.as_mut() {
                recognizer.stop();
            }
        }
        self.state = LiveState::Inactive;
        self.recognizer = None;
        self.events = None;
        debug!("Live mode deactivated");
    }

    /// Flip recording on or off; returns the new recording state
    pub fn toggle_recording(&mut self) -> Result<bool> {
        match self.state {
            LiveState::Inactive => Err(VoicelinkError::Speech(
                "live mode is not active".to_string(),
            )),
            LiveState::Active { recording: false } => {
                let recognizer = self.recognizer.as_mut().ok_or_else(|| {
                    VoicelinkError::Speech(
                        "speech recognition is not supported on this platform".to_string(),
                    )
                })?;
                recognizer.start()?;
                self.state = LiveState::Active { recording: true };
                Ok(true)
            }
            LiveState::Active { recording: true } => {
                if let Some(recognizer) = self.recognizer.as_mut() {
                    recognizer.stop();
                }
                self.state = LiveState::Active { recording: false };
                Ok(false)
            }
        }
    }

    /// Drain pending recognition events into the transcript
    pub fn pump(&mut self) {
        let Some(events) = self.events.as_ref() else {
            return;
        };
        for event in events.try_iter() {
            if event.is_final {
                if !self.committed.is_empty() && !event.text.is_empty() {
                    self.committed.push(' ');
                }
                self.committed.push_str(&event.text);
                self.pending.clear();
            } else {
                self.pending = event.text;
            }
        }
    }

    /// The running transcript, interim fragment included
    pub fn transcript(&self) -> String {
        if self.pending.is_empty() {
            self.committed.clone()
        } else if self.committed.is_empty() {
            self.pending.clone()
        } else {
            format!("{} {}", self.committed, self.pending)
        }
    }

    /// Select a scenario by key; unknown keys are rejected
    pub fn select_scenario(&mut self, key: &str) -> Result<&'static Scenario> {
        let scenario = scenario::find(key)
            .ok_or_else(|| VoicelinkError::Config(format!("unknown scenario: {}", key)))?;
        self.scenario = Some(scenario);
        Ok(scenario)
    }

    pub fn scenario(&self) -> Option<&'static Scenario> {
        self.scenario
    }
}

impl Default for LiveConversation {
    fn default() -> Self {
        Self::new()
    }
}
