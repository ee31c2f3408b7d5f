//! Transient user notices
//!
//! Every non-fatal failure in the app surfaces here as a short message
//! with a fixed auto-dismiss lifetime.

use log::info;
use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// How long a notice stays visible before auto-dismissing
pub const DISMISS_AFTER: Duration = Duration::from_secs(3);

struct Notice {
    message: String,
    posted: Instant,
}

/// Queue of pending user notices
pub struct Notifier {
    notices: VecDeque<Notice>,
    ttl: Duration,
}

impl Notifier {
    pub fn new() -> Self {
        Self::with_ttl(DISMISS_AFTER)
    }

    /// Custom dismiss lifetime, mainly for tests
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            notices: VecDeque::new(),
            ttl,
        }
    }

    /// Post a notice for the user
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        info!("notice: {}", message);
        self.notices.push_back(Notice {
            message,
            posted: Instant::now(),
        });
    }

    /// Remove all pending notices and return them, oldest first
    pub fn take(&mut self) -> Vec<String> {
        self.notices.drain(..).map(|n| n.message).collect()
    }

    /// Messages still within their dismiss lifetime, dropping expired ones
    pub fn active(&mut self) -> Vec<&str> {
        let ttl = self.ttl;
        self.notices.retain(|n| n.posted.elapsed() < ttl);
        self.notices.iter().map(|n| n.message.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.notices.is_empty()
    }
}

impl Default for Notifier {
    fn default() -> Self {
        Self::new()
    }
}
