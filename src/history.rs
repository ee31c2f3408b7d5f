//! Conversation history and spoken-phrase pattern tracking

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Most recent entries kept; oldest evicted first
pub const HISTORY_CAP: usize = 50;

/// One successfully spoken message
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// FIFO-capped list of spoken messages for the current session
#[derive(Default)]
pub struct ConversationHistory {
    entries: VecDeque<HistoryEntry>,
}

impl ConversationHistory {
    pub fn new() -> Self {
        Self {
            entries: VecDeque::with_capacity(HISTORY_CAP),
        }
    }

    /// Append a spoken message, evicting the oldest entry past the cap
    pub fn push(&mut self, text: &str) {
        if self.entries.len() == HISTORY_CAP {
            self.entries.pop_front();
        }
        self.entries.push_back(HistoryEntry {
            text: text.to_string(),
            timestamp: Utc::now(),
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries oldest first
    pub fn iter(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// The `n` most recent entries, newest first
    pub fn recent(&self, n: usize) -> Vec<&HistoryEntry> {
        self.entries.iter().rev().take(n).collect()
    }
}

/// Frequency counter over spoken messages
///
/// Records what gets said and can report the most frequent phrases. No
/// language understanding happens here.
#[derive(Default)]
pub struct PatternMonitor {
    counts: HashMap<String, u32>,
}

impl PatternMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, text: &str) {
        *self.counts.entry(text.to_string()).or_insert(0) += 1;
    }

    /// Top `n` phrases by frequency, ties broken alphabetically
    pub fn top(&self, n: usize) -> Vec<(&str, u32)> {
        let mut pairs: Vec<(&str, u32)> = self
            .counts
            .iter()
            .map(|(text, count)| (text.as_str(), *count))
            .collect();
        pairs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        pairs.truncate(n);
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_push_and_order() {
        let mut history = ConversationHistory::new();
        history.push("hello");
        history.push("I want help");

        assert_eq!(history.len(), 2);
        let texts: Vec<&str> = history.iter().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["hello", "I want help"]);
    }

    #[test]
    fn test_history_cap_evicts_oldest() {
        let mut history = ConversationHistory::new();
        for i in 0..51 {
            history.push(&format!("message {}", i));
        }

        assert_eq!(history.len(), HISTORY_CAP);
        // Oldest entry is gone, newest is present
        assert!(history.iter().all(|e| e.text != "message 0"));
        assert_eq!(history.recent(1)[0].text, "message 50");
    }

    #[test]
    fn test_history_never_exceeds_cap() {
        let mut history = ConversationHistory::new();
        for i in 0..200 {
            history.push(&format!("m{}", i));
            assert!(history.len() <= HISTORY_CAP);
        }
    }

    #[test]
    fn test_pattern_monitor_top() {
        let mut monitor = PatternMonitor::new();
        monitor.record("help");
        monitor.record("help");
        monitor.record("yes");

        let top = monitor.top(2);
        assert_eq!(top, vec![("help", 2), ("yes", 1)]);
    }
}
