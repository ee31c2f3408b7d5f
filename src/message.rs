//! Message buffer holding the in-progress utterance

use crate::catalog::Symbol;
use chrono::{DateTime, Utc};
use log::debug;
use serde::{Deserialize, Serialize};

/// Ordered sequence of selected symbols; insertion order is word order
#[derive(Default)]
pub struct MessageBuffer {
    symbols: Vec<Symbol>,
}

impl MessageBuffer {
    /// Create a new empty message buffer
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
        }
    }

    /// Append a symbol to the end of the message
    ///
    /// Duplicates and length are unconstrained.
    pub fn append(&mut self, symbol: &Symbol) {
        self.symbols.push(*symbol);
    }

    /// Empty the buffer; idempotent
    pub fn clear(&mut self) {
        debug!("Clearing message buffer ({} symbols)", self.symbols.len());
        self.symbols.clear();
    }

    /// The space-joined label sequence; empty string for an empty buffer
    pub fn render_text(&self) -> String {
        self.symbols
            .iter()
            .map(|s| s.label)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The symbols currently in the buffer, in order
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Check if buffer is empty
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Number of symbols in the buffer
    pub fn len(&self) -> usize {
        self.symbols.len()
    }
}

/// A phrase persisted to the saved-phrases list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedPhrase {
    pub text: String,
    /// Symbol ids in utterance order
    pub symbols: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

impl SavedPhrase {
    /// Snapshot the buffer as a saved phrase; `None` when the buffer is empty
    pub fn from_buffer(buffer: &MessageBuffer) -> Option<Self> {
        if buffer.is_empty() {
            return None;
        }
        Some(Self {
            text: buffer.render_text(),
            symbols: buffer.symbols().iter().map(|s| s.id.to_string()).collect(),
            timestamp: Utc::now(),
        })
    }
}
