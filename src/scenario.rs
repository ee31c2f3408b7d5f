//! Scenario catalog for live conversation mode
//!
//! A scenario is a named context that biases suggested short phrases while
//! the user is in a live conversation (e.g. "Medical" at a doctor's visit).
//! The catalog is static and read-only.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A named conversation context with suggested phrases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Scenario {
    pub key: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub context: &'static str,
    pub suggestions: &'static [&'static str],
}

static SCENARIOS: &[Scenario] = &[
    Scenario {
        key: "order_food",
        name: "Order Food",
        icon: "🍽️",
        context: "restaurant",
        suggestions: &["I want", "Can I have", "No thanks", "Yes please"],
    },
    Scenario {
        key: "medical",
        name: "Medical",
        icon: "🏥",
        context: "hospital",
        suggestions: &["I feel", "Pain in", "Help please", "Call doctor"],
    },
    Scenario {
        key: "shopping",
        name: "Shopping",
        icon: "🛒",
        context: "store",
        suggestions: &["How much", "I need", "Where is", "Thank you"],
    },
    Scenario {
        key: "social",
        name: "Social",
        icon: "👋",
        context: "social",
        suggestions: &["Hello", "How are you", "Goodbye", "See you later"],
    },
    Scenario {
        key: "school",
        name: "School",
        icon: "🏫",
        context: "school",
        suggestions: &["I understand", "Can you repeat", "I need help", "Question"],
    },
    Scenario {
        key: "emergency",
        name: "Emergency",
        icon: "🚨",
        context: "emergency",
        suggestions: &["Help me", "Call 911", "Emergency", "I need assistance"],
    },
];

static BY_KEY: Lazy<HashMap<&'static str, &'static Scenario>> =
    Lazy::new(|| SCENARIOS.iter().map(|s| (s.key, s)).collect());

/// Look up a scenario by key
pub fn find(key: &str) -> Option<&'static Scenario> {
    BY_KEY.get(key).copied()
}

/// All scenarios in display order
pub fn all() -> &'static [Scenario] {
    SCENARIOS
}
