//! Symbol catalog for message composition
//!
//! The catalog is the static table of selectable tiles the user composes
//! messages from. Entries are immutable and live for the whole session;
//! the message buffer only ever holds copies of catalog entries.

use crate::{Result, VoicelinkError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Symbol categories, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Core,
    People,
    Actions,
    Objects,
    Places,
    Descriptors,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 6] = [
        Category::Core,
        Category::People,
        Category::Actions,
        Category::Objects,
        Category::Places,
        Category::Descriptors,
    ];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Category::Core => "core",
            Category::People => "people",
            Category::Actions => "actions",
            Category::Objects => "objects",
            Category::Places => "places",
            Category::Descriptors => "descriptors",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Category {
    type Err = VoicelinkError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "core" => Ok(Category::Core),
            "people" => Ok(Category::People),
            "actions" => Ok(Category::Actions),
            "objects" => Ok(Category::Objects),
            "places" => Ok(Category::Places),
            "descriptors" => Ok(Category::Descriptors),
            other => Err(VoicelinkError::Config(format!(
                "unknown category: {}",
                other
            ))),
        }
    }
}

/// A selectable tile: id unique within its category, label is the spoken text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Symbol {
    pub id: &'static str,
    pub label: &'static str,
    pub pictogram: &'static str,
    pub category: Category,
    pub type_tag: &'static str,
}

const fn sym(
    id: &'static str,
    label: &'static str,
    pictogram: &'static str,
    category: Category,
    type_tag: &'static str,
) -> Symbol {
    Symbol {
        id,
        label,
        pictogram,
        category,
        type_tag,
    }
}

static CORE: &[Symbol] = &[
    sym("i", "I", "👤", Category::Core, "pronoun"),
    sym("want", "want", "🎯", Category::Core, "verb"),
    sym("need", "need", "✋", Category::Core, "verb"),
    sym("like", "like", "❤️", Category::Core, "verb"),
    sym("help", "help", "🤝", Category::Core, "verb"),
    sym("go", "go", "🚶", Category::Core, "verb"),
    sym("stop", "stop", "⛔", Category::Core, "verb"),
    sym("yes", "yes", "✅", Category::Core, "response"),
    sym("no", "no", "❌", Category::Core, "response"),
    sym("more", "more", "➕", Category::Core, "modifier"),
    sym("done", "done", "✔️", Category::Core, "response"),
    sym("please", "please", "🙏", Category::Core, "courtesy"),
    sym("thank_you", "thank you", "🙏", Category::Core, "courtesy"),
    sym("sorry", "sorry", "😔", Category::Core, "courtesy"),
    sym("hello", "hello", "👋", Category::Core, "greeting"),
    sym("goodbye", "goodbye", "👋", Category::Core, "greeting"),
    sym("good", "good", "👍", Category::Core, "descriptor"),
    sym("bad", "bad", "👎", Category::Core, "descriptor"),
    sym("big", "big", "📏", Category::Core, "descriptor"),
    sym("small", "small", "🔍", Category::Core, "descriptor"),
    sym("hot", "hot", "🔥", Category::Core, "descriptor"),
    sym("cold", "cold", "🧊", Category::Core, "descriptor"),
    sym("happy", "happy", "😊", Category::Core, "emotion"),
];

static PEOPLE: &[Symbol] = &[
    sym("mom", "mom", "👩", Category::People, "person"),
    sym("dad", "dad", "👨", Category::People, "person"),
    sym("teacher", "teacher", "👩‍🏫", Category::People, "person"),
    sym("friend", "friend", "👫", Category::People, "person"),
    sym("doctor", "doctor", "👨‍⚕️", Category::People, "person"),
    sym("nurse", "nurse", "👩‍⚕️", Category::People, "person"),
    sym("therapist", "therapist", "🧑‍⚕️", Category::People, "person"),
    sym("sibling", "sibling", "👧", Category::People, "person"),
    sym("grandparent", "grandparent", "👴", Category::People, "person"),
    sym("baby", "baby", "👶", Category::People, "person"),
    sym("pet", "pet", "🐕", Category::People, "person"),
    sym("cat", "cat", "🐱", Category::People, "person"),
];

static ACTIONS: &[Symbol] = &[
    sym("eat", "eat", "🍽️", Category::Actions, "action"),
    sym("drink", "drink", "🥤", Category::Actions, "action"),
    sym("play", "play", "🎮", Category::Actions, "action"),
    sym("sleep", "sleep", "😴", Category::Actions, "action"),
    sym("walk", "walk", "🚶", Category::Actions, "action"),
    sym("run", "run", "🏃", Category::Actions, "action"),
    sym("jump", "jump", "🦘", Category::Actions, "action"),
    sym("sit", "sit", "🪑", Category::Actions, "action"),
    sym("stand", "stand", "🧍", Category::Actions, "action"),
    sym("read", "read", "📖", Category::Actions, "action"),
    sym("write", "write", "✍️", Category::Actions, "action"),
    sym("draw", "draw", "🎨", Category::Actions, "action"),
    sym("listen", "listen", "👂", Category::Actions, "action"),
    sym("watch", "watch", "👀", Category::Actions, "action"),
    sym("talk", "talk", "💬", Category::Actions, "action"),
    sym("sing", "sing", "🎤", Category::Actions, "action"),
    sym("dance", "dance", "💃", Category::Actions, "action"),
    sym("swim", "swim", "🏊", Category::Actions, "action"),
    sym("cook", "cook", "👨‍🍳", Category::Actions, "action"),
    sym("clean", "clean", "🧹", Category::Actions, "action"),
    sym("work", "work", "💼", Category::Actions, "action"),
    sym("study", "study", "📚", Category::Actions, "action"),
    sym("rest", "rest", "🛋️", Category::Actions, "action"),
    sym("exercise", "exercise", "🏋️", Category::Actions, "action"),
];

static OBJECTS: &[Symbol] = &[
    sym("book", "book", "📚", Category::Objects, "object"),
    sym("toy", "toy", "🧸", Category::Objects, "object"),
    sym("ball", "ball", "⚽", Category::Objects, "object"),
    sym("car", "car", "🚗", Category::Objects, "object"),
    sym("bus", "bus", "🚌", Category::Objects, "object"),
    sym("bike", "bike", "🚲", Category::Objects, "object"),
    sym("computer", "computer", "💻", Category::Objects, "object"),
    sym("phone", "phone", "📱", Category::Objects, "object"),
    sym("tv", "tv", "📺", Category::Objects, "object"),
    sym("music", "music", "🎵", Category::Objects, "object"),
    sym("game", "game", "🎮", Category::Objects, "object"),
    sym("puzzle", "puzzle", "🧩", Category::Objects, "object"),
    sym("pencil", "pencil", "✏️", Category::Objects, "object"),
    sym("paper", "paper", "📄", Category::Objects, "object"),
    sym("bag", "bag", "👜", Category::Objects, "object"),
    sym("shoes", "shoes", "👟", Category::Objects, "object"),
    sym("clothes", "clothes", "👕", Category::Objects, "object"),
    sym("hat", "hat", "👒", Category::Objects, "object"),
    sym("glasses", "glasses", "👓", Category::Objects, "object"),
    sym("watch", "watch", "⌚", Category::Objects, "object"),
    sym("money", "money", "💰", Category::Objects, "object"),
    sym("key", "key", "🔑", Category::Objects, "object"),
    sym("door", "door", "🚪", Category::Objects, "object"),
    sym("window", "window", "🪟", Category::Objects, "object"),
];

static PLACES: &[Symbol] = &[
    sym("home", "home", "🏠", Category::Places, "place"),
    sym("school", "school", "🏫", Category::Places, "place"),
    sym("hospital", "hospital", "🏥", Category::Places, "place"),
    sym("store", "store", "🏪", Category::Places, "place"),
    sym("park", "park", "🌳", Category::Places, "place"),
    sym("restaurant", "restaurant", "🍽️", Category::Places, "place"),
    sym("library", "library", "📚", Category::Places, "place"),
    sym("gym", "gym", "🏋️", Category::Places, "place"),
    sym("pool", "pool", "🏊", Category::Places, "place"),
    sym("beach", "beach", "🏖️", Category::Places, "place"),
    sym("mountain", "mountain", "⛰️", Category::Places, "place"),
    sym("zoo", "zoo", "🦁", Category::Places, "place"),
    sym("museum", "museum", "🏛️", Category::Places, "place"),
    sym("cinema", "cinema", "🎬", Category::Places, "place"),
    sym("theater", "theater", "🎭", Category::Places, "place"),
    sym("church", "church", "⛪", Category::Places, "place"),
    sym("mosque", "mosque", "🕌", Category::Places, "place"),
    sym("temple", "temple", "🛕", Category::Places, "place"),
    sym("office", "office", "🏢", Category::Places, "place"),
    sym("factory", "factory", "🏭", Category::Places, "place"),
    sym("farm", "farm", "🚜", Category::Places, "place"),
    sym("station", "station", "🚉", Category::Places, "place"),
    sym("airport", "airport", "✈️", Category::Places, "place"),
    sym("hotel", "hotel", "🏨", Category::Places, "place"),
];

static DESCRIPTORS: &[Symbol] = &[
    sym("red", "red", "🔴", Category::Descriptors, "color"),
    sym("blue", "blue", "🔵", Category::Descriptors, "color"),
    sym("green", "green", "🟢", Category::Descriptors, "color"),
    sym("yellow", "yellow", "🟡", Category::Descriptors, "color"),
    sym("orange", "orange", "🟠", Category::Descriptors, "color"),
    sym("purple", "purple", "🟣", Category::Descriptors, "color"),
    sym("black", "black", "⚫", Category::Descriptors, "color"),
    sym("white", "white", "⚪", Category::Descriptors, "color"),
    sym("brown", "brown", "🟤", Category::Descriptors, "color"),
    sym("pink", "pink", "🩷", Category::Descriptors, "color"),
    sym("gray", "gray", "🔘", Category::Descriptors, "color"),
    sym("one", "one", "1️⃣", Category::Descriptors, "number"),
    sym("two", "two", "2️⃣", Category::Descriptors, "number"),
    sym("three", "three", "3️⃣", Category::Descriptors, "number"),
    sym("four", "four", "4️⃣", Category::Descriptors, "number"),
    sym("five", "five", "5️⃣", Category::Descriptors, "number"),
    sym("many", "many", "🔢", Category::Descriptors, "quantity"),
    sym("all", "all", "🔠", Category::Descriptors, "quantity"),
    sym("none", "none", "0️⃣", Category::Descriptors, "quantity"),
    sym("some", "some", "🔣", Category::Descriptors, "quantity"),
    sym("fast", "fast", "💨", Category::Descriptors, "speed"),
    sym("slow", "slow", "🐌", Category::Descriptors, "speed"),
    sym("loud", "loud", "📢", Category::Descriptors, "volume"),
    sym("quiet", "quiet", "🤫", Category::Descriptors, "volume"),
];

/// All symbols in a category, in grid order
pub fn symbols_for(category: Category) -> &'static [Symbol] {
    match category {
        Category::Core => CORE,
        Category::People => PEOPLE,
        Category::Actions => ACTIONS,
        Category::Objects => OBJECTS,
        Category::Places => PLACES,
        Category::Descriptors => DESCRIPTORS,
    }
}

/// Look up a symbol by id within one category
pub fn find(category: Category, id: &str) -> Option<&'static Symbol> {
    symbols_for(category).iter().find(|s| s.id == id)
}

/// Search the whole catalog by id or label, case-insensitive
///
/// Exact id matches are returned first so ambiguous prefixes like "s"
/// don't shadow a direct hit.
pub fn search(query: &str) -> Vec<&'static Symbol> {
    let query = query.to_lowercase();
    let mut exact = Vec::new();
    let mut partial = Vec::new();

    for category in Category::ALL {
        for symbol in symbols_for(category) {
            if symbol.id == query {
                exact.push(symbol);
            } else if symbol.id.contains(&query) || symbol.label.to_lowercase().contains(&query) {
                partial.push(symbol);
            }
        }
    }

    exact.extend(partial);
    exact
}

/// Iterate over every symbol in the catalog
pub fn all() -> impl Iterator<Item = &'static Symbol> {
    Category::ALL.iter().flat_map(|c| symbols_for(*c).iter())
}
