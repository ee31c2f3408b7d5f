//! Integration tests for message composition
//!
//! Exercises the catalog-to-buffer path the way the UI drives it: look up
//! symbols by category and id, append them, and render the spoken text.

use voicelink::catalog::{self, Category};
use voicelink::message::{MessageBuffer, SavedPhrase};

#[test]
fn test_compose_i_want_help() {
    let mut buffer = MessageBuffer::new();
    for id in ["i", "want", "help"] {
        let symbol = catalog::find(Category::Core, id)
            .unwrap_or_else(|| panic!("core catalog should contain '{}'", id));
        buffer.append(symbol);
    }

    assert_eq!(buffer.len(), 3);
    assert_eq!(buffer.render_text(), "I want help");
}

#[test]
fn test_clear_then_recompose() {
    let mut buffer = MessageBuffer::new();
    buffer.append(catalog::find(Category::Core, "yes").unwrap());
    buffer.clear();
    assert!(buffer.is_empty());
    assert_eq!(buffer.render_text(), "");

    // Clearing twice is harmless
    buffer.clear();

    buffer.append(catalog::find(Category::Core, "no").unwrap());
    assert_eq!(buffer.render_text(), "no");
}

#[test]
fn test_cross_category_message() {
    let mut buffer = MessageBuffer::new();
    buffer.append(catalog::find(Category::Core, "i").unwrap());
    buffer.append(catalog::find(Category::Actions, "eat").unwrap());

    let text = buffer.render_text();
    assert!(text.starts_with("I "));
    assert_eq!(text.split(' ').count(), 2);
}

#[test]
fn test_saved_phrase_captures_ids_and_text() {
    let mut buffer = MessageBuffer::new();
    buffer.append(catalog::find(Category::Core, "i").unwrap());
    buffer.append(catalog::find(Category::Core, "want").unwrap());

    let phrase = SavedPhrase::from_buffer(&buffer).expect("non-empty buffer saves");
    assert_eq!(phrase.text, "I want");
    assert_eq!(phrase.symbols, vec!["i".to_string(), "want".to_string()]);
}

#[test]
fn test_empty_buffer_does_not_save() {
    let buffer = MessageBuffer::new();
    assert!(SavedPhrase::from_buffer(&buffer).is_none());
}
