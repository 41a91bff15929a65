use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::filter::FilterPrompt;
use super::{Mode, PromptResult};
use crate::table::{FilterMode, FilterState};

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn type_str(prompt: &mut FilterPrompt, s: &str) {
    for c in s.chars() {
        assert_eq!(prompt.handle_key(key(KeyCode::Char(c))), PromptResult::Continue);
    }
}

#[test]
fn test_edit_query() {
    let mut prompt = FilterPrompt::new();
    type_str(&mut prompt, "abc");
    assert_eq!(prompt.buffer, "abc");

    prompt.handle_key(key(KeyCode::Backspace));
    assert_eq!(prompt.buffer, "ab");

    assert_eq!(prompt.handle_key(key(KeyCode::Enter)), PromptResult::Apply);
    assert_eq!(prompt.buffer, "ab");
}

#[test]
fn test_toggle_settings() {
    let mut prompt = FilterPrompt::new();
    assert_eq!(prompt.mode, FilterMode::Search);
    assert_eq!(prompt.settings(), "search, ignore case");

    prompt.handle_key(key(KeyCode::Tab));
    prompt.handle_key(KeyEvent::new(KeyCode::Char('t'), KeyModifiers::CONTROL));
    assert_eq!(prompt.mode, FilterMode::Filter);
    assert!(prompt.case_sensitive);
    assert_eq!(prompt.settings(), "filter, match case");
    assert!(prompt.buffer.is_empty());
}

#[test]
fn test_cancel() {
    let mut prompt = FilterPrompt::new();
    type_str(&mut prompt, "x");
    assert_eq!(prompt.handle_key(key(KeyCode::Esc)), PromptResult::Cancel);
}

#[test]
fn test_clear_buffer() {
    let mut prompt = FilterPrompt::new();
    type_str(&mut prompt, "query");
    prompt.handle_key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::CONTROL));
    assert!(prompt.buffer.is_empty());
}

#[test]
fn test_apply_to_state() {
    let mut prompt = FilterPrompt::new();
    type_str(&mut prompt, "xx");
    prompt.handle_key(key(KeyCode::Tab));

    let mut state = FilterState::new();
    prompt.apply_to(&mut state);
    assert_eq!(state.query, "xx");
    assert_eq!(state.mode, FilterMode::Filter);
    assert!(!state.case_sensitive);
    assert!(state.active);

    prompt.clear();
    prompt.apply_to(&mut state);
    assert!(!state.active);
}

#[test]
fn test_mode_names() {
    assert_eq!(Mode::default(), Mode::Table);
    assert_eq!(Mode::Filter.display_name(), "FILTER");
}
