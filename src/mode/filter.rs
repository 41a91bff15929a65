use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::input::is_escape;
use crate::mode::PromptResult;
use crate::table::{FilterMode, FilterState};

/// The filter prompt: an editable query with the search/filter mode and the
/// case sensitivity. The prompt keeps its settings between two requests.
#[derive(Debug, Clone, Default)]
pub struct FilterPrompt {
    pub buffer: String,
    pub mode: FilterMode,
    pub case_sensitive: bool,
}

impl FilterPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the prompt to a filter state
    pub fn apply_to(&self, state: &mut FilterState) {
        state.set(&self.buffer, self.mode, self.case_sensitive);
    }

    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PromptResult {
        if is_escape(key) {
            return PromptResult::Cancel;
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Enter => PromptResult::Apply,
            KeyCode::Tab => {
                self.mode = self.mode.toggle();
                PromptResult::Continue
            }
            KeyCode::Char('t') if ctrl => {
                self.case_sensitive = !self.case_sensitive;
                PromptResult::Continue
            }
            KeyCode::Char('x') if ctrl => {
                self.buffer.clear();
                PromptResult::Continue
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                PromptResult::Continue
            }
            KeyCode::Char(c) if !ctrl => {
                self.buffer.push(c);
                PromptResult::Continue
            }
            _ => PromptResult::Continue,
        }
    }

    /// Short description of the settings, e.g. `filter, ignore case`
    pub fn settings(&self) -> String {
        format!(
            "{}, {}",
            self.mode.display_name(),
            if self.case_sensitive { "match case" } else { "ignore case" }
        )
    }
}
