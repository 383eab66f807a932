//! Terminal-side UI state: focus, text fields, scrolling
//!
//! Everything about the practice itself lives in
//! [`SessionState`](crate::session::SessionState); this only holds what
//! the terminal front end needs to edit and display it.

use crate::session::SessionState;
use crate::tense::Tense;

/// Focusable controls on the start screen, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartFocus {
    Tense(Tense),
    Theme,
    SentenceCount,
    ShowTense,
    Begin,
}

impl Default for StartFocus {
    fn default() -> Self {
        Self::Tense(Tense::DEFAULT)
    }
}

impl StartFocus {
    fn order() -> Vec<StartFocus> {
        let mut order: Vec<StartFocus> = Tense::all().iter().copied().map(Self::Tense).collect();
        order.extend([Self::Theme, Self::SentenceCount, Self::ShowTense, Self::Begin]);
        order
    }

    fn position(self) -> usize {
        Self::order().iter().position(|f| *f == self).unwrap_or(0)
    }

    /// Next control, wrapping around
    pub fn next(self) -> Self {
        let order = Self::order();
        order[(self.position() + 1) % order.len()]
    }

    /// Previous control, wrapping around
    pub fn prev(self) -> Self {
        let order = Self::order();
        order[(self.position() + order.len() - 1) % order.len()]
    }
}

/// A single-line text field with a character-indexed cursor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextInput {
    /// Current text
    pub value: String,
    /// Cursor position in characters
    pub cursor: usize,
}

impl TextInput {
    /// Convert character index to byte index
    fn char_to_byte_index(&self, char_idx: usize) -> usize {
        self.value.char_indices().nth(char_idx).map(|(i, _)| i).unwrap_or(self.value.len())
    }

    /// Get the number of characters in the field
    fn char_count(&self) -> usize {
        self.value.chars().count()
    }

    /// Insert a character at cursor
    pub fn insert_char(&mut self, c: char) {
        let byte_idx = self.char_to_byte_index(self.cursor);
        self.value.insert(byte_idx, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn delete_char(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.value.remove(byte_idx);
        }
    }

    /// Delete character at cursor
    pub fn delete_char_forward(&mut self) {
        if self.cursor < self.char_count() {
            let byte_idx = self.char_to_byte_index(self.cursor);
            self.value.remove(byte_idx);
        }
    }

    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.char_count() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.char_count();
    }

    /// Replace the text when it differs, keeping the cursor in range
    pub fn sync(&mut self, value: &str) {
        if self.value != value {
            self.value = value.to_string();
            self.cursor = self.cursor.min(self.char_count());
        }
    }
}

/// Front-end state for both screens
#[derive(Debug, Clone, Default)]
pub struct UiState {
    /// Focused control on the start screen
    pub start_focus: StartFocus,
    /// Theme field on the start screen
    pub theme_input: TextInput,
    /// Translation field on the practice screen
    pub answer_input: TextInput,
    /// Lines scrolled in the review panel
    pub review_scroll: u16,
    /// Frames drawn, drives the loading indicator
    pub tick: usize,
}

impl UiState {
    /// Bring text fields back in line with the session after a transition
    pub fn sync(&mut self, session: &SessionState) {
        self.theme_input.sync(&session.config.theme);
        self.answer_input.sync(&session.answer);
        if session.review.is_empty() {
            self.review_scroll = 0;
        }
    }

    pub fn scroll_review_down(&mut self) {
        self.review_scroll = self.review_scroll.saturating_add(1);
    }

    pub fn scroll_review_up(&mut self) {
        self.review_scroll = self.review_scroll.saturating_sub(1);
    }
}
