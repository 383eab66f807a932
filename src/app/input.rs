//! Key handling: turns key presses into session actions

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::state::{StartFocus, TextInput, UiState};
use crate::session::{Action, Screen, SessionConfig, SessionState};

/// What a key press asks the app to do
#[derive(Debug)]
pub enum KeyOutcome {
    /// Nothing for the session (the key may still have moved focus or the cursor)
    Handled,
    /// Apply an action to the session
    Action(Action),
    /// Leave the application
    Quit,
}

/// Map a key press on the current screen
pub fn handle_key(key: KeyEvent, session: &SessionState, ui: &mut UiState) -> KeyOutcome {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Char('t') => return KeyOutcome::Action(Action::ToggleShowTense),
            KeyCode::Char('n') if session.screen() == Screen::Practice => {
                return KeyOutcome::Action(Action::Next);
            }
            _ => return KeyOutcome::Handled,
        }
    }

    match session.screen() {
        Screen::Start => start_key(key.code, session, ui),
        Screen::Practice => practice_key(key.code, ui),
    }
}

fn start_key(code: KeyCode, session: &SessionState, ui: &mut UiState) -> KeyOutcome {
    match code {
        KeyCode::Esc => return KeyOutcome::Quit,
        KeyCode::Tab | KeyCode::Down => {
            ui.start_focus = ui.start_focus.next();
            return KeyOutcome::Handled;
        }
        KeyCode::BackTab | KeyCode::Up => {
            ui.start_focus = ui.start_focus.prev();
            return KeyOutcome::Handled;
        }
        _ => {}
    }

    match ui.start_focus {
        StartFocus::Tense(tense) => match code {
            KeyCode::Char(' ') | KeyCode::Enter => KeyOutcome::Action(Action::ToggleTense(tense)),
            _ => KeyOutcome::Handled,
        },
        StartFocus::Theme => match code {
            KeyCode::Enter => KeyOutcome::Action(Action::Begin),
            _ if edit_text(code, &mut ui.theme_input) => {
                KeyOutcome::Action(Action::SetTheme(ui.theme_input.value.clone()))
            }
            _ => KeyOutcome::Handled,
        },
        StartFocus::SentenceCount => {
            let current = session.config.sentence_count;
            let count = match code {
                KeyCode::Enter => return KeyOutcome::Action(Action::Begin),
                KeyCode::Char('+') | KeyCode::Right => current.saturating_add(1),
                KeyCode::Char('-') | KeyCode::Left => current.saturating_sub(1),
                KeyCode::Backspace => current / 10,
                KeyCode::Char(c) if c.is_ascii_digit() => {
                    let digit = c.to_digit(10).unwrap_or(0);
                    let appended = current * 10 + digit;
                    if appended <= SessionConfig::MAX_SENTENCES { appended } else { digit }
                }
                _ => return KeyOutcome::Handled,
            };
            KeyOutcome::Action(Action::SetSentenceCount(count))
        }
        StartFocus::ShowTense => match code {
            KeyCode::Char(' ') | KeyCode::Enter => KeyOutcome::Action(Action::ToggleShowTense),
            _ => KeyOutcome::Handled,
        },
        StartFocus::Begin => match code {
            KeyCode::Char(' ') | KeyCode::Enter => KeyOutcome::Action(Action::Begin),
            _ => KeyOutcome::Handled,
        },
    }
}

fn practice_key(code: KeyCode, ui: &mut UiState) -> KeyOutcome {
    match code {
        KeyCode::Esc => KeyOutcome::Action(Action::Restart),
        KeyCode::Enter => KeyOutcome::Action(Action::SubmitAnswer),
        KeyCode::PageDown => {
            ui.scroll_review_down();
            KeyOutcome::Handled
        }
        KeyCode::PageUp => {
            ui.scroll_review_up();
            KeyOutcome::Handled
        }
        _ if edit_text(code, &mut ui.answer_input) => {
            KeyOutcome::Action(Action::SetAnswer(ui.answer_input.value.clone()))
        }
        _ => KeyOutcome::Handled,
    }
}

/// Apply an editing key to a text field, returns true if the text changed
fn edit_text(code: KeyCode, input: &mut TextInput) -> bool {
    match code {
        KeyCode::Char(c) => {
            input.insert_char(c);
            true
        }
        KeyCode::Backspace => {
            let before = input.value.len();
            input.delete_char();
            input.value.len() != before
        }
        KeyCode::Delete => {
            let before = input.value.len();
            input.delete_char_forward();
            input.value.len() != before
        }
        KeyCode::Left => {
            input.move_left();
            false
        }
        KeyCode::Right => {
            input.move_right();
            false
        }
        KeyCode::Home => {
            input.move_start();
            false
        }
        KeyCode::End => {
            input.move_end();
            false
        }
        _ => false,
    }
}
