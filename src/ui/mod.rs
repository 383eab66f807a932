//! UI rendering components

pub mod layout;
pub mod practice_screen;
pub mod start_screen;
pub mod status_line;

use ratatui::{
    Frame,
    layout::{Constraint, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::UiState;
use crate::session::{Screen, SessionState};
use crate::theme::Theme;

/// Main draw function
pub fn draw(frame: &mut Frame, session: &SessionState, ui: &UiState, theme: &Theme) {
    let area = frame.area();
    frame.render_widget(Paragraph::new("").style(Style::default().bg(theme.bg_primary)), area);

    let [header_area, body_area, status_area] =
        Layout::vertical([Constraint::Length(2), Constraint::Min(0), Constraint::Length(1)])
            .areas(area);

    let subtitle = match session.screen() {
        Screen::Start => "choose what to practise",
        Screen::Practice => "translate into English",
    };
    let header = Line::from(vec![
        Span::styled(
            " Tense Trainer",
            Style::default().fg(theme.accent_primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  {}", subtitle), Style::default().fg(theme.fg_muted)),
    ]);
    frame.render_widget(Paragraph::new(header), header_area);

    match session.screen() {
        Screen::Start => start_screen::draw(frame, body_area, session, ui, theme),
        Screen::Practice => practice_screen::draw(frame, body_area, session, ui, theme),
    }

    status_line::draw(frame, status_area, session, ui, theme);
}

#[cfg(test)]
mod tests {
    use ratatui::{Terminal, backend::TestBackend};

    use super::*;
    use crate::session::{PracticeItem, PracticeSession};
    use crate::tense::Tense;

    fn render(session: &SessionState, ui: &UiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| draw(frame, session, ui, &Theme::default())).unwrap();
        terminal.backend().buffer().content().iter().map(|cell| cell.symbol()).collect()
    }

    #[test]
    fn start_screen_lists_groups_and_controls() {
        let mut session = SessionState::default();
        session.config.toggle_tense(Tense::PastPerfect);
        let screen = render(&session, &UiState::default());

        assert!(screen.contains("Present"));
        assert!(screen.contains("Future"));
        assert!(screen.contains("[x] Past Perfect"));
        assert!(screen.contains("[ ] Past Simple"));
        assert!(screen.contains("‹ 5 ›"));
        assert!(screen.contains("[ Begin ]"));
    }

    #[test]
    fn practice_screen_shows_sentence_and_tense_when_enabled() {
        let mut session = SessionState::default();
        session.status.screen = Screen::Practice;
        session.practice = PracticeSession::new(vec![PracticeItem {
            original_sentence: "Він біжить.".into(),
            tense_used: "Present Simple".into(),
            ..PracticeItem::default()
        }]);

        let hidden = render(&session, &UiState::default());
        assert!(hidden.contains("Sentence 1 of 1"));
        assert!(hidden.contains("Він біжить."));
        assert!(!hidden.contains("Tense: Present Simple"));
        assert!(hidden.contains("Finish"));

        session.show_tense = true;
        let shown = render(&session, &UiState::default());
        assert!(shown.contains("Tense: Present Simple"));
    }
}
