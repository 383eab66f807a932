//! Status line at the bottom of the screen

use ratatui::{
    Frame,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::state::UiState;
use crate::session::{Screen, SessionState};
use crate::theme::Theme;

const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Draw the loading indicator, the last error, or the default hint
pub fn draw(frame: &mut Frame, area: Rect, session: &SessionState, ui: &UiState, theme: &Theme) {
    frame.render_widget(Paragraph::new(status_line(session, ui, theme)), area);
}

fn status_line(session: &SessionState, ui: &UiState, theme: &Theme) -> Line<'static> {
    if session.is_loading() {
        let spinner = SPINNER[(ui.tick / 4) % SPINNER.len()];
        let text = match session.screen() {
            Screen::Start => "Generating sentences...",
            Screen::Practice => "Reviewing your translation...",
        };
        return Line::from(Span::styled(format!(" {} {}", spinner, text), Style::default().fg(theme.info)));
    }

    if let Some(error) = session.last_error() {
        // Single line only; the newest error replaces the previous one
        let first_line = error.lines().next().unwrap_or_default().to_string();
        return Line::from(Span::styled(format!(" {}", first_line), Style::default().fg(theme.error)));
    }

    let user = if session.identity.ready {
        format!("user {}", session.identity.short_id())
    } else {
        "signing in...".to_string()
    };
    Line::from(vec![
        Span::styled(" Ctrl-C to quit", Style::default().fg(theme.fg_muted)),
        Span::styled(format!("  |  {}", user), Style::default().fg(theme.disabled)),
    ])
}
