//! Start screen: tense selection and practice settings

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use super::layout::{centered_rect, text_input_line};
use crate::app::state::{StartFocus, UiState};
use crate::session::SessionState;
use crate::tense::TenseGroup;
use crate::theme::Theme;

/// Draw the configuration screen
pub fn draw(frame: &mut Frame, area: Rect, session: &SessionState, ui: &UiState, theme: &Theme) {
    let area = centered_rect(90, 90, area);

    let [tenses_area, settings_area] =
        Layout::vertical([Constraint::Length(8), Constraint::Min(8)]).areas(area);

    draw_tenses(frame, tenses_area, session, ui, theme);
    draw_settings(frame, settings_area, session, ui, theme);
}

fn focus_style(focused: bool, theme: &Theme) -> Style {
    if focused {
        Style::default().fg(theme.accent_primary).bg(theme.selection).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(theme.fg_primary)
    }
}

/// Three columns of checkboxes, one per time frame
fn draw_tenses(frame: &mut Frame, area: Rect, session: &SessionState, ui: &UiState, theme: &Theme) {
    let columns = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(area);

    for (group, column) in TenseGroup::all().iter().zip(columns.iter()) {
        let mut lines = vec![Line::from("")];
        for tense in group.tenses() {
            let checked = session.config.tenses.contains(&tense);
            let focused = ui.start_focus == StartFocus::Tense(tense);
            let mark = if checked { "[x]" } else { "[ ]" };
            lines.push(Line::from(Span::styled(
                format!(" {} {}", mark, tense.label()),
                focus_style(focused, theme),
            )));
        }

        let block = Block::default()
            .title(format!(" {} ", group.label()))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.border))
            .style(Style::default().bg(theme.bg_secondary));

        frame.render_widget(Paragraph::new(lines).block(block), *column);
    }
}

fn draw_settings(frame: &mut Frame, area: Rect, session: &SessionState, ui: &UiState, theme: &Theme) {
    let label = Style::default().fg(theme.fg_muted);
    let theme_focused = ui.start_focus == StartFocus::Theme;

    let mut theme_line = vec![Span::styled("  Theme:     ", label)];
    let theme_field = text_input_line(&ui.theme_input, theme_focused, focus_style(theme_focused, theme), theme);
    if ui.theme_input.value.is_empty() && !theme_focused {
        theme_line.push(Span::styled("(any)", Style::default().fg(theme.disabled)));
    } else {
        theme_line.extend(theme_field.spans);
    }

    let count_focused = ui.start_focus == StartFocus::SentenceCount;
    let show_focused = ui.start_focus == StartFocus::ShowTense;
    let begin_focused = ui.start_focus == StartFocus::Begin;

    let begin_style = if session.can_begin() {
        focus_style(begin_focused, theme)
    } else if begin_focused {
        Style::default().fg(theme.disabled).bg(theme.selection)
    } else {
        Style::default().fg(theme.disabled)
    };

    let lines = vec![
        Line::from(""),
        Line::from(theme_line),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Sentences: ", label),
            Span::styled(
                format!("‹ {} ›", session.config.sentence_count),
                focus_style(count_focused, theme),
            ),
            Span::styled("  (1-20)", label),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("  ", label),
            Span::styled(
                format!("[{}] Show tense during practice", if session.show_tense { "x" } else { " " }),
                focus_style(show_focused, theme),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled("[ Begin ]", begin_style)).alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled(
            "[Tab] Next field    [Space] Toggle    [Enter] Begin    [Esc] Quit",
            Style::default().fg(theme.fg_muted),
        ))
        .alignment(Alignment::Center),
    ];

    let block = Block::default()
        .title(" Practice ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_secondary));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
