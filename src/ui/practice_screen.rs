//! Practice screen: one sentence, the answer field, and the review

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use super::layout::{centered_rect, hint_style, text_input_line};
use crate::app::state::UiState;
use crate::session::SessionState;
use crate::theme::Theme;

/// Draw the current practice item
pub fn draw(frame: &mut Frame, area: Rect, session: &SessionState, ui: &UiState, theme: &Theme) {
    let Some(item) = session.practice.current() else {
        return;
    };

    let area = centered_rect(90, 95, area);

    // Sentence
    let mut lines = vec![
        Line::from(Span::styled(
            format!("Sentence {} of {}", session.practice.index() + 1, session.practice.len()),
            Style::default().fg(theme.fg_muted),
        )),
        Line::from(""),
        Line::from(Span::styled(
            item.original_sentence.clone(),
            Style::default().fg(theme.fg_secondary).add_modifier(Modifier::BOLD),
        )),
    ];
    if session.show_tense {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("Tense: {}", item.tense_used),
            Style::default().fg(theme.accent_secondary),
        )));
    }
    let sentence_height = wrapped_height(&lines, area.width.saturating_sub(2)).saturating_add(2);
    let [sentence_area, answer_area, review_area, hint_area] = Layout::vertical([
        Constraint::Length(sentence_height),
        Constraint::Length(3),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .areas(area);

    let block = Block::default()
        .title(" Translate into English ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme.border))
        .style(Style::default().bg(theme.bg_secondary));
    frame.render_widget(
        Paragraph::new(lines).block(block).alignment(Alignment::Center).wrap(Wrap { trim: true }),
        sentence_area,
    );

    // Answer
    let editable = !session.is_loading();
    let answer_style = Style::default().fg(if editable { theme.fg_primary } else { theme.disabled });
    let block = Block::default()
        .title(" Your translation ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if editable { theme.border_focused } else { theme.border }))
        .style(Style::default().bg(theme.bg_secondary));
    frame.render_widget(
        Paragraph::new(text_input_line(&ui.answer_input, editable, answer_style, theme)).block(block),
        answer_area,
    );

    // Review
    let review_lines: Vec<Line> = if session.review.is_empty() {
        let placeholder = if session.is_loading() { "Reviewing..." } else { "Press Enter to get a review." };
        vec![Line::from(Span::styled(placeholder, Style::default().fg(theme.fg_muted)))]
    } else {
        session
            .review
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), Style::default().fg(theme.fg_primary))))
            .collect()
    };
    let review_border = if session.review.is_empty() { theme.border } else { theme.success };
    let block = Block::default()
        .title(" Review ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(review_border))
        .style(Style::default().bg(theme.bg_secondary));
    frame.render_widget(
        Paragraph::new(review_lines).block(block).wrap(Wrap { trim: false }).scroll((ui.review_scroll, 0)),
        review_area,
    );

    // Hints
    let next_label = if session.practice.is_last() { "[Ctrl-N] Finish" } else { "[Ctrl-N] Next" };
    let hints = Line::from(vec![
        Span::styled("[Enter] Review", hint_style(session.can_submit(), theme)),
        Span::raw("    "),
        Span::styled(next_label, hint_style(session.can_advance(), theme)),
        Span::raw("    "),
        Span::styled("[Ctrl-T] Show tense", hint_style(true, theme)),
        Span::raw("    "),
        Span::styled("[Esc] Restart", hint_style(!session.is_loading(), theme)),
    ]);
    frame.render_widget(Paragraph::new(hints).alignment(Alignment::Center), hint_area);
}

/// Rows needed to show `lines` wrapped at `width` columns
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines.iter().map(|line| line.width().max(1).div_ceil(width)).sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}
