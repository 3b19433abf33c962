//! Status bar view
//!
//! Shows the month and its total, request activity, the last error and key hints

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::tui::app::App;

/// Render the status bar
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let summary = app.dashboard.summary();
    let mut spans = vec![];

    spans.push(Span::styled(
        format!(" {}", summary.month),
        Style::default().fg(Color::Cyan),
    ));
    spans.push(Span::raw(" │ "));
    spans.push(Span::styled("Spent: ", Style::default().fg(Color::White)));
    spans.push(Span::styled(
        summary.total.format_currency(&app.settings.currency_code),
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    ));

    spans.push(Span::raw(" │ "));
    let (session, session_color) = if app.dashboard.signed_in {
        ("online", Color::Green)
    } else {
        ("signed out", Color::Red)
    };
    spans.push(Span::styled(session, Style::default().fg(session_color)));

    if app.dashboard.busy {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("Saving…", Style::default().fg(Color::Cyan)));
    } else if app.is_loading() {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled("Loading…", Style::default().fg(Color::Cyan)));
    }

    // An error outranks the informational message
    if let Some(ref error) = app.dashboard.error {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    } else if let Some(ref message) = app.status_message {
        spans.push(Span::raw(" │ "));
        spans.push(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Yellow),
        ));
    }

    // Key hints (right-aligned)
    let hints = " [/]:Month  r:Reload  ?:Help  q:Quit ";

    let left_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let padding_len = (area.width as usize)
        .saturating_sub(left_len)
        .saturating_sub(hints.len());
    spans.push(Span::raw(" ".repeat(padding_len.max(1))));
    spans.push(Span::styled(hints, Style::default().fg(Color::White)));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
