//! Help dialog
//!
//! Shows contextual keyboard shortcuts

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use super::dialog_block;
use crate::tui::app::{ActiveView, App};
use crate::tui::layout::centered_rect;

/// Render the help dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect(60, 70, frame.area());
    frame.render_widget(Clear, area);

    let paragraph = Paragraph::new(get_help_lines(app.active_view))
        .block(dialog_block(" Help ", Color::Cyan))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}

/// Get help lines for the current view
fn get_help_lines(view: ActiveView) -> Vec<Line<'static>> {
    let mut lines = vec![
        heading("Global Keys"),
        Line::from(""),
        key_line("q", "Quit application"),
        key_line("?", "Show/hide help"),
        key_line("Tab", "Next view"),
        key_line("[ / ]", "Previous/next month"),
        key_line("r", "Reload from server"),
        key_line("L", "Sign out"),
        key_line("j/k", "Move selection down/up"),
        Line::from(""),
    ];

    match view {
        ActiveView::Overview => {
            lines.push(heading("Overview"));
            lines.push(Line::from(""));
            lines.push(key_line("a", "Add transaction"));
            lines.push(key_line("n", "Add category"));
        }
        ActiveView::Transactions => {
            lines.push(heading("Transactions"));
            lines.push(Line::from(""));
            lines.push(key_line("1-4", "Sort by date/category/note/amount"));
            lines.push(key_line("", "Press again to reverse"));
            lines.push(key_line("a", "Add transaction"));
            lines.push(key_line("d", "Delete transaction"));
        }
        ActiveView::Budgets => {
            lines.push(heading("Budgets"));
            lines.push(Line::from(""));
            lines.push(key_line("e / Enter", "Set budget"));
            lines.push(key_line("n", "Add category"));
        }
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press any key to close",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn heading(text: &'static str) -> Line<'static> {
    Line::from(vec![Span::styled(
        text,
        Style::default()
            .add_modifier(Modifier::BOLD)
            .fg(Color::Yellow),
    )])
}

fn key_line(key: &str, description: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{:>12}", key), Style::default().fg(Color::Cyan)),
        Span::raw("  "),
        Span::styled(description.to_string(), Style::default().fg(Color::White)),
    ])
}
