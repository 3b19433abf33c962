//! Dialog modules for the TUI
//!
//! Contains modal dialogs for signing in and data entry

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders},
};

pub mod budget;
pub mod category;
pub mod confirm;
pub mod help;
pub mod login;
pub mod transaction;

/// Bordered block with a bold title in `color`
pub(crate) fn dialog_block(title: &str, color: Color) -> Block<'_> {
    Block::default()
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(color))
}

/// `[Key] action` hints, one triple per key
pub(crate) fn hint_line(hints: &[(&'static str, Color, &'static str)]) -> Line<'static> {
    let spans: Vec<Span<'static>> = hints
        .iter()
        .flat_map(|(key, color, action)| {
            [
                Span::styled(*key, Style::default().fg(*color)),
                Span::raw(*action),
            ]
        })
        .collect();
    Line::from(spans)
}
