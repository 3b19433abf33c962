//! Confirmation dialog
//!
//! Simple yes/no confirmation

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph, Wrap},
    Frame,
};

use super::{dialog_block, hint_line};
use crate::tui::layout::centered_rect_fixed;

/// Render a confirmation dialog
pub fn render(frame: &mut Frame, message: &str, detail: &str) {
    let area = centered_rect_fixed(60, 8, frame.area());
    frame.render_widget(Clear, area);

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            message.to_string(),
            Style::default().fg(Color::White),
        )),
        Line::from(Span::styled(
            detail.to_string(),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        hint_line(&[
            ("[Y]", Color::Green, " Yes  "),
            ("[N]", Color::Red, " No  "),
            ("[Esc]", Color::Yellow, " Cancel"),
        ]),
    ];

    let paragraph = Paragraph::new(lines)
        .block(dialog_block(" Confirm ", Color::Yellow))
        .wrap(Wrap { trim: false });

    frame.render_widget(paragraph, area);
}
