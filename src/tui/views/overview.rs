//! Overview view
//!
//! Stat cards for the month plus the per-category breakdown and any
//! over-budget warnings.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::swatch_color;
use crate::display::report::{format_bar, format_percentage, truncate};
use crate::reports::MonthSummary;
use crate::tui::app::App;
use crate::tui::layout::{columns, MainPanelLayout};

/// Render the overview
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let summary = app.dashboard.summary();
    let currency = app.settings.currency_code.clone();
    let layout = MainPanelLayout::new(area, 5);

    render_cards(frame, &summary, &currency, layout.header);

    let over_count = summary.over_budget().count() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(if over_count > 0 { over_count + 2 } else { 0 }),
        ])
        .split(layout.content);

    render_breakdown(frame, &summary, &currency, chunks[0]);
    if over_count > 0 {
        render_warnings(frame, &summary, &currency, chunks[1]);
    }
}

fn card<'a>(title: &'a str, value: String, detail: String, color: Color) -> Paragraph<'a> {
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    Paragraph::new(vec![
        Line::from(Span::styled(
            value,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(detail, Style::default().fg(Color::DarkGray))),
    ])
    .block(block)
}

fn render_cards(frame: &mut Frame, summary: &MonthSummary, currency: &str, area: Rect) {
    let cards = columns(area, 3);

    frame.render_widget(
        card(
            " Total spent ",
            summary.total.format_currency(currency),
            summary.month.to_string(),
            Color::Yellow,
        ),
        cards[0],
    );

    let top_detail = summary
        .top_category
        .as_ref()
        .map(|top| top.spent.format_currency(currency))
        .unwrap_or_default();
    frame.render_widget(
        card(
            " Top category ",
            summary.top_category_name().to_string(),
            top_detail,
            Color::Cyan,
        ),
        cards[1],
    );

    frame.render_widget(
        card(
            " Transactions ",
            summary.transaction_count.to_string(),
            format!("{} categories", summary.by_category.len()),
            Color::White,
        ),
        cards[2],
    );
}

fn render_breakdown(frame: &mut Frame, summary: &MonthSummary, currency: &str, area: Rect) {
    let block = Block::default()
        .title(" Spending by category ")
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if summary.by_category.is_empty() {
        let text = Paragraph::new("Nothing spent this month.")
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(text, area);
        return;
    }

    let total = summary.total.cents() as f64;
    let lines: Vec<Line> = summary
        .by_category
        .iter()
        .map(|entry| {
            let color = summary
                .budgets
                .iter()
                .find(|b| b.category_id == entry.category_id)
                .map(|b| swatch_color(&b.color))
                .unwrap_or(Color::DarkGray);
            let share = if total > 0.0 {
                entry.spent.cents() as f64 / total * 100.0
            } else {
                0.0
            };

            Line::from(vec![
                Span::styled("● ", Style::default().fg(color)),
                Span::raw(format!("{:<18}", truncate(&entry.category_name, 18))),
                Span::styled(
                    format!("{:>14} ", entry.spent.format_currency(currency)),
                    Style::default().fg(Color::Yellow),
                ),
                Span::styled(
                    format_bar(entry.spent.cents() as f64, total, 24),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!(" {:>6}", format_percentage(share)),
                    Style::default().fg(Color::DarkGray),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_warnings(frame: &mut Frame, summary: &MonthSummary, currency: &str, area: Rect) {
    let block = Block::default()
        .title(" Over budget ")
        .title_style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));

    let lines: Vec<Line> = summary
        .over_budget()
        .map(|progress| {
            Line::from(vec![
                Span::styled("⚠ ", Style::default().fg(Color::Red)),
                Span::raw(progress.category_name.clone()),
                Span::styled(
                    format!(
                        "  over by {} ({} of {})",
                        progress.overage().format_currency(currency),
                        progress.spent.format_currency(currency),
                        progress.budget.format_currency(currency)
                    ),
                    Style::default().fg(Color::Red),
                ),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
