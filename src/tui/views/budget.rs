//! Budget view
//!
//! Shows each category with its monthly budget, spending and progress

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::swatch_color;
use crate::display::report::{format_bar, format_percentage};
use crate::models::Money;
use crate::tui::app::App;
use crate::tui::layout::MainPanelLayout;

const BAR_WIDTH: usize = 20;

/// Render the budget view
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let layout = MainPanelLayout::new(area, 3);
    render_header(frame, app, layout.header);
    render_category_table(frame, app, layout.content);
}

/// Budgeted total and count of overspent categories
fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let currency = &app.settings.currency_code;
    let summary = app.dashboard.summary();
    let budgeted: Money = summary.budgets.iter().map(|b| b.budget).sum();
    let over = summary.over_budget().count();

    let mut spans = vec![
        Span::styled(" Budgeted: ", Style::default().fg(Color::White)),
        Span::styled(
            budgeted.format_currency(currency),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
        Span::styled("Spent: ", Style::default().fg(Color::White)),
        Span::styled(
            summary.total.format_currency(currency),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("   "),
    ];
    if over > 0 {
        spans.push(Span::styled(
            format!("{} over budget", over),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ));
    } else {
        spans.push(Span::styled(
            "All within budget",
            Style::default().fg(Color::Green),
        ));
    }

    let block = Block::default()
        .title(format!(" Budgets - {} ", app.dashboard.month))
        .title_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

/// Render category budget table
fn render_category_table(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let summary = app.dashboard.summary();
    if summary.budgets.is_empty() {
        let text = Paragraph::new("No categories. Press 'n' to add one.")
            .block(block)
            .style(Style::default().fg(Color::Yellow));
        frame.render_widget(text, area);
        return;
    }

    let currency = &app.settings.currency_code;
    let rows: Vec<Row> = summary
        .budgets
        .iter()
        .map(|progress| {
            let (status, status_style) = if progress.is_over_budget() {
                (
                    format!("over {}", progress.overage().format_currency(currency)),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                )
            } else if progress.has_budget() {
                (
                    format!("{} left", progress.remaining().format_currency(currency)),
                    Style::default().fg(Color::Green),
                )
            } else {
                ("no budget".to_string(), Style::default().fg(Color::DarkGray))
            };

            let bar_color = if progress.is_over_budget() {
                Color::Red
            } else if progress.ratio() >= 0.8 {
                Color::Yellow
            } else {
                Color::Green
            };
            let (bar, percent) = if progress.has_budget() {
                (
                    format_bar(progress.fill(), 1.0, BAR_WIDTH),
                    format_percentage(progress.ratio() * 100.0),
                )
            } else {
                (String::new(), String::new())
            };

            let budget = if progress.has_budget() {
                progress.budget.format_currency(currency)
            } else {
                "-".to_string()
            };

            Row::new(vec![
                Cell::from(Line::from(vec![
                    Span::styled("● ", Style::default().fg(swatch_color(&progress.color))),
                    Span::raw(progress.category_name.clone()),
                ])),
                Cell::from(budget),
                Cell::from(progress.spent.format_currency(currency)),
                Cell::from(bar).style(Style::default().fg(bar_color)),
                Cell::from(percent),
                Cell::from(status).style(status_style),
            ])
        })
        .collect();

    let widths = [
        Constraint::Min(18),                     // Category
        Constraint::Length(14),                  // Budget
        Constraint::Length(14),                  // Spent
        Constraint::Length(BAR_WIDTH as u16 + 1), // Progress
        Constraint::Length(6),                   // Percent
        Constraint::Length(18),                  // Status
    ];

    let header = Row::new(vec![
        Cell::from("Category").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Budget").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Spent").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Progress").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("%").style(Style::default().add_modifier(Modifier::BOLD)),
        Cell::from("Status").style(Style::default().add_modifier(Modifier::BOLD)),
    ])
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_category_index));

    frame.render_stateful_widget(table, area, &mut state);
}
