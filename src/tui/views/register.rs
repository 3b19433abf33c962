//! Transaction register view
//!
//! Shows the month's transactions in a table sortable by any column

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use super::swatch_color;
use crate::display::report::truncate;
use crate::table::TransactionColumn;
use crate::tui::app::App;

/// Render the transaction register
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let count = app.dashboard.transactions.len();
    let title = Line::from(vec![
        Span::styled(
            format!(" Transactions - {} ", app.dashboard.month),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("({}) ", count),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    let block = Block::default()
        .title(title)
        .title_bottom(Line::from(Span::styled(
            " 1-4:Sort  a:Add  d:Delete ",
            Style::default().fg(Color::DarkGray),
        )))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if count == 0 {
        let text = if app.is_loading() {
            "Loading…"
        } else {
            "No transactions this month. Press 'a' to add one."
        };
        let paragraph = Paragraph::new(text)
            .block(block)
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(paragraph, area);
        return;
    }

    let sort = &app.dashboard.sort;
    let header = Row::new(
        TransactionColumn::ALL
            .iter()
            .map(|column| {
                let style = if sort.key() == *column {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().add_modifier(Modifier::BOLD)
                };
                Cell::from(format!("{} {}", column.title(), sort.indicator(*column))).style(style)
            })
            .collect::<Vec<_>>(),
    )
    .style(Style::default().fg(Color::Yellow))
    .height(1);

    let currency = &app.settings.currency_code;
    let date_format = &app.settings.date_format;
    let categories = &app.dashboard.categories;

    let rows: Vec<Row> = app
        .dashboard
        .sorted_transactions()
        .into_iter()
        .map(|txn| {
            let color = txn
                .category(categories)
                .map(|c| swatch_color(&c.color))
                .unwrap_or(Color::DarkGray);

            Row::new(vec![
                Cell::from(txn.date().format(date_format).to_string()),
                Cell::from(Line::from(vec![
                    Span::styled("● ", Style::default().fg(color)),
                    Span::raw(truncate(txn.category_name(categories), 18)),
                ])),
                Cell::from(truncate(txn.note_text(), 40)),
                Cell::from(Line::from(txn.amount.format_currency(currency)).right_aligned())
                    .style(Style::default().fg(Color::Yellow)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(12), // Date
        Constraint::Length(22), // Category
        Constraint::Min(16),    // Note
        Constraint::Length(14), // Amount
    ];

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
    state.select(Some(app.selected_transaction_index));

    frame.render_stateful_widget(table, area, &mut state);
}
