//! TUI Views module
//!
//! Contains the main views (overview, transaction register, budgets)
//! as well as the tab bar and status bar.

pub mod budget;
pub mod overview;
pub mod register;
pub mod status_bar;

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use super::app::{ActiveDialog, ActiveView, App};
use super::dialogs;
use super::layout::AppLayout;
use crate::display::format_transaction_line;
use crate::models::category::parse_hex_color;

/// Render the entire application
pub fn render(frame: &mut Frame, app: &mut App) {
    let layout = AppLayout::new(frame.area());

    render_tabs(frame, app, layout.tabs);

    match app.active_view {
        ActiveView::Overview => overview::render(frame, app, layout.main),
        ActiveView::Transactions => register::render(frame, app, layout.main),
        ActiveView::Budgets => budget::render(frame, app, layout.main),
    }

    status_bar::render(frame, app, layout.status_bar);

    if app.has_dialog() {
        render_dialog(frame, app);
    }
}

/// View tabs, titled with the selected month
fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = ActiveView::ALL
        .iter()
        .enumerate()
        .map(|(i, view)| Line::from(format!("{} {}", i + 1, view.title())))
        .collect();

    let title = Line::from(vec![
        Span::styled(" costbook ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.dashboard.month.to_string(),
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶ ", Style::default().fg(Color::DarkGray)),
    ]);

    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        )
        .select(app.view_index())
        .style(Style::default().fg(Color::White))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider(Span::styled("│", Style::default().fg(Color::DarkGray)));

    frame.render_widget(tabs, area);
}

/// Render active dialog
fn render_dialog(frame: &mut Frame, app: &mut App) {
    match &app.active_dialog {
        ActiveDialog::Help => dialogs::help::render(frame, app),
        ActiveDialog::Login => dialogs::login::render(frame, app),
        ActiveDialog::AddTransaction => dialogs::transaction::render(frame, app),
        ActiveDialog::AddCategory => dialogs::category::render(frame, app),
        ActiveDialog::EditBudget => dialogs::budget::render(frame, app),
        ActiveDialog::ConfirmDelete(id) => {
            let detail = app
                .dashboard
                .transactions
                .iter()
                .find(|t| &t.id == id)
                .map(|t| {
                    format_transaction_line(t, &app.dashboard.categories, &app.settings.currency_code)
                })
                .unwrap_or_else(|| id.to_string());
            dialogs::confirm::render(frame, "Delete this transaction?", &detail);
        }
        ActiveDialog::None => {}
    }
}

/// Terminal color for a category's `#rrggbb` color
pub(crate) fn swatch_color(color: &str) -> Color {
    match parse_hex_color(color) {
        Some((r, g, b)) => Color::Rgb(r, g, b),
        None => Color::Gray,
    }
}
