//! Budget dialog
//!
//! Edits the monthly budget of one category. An empty amount or zero
//! removes the budget.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::{dialog_block, hint_line};
use crate::models::category::validate_budget;
use crate::models::{Category, CategoryId, Money};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// State for the budget dialog
#[derive(Debug, Clone, Default)]
pub struct BudgetFormState {
    pub category_id: Option<CategoryId>,
    pub category_name: String,
    pub amount_input: TextInput,
    pub error_message: Option<String>,
}

impl BudgetFormState {
    /// Load the category being edited
    pub fn init(&mut self, category: &Category) {
        self.category_id = Some(category.id.clone());
        self.category_name = category.name.clone();
        let current = if category.has_budget() {
            category.budget.to_string()
        } else {
            String::new()
        };
        self.amount_input = TextInput::new()
            .label("Budget")
            .placeholder("none")
            .content(current);
        self.error_message = None;
    }

    /// Category and amount to save
    pub fn build(&self) -> Result<(CategoryId, Money), String> {
        let id = self
            .category_id
            .clone()
            .ok_or_else(|| "No category selected".to_string())?;

        let text = self.amount_input.value().trim();
        let amount = if text.is_empty() {
            Money::zero()
        } else {
            Money::parse(text).map_err(|e| e.to_string())?
        };
        validate_budget(amount).map_err(|e| e.to_string())?;
        Ok((id, amount))
    }
}

/// Render the budget dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(48, 9, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(dialog_block(" Set Budget ", Color::Cyan), area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Category / spent
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Error
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.budget_form;
    let currency = &app.settings.currency_code;
    let spent = form
        .category_id
        .as_ref()
        .map(|id| app.dashboard.summary().spent_in(id))
        .unwrap_or_else(Money::zero);

    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                form.category_name.clone(),
                Style::default().fg(Color::White),
            ),
            Span::styled(
                format!("  spent {} in {}", spent.format_currency(currency), app.dashboard.month),
                Style::default().fg(Color::DarkGray),
            ),
        ])),
        chunks[0],
    );
    frame.render_widget(Paragraph::new(form.amount_input.to_line(true, 6)), chunks[2]);

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[3],
        );
    }

    frame.render_widget(
        Paragraph::new(hint_line(&[
            ("[Enter]", Color::Green, " Save  "),
            ("[Esc]", Color::Red, " Cancel"),
        ])),
        chunks[5],
    );
}

/// Handle key input for the budget dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            true
        }
        KeyCode::Enter => {
            match app.budget_form.build() {
                Ok((id, amount)) => {
                    if app.save_budget(id, amount) {
                        app.close_dialog();
                    }
                }
                Err(e) => app.budget_form.error_message = Some(e),
            }
            true
        }
        _ => {
            let form = &mut app.budget_form;
            let handled = form.amount_input.handle_key(key);
            if handled {
                form.error_message = None;
            }
            handled
        }
    }
}
