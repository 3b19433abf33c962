//! Transaction entry dialog
//!
//! Modal dialog for adding a transaction. The date and category are kept
//! between entries; amount and note are reset.

use chrono::{Local, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};

use super::{dialog_block, hint_line};
use crate::models::{Category, Money, Month, NewTransaction};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

const LABEL_WIDTH: usize = 8;

/// Which field is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionField {
    #[default]
    Date,
    Amount,
    Category,
    Note,
}

impl TransactionField {
    pub fn next(self) -> Self {
        match self {
            Self::Date => Self::Amount,
            Self::Amount => Self::Category,
            Self::Category => Self::Note,
            Self::Note => Self::Date,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Date => Self::Note,
            Self::Amount => Self::Date,
            Self::Category => Self::Amount,
            Self::Note => Self::Category,
        }
    }
}

/// State for the transaction form dialog
#[derive(Debug, Clone)]
pub struct TransactionFormState {
    pub date_input: TextInput,
    pub amount_input: TextInput,
    pub note_input: TextInput,
    /// Index into the loaded categories
    pub category_index: usize,
    pub focused_field: TransactionField,
    pub error_message: Option<String>,
}

impl Default for TransactionFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl TransactionFormState {
    pub fn new() -> Self {
        Self {
            date_input: TextInput::new()
                .label("Date")
                .placeholder("YYYY-MM-DD")
                .content(Local::now().date_naive().format("%Y-%m-%d").to_string()),
            amount_input: TextInput::new().label("Amount").placeholder("0.00"),
            note_input: TextInput::new().label("Note").placeholder("optional"),
            category_index: 0,
            focused_field: TransactionField::Amount,
            error_message: None,
        }
    }

    /// Reset for a new entry in `month`
    ///
    /// A date outside the month is moved to today, or to the first of the
    /// month when today is elsewhere.
    pub fn prepare(&mut self, month: Month, category_count: usize) {
        let keep_date = NaiveDate::parse_from_str(self.date_input.value().trim(), "%Y-%m-%d")
            .map(|d| month.contains(d))
            .unwrap_or(false);
        if !keep_date {
            let today = Local::now().date_naive();
            let date = if month.contains(today) {
                today
            } else {
                month.first_day()
            };
            self.date_input
                .set_content(date.format("%Y-%m-%d").to_string());
        }

        if self.category_index >= category_count {
            self.category_index = 0;
        }
        self.amount_input.clear();
        self.note_input.clear();
        self.focused_field = TransactionField::Amount;
        self.error_message = None;
    }

    pub fn next_category(&mut self, count: usize) {
        if count > 0 {
            self.category_index = (self.category_index + 1) % count;
        }
    }

    pub fn prev_category(&mut self, count: usize) {
        if count > 0 {
            self.category_index = if self.category_index == 0 {
                count - 1
            } else {
                self.category_index - 1
            };
        }
    }

    fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focused_field {
            TransactionField::Date => Some(&mut self.date_input),
            TransactionField::Amount => Some(&mut self.amount_input),
            TransactionField::Category => None,
            TransactionField::Note => Some(&mut self.note_input),
        }
    }

    /// Build the request payload from the form
    pub fn build(&self, categories: &[Category]) -> Result<NewTransaction, String> {
        let date = NaiveDate::parse_from_str(self.date_input.value().trim(), "%Y-%m-%d")
            .map_err(|_| "Date must be YYYY-MM-DD".to_string())?;

        let amount_text = self.amount_input.value().trim();
        if amount_text.is_empty() {
            return Err("Amount is required".to_string());
        }
        let amount = Money::parse(amount_text).map_err(|e| e.to_string())?;

        let category = categories
            .get(self.category_index)
            .ok_or_else(|| "Choose a category".to_string())?;

        let note = Some(self.note_input.value().to_string());
        let payload = NewTransaction::new(date, amount, category.id.clone(), note);
        payload.validate().map_err(|e| e.to_string())?;
        Ok(payload)
    }
}

/// Render the transaction dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(56, 12, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(dialog_block(" Add Transaction ", Color::Cyan), area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Date
            Constraint::Length(1), // Amount
            Constraint::Length(1), // Category
            Constraint::Length(1), // Note
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.transaction_form;
    let focused = form.focused_field;

    frame.render_widget(
        Paragraph::new(
            form.date_input
                .to_line(focused == TransactionField::Date, LABEL_WIDTH),
        ),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(
            form.amount_input
                .to_line(focused == TransactionField::Amount, LABEL_WIDTH),
        ),
        chunks[1],
    );

    let category_name = app
        .dashboard
        .categories
        .get(form.category_index)
        .map(|c| c.name.as_str())
        .unwrap_or("(no categories)");
    frame.render_widget(
        Paragraph::new(selector_line(
            "Category",
            category_name,
            focused == TransactionField::Category,
        )),
        chunks[2],
    );

    frame.render_widget(
        Paragraph::new(
            form.note_input
                .to_line(focused == TransactionField::Note, LABEL_WIDTH),
        ),
        chunks[3],
    );

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[5],
        );
    }

    frame.render_widget(
        Paragraph::new(hint_line(&[
            ("[Tab]", Color::Yellow, " Next  "),
            ("[Enter]", Color::Green, " Save  "),
            ("[Esc]", Color::Red, " Cancel"),
        ])),
        chunks[7],
    );
}

/// Render a left/right selector field
fn selector_line<'a>(label: &str, value: &'a str, focused: bool) -> Line<'a> {
    let label_style = if focused {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Cyan)
    };
    let value_style = if focused {
        Style::default().fg(Color::Black).bg(Color::Cyan)
    } else {
        Style::default().fg(Color::Yellow)
    };
    let hint = if focused { " ◀ ▶" } else { "" };

    Line::from(vec![
        Span::styled(
            format!("{:>width$}: ", label, width = LABEL_WIDTH),
            label_style,
        ),
        Span::styled(format!(" {} ", value), value_style),
        Span::styled(hint, Style::default().fg(Color::Yellow)),
    ])
}

/// Handle key input for the transaction dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    let category_count = app.dashboard.categories.len();

    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            return true;
        }
        KeyCode::Tab | KeyCode::Down => {
            app.transaction_form.focused_field = app.transaction_form.focused_field.next();
            return true;
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.transaction_form.focused_field = app.transaction_form.focused_field.prev();
            return true;
        }
        KeyCode::Enter => {
            match app.transaction_form.build(&app.dashboard.categories) {
                Ok(payload) => {
                    if app.add_transaction(payload) {
                        app.close_dialog();
                    }
                }
                Err(e) => app.transaction_form.error_message = Some(e),
            }
            return true;
        }
        _ => {}
    }

    let form = &mut app.transaction_form;
    if form.focused_field == TransactionField::Category {
        return match key.code {
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char(' ') => {
                form.next_category(category_count);
                true
            }
            KeyCode::Left | KeyCode::Char('h') => {
                form.prev_category(category_count);
                true
            }
            _ => false,
        };
    }

    let handled = form
        .focused_input()
        .map(|input| input.handle_key(key))
        .unwrap_or(false);
    if handled {
        form.error_message = None;
    }
    handled
}
