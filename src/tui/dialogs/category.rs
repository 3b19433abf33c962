//! Category entry dialog
//!
//! Modal dialog for adding a category with an optional color and budget.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Span,
    widgets::{Clear, Paragraph},
    Frame,
};

use super::{dialog_block, hint_line};
use crate::models::{Money, NewCategory};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Which field is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CategoryField {
    #[default]
    Name,
    Color,
    Budget,
}

impl CategoryField {
    pub fn next(self) -> Self {
        match self {
            Self::Name => Self::Color,
            Self::Color => Self::Budget,
            Self::Budget => Self::Name,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Name => Self::Budget,
            Self::Color => Self::Name,
            Self::Budget => Self::Color,
        }
    }
}

/// State for the category form dialog
#[derive(Debug, Clone)]
pub struct CategoryFormState {
    pub name_input: TextInput,
    pub color_input: TextInput,
    pub budget_input: TextInput,
    pub focused_field: CategoryField,
    pub error_message: Option<String>,
}

impl Default for CategoryFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl CategoryFormState {
    /// Create a new form state with default values
    pub fn new() -> Self {
        Self {
            name_input: TextInput::new()
                .label("Name")
                .placeholder("e.g. Groceries, Rent"),
            color_input: TextInput::new().label("Color").placeholder("#4f46e5"),
            budget_input: TextInput::new().label("Budget").placeholder("none"),
            focused_field: CategoryField::Name,
            error_message: None,
        }
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            CategoryField::Name => &mut self.name_input,
            CategoryField::Color => &mut self.color_input,
            CategoryField::Budget => &mut self.budget_input,
        }
    }

    /// Build the request payload from the form
    pub fn build(&self) -> Result<NewCategory, String> {
        let mut category = NewCategory::new(self.name_input.value());

        let color = self.color_input.value().trim();
        if !color.is_empty() {
            category = category.with_color(color);
        }

        let budget = self.budget_input.value().trim();
        if !budget.is_empty() {
            category = category.with_budget(Money::parse(budget).map_err(|e| e.to_string())?);
        }

        category.validate().map_err(|e| e.to_string())
    }
}

/// Render the category dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(52, 10, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(dialog_block(" Add Category ", Color::Cyan), area);

    let inner = Rect {
        x: area.x + 2,
        y: area.y + 1,
        width: area.width.saturating_sub(4),
        height: area.height.saturating_sub(2),
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Name
            Constraint::Length(1), // Color
            Constraint::Length(1), // Budget
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Error
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    let form = &app.category_form;
    let fields = [
        (&form.name_input, CategoryField::Name),
        (&form.color_input, CategoryField::Color),
        (&form.budget_input, CategoryField::Budget),
    ];
    for (row, (input, field)) in fields.into_iter().enumerate() {
        frame.render_widget(
            Paragraph::new(input.to_line(form.focused_field == field, 6)),
            chunks[row],
        );
    }

    if let Some(ref error) = form.error_message {
        frame.render_widget(
            Paragraph::new(Span::styled(error.as_str(), Style::default().fg(Color::Red))),
            chunks[4],
        );
    }

    frame.render_widget(
        Paragraph::new(hint_line(&[
            ("[Tab]", Color::Yellow, " Next  "),
            ("[Enter]", Color::Green, " Save  "),
            ("[Esc]", Color::Red, " Cancel"),
        ])),
        chunks[6],
    );
}

/// Handle key input for the category dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            true
        }
        KeyCode::Tab | KeyCode::Down => {
            app.category_form.focused_field = app.category_form.focused_field.next();
            true
        }
        KeyCode::BackTab | KeyCode::Up => {
            app.category_form.focused_field = app.category_form.focused_field.prev();
            true
        }
        KeyCode::Enter => {
            match app.category_form.build() {
                Ok(payload) => {
                    if app.add_category(payload) {
                        app.close_dialog();
                    }
                }
                Err(e) => app.category_form.error_message = Some(e),
            }
            true
        }
        _ => {
            let form = &mut app.category_form;
            let handled = form.focused_input().handle_key(key);
            if handled {
                form.error_message = None;
            }
            handled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_with_defaults() {
        let mut form = CategoryFormState::new();
        form.name_input.set_content("  Food ");
        let category = form.build().unwrap();
        assert_eq!(category.name, "Food");
        assert_eq!(category.budget, Money::zero());
    }

    #[test]
    fn test_build_with_color_and_budget() {
        let mut form = CategoryFormState::new();
        form.name_input.set_content("Rent");
        form.color_input.set_content("#FF0000");
        form.budget_input.set_content("1,200");
        let category = form.build().unwrap();
        assert_eq!(category.color, "#ff0000");
        assert_eq!(category.budget, Money::from_major(1200));
    }

    #[test]
    fn test_build_rejects_invalid_fields() {
        let mut form = CategoryFormState::new();
        assert_eq!(form.build().unwrap_err(), "Category name cannot be empty");

        form.name_input.set_content("Fun");
        form.color_input.set_content("blue");
        assert!(form.build().unwrap_err().contains("Invalid color"));

        form.color_input.clear();
        form.budget_input.set_content("-5");
        assert_eq!(form.build().unwrap_err(), "Budget cannot be negative");
    }
}
