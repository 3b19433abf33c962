//! Login dialog
//!
//! Asks for a name and password. Ctrl+R switches between signing in and
//! creating an account.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use zeroize::Zeroizing;

use super::{dialog_block, hint_line};
use crate::tui::app::App;
use crate::tui::layout::centered_rect_fixed;
use crate::tui::widgets::TextInput;

/// Which field is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Name,
    Password,
}

/// State for the login form
#[derive(Debug, Clone)]
pub struct LoginFormState {
    pub name_input: TextInput,
    pub password_input: TextInput,
    pub focused_field: LoginField,
    /// Create an account instead of signing in
    pub register: bool,
    pub error: Option<String>,
}

impl Default for LoginFormState {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginFormState {
    pub fn new() -> Self {
        Self {
            name_input: TextInput::new().label("Name").placeholder("your name"),
            password_input: TextInput::new().label("Password").masked(),
            focused_field: LoginField::Name,
            register: false,
            error: None,
        }
    }

    /// Move to the other field
    pub fn next_field(&mut self) {
        self.focused_field = match self.focused_field {
            LoginField::Name => LoginField::Password,
            LoginField::Password => LoginField::Name,
        };
    }

    pub fn toggle_mode(&mut self) {
        self.register = !self.register;
        self.error = None;
    }

    fn focused_input(&mut self) -> &mut TextInput {
        match self.focused_field {
            LoginField::Name => &mut self.name_input,
            LoginField::Password => &mut self.password_input,
        }
    }

    /// Take the credentials, clearing the password field
    pub fn take_credentials(&mut self) -> Result<(String, Zeroizing<String>), String> {
        let name = self.name_input.value().trim().to_string();
        if name.is_empty() {
            return Err("Name is required".to_string());
        }
        if self.password_input.value().is_empty() {
            return Err("Password is required".to_string());
        }
        let password = Zeroizing::new(std::mem::take(&mut self.password_input.content));
        self.password_input.clear();
        Ok((name, password))
    }
}

/// Render the login dialog
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = centered_rect_fixed(52, 10, frame.area());
    frame.render_widget(Clear, area);

    let form = &app.login_form;
    let title = if form.register {
        " Create account "
    } else {
        " Sign in "
    };
    frame.render_widget(dialog_block(title, Color::Cyan), area);

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
            Constraint::Length(1), // Password
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Status / error
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(inner);

    frame.render_widget(
        Paragraph::new(
            form.name_input
                .to_line(form.focused_field == LoginField::Name, 8),
        ),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(
            form.password_input
                .to_line(form.focused_field == LoginField::Password, 8),
        ),
        chunks[1],
    );

    let status = if app.is_signing_in() {
        Some(Span::styled("Signing in...", Style::default().fg(Color::Yellow)))
    } else {
        form.error
            .as_deref()
            .map(|e| Span::styled(e.to_string(), Style::default().fg(Color::Red)))
    };
    if let Some(status) = status {
        frame.render_widget(Paragraph::new(Line::from(status)), chunks[3]);
    }

    let mode = if form.register { " Sign in" } else { " Register" };
    frame.render_widget(
        Paragraph::new(hint_line(&[
            ("[Tab]", Color::Yellow, " Next  "),
            ("[Enter]", Color::Green, " Submit  "),
            ("[^R]", Color::Cyan, mode),
        ])),
        chunks[5],
    );
}

/// Handle key input for the login dialog
pub fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
        app.login_form.toggle_mode();
        return true;
    }

    match key.code {
        KeyCode::Esc => {
            app.close_dialog();
            if !app.dashboard.signed_in {
                app.set_status("Not signed in. Press r to sign in");
            }
            true
        }
        KeyCode::Tab | KeyCode::BackTab | KeyCode::Down | KeyCode::Up => {
            app.login_form.next_field();
            true
        }
        KeyCode::Enter => {
            if app.is_signing_in() {
                return true;
            }
            if app.login_form.focused_field == LoginField::Name
                && app.login_form.password_input.value().is_empty()
            {
                app.login_form.next_field();
                return true;
            }
            match app.login_form.take_credentials() {
                Ok((name, password)) => {
                    let register = app.login_form.register;
                    app.login_form.error = None;
                    app.sign_in(name, password, register);
                }
                Err(e) => app.login_form.error = Some(e),
            }
            true
        }
        _ => {
            let form = &mut app.login_form;
            let handled = form.focused_input().handle_key(key);
            if handled {
                form.error = None;
            }
            handled
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_require_both_fields() {
        let mut form = LoginFormState::new();
        assert_eq!(
            form.take_credentials().unwrap_err(),
            "Name is required".to_string()
        );

        form.name_input.set_content("ana");
        assert_eq!(
            form.take_credentials().unwrap_err(),
            "Password is required".to_string()
        );

        form.password_input.set_content("pw");
        let (name, password) = form.take_credentials().unwrap();
        assert_eq!(name, "ana");
        assert_eq!(password.as_str(), "pw");
        assert!(form.password_input.value().is_empty());
    }

    #[test]
    fn test_toggle_mode_clears_error() {
        let mut form = LoginFormState::new();
        form.error = Some("Login failed".into());
        form.toggle_mode();
        assert!(form.register);
        assert!(form.error.is_none());
    }
}
