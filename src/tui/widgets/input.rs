//! Text input widget
//!
//! A single-line text field with a character-based cursor. Dialogs keep one
//! per form field and render it as a [`Line`].

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

/// A simple text input
#[derive(Debug, Clone, Default)]
pub struct TextInput {
    /// Current text content
    pub content: String,
    /// Cursor position, in characters
    pub cursor: usize,
    /// Placeholder text
    pub placeholder: String,
    /// Label
    pub label: String,
    /// Render the content as asterisks
    pub masked: bool,
}

impl TextInput {
    /// Create a new text input
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the label
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the placeholder
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Hide the content (passwords)
    pub fn masked(mut self) -> Self {
        self.masked = true;
        self
    }

    /// Set content, placing the cursor at the end
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.set_content(content);
        self
    }

    /// Replace the content in place
    pub fn set_content(&mut self, content: impl Into<String>) {
        self.content = content.into();
        self.cursor = self.len();
    }

    fn len(&self) -> usize {
        self.content.chars().count()
    }

    fn byte_index(&self, char_index: usize) -> usize {
        self.content
            .char_indices()
            .nth(char_index)
            .map(|(i, _)| i)
            .unwrap_or(self.content.len())
    }

    /// Insert a character at the cursor
    pub fn insert(&mut self, c: char) {
        let at = self.byte_index(self.cursor);
        self.content.insert(at, c);
        self.cursor += 1;
    }

    /// Delete character before cursor
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.cursor -= 1;
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    /// Delete character at cursor
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            let at = self.byte_index(self.cursor);
            self.content.remove(at);
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_start(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// Clear the content
    pub fn clear(&mut self) {
        self.content.clear();
        self.cursor = 0;
    }

    /// Get the current content
    pub fn value(&self) -> &str {
        &self.content
    }

    /// Apply an editing key; returns false when the key is not for the field
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return false;
        }
        match key.code {
            KeyCode::Char(c) => self.insert(c),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Delete => self.delete(),
            KeyCode::Left => self.move_left(),
            KeyCode::Right => self.move_right(),
            KeyCode::Home => self.move_start(),
            KeyCode::End => self.move_end(),
            _ => return false,
        }
        true
    }

    /// Render as `label: value` with a block cursor when focused
    pub fn to_line(&self, focused: bool, label_width: usize) -> Line<'static> {
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        };
        let mut spans = vec![Span::styled(
            format!("{:>width$}: ", self.label, width = label_width),
            label_style,
        )];

        if self.content.is_empty() && !focused {
            spans.push(Span::styled(
                self.placeholder.clone(),
                Style::default().fg(Color::DarkGray),
            ));
            return Line::from(spans);
        }

        let shown: Vec<char> = if self.masked {
            vec!['*'; self.len()]
        } else {
            self.content.chars().collect()
        };
        let value_style = if focused {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::Yellow)
        };

        if !focused {
            spans.push(Span::styled(shown.iter().collect::<String>(), value_style));
            return Line::from(spans);
        }

        let cursor = self.cursor.min(shown.len());
        let before: String = shown[..cursor].iter().collect();
        let at = shown.get(cursor).copied().unwrap_or(' ');
        let after: String = shown.iter().skip(cursor + 1).collect();

        spans.push(Span::styled(before, value_style));
        spans.push(Span::styled(
            at.to_string(),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ));
        spans.push(Span::styled(after, value_style));
        Line::from(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_editing_multibyte_content() {
        let mut input = TextInput::new().content("¥12");
        assert_eq!(input.cursor, 3);

        input.move_start();
        input.move_right();
        input.insert('1');
        assert_eq!(input.value(), "¥112");

        input.move_start();
        input.delete();
        assert_eq!(input.value(), "112");

        input.move_end();
        input.backspace();
        assert_eq!(input.value(), "11");
    }

    #[test]
    fn test_handle_key_edits_and_ignores_control() {
        let mut input = TextInput::new();
        assert!(input.handle_key(KeyEvent::from(KeyCode::Char('a'))));
        assert!(input.handle_key(KeyEvent::from(KeyCode::Char('b'))));
        assert!(input.handle_key(KeyEvent::from(KeyCode::Backspace)));
        assert!(!input.handle_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)));
        assert!(!input.handle_key(KeyEvent::from(KeyCode::Enter)));
        assert_eq!(input.value(), "a");
    }

    #[test]
    fn test_masked_line_hides_content() {
        let input = TextInput::new().label("Password").masked().content("secret");
        let line = input.to_line(false, 8);
        let text: String = line.spans.iter().map(|s| s.content.as_ref()).collect();
        assert_eq!(text, "Password: ******");
    }

    #[test]
    fn test_placeholder_when_empty() {
        let input = TextInput::new().label("Note").placeholder("optional");
        let text: String = input
            .to_line(false, 4)
            .spans
            .iter()
            .map(|s| s.content.as_ref())
            .collect();
        assert_eq!(text, "Note: optional");
    }
}
