//! Category model
//!
//! A category is a user-defined spending bucket with a display color and a
//! monthly budget ceiling.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{lenient, CategoryId};
use super::money::Money;

/// Color given to new categories when none is chosen
pub const DEFAULT_CATEGORY_COLOR: &str = "#1d213e";

/// Maximum category name length
const MAX_NAME_LEN: usize = 50;

/// A spending category as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Server-issued identifier
    #[serde(deserialize_with = "lenient::deserialize")]
    pub id: CategoryId,

    /// Display name
    pub name: String,

    /// `#rrggbb` display color
    #[serde(default = "default_color")]
    pub color: String,

    /// Monthly budget ceiling
    #[serde(default)]
    pub budget: Money,
}

fn default_color() -> String {
    DEFAULT_CATEGORY_COLOR.to_string()
}

impl Category {
    /// Build a category (mainly for tests and fixtures)
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>, budget: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: default_color(),
            budget,
        }
    }

    /// Whether a positive budget is set
    pub fn has_budget(&self) -> bool {
        self.budget.is_positive()
    }

    /// Parse the color into RGB components, if it is a valid hex color
    pub fn rgb(&self) -> Option<(u8, u8, u8)> {
        parse_hex_color(&self.color)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Payload for `POST /categories`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewCategory {
    pub name: String,
    pub color: String,
    pub budget: Money,
}

impl NewCategory {
    /// Create a new category payload with the default color and no budget
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: default_color(),
            budget: Money::zero(),
        }
    }

    /// Set the color
    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Set the budget
    pub fn with_budget(mut self, budget: Money) -> Self {
        self.budget = budget;
        self
    }

    /// Validate and normalize the payload
    pub fn validate(mut self) -> Result<Self, CategoryValidationError> {
        self.name = self.name.trim().to_string();
        if self.name.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if self.name.chars().count() > MAX_NAME_LEN {
            return Err(CategoryValidationError::NameTooLong(self.name.chars().count()));
        }

        self.color = self.color.trim().to_ascii_lowercase();
        if parse_hex_color(&self.color).is_none() {
            return Err(CategoryValidationError::InvalidColor(self.color));
        }

        validate_budget(self.budget)?;
        Ok(self)
    }
}

/// Budgets cannot be negative
pub fn validate_budget(budget: Money) -> Result<(), CategoryValidationError> {
    if budget.is_negative() {
        return Err(CategoryValidationError::NegativeBudget);
    }
    Ok(())
}

/// Parse a `#rrggbb` (or `#rgb`) color
pub fn parse_hex_color(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some((r, g, b))
        }
        3 => {
            let expand = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
            Some((expand(0)?, expand(1)?, expand(2)?))
        }
        _ => None,
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
    NegativeBudget,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max {})", len, MAX_NAME_LEN)
            }
            Self::InvalidColor(color) => write!(f, "Invalid color '{}' (expected #rrggbb)", color),
            Self::NegativeBudget => write!(f, "Budget cannot be negative"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_from_server() {
        let json = r##"{"id": 3, "name": "Food", "color": "#ff0000", "budget": 30000}"##;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.id, CategoryId::new("3"));
        assert_eq!(category.name, "Food");
        assert_eq!(category.budget, Money::from_major(30000));
        assert_eq!(category.rgb(), Some((255, 0, 0)));
    }

    #[test]
    fn test_missing_budget_and_color_default() {
        let category: Category = serde_json::from_str(r#"{"id": "a", "name": "Misc"}"#).unwrap();
        assert_eq!(category.color, DEFAULT_CATEGORY_COLOR);
        assert!(!category.has_budget());
    }

    #[test]
    fn test_new_category_validation() {
        let ok = NewCategory::new("  Rent ").with_color("#ABCDEF").validate().unwrap();
        assert_eq!(ok.name, "Rent");
        assert_eq!(ok.color, "#abcdef");

        assert_eq!(
            NewCategory::new("   ").validate(),
            Err(CategoryValidationError::EmptyName)
        );
        assert!(matches!(
            NewCategory::new("Rent").with_color("red").validate(),
            Err(CategoryValidationError::InvalidColor(_))
        ));
        assert_eq!(
            NewCategory::new("Rent")
                .with_budget(Money::from_major(-1))
                .validate(),
            Err(CategoryValidationError::NegativeBudget)
        );
    }

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#1d213e"), Some((0x1d, 0x21, 0x3e)));
        assert_eq!(parse_hex_color("#fff"), Some((255, 255, 255)));
        assert_eq!(parse_hex_color("1d213e"), None);
        assert_eq!(parse_hex_color("#12345g"), None);
    }
}
