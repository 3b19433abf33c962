//! Category CLI commands
//!
//! Implements CLI commands for listing categories, adding them and setting
//! their monthly budget.

use clap::Subcommand;

use crate::api::ExpenseApi;
use crate::config::Settings;
use crate::display::category::format_category_list;
use crate::error::{CostbookError, CostbookResult};
use crate::models::category::validate_budget;
use crate::models::{Category, Money, NewCategory};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List all categories with their budgets
    List,

    /// Add a new category
    Add {
        /// Category name
        name: String,
        /// Display color (#rrggbb)
        #[arg(short, long)]
        color: Option<String>,
        /// Monthly budget (e.g., "30000" or "120.50")
        #[arg(short, long)]
        budget: Option<String>,
    },

    /// Set a category's monthly budget
    Budget {
        /// Category name or ID
        category: String,
        /// New budget amount
        amount: String,
    },
}

/// Handle a category command
pub fn handle_category_command(
    api: &dyn ExpenseApi,
    settings: &Settings,
    cmd: CategoryCommands,
) -> CostbookResult<()> {
    let currency = settings.currency_code.as_str();

    match cmd {
        CategoryCommands::List => {
            let categories = api.list_categories()?;
            print!("{}", format_category_list(&categories, currency));
        }

        CategoryCommands::Add {
            name,
            color,
            budget,
        } => {
            let mut payload = NewCategory::new(name);
            if let Some(color) = color {
                payload = payload.with_color(color);
            }
            if let Some(budget) = budget {
                payload = payload.with_budget(parse_amount(&budget)?);
            }
            let payload = payload
                .validate()
                .map_err(|e| CostbookError::Validation(e.to_string()))?;

            let created = api.create_category(&payload)?;
            println!("Created category: {} ({})", created.name, created.id);
            if created.has_budget() {
                println!("  Budget: {}", created.budget.format_currency(currency));
            }
        }

        CategoryCommands::Budget { category, amount } => {
            let budget = parse_amount(&amount)?;
            validate_budget(budget).map_err(|e| CostbookError::Validation(e.to_string()))?;

            let categories = api.list_categories()?;
            let target = find_category(&categories, &category)?;
            let updated = api.set_category_budget(&target.id, budget)?;
            println!(
                "Budget for '{}' set to {}",
                updated.name,
                updated.budget.format_currency(currency)
            );
        }
    }

    Ok(())
}

/// Parse a user-entered amount
pub fn parse_amount(input: &str) -> CostbookResult<Money> {
    Money::parse(input).map_err(|e| CostbookError::Validation(e.to_string()))
}

/// Find a category by ID, then by case-insensitive name
pub fn find_category<'c>(categories: &'c [Category], query: &str) -> CostbookResult<&'c Category> {
    let query = query.trim();
    categories
        .iter()
        .find(|c| c.id.as_str() == query)
        .or_else(|| {
            categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(query))
        })
        .ok_or_else(|| CostbookError::category_not_found(query))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sync::worker::fake::FakeApi;

    fn api_with_categories() -> FakeApi {
        let api = FakeApi::with_token("good");
        api.state.lock().unwrap().categories = vec![
            Category::new("1", "Food", Money::from_major(300)),
            Category::new("2", "Rent", Money::zero()),
        ];
        api
    }

    #[test]
    fn test_find_category_by_id_or_name() {
        let categories = vec![
            Category::new("1", "Food", Money::zero()),
            Category::new("2", "rent", Money::zero()),
        ];
        assert_eq!(find_category(&categories, "1").unwrap().name, "Food");
        assert_eq!(find_category(&categories, "RENT").unwrap().name, "rent");
        assert!(find_category(&categories, "Travel").unwrap_err().is_not_found());
    }

    #[test]
    fn test_add_category() {
        let api = api_with_categories();
        handle_category_command(
            &api,
            &Settings::default(),
            CategoryCommands::Add {
                name: "Travel".into(),
                color: Some("#FF8800".into()),
                budget: Some("5000".into()),
            },
        )
        .unwrap();

        let state = api.state.lock().unwrap();
        let created = state.categories.last().unwrap();
        assert_eq!(created.name, "Travel");
        assert_eq!(created.color, "#ff8800");
        assert_eq!(created.budget, Money::from_major(5000));
    }

    #[test]
    fn test_set_budget_by_name() {
        let api = api_with_categories();
        handle_category_command(
            &api,
            &Settings::default(),
            CategoryCommands::Budget {
                category: "rent".into(),
                amount: "80000".into(),
            },
        )
        .unwrap();
        assert_eq!(
            api.state.lock().unwrap().categories[1].budget,
            Money::from_major(80000)
        );
    }

    #[test]
    fn test_negative_budget_rejected_before_request() {
        let api = api_with_categories();
        let err = handle_category_command(
            &api,
            &Settings::default(),
            CategoryCommands::Budget {
                category: "Food".into(),
                amount: "-1".into(),
            },
        )
        .unwrap_err();
        assert!(matches!(err, CostbookError::Validation(_)));
        assert!(api.state.lock().unwrap().requests.is_empty());
    }
}
