//! Expense API access
//!
//! [`ExpenseApi`] is the seam between the UI layers and the server. The
//! production implementation is [`HttpClient`]; tests substitute in-memory
//! fakes.

pub mod client;

use serde::{Deserialize, Serialize};

use crate::error::CostbookResult;
use crate::models::{
    Category, CategoryId, Money, MonthRange, NewCategory, NewTransaction, Transaction,
    TransactionId,
};

pub use client::HttpClient;

/// Header carrying the auth token on authenticated calls
pub const AUTH_HEADER: &str = "X-Auth-Token";

/// Result of `GET /auth/validate`
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenValidation {
    pub valid: bool,
    #[serde(default, deserialize_with = "crate::models::ids::lenient::deserialize")]
    pub user_id: Option<String>,
}

/// Body of the login and register calls
#[derive(Serialize)]
pub(crate) struct Credentials<'a> {
    pub name: &'a str,
    pub password: &'a str,
}

/// Response carrying a token
#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub token: String,
}

/// Body of `PUT /categories/{id}/budget`
#[derive(Serialize)]
pub(crate) struct BudgetUpdate {
    pub budget: Money,
}

/// Operations the client performs against the expense server
pub trait ExpenseApi: Send {
    /// Replace the token used for authenticated calls
    fn set_token(&mut self, token: Option<String>);

    /// The token currently in use
    fn token(&self) -> Option<&str>;

    /// `POST /auth/login`, returning the issued token
    fn login(&self, name: &str, password: &str) -> CostbookResult<String>;

    /// `POST /auth/register`, returning a token when the server issues one
    fn register(&self, name: &str, password: &str) -> CostbookResult<Option<String>>;

    /// `GET /auth/validate`
    fn validate(&self) -> CostbookResult<TokenValidation>;

    /// `GET /categories`
    fn list_categories(&self) -> CostbookResult<Vec<Category>>;

    /// `POST /categories`
    fn create_category(&self, category: &NewCategory) -> CostbookResult<Category>;

    /// `PUT /categories/{id}/budget`
    fn set_category_budget(&self, id: &CategoryId, budget: Money) -> CostbookResult<Category>;

    /// `GET /transactions?from=..&to=..`
    fn list_transactions(&self, range: &MonthRange) -> CostbookResult<Vec<Transaction>>;

    /// `POST /transactions`
    fn create_transaction(&self, transaction: &NewTransaction) -> CostbookResult<Transaction>;

    /// `DELETE /transactions/{id}`
    fn delete_transaction(&self, id: &TransactionId) -> CostbookResult<()>;
}
