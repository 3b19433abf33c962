//! HTTP implementation of [`ExpenseApi`]
//!
//! Every call is a single request/response. Failures are turned into one
//! `CostbookError` per call carrying the message shown to the user; nothing
//! is retried.

use std::time::Duration;

use log::{debug, warn};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;

use super::{BudgetUpdate, Credentials, ExpenseApi, TokenResponse, TokenValidation, AUTH_HEADER};
use crate::error::{CostbookError, CostbookResult};
use crate::models::{
    Category, CategoryId, Money, MonthRange, NewCategory, NewTransaction, Transaction,
    TransactionId,
};

/// Message used when no token is stored
const NO_TOKEN: &str = "No auth token: you need to sign in";

/// Blocking HTTP client for the expense server
pub struct HttpClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a client for the given base URL
    pub fn new(base_url: &str, timeout: Duration) -> CostbookResult<Self> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CostbookError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        })
    }

    /// Attach a token (builder style)
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.set_token(token);
        self
    }

    /// The server base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        endpoint(&self.base_url, path)
    }

    /// Attach the auth header, failing early when there is no token
    fn authed(&self, request: RequestBuilder) -> CostbookResult<RequestBuilder> {
        let token = self
            .token()
            .ok_or_else(|| CostbookError::Unauthorized(NO_TOKEN.into()))?;
        Ok(request.header(AUTH_HEADER, token))
    }

    fn send(
        &self,
        request: RequestBuilder,
        action: &'static str,
        authenticated: bool,
    ) -> CostbookResult<Response> {
        let response = request.send().map_err(|e| {
            warn!("{}: {}", action, e);
            CostbookError::Network(format!("{}: {}", action, e))
        })?;

        let status = response.status();
        debug!("{} {} -> {}", action, response.url(), status);
        classify_status(status, action, authenticated)?;
        Ok(response)
    }

    fn json<T: DeserializeOwned>(response: Response, action: &'static str) -> CostbookResult<T> {
        response.json::<T>().map_err(|e| {
            warn!("{}: malformed response: {}", action, e);
            CostbookError::Json(format!("{}: {}", action, e))
        })
    }
}

/// Join the base URL and an endpoint path
pub fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Map a response status to the per-action error
///
/// On authenticated calls 401/403 means the token is missing or expired,
/// which is reported separately so the caller can prompt for a new login.
pub fn classify_status(
    status: StatusCode,
    action: &'static str,
    authenticated: bool,
) -> CostbookResult<()> {
    if status.is_success() {
        return Ok(());
    }
    if authenticated && matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
        return Err(CostbookError::Unauthorized("auth token expired".into()));
    }
    Err(CostbookError::Request {
        action,
        status: status.as_u16(),
    })
}

impl ExpenseApi for HttpClient {
    fn set_token(&mut self, token: Option<String>) {
        self.token = token.filter(|t| !t.trim().is_empty());
    }

    fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    fn login(&self, name: &str, password: &str) -> CostbookResult<String> {
        const ACTION: &str = "Login failed";
        let request = self
            .http
            .post(self.url("/auth/login"))
            .json(&Credentials { name, password });
        let response = self.send(request, ACTION, false)?;
        let body: TokenResponse = Self::json(response, ACTION)?;
        Ok(body.token)
    }

    fn register(&self, name: &str, password: &str) -> CostbookResult<Option<String>> {
        const ACTION: &str = "Registration failed";
        let request = self
            .http
            .post(self.url("/auth/register"))
            .json(&Credentials { name, password });
        let response = self.send(request, ACTION, false)?;
        let text = response
            .text()
            .map_err(|e| CostbookError::Network(format!("{}: {}", ACTION, e)))?;
        Ok(serde_json::from_str::<TokenResponse>(&text)
            .ok()
            .map(|body| body.token))
    }

    fn validate(&self) -> CostbookResult<TokenValidation> {
        const ACTION: &str = "Failed to validate session";
        let request = self.authed(self.http.get(self.url("/auth/validate")))?;
        let response = self.send(request, ACTION, true)?;
        Self::json(response, ACTION)
    }

    fn list_categories(&self) -> CostbookResult<Vec<Category>> {
        const ACTION: &str = "Failed to fetch categories";
        let request = self.authed(self.http.get(self.url("/categories")))?;
        let response = self.send(request, ACTION, true)?;
        Self::json(response, ACTION)
    }

    fn create_category(&self, category: &NewCategory) -> CostbookResult<Category> {
        const ACTION: &str = "Failed to add category";
        let request = self.authed(self.http.post(self.url("/categories")).json(category))?;
        let response = self.send(request, ACTION, true)?;
        Self::json(response, ACTION)
    }

    fn set_category_budget(&self, id: &CategoryId, budget: Money) -> CostbookResult<Category> {
        const ACTION: &str = "Failed to save budget";
        let path = format!("/categories/{}/budget", id.as_str());
        let request = self.authed(self.http.put(self.url(&path)).json(&BudgetUpdate { budget }))?;
        let response = self.send(request, ACTION, true)?;
        Self::json(response, ACTION)
    }

    fn list_transactions(&self, range: &MonthRange) -> CostbookResult<Vec<Transaction>> {
        const ACTION: &str = "Failed to fetch transactions";
        let request = self.authed(
            self.http
                .get(self.url("/transactions"))
                .query(&range.query_params()),
        )?;
        let response = self.send(request, ACTION, true)?;
        Self::json(response, ACTION)
    }

    fn create_transaction(&self, transaction: &NewTransaction) -> CostbookResult<Transaction> {
        const ACTION: &str = "Failed to create transaction";
        let request = self.authed(self.http.post(self.url("/transactions")).json(transaction))?;
        let response = self.send(request, ACTION, true)?;
        Self::json(response, ACTION)
    }

    fn delete_transaction(&self, id: &TransactionId) -> CostbookResult<()> {
        const ACTION: &str = "Failed to delete transaction";
        let path = format!("/transactions/{}", id.as_str());
        let request = self.authed(self.http.delete(self.url(&path)))?;
        self.send(request, ACTION, true)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_slashes() {
        assert_eq!(
            endpoint("http://localhost:8080/", "/categories"),
            "http://localhost:8080/categories"
        );
        assert_eq!(
            endpoint("http://localhost:8080", "transactions/7"),
            "http://localhost:8080/transactions/7"
        );
    }

    #[test]
    fn test_classify_status() {
        assert!(classify_status(StatusCode::OK, "x", true).is_ok());
        assert!(classify_status(StatusCode::NO_CONTENT, "x", true).is_ok());

        let err = classify_status(StatusCode::UNAUTHORIZED, "Failed to fetch categories", true)
            .unwrap_err();
        assert!(err.is_unauthorized());

        let err = classify_status(StatusCode::FORBIDDEN, "Failed to fetch categories", true)
            .unwrap_err();
        assert!(err.is_unauthorized());

        let err = classify_status(StatusCode::UNAUTHORIZED, "Login failed", false).unwrap_err();
        assert!(matches!(
            err,
            CostbookError::Request {
                action: "Login failed",
                status: 401
            }
        ));

        let err = classify_status(
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to delete transaction",
            true,
        )
        .unwrap_err();
        assert_eq!(err.user_message(), "Failed to delete transaction");
    }

    #[test]
    fn test_missing_token_fails_before_sending() {
        let client = HttpClient::new("http://127.0.0.1:9", Duration::from_millis(50)).unwrap();
        let err = client.list_categories().unwrap_err();
        assert!(err.is_unauthorized());

        let err = client
            .delete_transaction(&TransactionId::new("t1"))
            .unwrap_err();
        assert!(err.is_unauthorized());
    }

    #[test]
    fn test_blank_token_is_ignored() {
        let client = HttpClient::new("http://localhost:8080/", Duration::from_secs(1))
            .unwrap()
            .with_token(Some("  ".into()));
        assert_eq!(client.token(), None);
        assert_eq!(client.base_url(), "http://localhost:8080");
    }
}
