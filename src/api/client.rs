//! Provides a client for the expense REST API.
//!
//! This module defines the `ExpenseClient` struct and its methods for listing,
//! creating, updating and deleting expenses over HTTP.

use crate::error::{AppError, Result};
use crate::models::{Expense, ExpenseDraft, ExpenseList, ExpensePatch, NewExpense};
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, info};

/// An asynchronous client for the expense API.
pub struct ExpenseClient {
    client: Client,
    base_url: String,
}

/// Error body returned by the API: `{"error": "..."}`.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

impl ExpenseClient {
    /// Creates a new `ExpenseClient` for the API at `base_url`.
    pub fn new(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetches the full expense collection.
    ///
    /// Corresponds to `GET /expenses`.
    pub async fn list_expenses(&self) -> Result<Vec<Expense>> {
        let url = format!("{}/expenses", self.base_url);
        debug!("Fetching expenses from {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            error!("Error fetching expenses: {}", e);
            AppError::Api(e.into())
        })?;

        let list: ExpenseList = decode(expect_status(response, StatusCode::OK).await?).await?;
        debug!("Received {} expenses", list.expenses.len());
        Ok(list.expenses)
    }

    /// Creates an expense and returns it with its assigned id.
    ///
    /// Corresponds to `POST /expenses`.
    pub async fn create_expense(&self, draft: &ExpenseDraft) -> Result<Expense> {
        let url = format!("{}/expenses", self.base_url);
        info!("Creating expense '{}'", draft.description);

        let response = self
            .client
            .post(&url)
            .json(&NewExpense::from(draft))
            .send()
            .await
            .map_err(|e| {
                error!("Error creating expense: {}", e);
                AppError::Api(e.into())
            })?;

        decode(expect_status(response, StatusCode::CREATED).await?).await
    }

    /// Replaces the description, amount and date of expense `id`.
    ///
    /// Corresponds to `PUT /expenses/{id}`; all three fields are always sent.
    pub async fn update_expense(&self, id: u64, draft: &ExpenseDraft) -> Result<Expense> {
        let url = format!("{}/expenses/{}", self.base_url, id);
        info!("Updating expense {}", id);

        let response = self
            .client
            .put(&url)
            .json(&ExpensePatch::from(draft))
            .send()
            .await
            .map_err(|e| {
                error!("Error updating expense {}: {}", id, e);
                AppError::Api(e.into())
            })?;

        decode(expect_status(response, StatusCode::OK).await?).await
    }

    /// Deletes expense `id`. The API answers 204 whether or not it existed.
    ///
    /// Corresponds to `DELETE /expenses/{id}`.
    pub async fn delete_expense(&self, id: u64) -> Result<()> {
        let url = format!("{}/expenses/{}", self.base_url, id);
        info!("Deleting expense {}", id);

        let response = self.client.delete(&url).send().await.map_err(|e| {
            error!("Error deleting expense {}: {}", id, e);
            AppError::Api(e.into())
        })?;

        expect_status(response, StatusCode::NO_CONTENT).await?;
        Ok(())
    }
}

/// Passes `response` through if it has the `expected` status, otherwise turns
/// it into `AppError::Status` carrying the server's error message.
async fn expect_status(response: Response, expected: StatusCode) -> Result<Response> {
    let status = response.status();
    if status == expected {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();
    error!(
        "API request to {} returned {} (expected {}): {}",
        url, status, expected, body
    );

    Err(AppError::Status {
        status,
        message: error_message(&body),
    })
}

/// The `error` field of a JSON error body, or the raw body otherwise.
fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error,
        Err(_) => body.trim().to_string(),
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}
