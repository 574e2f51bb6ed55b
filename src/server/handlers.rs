// HTTP request handlers

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tracing::{debug, info};

use super::error::ApiError;
use crate::db::ExpenseStore;
use crate::models::{Expense, ExpenseList, ExpensePatch, NewExpense};

/// Create the expense API router
pub fn create_router(store: Arc<ExpenseStore>) -> Router {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/:id", put(update_expense).delete(delete_expense))
        .with_state(store)
}

/// Handle GET /expenses
async fn list_expenses(State(store): State<Arc<ExpenseStore>>) -> Json<ExpenseList> {
    let expenses = store.list().await;
    debug!("Listing {} expenses", expenses.len());
    Json(ExpenseList { expenses })
}

/// Handle POST /expenses
async fn create_expense(
    State(store): State<Arc<ExpenseStore>>,
    payload: Result<Json<NewExpense>, JsonRejection>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let Json(new_expense) = payload.map_err(bad_body)?;
    let draft = new_expense.validate()?;

    let expense = store.create(draft).await?;
    info!(id = expense.id, "Expense created");

    Ok((StatusCode::CREATED, Json(expense)))
}

/// Handle PUT /expenses/:id - partial update
async fn update_expense(
    State(store): State<Arc<ExpenseStore>>,
    Path(raw_id): Path<String>,
    payload: Result<Json<ExpensePatch>, JsonRejection>,
) -> Result<Json<Expense>, ApiError> {
    let id = parse_id(&raw_id)?;
    let Json(patch) = payload.map_err(bad_body)?;
    let changes = patch.validate()?;

    let expense = store.update(id, changes).await?.ok_or(ApiError::NotFound)?;
    info!(id, "Expense updated");

    Ok(Json(expense))
}

/// Handle DELETE /expenses/:id - 204 whether or not the id existed
async fn delete_expense(
    State(store): State<Arc<ExpenseStore>>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let id = parse_id(&raw_id)?;

    let removed = store.delete(id).await?;
    info!(id, removed, "Expense delete processed");

    Ok(StatusCode::NO_CONTENT)
}

fn parse_id(raw: &str) -> Result<u64, ApiError> {
    raw.parse::<u64>()
        .map_err(|_| ApiError::BadRequest(format!("Invalid expense id: {}", raw)))
}

fn bad_body(rejection: JsonRejection) -> ApiError {
    ApiError::BadRequest(rejection.body_text())
}
