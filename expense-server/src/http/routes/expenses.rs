//! Expense endpoints

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::db::ExpenseRepo;
use crate::http::error::ApiError;
use crate::http::extractors::JsonBody;
use crate::http::server::AppState;
use crate::models::{Expense, ExpenseInput};

/// Plain acknowledgement body
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// POST /expenses - create an expense, id assigned by the database
async fn create_expense(
    State(state): State<Arc<AppState>>,
    JsonBody(input): JsonBody<ExpenseInput>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let expense = ExpenseRepo::new(&state.pool).create(&input).await?;
    tracing::info!(id = expense.id, "expense created");

    Ok((StatusCode::CREATED, Json(expense)))
}

/// GET /expenses - every expense, `[]` when there are none
async fn list_expenses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let expenses = ExpenseRepo::new(&state.pool).list().await?;
    Ok(Json(expenses))
}

/// GET /expenses/{id}
async fn get_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Expense>, ApiError> {
    let expense = ExpenseRepo::new(&state.pool).get(&id).await?;
    Ok(Json(expense))
}

/// PUT /expenses/{id} - full replacement of every field but `id`.
///
/// Succeeds even when no row has that id.
async fn update_expense(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<ExpenseInput>,
) -> Result<Json<MessageResponse>, ApiError> {
    let rows = ExpenseRepo::new(&state.pool).update(&id, &input).await?;
    if rows == 0 {
        tracing::warn!(%id, "update matched no expense");
    }

    Ok(Json(MessageResponse {
        message: "expense updated".to_owned(),
    }))
}

/// Expense routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/expenses", get(list_expenses).post(create_expense))
        .route("/expenses/{id}", get(get_expense).put(update_expense))
}
