use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    auth::extractors::SessionUser,
    error::ApiResult,
    expenses::{
        dto::{ExpenseResponse, NewExpenseRequest},
        repo::Expense,
        summary::{by_category, by_date, ChartSeries},
    },
    state::AppState,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/expenses", post(add_expense).get(list_expenses))
        .route("/expenses/summary", get(expense_summary))
}

/// Totals per category and per date, shaped for charting.
#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub by_category: ChartSeries,
    pub by_date: ChartSeries,
}

#[instrument(skip(state, payload))]
pub async fn add_expense(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
    Json(payload): Json<NewExpenseRequest>,
) -> ApiResult<(StatusCode, Json<ExpenseResponse>)> {
    let new = payload.validate()?;
    let expense = Expense::create(&state.db, user_id, &new).await?;
    info!(user_id = %user_id, expense_id = %expense.id, category = %expense.category, "expense added");
    Ok((StatusCode::CREATED, Json(expense.into())))
}

#[instrument(skip(state))]
pub async fn list_expenses(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> ApiResult<Json<Vec<ExpenseResponse>>> {
    let entries = Expense::list_by_user(&state.db, user_id).await?;
    Ok(Json(entries.into_iter().map(Into::into).collect()))
}

#[instrument(skip(state))]
pub async fn expense_summary(
    State(state): State<AppState>,
    SessionUser(user_id): SessionUser,
) -> ApiResult<Json<SummaryResponse>> {
    let entries = Expense::list_by_user(&state.db, user_id).await?;
    Ok(Json(SummaryResponse {
        by_category: by_category(&entries),
        by_date: by_date(&entries),
    }))
}
