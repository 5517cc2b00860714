use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::UserQuery;
use crate::error::ApiError;
use crate::models::PeriodSpan;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RemovePeriodDayRequest {
    pub user_id: String,
    pub date: String,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/history", get(get_history))
        .route("/history/:index", delete(delete_record))
        .route("/period-day", delete(remove_period_day))
        .with_state(state)
}

async fn get_history(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Vec<PeriodSpan>>, ApiError> {
    let tracker = state.store.load(params.user_id).await?;
    Ok(Json(tracker.period_spans()))
}

async fn delete_record(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Query(params): Query<UserQuery>,
) -> Result<StatusCode, ApiError> {
    let _guard = state.store.lock_user(params.user_id).await;
    let mut tracker = state.store.load(params.user_id).await?;

    let Some(removed) = tracker.delete_record(index) else {
        return Err(ApiError::NotFound(format!("No record at index {index}")));
    };
    state.store.save_history(params.user_id, &tracker).await?;

    tracing::info!(user_id = %params.user_id, start = %removed.start, "🗑️ Record deleted");
    Ok(StatusCode::NO_CONTENT)
}

async fn remove_period_day(
    State(state): State<AppState>,
    Json(payload): Json<RemovePeriodDayRequest>,
) -> Result<StatusCode, ApiError> {
    let user_id = Uuid::parse_str(&payload.user_id)
        .map_err(|_| ApiError::BadRequest("Invalid user_id UUID".into()))?;
    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d").map_err(|_| {
        ApiError::BadRequest("Invalid date format (expected YYYY-MM-DD)".into())
    })?;

    let _guard = state.store.lock_user(user_id).await;
    let mut tracker = state.store.load(user_id).await?;
    let removed = tracker.remove_day_from_period(date);
    if removed == 0 {
        return Err(ApiError::NotFound("No period covers that day".into()));
    }
    state.store.save_history(user_id, &tracker).await?;

    tracing::info!(%user_id, %date, removed, "🗑️ Period removed by day");
    Ok(StatusCode::NO_CONTENT)
}
