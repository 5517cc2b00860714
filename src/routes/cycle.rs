use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::UserQuery;
use crate::error::ApiError;
use crate::models::{CycleRecord, CycleSummary};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct NewCycle {
    pub user_id: Uuid,
    /// Defaults to today.
    pub start_date: Option<NaiveDate>,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/cycle", get(get_cycle_summary).post(create_cycle))
        .with_state(state)
}

async fn create_cycle(
    State(state): State<AppState>,
    Json(body): Json<NewCycle>,
) -> Result<(StatusCode, Json<CycleRecord>), ApiError> {
    let _guard = state.store.lock_user(body.user_id).await;
    let mut tracker = state.store.load(body.user_id).await?;
    let start = body.start_date.unwrap_or_else(|| state.clock.today());

    let record = tracker.log_period(start).clone();
    state.store.save_history(body.user_id, &tracker).await?;

    tracing::info!(user_id = %body.user_id, %start, "🩸 Period logged");
    Ok((StatusCode::CREATED, Json(record)))
}

async fn get_cycle_summary(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<CycleSummary>, ApiError> {
    let tracker = state.store.load(params.user_id).await?;
    Ok(Json(tracker.model().summary(state.clock.today())))
}
