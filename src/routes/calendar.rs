use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use chrono::Datelike;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::ApiError;
use crate::models::CalendarDay;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CalendarQuery {
    pub user_id: Uuid,
    pub year: Option<i32>,
    pub month: Option<u32>,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/calendar", get(get_calendar))
        .with_state(state)
}

async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<Vec<CalendarDay>>, ApiError> {
    let today = state.clock.today();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let tracker = state.store.load(query.user_id).await?;
    tracker
        .model()
        .calendar_month(year, month)
        .map(Json)
        .ok_or_else(|| ApiError::BadRequest(format!("Invalid month {year}-{month}")))
}
