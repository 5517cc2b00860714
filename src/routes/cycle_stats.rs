use axum::{
    extract::{Query, State},
    response::Json,
    routing::get,
    Router,
};

use super::UserQuery;
use crate::cycle_stats::cycle_stats;
use crate::error::ApiError;
use crate::models::CycleStats;
use crate::state::AppState;

pub async fn get_cycle_stats(
    State(state): State<AppState>,
    Query(query): Query<UserQuery>,
) -> Result<Json<CycleStats>, ApiError> {
    let tracker = state.store.load(query.user_id).await?;
    Ok(Json(cycle_stats(tracker.history(), tracker.settings())))
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/cycle-stats", get(get_cycle_stats))
        .with_state(state)
}
