use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};

use super::UserQuery;
use crate::error::ApiError;
use crate::guidance::guidance;
use crate::models::PhaseGuide;
use crate::state::AppState;

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/guidance", get(get_guidance))
        .with_state(state)
}

async fn get_guidance(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<PhaseGuide>, ApiError> {
    let tracker = state.store.load(params.user_id).await?;
    let phase = tracker.model().current_phase(state.clock.today());
    Ok(Json(guidance(phase)))
}
