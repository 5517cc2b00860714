use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use uuid::Uuid;

use super::UserQuery;
use crate::error::ApiError;
use crate::models::Settings;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UpdateSettings {
    pub user_id: Uuid,
    pub settings: Settings,
}

pub fn routes(state: AppState) -> Router {
    Router::new()
        .route("/settings", get(get_settings).put(update_settings))
        .with_state(state)
}

async fn get_settings(
    State(state): State<AppState>,
    Query(params): Query<UserQuery>,
) -> Result<Json<Settings>, ApiError> {
    let tracker = state.store.load(params.user_id).await?;
    Ok(Json(*tracker.settings()))
}

async fn update_settings(
    State(state): State<AppState>,
    Json(body): Json<UpdateSettings>,
) -> Result<Json<Settings>, ApiError> {
    let _guard = state.store.lock_user(body.user_id).await;
    let mut tracker = state.store.load(body.user_id).await?;
    tracker.update_settings(body.settings)?;
    state.store.save_settings(body.user_id, &tracker).await?;

    tracing::info!(user_id = %body.user_id, settings = ?body.settings, "⚙️ Settings updated");
    Ok(Json(*tracker.settings()))
}
