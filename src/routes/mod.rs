use axum::{routing::get, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::state::AppState;

pub mod calendar;
pub mod cycle;
pub mod cycle_stats;
pub mod guidance;
pub mod history;
pub mod settings;

#[derive(Debug, Deserialize)]
pub struct UserQuery {
    pub user_id: Uuid,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .merge(cycle::routes(state.clone()))
        .merge(cycle_stats::routes(state.clone()))
        .merge(history::routes(state.clone()))
        .merge(calendar::routes(state.clone()))
        .merge(settings::routes(state.clone()))
        .merge(guidance::routes(state))
        .route("/health", get(|| async { "✅ Backend up" }))
}
