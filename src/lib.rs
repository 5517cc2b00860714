pub mod calendar;
pub mod config;
pub mod cycle_model;
pub mod cycle_stats;
pub mod error;
pub mod guidance;
pub mod models;
pub mod routes;
pub mod state;
pub mod storage;
pub mod tracker;

pub use cycle_model::CycleModel;
pub use models::{CycleRecord, Phase, Settings};
pub use state::{AppState, Clock};
pub use tracker::Tracker;
