use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;
use tracing_subscriber::EnvFilter;

use cycle_tracker::config::Config;
use cycle_tracker::routes;
use cycle_tracker::storage::{PgKvStore, TrackerStore};
use cycle_tracker::{AppState, Clock};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("cycle_tracker=info")),
        )
        .init();

    let config = Config::from_env()?;

    let store = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(config.max_connections)
                .connect(database_url)
                .await?;
            sqlx::migrate!("./migrations").run(&pool).await?;
            tracing::info!("🗄️ Using Postgres store");
            TrackerStore::new(Arc::new(PgKvStore::new(pool)))
        }
        None => {
            tracing::warn!("⚠️ DATABASE_URL not set, data is kept in memory only");
            TrackerStore::in_memory()
        }
    };

    let app = routes::app(AppState::new(store, Clock::System));

    tracing::info!("🧠 Server running at {}", config.addr);

    axum::serve(
        tokio::net::TcpListener::bind(config.addr).await?,
        app.into_make_service(),
    )
    .await?;

    Ok(())
}
