//! Key-value persistence for a tracker: one JSON document for the history
//! and one for the settings, per user.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use sqlx::PgPool;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{CycleRecord, Settings};
use crate::tracker::{validate_settings, Tracker, PERIOD_LENGTH_RANGE};

pub const HISTORY_KEY: &str = "period_data";
pub const SETTINGS_KEY: &str = "period_settings";

#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, user_id: Uuid, key: &str) -> Result<Option<String>, StoreError>;
    async fn put(&self, user_id: Uuid, key: &str, value: String) -> Result<(), StoreError>;
}

#[derive(Clone)]
pub struct PgKvStore {
    pool: PgPool,
}

impl PgKvStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl KvStore for PgKvStore {
    async fn get(&self, user_id: Uuid, key: &str) -> Result<Option<String>, StoreError> {
        let value = sqlx::query_scalar::<_, String>(
            "SELECT value FROM kv_store WHERE user_id = $1 AND key = $2",
        )
        .bind(user_id)
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;
        Ok(value)
    }

    async fn put(&self, user_id: Uuid, key: &str, value: String) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (user_id, key, value)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, key)
            DO UPDATE SET value = EXCLUDED.value, updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                tracing::error!("❌ DB upsert failed: {}", db_err.message());
                if let Some(code) = db_err.code() {
                    tracing::info!("ℹ️ SQLSTATE code: {}", code);
                }
            }
            StoreError::from(e)
        })?;
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct MemoryKvStore {
    entries: Arc<RwLock<HashMap<(Uuid, String), String>>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryKvStore {
    async fn get(&self, user_id: Uuid, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self
            .entries
            .read()
            .await
            .get(&(user_id, key.to_string()))
            .cloned())
    }

    async fn put(&self, user_id: Uuid, key: &str, value: String) -> Result<(), StoreError> {
        self.entries
            .write()
            .await
            .insert((user_id, key.to_string()), value);
        Ok(())
    }
}

/// Loads and saves [`Tracker`]s through a [`KvStore`].
#[derive(Clone)]
pub struct TrackerStore {
    kv: Arc<dyn KvStore>,
    user_locks: Arc<Mutex<HashMap<Uuid, Arc<Mutex<()>>>>>,
}

impl TrackerStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self {
            kv,
            user_locks: Arc::default(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryKvStore::new()))
    }

    /// Serializes load-modify-save sequences for one user. Hold the guard
    /// from before `load` until the last save.
    pub async fn lock_user(&self, user_id: Uuid) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.user_locks.lock().await;
            // drop locks nobody holds or waits on
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry(user_id).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Missing or corrupt documents load as defaults; backend failures are
    /// returned. Out-of-range values count as corrupt: invalid settings are
    /// replaced wholesale, bad record lengths fall back to the settings.
    pub async fn load(&self, user_id: Uuid) -> Result<Tracker, StoreError> {
        let mut history: Vec<CycleRecord> = self.load_or_default(user_id, HISTORY_KEY).await?;
        let mut settings: Settings = self.load_or_default(user_id, SETTINGS_KEY).await?;

        if let Err(e) = validate_settings(&settings) {
            tracing::warn!(%user_id, error = %e, "⚠️ Stored settings out of range, using defaults");
            settings = Settings::default();
        }
        for record in &mut history {
            if let Some(length) = record.length.filter(|l| !PERIOD_LENGTH_RANGE.contains(l)) {
                tracing::warn!(%user_id, start = %record.start, length, "⚠️ Stored period length out of range, ignoring");
                record.length = None;
            }
        }

        Ok(Tracker::new(history, settings))
    }

    pub async fn save_history(&self, user_id: Uuid, tracker: &Tracker) -> Result<(), StoreError> {
        self.save(user_id, HISTORY_KEY, tracker.history()).await
    }

    pub async fn save_settings(&self, user_id: Uuid, tracker: &Tracker) -> Result<(), StoreError> {
        self.save(user_id, SETTINGS_KEY, tracker.settings()).await
    }

    async fn load_or_default<T>(&self, user_id: Uuid, key: &'static str) -> Result<T, StoreError>
    where
        T: DeserializeOwned + Default,
    {
        let Some(raw) = self.kv.get(user_id, key).await? else {
            return Ok(T::default());
        };

        match serde_json::from_str(&raw) {
            Ok(value) => Ok(value),
            Err(e) => {
                tracing::warn!(%user_id, key, error = %e, "⚠️ Corrupt stored data, using defaults");
                Ok(T::default())
            }
        }
    }

    async fn save<T>(&self, user_id: Uuid, key: &'static str, value: &T) -> Result<(), StoreError>
    where
        T: Serialize + ?Sized,
    {
        let json = serde_json::to_string(value)
            .map_err(|source| StoreError::Serialize { key, source })?;
        self.kv.put(user_id, key, json).await
    }
}
