//! Key-value persistence for store slices
//!
//! Slices are serialized to JSON and kept in one SQLite table keyed by a
//! slice name. There is no schema versioning of the stored values.

use sqlx::sqlite::SqlitePool;
use sqlx::Row;
use std::path::Path;

use crate::error::{Result, StoreError};
use crate::store::{MovieStore, PERSIST_KEY};

#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl std::fmt::Debug for Database {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Database").finish_non_exhaustive()
    }
}

impl Database {
    /// Open (creating if needed) the database at `db_path`
    pub async fn new(db_path: &str) -> Result<Self> {
        // Expand path and create parent directories
        let expanded_path = shellexpand::tilde(db_path).to_string();
        let path = Path::new(&expanded_path);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(StoreError::IoError)?;
        }

        // Forward slashes work for SQLite URLs on every platform; mode=rwc creates the file
        let db_url = format!("sqlite://{}?mode=rwc", expanded_path.replace('\\', "/"));

        let pool = SqlitePool::connect(&db_url)
            .await
            .map_err(StoreError::SqlxError)?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(StoreError::MigrationError)?;

        tracing::debug!(path = %expanded_path, "Opened store database");
        Ok(Self { pool })
    }

    /// Read the raw value stored under `key`
    pub async fn get(&self, key: &str) -> Result<Option<String>> {
        let row = sqlx::query("SELECT value FROM kv_store WHERE key = ?")
            .bind(key)
            .fetch_optional(&self.pool)
            .await
            .map_err(StoreError::SqlxError)?;

        Ok(row.map(|r| r.get::<String, _>("value")))
    }

    /// Insert or replace the value stored under `key`
    pub async fn put(&self, key: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value, updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(chrono::Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(StoreError::SqlxError)?;

        Ok(())
    }

    /// Load the persisted movies slice, if any
    pub async fn load_store(&self) -> Result<Option<MovieStore>> {
        let Some(raw) = self.get(PERSIST_KEY).await? else {
            return Ok(None);
        };

        let store: MovieStore = serde_json::from_str(&raw).map_err(|source| StoreError::Corrupt {
            key: PERSIST_KEY.to_string(),
            source,
        })?;

        Ok(Some(store.normalized()))
    }

    /// Load the persisted movies slice, falling back to an empty one
    ///
    /// A corrupt value is logged and replaced by the empty slice.
    pub async fn load_store_or_default(&self) -> Result<MovieStore> {
        match self.load_store().await {
            Ok(store) => Ok(store.unwrap_or_default()),
            Err(crate::CinescopeError::Store(StoreError::Corrupt { key, source })) => {
                tracing::warn!(%key, error = %source, "Discarding unreadable persisted store");
                Ok(MovieStore::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Persist the movies slice
    pub async fn save_store(&self, store: &MovieStore) -> Result<()> {
        let raw = serde_json::to_string(store).map_err(|source| StoreError::Corrupt {
            key: PERSIST_KEY.to_string(),
            source,
        })?;
        self.put(PERSIST_KEY, &raw).await
    }
}
