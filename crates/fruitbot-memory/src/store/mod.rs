//! SQLite-backed preference store.
//!
//! Split into focused submodules:
//! - `preferences`: chat -> locale upserts and lookups
//! - `locales`: the supported-locale reference table

mod locales;
mod preferences;


use fruitbot_core::{config::StoreConfig, error::FruitbotError, shellexpand};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::info;

/// Persistent store backed by SQLite.
///
/// Every operation checks a connection out of the pool for the duration of
/// one statement (or one transaction) and returns it on every exit path.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Create a new store, running migrations on first use.
    pub async fn new(config: &StoreConfig) -> Result<Self, FruitbotError> {
        let db_path = shellexpand(&config.db_path);

        // Ensure parent directory exists.
        if let Some(parent) = std::path::Path::new(&db_path).parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FruitbotError::StoreUnavailable(format!("failed to create data dir: {e}"))
            })?;
        }

        let opts = SqliteConnectOptions::from_str(&format!("sqlite:{db_path}"))
            .map_err(|e| FruitbotError::StoreUnavailable(format!("invalid db path: {e}")))?
            .create_if_missing(true)
            .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(opts)
            .await
            .map_err(|e| {
                FruitbotError::StoreUnavailable(format!("failed to connect to sqlite: {e}"))
            })?;

        Self::run_migrations(&pool).await?;

        info!("Preference store initialized at {db_path}");

        Ok(Self { pool })
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Get the database file size in bytes.
    pub async fn db_size(&self) -> Result<u64, FruitbotError> {
        let (page_count,): (i64,) = sqlx::query_as("PRAGMA page_count")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| FruitbotError::StoreUnavailable(format!("pragma failed: {e}")))?;

        let (page_size,): (i64,) = sqlx::query_as("PRAGMA page_size")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| FruitbotError::StoreUnavailable(format!("pragma failed: {e}")))?;

        Ok((page_count * page_size) as u64)
    }

    /// Run SQL migrations, tracking which have already been applied.
    async fn run_migrations(pool: &SqlitePool) -> Result<(), FruitbotError> {
        sqlx::raw_sql(
            "CREATE TABLE IF NOT EXISTS _migrations (
                name TEXT PRIMARY KEY,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            );",
        )
        .execute(pool)
        .await
        .map_err(|e| {
            FruitbotError::StoreUnavailable(format!("failed to create migrations table: {e}"))
        })?;

        let migrations: &[(&str, &str)] = &[
            ("001_init", include_str!("../../migrations/001_init.sql")),
            (
                "002_seed_locales",
                include_str!("../../migrations/002_seed_locales.sql"),
            ),
        ];

        for (name, sql) in migrations {
            let applied: Option<(String,)> =
                sqlx::query_as("SELECT name FROM _migrations WHERE name = ?")
                    .bind(name)
                    .fetch_optional(pool)
                    .await
                    .map_err(|e| {
                        FruitbotError::StoreUnavailable(format!(
                            "failed to check migration {name}: {e}"
                        ))
                    })?;

            if applied.is_some() {
                continue;
            }

            let mut tx = pool.begin().await.map_err(|e| {
                FruitbotError::StoreUnavailable(format!("failed to begin migration {name}: {e}"))
            })?;

            sqlx::raw_sql(sql).execute(&mut *tx).await.map_err(|e| {
                FruitbotError::StoreUnavailable(format!("migration {name} failed: {e}"))
            })?;

            sqlx::query("INSERT INTO _migrations (name) VALUES (?)")
                .bind(name)
                .execute(&mut *tx)
                .await
                .map_err(|e| {
                    FruitbotError::StoreUnavailable(format!(
                        "failed to record migration {name}: {e}"
                    ))
                })?;

            tx.commit().await.map_err(|e| {
                FruitbotError::StoreUnavailable(format!("failed to commit migration {name}: {e}"))
            })?;

            info!("applied migration {name}");
        }
        Ok(())
    }
}
