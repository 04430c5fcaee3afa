use std::time::Duration;

use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use thiserror::Error;
use tracing::{debug, info};

use crate::repository::Storage;

mod app_settings_repo;
mod asset_repo;
mod current_quiz_repo;
mod flashcard_repo;
mod mapping;
mod migrate;
mod quiz_result_repo;
mod reset_repo;

/// Pool size for a single-user study database.
const MAX_CONNECTIONS: u32 = 5;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

/// Applied to every pooled connection before first use.
const CONNECTION_PRAGMAS: &[&str] = &[
    "PRAGMA foreign_keys = ON;",
    "PRAGMA journal_mode = WAL;",
    "PRAGMA busy_timeout = 5000;",
];

/// Quiz history, the current quiz, flashcards, assets and settings in one
/// `SQLite` file.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteRepository {
    /// Open the study database at `database_url` and bring its schema up to
    /// date. Reopening an existing database only applies missing migrations.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` when the pool cannot connect, a pragma is
    /// rejected, or a migration fails.
    pub async fn open(database_url: &str) -> Result<Self, SqliteInitError> {
        debug!(database_url, "opening study database");
        let pool = SqlitePoolOptions::new()
            .max_connections(MAX_CONNECTIONS)
            .acquire_timeout(ACQUIRE_TIMEOUT)
            .after_connect(|conn, _meta| {
                Box::pin(async move {
                    for pragma in CONNECTION_PRAGMAS {
                        sqlx::query(pragma).execute(&mut *conn).await?;
                    }
                    Ok(())
                })
            })
            .connect(database_url)
            .await?;

        migrate::run_migrations(&pool).await?;
        Ok(Self { pool })
    }
}

impl Storage {
    /// Every repository handle shares one `SQLite` pool.
    ///
    /// # Errors
    ///
    /// See [`SqliteRepository::open`].
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::open(database_url).await?;
        info!("sqlite storage ready");
        Ok(Self::from_repository(repo))
    }
}
