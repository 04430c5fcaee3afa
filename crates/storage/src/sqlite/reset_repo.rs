use async_trait::async_trait;
use tracing::warn;

use super::SqliteRepository;
use super::mapping::conn;
use crate::repository::{DataResetRepository, StorageError};

const TABLES: &[&str] = &[
    "quiz_results",
    "current_quiz_questions",
    "current_quiz",
    "flashcards",
    "study_assets",
    "app_settings",
];

#[async_trait]
impl DataResetRepository for SqliteRepository {
    async fn clear_all(&self) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;
        for table in TABLES {
            sqlx::query(&format!("DELETE FROM {table}"))
                .execute(&mut *tx)
                .await
                .map_err(conn)?;
        }
        tx.commit().await.map_err(conn)?;
        warn!("all persisted study data cleared");
        Ok(())
    }
}
