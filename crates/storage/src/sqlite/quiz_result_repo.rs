use async_trait::async_trait;
use study_core::model::{QuizResult, QuizResultId};

use super::SqliteRepository;
use super::mapping::{conn, id_from_i64, map_quiz_result_row};
use crate::repository::{QuizResultRepository, StorageError};

#[async_trait]
impl QuizResultRepository for SqliteRepository {
    async fn append_result(&self, result: &QuizResult) -> Result<QuizResultId, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO quiz_results (
                    session_label, score, total_questions, percentage, completed_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(result.session_label())
        .bind(i64::from(result.score()))
        .bind(i64::from(result.total_questions()))
        .bind(i64::from(result.percentage()))
        .bind(result.completed_at())
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(QuizResultId::new(id_from_i64(
            "id",
            res.last_insert_rowid(),
        )?))
    }

    async fn list_results(&self, limit: u32) -> Result<Vec<QuizResult>, StorageError> {
        let rows = sqlx::query(
            r"
                SELECT id, session_label, score, total_questions, percentage, completed_at
                FROM quiz_results
                ORDER BY completed_at DESC, id DESC
                LIMIT ?1
            ",
        )
        .bind(i64::from(limit))
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        rows.iter().map(map_quiz_result_row).collect()
    }
}
