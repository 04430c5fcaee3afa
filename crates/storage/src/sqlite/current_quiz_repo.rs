use async_trait::async_trait;
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{conn, map_question_row, options_to_json, ser};
use crate::repository::{CurrentQuiz, CurrentQuizRepository, StorageError};

#[async_trait]
impl CurrentQuizRepository for SqliteRepository {
    async fn save_current_quiz(&self, quiz: &CurrentQuiz) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        // Cascades to current_quiz_questions.
        sqlx::query("DELETE FROM current_quiz")
            .execute(&mut *tx)
            .await
            .map_err(conn)?;

        sqlx::query("INSERT INTO current_quiz (id, label, saved_at) VALUES (1, ?1, ?2)")
            .bind(quiz.label.as_str())
            .bind(quiz.saved_at)
            .execute(&mut *tx)
            .await
            .map_err(conn)?;

        for (position, mcq) in quiz.questions.iter().enumerate() {
            let position = i64::try_from(position)
                .map_err(|_| StorageError::Serialization("position overflow".into()))?;
            sqlx::query(
                r"
                    INSERT INTO current_quiz_questions (position, quiz_id, question, options, answer)
                    VALUES (?1, 1, ?2, ?3, ?4)
                ",
            )
            .bind(position)
            .bind(mcq.question())
            .bind(options_to_json(mcq)?)
            .bind(mcq.answer())
            .execute(&mut *tx)
            .await
            .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn load_current_quiz(&self) -> Result<Option<CurrentQuiz>, StorageError> {
        let Some(header) = sqlx::query("SELECT label, saved_at FROM current_quiz WHERE id = 1")
            .fetch_optional(&self.pool)
            .await
            .map_err(conn)?
        else {
            return Ok(None);
        };

        let rows = sqlx::query(
            r"
                SELECT question, options, answer
                FROM current_quiz_questions
                WHERE quiz_id = 1
                ORDER BY position ASC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(conn)?;

        let questions = rows
            .iter()
            .map(map_question_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(CurrentQuiz {
            label: header.try_get("label").map_err(ser)?,
            questions,
            saved_at: header.try_get("saved_at").map_err(ser)?,
        }))
    }

    async fn clear_current_quiz(&self) -> Result<(), StorageError> {
        sqlx::query("DELETE FROM current_quiz")
            .execute(&self.pool)
            .await
            .map_err(conn)?;
        Ok(())
    }
}
