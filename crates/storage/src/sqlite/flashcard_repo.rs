use async_trait::async_trait;
use study_core::model::Flashcard;

use super::SqliteRepository;
use super::mapping::{conn, map_flashcard_row};
use crate::repository::{FlashcardRepository, StorageError};

#[async_trait]
impl FlashcardRepository for SqliteRepository {
    async fn replace_flashcards(&self, cards: &[Flashcard]) -> Result<(), StorageError> {
        let mut tx = self.pool.begin().await.map_err(conn)?;

        sqlx::query("DELETE FROM flashcards")
            .execute(&mut *tx)
            .await
            .map_err(conn)?;

        for (position, card) in cards.iter().enumerate() {
            let position = i64::try_from(position)
                .map_err(|_| StorageError::Serialization("position overflow".into()))?;
            sqlx::query("INSERT INTO flashcards (position, term, definition) VALUES (?1, ?2, ?3)")
                .bind(position)
                .bind(card.term())
                .bind(card.definition())
                .execute(&mut *tx)
                .await
                .map_err(conn)?;
        }

        tx.commit().await.map_err(conn)?;
        Ok(())
    }

    async fn list_flashcards(&self) -> Result<Vec<Flashcard>, StorageError> {
        let rows = sqlx::query("SELECT term, definition FROM flashcards ORDER BY position ASC")
            .fetch_all(&self.pool)
            .await
            .map_err(conn)?;
        rows.iter().map(map_flashcard_row).collect()
    }
}
