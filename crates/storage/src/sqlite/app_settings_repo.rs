use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{AppSettingsRepository, StorageError};
use study_core::model::{AppSettings, AppSettingsDraft};

use super::SqliteRepository;
use super::mapping::{conn, ser};

#[async_trait]
impl AppSettingsRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT
                api_key,
                api_model,
                image_model,
                api_base_url,
                temperature,
                default_question_count
            FROM app_settings
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        let Some(row) = row else {
            return Ok(None);
        };

        let temperature: Option<f64> = row.try_get("temperature").map_err(ser)?;
        let default_question_count: Option<i64> =
            row.try_get("default_question_count").map_err(ser)?;

        #[allow(clippy::cast_possible_truncation)]
        let draft = AppSettingsDraft {
            api_key: row.try_get("api_key").map_err(ser)?,
            api_model: row.try_get("api_model").map_err(ser)?,
            image_model: row.try_get("image_model").map_err(ser)?,
            api_base_url: row.try_get("api_base_url").map_err(ser)?,
            temperature: temperature.map(|t| t as f32),
            default_question_count: default_question_count.and_then(|v| u32::try_from(v).ok()),
        };

        AppSettings::from_persisted(draft).map(Some).map_err(ser)
    }

    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO app_settings (
                id,
                api_key,
                api_model,
                image_model,
                api_base_url,
                temperature,
                default_question_count
            )
            VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6)
            ON CONFLICT(id) DO UPDATE SET
                api_key = excluded.api_key,
                api_model = excluded.api_model,
                image_model = excluded.image_model,
                api_base_url = excluded.api_base_url,
                temperature = excluded.temperature,
                default_question_count = excluded.default_question_count
            ",
        )
        .bind(settings.api_key())
        .bind(settings.api_model())
        .bind(settings.image_model())
        .bind(settings.api_base_url())
        .bind(settings.temperature().map(f64::from))
        .bind(
            settings
                .stored_question_count()
                .map(|count| i64::from(count.get())),
        )
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(())
    }
}
