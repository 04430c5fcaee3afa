use async_trait::async_trait;
use study_core::model::AssetId;

use super::SqliteRepository;
use super::mapping::{asset_columns, conn, id_from_i64, map_asset_row};
use crate::repository::{StorageError, StudyAsset, StudyAssetKind, StudyAssetRepository};

#[async_trait]
impl StudyAssetRepository for SqliteRepository {
    async fn save_asset(&self, asset: &StudyAsset) -> Result<AssetId, StorageError> {
        let (body, css) = asset_columns(&asset.content);
        let res = sqlx::query(
            r"
                INSERT INTO study_assets (kind, label, body, css, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
            ",
        )
        .bind(asset.content.kind().as_str())
        .bind(asset.label.as_str())
        .bind(body)
        .bind(css)
        .bind(asset.created_at)
        .execute(&self.pool)
        .await
        .map_err(conn)?;

        Ok(AssetId::new(id_from_i64("id", res.last_insert_rowid())?))
    }

    async fn latest_asset(
        &self,
        kind: StudyAssetKind,
    ) -> Result<Option<StudyAsset>, StorageError> {
        let row = sqlx::query(
            r"
                SELECT id, kind, label, body, css, created_at
                FROM study_assets
                WHERE kind = ?1
                ORDER BY created_at DESC, id DESC
                LIMIT 1
            ",
        )
        .bind(kind.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(conn)?;

        row.as_ref().map(map_asset_row).transpose()
    }
}
