use std::sync::Arc;

use tracing::{info, warn};

use study_core::model::{AppSettings, AppSettingsDraft};
use storage::repository::{AppSettingsRepository, DataResetRepository};

use crate::error::AppSettingsServiceError;

#[derive(Clone)]
pub struct AppSettingsService {
    repo: Arc<dyn AppSettingsRepository>,
    reset: Arc<dyn DataResetRepository>,
}

impl AppSettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn AppSettingsRepository>, reset: Arc<dyn DataResetRepository>) -> Self {
        Self { repo, reset }
    }

    /// Load persisted settings (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` on storage failures.
    pub async fn load(&self) -> Result<AppSettings, AppSettingsServiceError> {
        let settings = self.repo.get_settings().await?;
        Ok(settings.unwrap_or_default())
    }

    /// Validate and persist new settings.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` if validation fails or persistence fails.
    pub async fn save(
        &self,
        draft: AppSettingsDraft,
    ) -> Result<AppSettings, AppSettingsServiceError> {
        let settings = draft.validate()?;
        self.repo.save_settings(&settings).await?;
        info!("settings saved");
        Ok(settings)
    }

    /// Delete history, generated assets, the current quiz and settings.
    ///
    /// # Errors
    ///
    /// Returns `AppSettingsServiceError` on storage failures.
    pub async fn clear_all_data(&self) -> Result<(), AppSettingsServiceError> {
        warn!("clearing all stored data");
        self.reset.clear_all().await?;
        Ok(())
    }
}
