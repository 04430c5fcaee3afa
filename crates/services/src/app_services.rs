use std::sync::Arc;

use tracing::info;

use storage::repository::Storage;

use crate::Clock;
use crate::ai::{AiConfig, GeminiClient, GenerativeModel};
use crate::app_settings_service::AppSettingsService;
use crate::dashboard_service::DashboardService;
use crate::error::AppServicesError;
use crate::generation_service::GenerationService;
use crate::quiz_service::QuizService;
use crate::study_service::StudyService;

/// Assembles app-facing services over one storage backend and one model.
#[derive(Clone)]
pub struct AppServices {
    ai_enabled: bool,
    study: Arc<StudyService>,
    quiz: Arc<QuizService>,
    dashboard: Arc<DashboardService>,
    app_settings: Arc<AppSettingsService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage and the Gemini client.
    ///
    /// The AI configuration comes from persisted settings, then the
    /// environment.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization or the settings
    /// lookup fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        let settings = storage
            .app_settings
            .get_settings()
            .await?
            .unwrap_or_default();
        let client = GeminiClient::new(AiConfig::resolve(&settings));
        let ai_enabled = client.enabled();
        info!(ai_enabled, "app services ready");

        let mut services = Self::from_storage(storage, clock, Arc::new(client));
        services.ai_enabled = ai_enabled;
        Ok(services)
    }

    /// Wire services over an existing storage and model.
    #[must_use]
    pub fn from_storage(storage: Storage, clock: Clock, model: Arc<dyn GenerativeModel>) -> Self {
        let generation = Arc::new(GenerationService::new(model));
        let study = Arc::new(StudyService::new(
            clock,
            generation,
            Arc::clone(&storage.current_quiz),
            Arc::clone(&storage.flashcards),
            Arc::clone(&storage.assets),
        ));
        let quiz = Arc::new(QuizService::new(
            clock,
            Arc::clone(&storage.current_quiz),
            Arc::clone(&storage.quiz_results),
        ));
        let dashboard = Arc::new(DashboardService::new(Arc::clone(&storage.quiz_results)));
        let app_settings = Arc::new(AppSettingsService::new(
            Arc::clone(&storage.app_settings),
            Arc::clone(&storage.reset),
        ));

        Self {
            ai_enabled: true,
            study,
            quiz,
            dashboard,
            app_settings,
        }
    }

    /// False when no API key was found at startup.
    #[must_use]
    pub fn ai_enabled(&self) -> bool {
        self.ai_enabled
    }

    #[must_use]
    pub fn study(&self) -> Arc<StudyService> {
        Arc::clone(&self.study)
    }

    #[must_use]
    pub fn quiz(&self) -> Arc<QuizService> {
        Arc::clone(&self.quiz)
    }

    #[must_use]
    pub fn dashboard(&self) -> Arc<DashboardService> {
        Arc::clone(&self.dashboard)
    }

    #[must_use]
    pub fn app_settings(&self) -> Arc<AppSettingsService> {
        Arc::clone(&self.app_settings)
    }
}
