#![forbid(unsafe_code)]

pub mod ai;
pub mod app_services;
pub mod app_settings_service;
pub mod dashboard_service;
pub mod error;
pub mod generation_service;
pub mod pdf;
pub mod quiz_service;
pub mod study_service;

pub use study_core::Clock;

pub use ai::{AiConfig, GeminiClient, GenerativeModel};
pub use app_services::AppServices;
pub use app_settings_service::AppSettingsService;
pub use dashboard_service::DashboardService;
pub use error::{
    AiError, AppServicesError, AppSettingsServiceError, GenerationError, GenerationFailure,
    PdfError, QuizFlowError, StudyError,
};
pub use generation_service::GenerationService;
pub use pdf::{SourceLoadReport, extract_pdf_bytes, load_sources};
pub use quiz_service::{QuizService, QuizStep};
pub use study_service::{GeneratedArtifact, StudyService};
