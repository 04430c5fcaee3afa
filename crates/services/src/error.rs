//! Shared error types for the services crate.

use thiserror::Error;

use study_core::model::{AppSettingsError, StudyNoteError, StudySetError};
use study_core::quiz::QuizSessionError;
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by a `GenerativeModel`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AiError {
    #[error("AI client is not configured (set an API key)")]
    Disabled,
    #[error("AI model returned an empty response")]
    EmptyResponse,
    #[error("AI model did not return any images")]
    NoImage,
    #[error("AI request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Why a single generation call failed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationFailure {
    #[error(transparent)]
    Ai(#[from] AiError),
    #[error("response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("API response is not in the expected array format")]
    NotAnArray,
    #[error("API response contained no usable items")]
    NoValidItems,
    #[error(transparent)]
    Note(#[from] StudyNoteError),
}

/// Errors emitted by `GenerationService`, one per artifact.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GenerationError {
    #[error("Failed to generate quiz. The AI model might be overloaded or the content is invalid.")]
    Quiz(#[source] GenerationFailure),
    #[error("Failed to generate summary.")]
    Summary(#[source] GenerationFailure),
    #[error("Failed to generate flashcards.")]
    Flashcards(#[source] GenerationFailure),
    #[error("Failed to generate study note.")]
    StudyNote(#[source] GenerationFailure),
    #[error("Failed to generate image.")]
    Image(#[source] GenerationFailure),
}

/// Errors emitted while reading source documents.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PdfError {
    #[error("Failed to extract text from {name}")]
    Extract { name: String, reason: String },
    #[error("Failed to extract text from {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Errors emitted by `StudyService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StudyError {
    #[error(transparent)]
    StudySet(#[from] StudySetError),
    #[error(transparent)]
    Generation(#[from] GenerationError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `QuizService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum QuizFlowError {
    #[error("no active quiz; generate one first")]
    NoActiveQuiz,
    #[error("no quiz results yet")]
    NoResults,
    #[error(transparent)]
    Session(#[from] QuizSessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `AppSettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppSettingsServiceError {
    #[error(transparent)]
    Settings(#[from] AppSettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
