use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt;
use std::sync::{Arc, Mutex};
use study_core::model::{
    AppSettings, AssetId, Flashcard, Mcq, QuizResult, QuizResultId, StudyNote,
};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

/// The quiz waiting to be taken, with the session label it was generated for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentQuiz {
    pub label: String,
    pub questions: Vec<Mcq>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StudyAssetKind {
    Summary,
    StudyNote,
}

impl StudyAssetKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::StudyNote => "study_note",
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError::Serialization` for unknown kinds.
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        match raw {
            "summary" => Ok(Self::Summary),
            "study_note" => Ok(Self::StudyNote),
            other => Err(StorageError::Serialization(format!(
                "invalid asset kind: {other}"
            ))),
        }
    }
}

impl fmt::Display for StudyAssetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetContent {
    Summary(String),
    StudyNote(StudyNote),
}

impl AssetContent {
    #[must_use]
    pub fn kind(&self) -> StudyAssetKind {
        match self {
            Self::Summary(_) => StudyAssetKind::Summary,
            Self::StudyNote(_) => StudyAssetKind::StudyNote,
        }
    }
}

/// A generated summary or study note, stored so it can be re-exported later.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyAsset {
    pub id: Option<AssetId>,
    pub label: String,
    pub content: AssetContent,
    pub created_at: DateTime<Utc>,
}

impl StudyAsset {
    #[must_use]
    pub fn new(label: impl Into<String>, content: AssetContent, created_at: DateTime<Utc>) -> Self {
        Self {
            id: None,
            label: label.into(),
            content,
            created_at,
        }
    }
}

//
// ─── CONTRACTS ─────────────────────────────────────────────────────────────────
//

#[async_trait]
pub trait QuizResultRepository: Send + Sync {
    /// Persist a completed quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the result cannot be stored.
    async fn append_result(&self, result: &QuizResult) -> Result<QuizResultId, StorageError>;

    /// History, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on query or mapping failures.
    async fn list_results(&self, limit: u32) -> Result<Vec<QuizResult>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on query or mapping failures.
    async fn latest_result(&self) -> Result<Option<QuizResult>, StorageError> {
        Ok(self.list_results(1).await?.into_iter().next())
    }
}

#[async_trait]
pub trait CurrentQuizRepository: Send + Sync {
    /// Replace the pending quiz.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the quiz cannot be stored.
    async fn save_current_quiz(&self, quiz: &CurrentQuiz) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on query or mapping failures.
    async fn load_current_quiz(&self) -> Result<Option<CurrentQuiz>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the delete fails.
    async fn clear_current_quiz(&self) -> Result<(), StorageError>;
}

#[async_trait]
pub trait FlashcardRepository: Send + Sync {
    /// Replace the current flashcard set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the set cannot be stored.
    async fn replace_flashcards(&self, cards: &[Flashcard]) -> Result<(), StorageError>;

    /// Cards in the order they were generated.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on query or mapping failures.
    async fn list_flashcards(&self) -> Result<Vec<Flashcard>, StorageError>;
}

#[async_trait]
pub trait StudyAssetRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` if the asset cannot be stored.
    async fn save_asset(&self, asset: &StudyAsset) -> Result<AssetId, StorageError>;

    /// Most recently created asset of the given kind.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on query or mapping failures.
    async fn latest_asset(&self, kind: StudyAssetKind)
    -> Result<Option<StudyAsset>, StorageError>;
}

#[async_trait]
pub trait AppSettingsRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError` on query or mapping failures.
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` if the settings cannot be stored.
    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError>;
}

#[async_trait]
pub trait DataResetRepository: Send + Sync {
    /// Remove every persisted record: history, pending quiz, flashcards,
    /// generated assets and settings.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if any delete fails.
    async fn clear_all(&self) -> Result<(), StorageError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

#[derive(Default)]
struct MemoryState {
    results: Vec<QuizResult>,
    next_result_id: u64,
    current_quiz: Option<CurrentQuiz>,
    flashcards: Vec<Flashcard>,
    assets: Vec<StudyAsset>,
    next_asset_id: u64,
    settings: Option<AppSettings>,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    state: Arc<Mutex<MemoryState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn with_state<T>(
        &self,
        f: impl FnOnce(&mut MemoryState) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let mut guard = self
            .state
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        f(&mut guard)
    }
}

#[async_trait]
impl QuizResultRepository for InMemoryRepository {
    async fn append_result(&self, result: &QuizResult) -> Result<QuizResultId, StorageError> {
        self.with_state(|state| {
            state.next_result_id += 1;
            let id = QuizResultId::new(state.next_result_id);
            state.results.push(result.clone().with_id(id));
            Ok(id)
        })
    }

    async fn list_results(&self, limit: u32) -> Result<Vec<QuizResult>, StorageError> {
        self.with_state(|state| {
            let mut results = state.results.clone();
            results.sort_by(|a, b| {
                b.completed_at()
                    .cmp(&a.completed_at())
                    .then_with(|| b.id().cmp(&a.id()))
            });
            results.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
            Ok(results)
        })
    }
}

#[async_trait]
impl CurrentQuizRepository for InMemoryRepository {
    async fn save_current_quiz(&self, quiz: &CurrentQuiz) -> Result<(), StorageError> {
        self.with_state(|state| {
            state.current_quiz = Some(quiz.clone());
            Ok(())
        })
    }

    async fn load_current_quiz(&self) -> Result<Option<CurrentQuiz>, StorageError> {
        self.with_state(|state| Ok(state.current_quiz.clone()))
    }

    async fn clear_current_quiz(&self) -> Result<(), StorageError> {
        self.with_state(|state| {
            state.current_quiz = None;
            Ok(())
        })
    }
}

#[async_trait]
impl FlashcardRepository for InMemoryRepository {
    async fn replace_flashcards(&self, cards: &[Flashcard]) -> Result<(), StorageError> {
        self.with_state(|state| {
            state.flashcards = cards.to_vec();
            Ok(())
        })
    }

    async fn list_flashcards(&self) -> Result<Vec<Flashcard>, StorageError> {
        self.with_state(|state| Ok(state.flashcards.clone()))
    }
}

#[async_trait]
impl StudyAssetRepository for InMemoryRepository {
    async fn save_asset(&self, asset: &StudyAsset) -> Result<AssetId, StorageError> {
        self.with_state(|state| {
            state.next_asset_id += 1;
            let id = AssetId::new(state.next_asset_id);
            let mut stored = asset.clone();
            stored.id = Some(id);
            state.assets.push(stored);
            Ok(id)
        })
    }

    async fn latest_asset(
        &self,
        kind: StudyAssetKind,
    ) -> Result<Option<StudyAsset>, StorageError> {
        self.with_state(|state| {
            Ok(state
                .assets
                .iter()
                .filter(|a| a.content.kind() == kind)
                .max_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)))
                .cloned())
        })
    }
}

#[async_trait]
impl AppSettingsRepository for InMemoryRepository {
    async fn get_settings(&self) -> Result<Option<AppSettings>, StorageError> {
        self.with_state(|state| Ok(state.settings.clone()))
    }

    async fn save_settings(&self, settings: &AppSettings) -> Result<(), StorageError> {
        self.with_state(|state| {
            state.settings = Some(settings.clone());
            Ok(())
        })
    }
}

#[async_trait]
impl DataResetRepository for InMemoryRepository {
    async fn clear_all(&self) -> Result<(), StorageError> {
        self.with_state(|state| {
            *state = MemoryState::default();
            Ok(())
        })
    }
}

//
// ─── AGGREGATE ─────────────────────────────────────────────────────────────────
//

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub quiz_results: Arc<dyn QuizResultRepository>,
    pub current_quiz: Arc<dyn CurrentQuizRepository>,
    pub flashcards: Arc<dyn FlashcardRepository>,
    pub assets: Arc<dyn StudyAssetRepository>,
    pub app_settings: Arc<dyn AppSettingsRepository>,
    pub reset: Arc<dyn DataResetRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    /// Share one backend value across every repository handle.
    pub fn from_repository<R>(repo: R) -> Self
    where
        R: QuizResultRepository
            + CurrentQuizRepository
            + FlashcardRepository
            + StudyAssetRepository
            + AppSettingsRepository
            + DataResetRepository
            + Clone
            + 'static,
    {
        Self {
            quiz_results: Arc::new(repo.clone()),
            current_quiz: Arc::new(repo.clone()),
            flashcards: Arc::new(repo.clone()),
            assets: Arc::new(repo.clone()),
            app_settings: Arc::new(repo.clone()),
            reset: Arc::new(repo),
        }
    }
}
