use std::sync::Arc;

use tracing::info;

use study_core::Clock;
use study_core::model::{Flashcard, GenerationKind, QuestionCount, StudyNote, StudySet};
use storage::repository::{
    AssetContent, CurrentQuiz, CurrentQuizRepository, FlashcardRepository, StudyAsset,
    StudyAssetKind, StudyAssetRepository,
};

use crate::error::StudyError;
use crate::generation_service::GenerationService;

/// What a generation run produced and stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneratedArtifact {
    Quiz(CurrentQuiz),
    Summary(StudyAsset),
    Flashcards(Vec<Flashcard>),
    StudyNote(StudyAsset),
}

impl GeneratedArtifact {
    #[must_use]
    pub fn kind(&self) -> GenerationKind {
        match self {
            Self::Quiz(_) => GenerationKind::Quiz,
            Self::Summary(_) => GenerationKind::Summary,
            Self::Flashcards(_) => GenerationKind::Flashcards,
            Self::StudyNote(_) => GenerationKind::StudyNote,
        }
    }
}

/// Validates a study set, runs one generation and persists the outcome.
#[derive(Clone)]
pub struct StudyService {
    clock: Clock,
    generation: Arc<GenerationService>,
    current_quiz: Arc<dyn CurrentQuizRepository>,
    flashcards: Arc<dyn FlashcardRepository>,
    assets: Arc<dyn StudyAssetRepository>,
}

impl StudyService {
    #[must_use]
    pub fn new(
        clock: Clock,
        generation: Arc<GenerationService>,
        current_quiz: Arc<dyn CurrentQuizRepository>,
        flashcards: Arc<dyn FlashcardRepository>,
        assets: Arc<dyn StudyAssetRepository>,
    ) -> Self {
        Self {
            clock,
            generation,
            current_quiz,
            flashcards,
            assets,
        }
    }

    /// Generate `kind` from the set's aggregated text.
    ///
    /// A quiz replaces the current quiz, flashcards replace the stored set, and
    /// summaries and notes are appended as study assets.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::StudySet` before any AI call when the set has no
    /// content or no label, `StudyError::Generation` when the model fails, and
    /// `StudyError::Storage` when persisting fails.
    pub async fn generate(
        &self,
        set: &StudySet,
        kind: GenerationKind,
        count: QuestionCount,
    ) -> Result<GeneratedArtifact, StudyError> {
        let (text, label) = set.ready_for_generation()?;
        info!(%kind, sources = set.len(), chars = text.len(), "starting generation");

        let artifact = match kind {
            GenerationKind::Quiz => {
                let questions = self.generation.generate_mcqs(&text, count).await?;
                let quiz = CurrentQuiz {
                    label,
                    questions,
                    saved_at: self.clock.now(),
                };
                self.current_quiz.save_current_quiz(&quiz).await?;
                GeneratedArtifact::Quiz(quiz)
            }
            GenerationKind::Summary => {
                let summary = self.generation.generate_summary(&text).await?;
                let asset = self
                    .store_asset(label, AssetContent::Summary(summary))
                    .await?;
                GeneratedArtifact::Summary(asset)
            }
            GenerationKind::Flashcards => {
                let cards = self.generation.generate_flashcards(&text).await?;
                self.flashcards.replace_flashcards(&cards).await?;
                GeneratedArtifact::Flashcards(cards)
            }
            GenerationKind::StudyNote => {
                let note = self.generation.generate_study_note(&text).await?;
                let asset = self
                    .store_asset(label, AssetContent::StudyNote(note))
                    .await?;
                GeneratedArtifact::StudyNote(asset)
            }
        };

        Ok(artifact)
    }

    /// Fill a note's image placeholders and store the illustrated copy.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Generation` when every image failed, or
    /// `StudyError::Storage` when persisting fails.
    pub async fn illustrate(
        &self,
        label: &str,
        note: &StudyNote,
    ) -> Result<StudyAsset, StudyError> {
        let illustrated = self.generation.illustrate_note(note).await?;
        self.store_asset(label.to_owned(), AssetContent::StudyNote(illustrated))
            .await
    }

    /// Flashcards from the last generation.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Storage` on repository failures.
    pub async fn flashcards(&self) -> Result<Vec<Flashcard>, StudyError> {
        Ok(self.flashcards.list_flashcards().await?)
    }

    /// Most recently stored summary or note.
    ///
    /// # Errors
    ///
    /// Returns `StudyError::Storage` on repository failures.
    pub async fn latest_asset(
        &self,
        kind: StudyAssetKind,
    ) -> Result<Option<StudyAsset>, StudyError> {
        Ok(self.assets.latest_asset(kind).await?)
    }

    async fn store_asset(
        &self,
        label: String,
        content: AssetContent,
    ) -> Result<StudyAsset, StudyError> {
        let mut asset = StudyAsset::new(label, content, self.clock.now());
        asset.id = Some(self.assets.save_asset(&asset).await?);
        Ok(asset)
    }
}
