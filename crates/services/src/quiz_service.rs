use std::sync::Arc;

use tracing::info;

use study_core::Clock;
use study_core::model::QuizResult;
use study_core::quiz::{Advance, QuizSession};
use storage::repository::{CurrentQuizRepository, QuizResultRepository};

use crate::error::QuizFlowError;

/// Outcome of answering the current question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizStep {
    /// Moved on to the question at this index.
    Next(usize),
    /// Last question answered; the result has been saved.
    Finished(QuizResult),
}

/// Runs the stored current quiz and records results.
#[derive(Clone)]
pub struct QuizService {
    clock: Clock,
    current_quiz: Arc<dyn CurrentQuizRepository>,
    results: Arc<dyn QuizResultRepository>,
}

impl QuizService {
    #[must_use]
    pub fn new(
        clock: Clock,
        current_quiz: Arc<dyn CurrentQuizRepository>,
        results: Arc<dyn QuizResultRepository>,
    ) -> Self {
        Self {
            clock,
            current_quiz,
            results,
        }
    }

    /// Start a fresh pass over the current quiz.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::NoActiveQuiz` when nothing has been generated.
    pub async fn start(&self) -> Result<QuizSession, QuizFlowError> {
        let quiz = self
            .current_quiz
            .load_current_quiz()
            .await?
            .filter(|quiz| !quiz.questions.is_empty())
            .ok_or(QuizFlowError::NoActiveQuiz)?;
        info!(label = %quiz.label, questions = quiz.questions.len(), "quiz started");
        Ok(QuizSession::new(quiz.label, quiz.questions)?)
    }

    /// Select option `position` (A = 0) for the current question and move on.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::Session` for invalid positions or a finished
    /// quiz, and `QuizFlowError::Storage` if saving the result fails.
    pub async fn answer_current(
        &self,
        session: &mut QuizSession,
        position: usize,
    ) -> Result<QuizStep, QuizFlowError> {
        session.select_option(position)?;
        match session.advance()? {
            Advance::Next(index) => Ok(QuizStep::Next(index)),
            Advance::Finished(_) => Ok(QuizStep::Finished(self.finish(session).await?)),
        }
    }

    /// Persist the result of a finished session.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::Session` when the session is not finished.
    pub async fn finish(&self, session: &QuizSession) -> Result<QuizResult, QuizFlowError> {
        let result = session.to_result(self.clock.now())?;
        let id = self.results.append_result(&result).await?;
        info!(
            %id,
            score = result.score(),
            total = result.total_questions(),
            "quiz result saved"
        );
        Ok(result.with_id(id))
    }

    /// Brag line for the most recent result.
    ///
    /// # Errors
    ///
    /// Returns `QuizFlowError::NoResults` when no quiz was ever finished.
    pub async fn share_text(&self) -> Result<String, QuizFlowError> {
        self.results
            .latest_result()
            .await?
            .map(|result| result.share_text())
            .ok_or(QuizFlowError::NoResults)
    }
}
