use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::QuizResultId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuizResultError {
    #[error("score {score} exceeds total questions {total}")]
    ScoreExceedsTotal { score: u32, total: u32 },

    #[error("session label cannot be empty")]
    EmptyLabel,

    #[error("stored percentage {stored} does not match score {score}/{total}")]
    PercentageMismatch { stored: u32, score: u32, total: u32 },
}

/// Outcome of a completed quiz session, as shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResult {
    id: Option<QuizResultId>,
    session_label: String,
    score: u32,
    total_questions: u32,
    percentage: u32,
    completed_at: DateTime<Utc>,
}

impl QuizResult {
    /// Build a fresh result; the id is assigned once persisted.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError` if the label is blank or the score is larger
    /// than the number of questions.
    pub fn new(
        session_label: impl Into<String>,
        score: u32,
        total_questions: u32,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuizResultError> {
        let session_label = session_label.into().trim().to_owned();
        if session_label.is_empty() {
            return Err(QuizResultError::EmptyLabel);
        }
        if score > total_questions {
            return Err(QuizResultError::ScoreExceedsTotal {
                score,
                total: total_questions,
            });
        }

        Ok(Self {
            id: None,
            session_label,
            score,
            total_questions,
            percentage: percentage(score, total_questions),
            completed_at,
        })
    }

    /// Rehydrate a persisted result.
    ///
    /// # Errors
    ///
    /// Returns `QuizResultError` if the stored values are inconsistent.
    pub fn from_persisted(
        id: QuizResultId,
        session_label: String,
        score: u32,
        total_questions: u32,
        stored_percentage: u32,
        completed_at: DateTime<Utc>,
    ) -> Result<Self, QuizResultError> {
        let result = Self::new(session_label, score, total_questions, completed_at)?;
        if result.percentage != stored_percentage {
            return Err(QuizResultError::PercentageMismatch {
                stored: stored_percentage,
                score,
                total: total_questions,
            });
        }
        Ok(result.with_id(id))
    }

    #[must_use]
    pub fn with_id(mut self, id: QuizResultId) -> Self {
        self.id = Some(id);
        self
    }

    #[must_use]
    pub fn id(&self) -> Option<QuizResultId> {
        self.id
    }

    #[must_use]
    pub fn session_label(&self) -> &str {
        &self.session_label
    }

    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    #[must_use]
    pub fn total_questions(&self) -> u32 {
        self.total_questions
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        self.percentage
    }

    #[must_use]
    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    /// Clipboard-ready brag line for the result.
    #[must_use]
    pub fn share_text(&self) -> String {
        format!(
            "I just scored {}/{} ({}%) on \"{}\" via STUDY AI! 🚀",
            self.score, self.total_questions, self.percentage, self.session_label
        )
    }
}

/// Rounded share of correct answers; half rounds up.
#[must_use]
pub fn percentage(score: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let score = u64::from(score);
    let total = u64::from(total);
    let rounded = (score * 200 + total) / (total * 2);
    u32::try_from(rounded).unwrap_or(u32::MAX)
}
