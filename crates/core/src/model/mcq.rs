use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every generated question carries exactly this many options.
pub const OPTIONS_PER_QUESTION: usize = 4;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum McqError {
    #[error("question text cannot be empty")]
    EmptyQuestion,

    #[error("expected {OPTIONS_PER_QUESTION} options, got {0}")]
    WrongOptionCount(usize),

    #[error("option {0} is empty")]
    EmptyOption(usize),

    #[error("answer is not one of the options")]
    AnswerNotInOptions,
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct McqDraft {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
    pub answer: String,
}

impl McqDraft {
    /// Trim all fields and check the question shape.
    ///
    /// # Errors
    ///
    /// Returns `McqError` if the question is blank, the option count is not
    /// `OPTIONS_PER_QUESTION`, an option is blank, or the answer is not one of
    /// the options.
    pub fn validate(self) -> Result<Mcq, McqError> {
        let question = self.question.trim().to_owned();
        if question.is_empty() {
            return Err(McqError::EmptyQuestion);
        }

        if self.options.len() != OPTIONS_PER_QUESTION {
            return Err(McqError::WrongOptionCount(self.options.len()));
        }

        let mut options = Vec::with_capacity(OPTIONS_PER_QUESTION);
        for (idx, option) in self.options.into_iter().enumerate() {
            let option = option.trim().to_owned();
            if option.is_empty() {
                return Err(McqError::EmptyOption(idx));
            }
            options.push(option);
        }

        let answer = self.answer.trim().to_owned();
        if !options.iter().any(|option| *option == answer) {
            return Err(McqError::AnswerNotInOptions);
        }

        Ok(Mcq {
            question,
            options,
            answer,
        })
    }
}

//
// ─── MCQ ───────────────────────────────────────────────────────────────────────
//

/// A validated multiple-choice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Mcq {
    question: String,
    options: Vec<String>,
    answer: String,
}

impl Mcq {
    /// Rehydrate a question from storage, re-checking its shape.
    ///
    /// # Errors
    ///
    /// Returns `McqError` when the persisted row is malformed.
    pub fn from_persisted(
        question: String,
        options: Vec<String>,
        answer: String,
    ) -> Result<Self, McqError> {
        McqDraft {
            question,
            options,
            answer,
        }
        .validate()
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    #[must_use]
    pub fn has_option(&self, option: &str) -> bool {
        self.options.iter().any(|o| o == option)
    }

    #[must_use]
    pub fn is_correct(&self, selected: &str) -> bool {
        self.answer == selected
    }
}
