use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum FlashcardError {
    #[error("flashcard term cannot be empty")]
    EmptyTerm,

    #[error("flashcard definition cannot be empty")]
    EmptyDefinition,
}

/// Unvalidated term/definition pair as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashcardDraft {
    pub term: String,
    pub definition: String,
}

impl FlashcardDraft {
    /// # Errors
    ///
    /// Returns `FlashcardError` if the term or definition is blank.
    pub fn validate(self) -> Result<Flashcard, FlashcardError> {
        let term = self.term.trim().to_owned();
        if term.is_empty() {
            return Err(FlashcardError::EmptyTerm);
        }
        let definition = self.definition.trim().to_owned();
        if definition.is_empty() {
            return Err(FlashcardError::EmptyDefinition);
        }
        Ok(Flashcard { term, definition })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Flashcard {
    term: String,
    definition: String,
}

impl Flashcard {
    /// # Errors
    ///
    /// Returns `FlashcardError` when the persisted row is blank.
    pub fn new(
        term: impl Into<String>,
        definition: impl Into<String>,
    ) -> Result<Self, FlashcardError> {
        FlashcardDraft {
            term: term.into(),
            definition: definition.into(),
        }
        .validate()
    }

    #[must_use]
    pub fn term(&self) -> &str {
        &self.term
    }

    #[must_use]
    pub fn definition(&self) -> &str {
        &self.definition
    }
}
