use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use study_core::model::{
    Flashcard, FlashcardDraft, FlashcardError, Mcq, McqDraft, McqError, QuestionCount, StudyNote,
};

use crate::ai::{GenerativeModel, prompts, schema};
use crate::error::{GenerationError, GenerationFailure};

/// Turns source text into study artifacts through a `GenerativeModel`.
#[derive(Clone)]
pub struct GenerationService {
    model: Arc<dyn GenerativeModel>,
}

impl GenerationService {
    #[must_use]
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    /// Generate a multiple-choice quiz.
    ///
    /// Items that fail validation are dropped.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Quiz` when the call fails, the payload is not
    /// a JSON array, or no item survives validation.
    pub async fn generate_mcqs(
        &self,
        text: &str,
        count: QuestionCount,
    ) -> Result<Vec<Mcq>, GenerationError> {
        let result = async {
            let raw = self
                .model
                .generate_json(&prompts::mcq(text, count), &schema::mcqs())
                .await?;
            validated_items::<McqDraft, Mcq, McqError>(&raw, "question", McqDraft::validate)
        }
        .await;

        let mcqs = result.map_err(|e| {
            warn!(error = %e, "quiz generation failed");
            GenerationError::Quiz(e)
        })?;
        info!(requested = count.get(), received = mcqs.len(), "generated quiz");
        Ok(mcqs)
    }

    /// Generate a bullet-point summary (markdown).
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Summary` when the call fails or returns nothing.
    pub async fn generate_summary(&self, text: &str) -> Result<String, GenerationError> {
        self.model
            .generate_text(&prompts::summary(text))
            .await
            .map_err(|e| {
                warn!(error = %e, "summary generation failed");
                GenerationError::Summary(e.into())
            })
    }

    /// Generate term/definition flashcards.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Flashcards` on the same conditions as quizzes.
    pub async fn generate_flashcards(&self, text: &str) -> Result<Vec<Flashcard>, GenerationError> {
        let result = async {
            let raw = self
                .model
                .generate_json(&prompts::flashcards(text), &schema::flashcards())
                .await?;
            validated_items::<FlashcardDraft, Flashcard, FlashcardError>(
                &raw,
                "flashcard",
                FlashcardDraft::validate,
            )
        }
        .await;

        let cards = result.map_err(|e| {
            warn!(error = %e, "flashcard generation failed");
            GenerationError::Flashcards(e)
        })?;
        info!(count = cards.len(), "generated flashcards");
        Ok(cards)
    }

    /// Generate a styled HTML study note.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::StudyNote` when the call fails or the payload
    /// lacks `htmlContent` or `cssStyles`.
    pub async fn generate_study_note(&self, text: &str) -> Result<StudyNote, GenerationError> {
        let result = async {
            let raw = self
                .model
                .generate_json(&prompts::study_note(text), &schema::study_note())
                .await?;
            let payload: StudyNotePayload = serde_json::from_str(raw.trim())?;
            Ok::<_, GenerationFailure>(StudyNote::new(payload.html_content, payload.css_styles)?)
        }
        .await;

        result.map_err(|e| {
            warn!(error = %e, "study note generation failed");
            GenerationError::StudyNote(e)
        })
    }

    /// Generate one illustration; returns base64 PNG data.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Image` when the call fails or yields no image.
    pub async fn generate_image(&self, subject: &str) -> Result<String, GenerationError> {
        self.model
            .generate_image(&prompts::image(subject))
            .await
            .map_err(|e| GenerationError::Image(e.into()))
    }

    /// Fill the note's image placeholders.
    ///
    /// Placeholders whose image fails are left in place.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::Image` only when the note has placeholders
    /// and every one of them failed.
    pub async fn illustrate_note(&self, note: &StudyNote) -> Result<StudyNote, GenerationError> {
        let prompts = note.image_prompts();
        if prompts.is_empty() {
            return Ok(note.clone());
        }

        let mut images = HashMap::new();
        let mut last_error = None;
        for prompt in prompts {
            match self.generate_image(&prompt).await {
                Ok(data) => {
                    images.insert(prompt, data);
                }
                Err(err) => {
                    warn!(prompt = %prompt, error = %err, "image generation failed");
                    last_error = Some(err);
                }
            }
        }

        match last_error {
            Some(err) if images.is_empty() => Err(err),
            _ => {
                info!(images = images.len(), "illustrated study note");
                Ok(note.with_images(&images))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StudyNotePayload {
    #[serde(default)]
    html_content: String,
    #[serde(default)]
    css_styles: String,
}

/// Parse a JSON array and keep the items that validate.
fn validated_items<D, T, E>(
    raw: &str,
    what: &'static str,
    validate: impl Fn(D) -> Result<T, E>,
) -> Result<Vec<T>, GenerationFailure>
where
    D: DeserializeOwned,
    E: std::fmt::Display,
{
    let Value::Array(items) = serde_json::from_str::<Value>(raw.trim())? else {
        return Err(GenerationFailure::NotAnArray);
    };

    let total = items.len();
    let valid: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            let outcome = serde_json::from_value::<D>(item)
                .map_err(|e| e.to_string())
                .and_then(|draft| validate(draft).map_err(|e| e.to_string()));
            match outcome {
                Ok(value) => Some(value),
                Err(reason) => {
                    warn!(what, index, reason = %reason, "dropping invalid generated item");
                    None
                }
            }
        })
        .collect();

    if valid.is_empty() {
        return Err(GenerationFailure::NoValidItems);
    }
    if valid.len() < total {
        warn!(what, kept = valid.len(), total, "some generated items were dropped");
    }
    Ok(valid)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_valid_items_only() {
        let raw = r#"[
            {"question": "2+2?", "options": ["1","2","3","4"], "answer": "4"},
            {"question": "bad", "options": ["a","b"], "answer": "a"},
            {"question": "Sky?", "options": ["Blue","Red","Green","Black"], "answer": "Purple"},
            {"nonsense": true}
        ]"#;
        let mcqs =
            validated_items::<McqDraft, Mcq, McqError>(raw, "question", McqDraft::validate).unwrap();
        assert_eq!(mcqs.len(), 1);
        assert_eq!(mcqs[0].answer(), "4");
    }

    #[test]
    fn object_payload_is_not_an_array() {
        let err = validated_items::<FlashcardDraft, Flashcard, FlashcardError>(
            r#"{"term": "x", "definition": "y"}"#,
            "flashcard",
            FlashcardDraft::validate,
        )
        .unwrap_err();
        assert!(matches!(err, GenerationFailure::NotAnArray));
    }

    #[test]
    fn all_invalid_is_an_error() {
        let err = validated_items::<FlashcardDraft, Flashcard, FlashcardError>(
            r#"[{"term": " ", "definition": "y"}]"#,
            "flashcard",
            FlashcardDraft::validate,
        )
        .unwrap_err();
        assert!(matches!(err, GenerationFailure::NoValidItems));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = validated_items::<McqDraft, Mcq, McqError>("[{", "question", McqDraft::validate)
            .unwrap_err();
        assert!(matches!(err, GenerationFailure::Json(_)));
    }
}
