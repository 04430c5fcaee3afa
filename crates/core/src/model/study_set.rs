use std::fmt;

use thiserror::Error;

use crate::model::SourceId;

const MULTI_SOURCE_SUFFIX: &str = " & Others";

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum StudySetError {
    #[error("Please upload at least one PDF first.")]
    NoContent,

    #[error("Please provide a name for this study session.")]
    MissingLabel,
}

//
// ─── GENERATION KIND ───────────────────────────────────────────────────────────
//

/// Which artifact to produce from a study set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenerationKind {
    Quiz,
    Summary,
    Flashcards,
    StudyNote,
}

impl GenerationKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Quiz => "quiz",
            Self::Summary => "summary",
            Self::Flashcards => "flashcards",
            Self::StudyNote => "study_note",
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//
// ─── SOURCES ───────────────────────────────────────────────────────────────────
//

/// Text extracted from one uploaded PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub name: String,
    pub text: String,
    pub size_bytes: u64,
}

impl SourceDocument {
    #[must_use]
    pub fn new(name: impl Into<String>, text: impl Into<String>, size_bytes: u64) -> Self {
        Self {
            name: name.into(),
            text: text.into().trim().to_owned(),
            size_bytes,
        }
    }

    /// File name with a trailing `.pdf` removed, case-insensitively.
    #[must_use]
    pub fn stem(&self) -> &str {
        let name = self.name.as_str();
        let cut = name.len().saturating_sub(4);
        match name.get(cut..) {
            Some(ext) if ext.eq_ignore_ascii_case(".pdf") => &name[..cut],
            _ => name,
        }
    }
}

//
// ─── STUDY SET ─────────────────────────────────────────────────────────────────
//

/// Uploaded documents plus the session label used for generation.
#[derive(Debug, Clone, Default)]
pub struct StudySet {
    sources: Vec<(SourceId, SourceDocument)>,
    label: String,
    next_id: u64,
}

impl StudySet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a batch of extracted documents.
    ///
    /// When no label has been chosen yet, one is derived from the batch's
    /// first file. Returns the ids assigned to the new sources.
    pub fn add_sources(&mut self, batch: Vec<SourceDocument>) -> Vec<SourceId> {
        if batch.is_empty() {
            return Vec::new();
        }

        if self.label.trim().is_empty() {
            let mut label = batch[0].stem().to_owned();
            if batch.len() > 1 {
                label.push_str(MULTI_SOURCE_SUFFIX);
            }
            self.label = label;
        }

        let mut ids = Vec::with_capacity(batch.len());
        for doc in batch {
            self.next_id += 1;
            let id = SourceId::new(self.next_id);
            self.sources.push((id, doc));
            ids.push(id);
        }
        ids
    }

    /// Remove one source. Returns `true` if it was present.
    pub fn remove(&mut self, id: SourceId) -> bool {
        let before = self.sources.len();
        self.sources.retain(|(sid, _)| *sid != id);
        before != self.sources.len()
    }

    /// Drop every source and forget the label.
    pub fn clear(&mut self) {
        self.sources.clear();
        self.label.clear();
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn sources(&self) -> impl Iterator<Item = (SourceId, &SourceDocument)> {
        self.sources.iter().map(|(id, doc)| (*id, doc))
    }

    /// All source texts, each prefixed with a `--- SOURCE: name ---` banner.
    #[must_use]
    pub fn aggregated_text(&self) -> String {
        self.sources
            .iter()
            .map(|(_, doc)| format!("--- SOURCE: {} ---\n{}", doc.name, doc.text))
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Check the set can be sent for generation and return the text + label.
    ///
    /// # Errors
    ///
    /// Returns `StudySetError::NoContent` when no source has any text and
    /// `StudySetError::MissingLabel` when the label is blank.
    pub fn ready_for_generation(&self) -> Result<(String, String), StudySetError> {
        if self.sources.iter().all(|(_, doc)| doc.text.is_empty()) {
            return Err(StudySetError::NoContent);
        }
        let label = self.label.trim();
        if label.is_empty() {
            return Err(StudySetError::MissingLabel);
        }
        Ok((self.aggregated_text(), label.to_owned()))
    }
}
