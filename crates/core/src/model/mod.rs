mod app_settings;
mod flashcard;
mod ids;
mod mcq;
mod question_count;
mod quiz_result;
mod study_note;
mod study_set;

pub use app_settings::{AppSettings, AppSettingsDraft, AppSettingsError, DEFAULT_TEMPERATURE};
pub use flashcard::{Flashcard, FlashcardDraft, FlashcardError};
pub use ids::{AssetId, ParseIdError, QuizResultId, SourceId};
pub use mcq::{Mcq, McqDraft, McqError, OPTIONS_PER_QUESTION};
pub use question_count::{QuestionCount, QuestionCountError};
pub use quiz_result::{QuizResult, QuizResultError};
pub use study_note::{StudyNote, StudyNoteError};
pub use study_set::{GenerationKind, SourceDocument, StudySet, StudySetError};
