mod dashboard_vm;
mod flashcard_vm;
mod markdown_vm;
mod quiz_vm;
mod settings_vm;
mod time_fmt;

pub use dashboard_vm::{DashboardVm, ResultRowVm, StatCardVm, map_dashboard};
pub use flashcard_vm::{FlashcardVm, map_flashcards};
pub use markdown_vm::{
    STUDY_NOTE_CONTAINER_ID, markdown_to_html, sanitize_html, sanitize_note_html,
    study_note_document, summary_document,
};
pub use quiz_vm::{
    NO_ANSWER, QuizOptionVm, QuizQuestionVm, QuizReviewVm, ReviewItemVm, map_quiz_review,
    option_letter, parse_choice,
};
pub use settings_vm::{SettingRowVm, map_settings, mask_secret};
pub use time_fmt::{format_date, format_date_in};
