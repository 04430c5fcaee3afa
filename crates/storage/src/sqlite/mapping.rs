use study_core::model::{AssetId, Flashcard, Mcq, QuizResult, QuizResultId, StudyNote};
use sqlx::Row;

use crate::repository::{AssetContent, StorageError, StudyAsset, StudyAssetKind};

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn conn<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn u32_from_i64(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn id_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn id_from_i64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

pub(crate) fn map_quiz_result_row(row: &sqlx::sqlite::SqliteRow) -> Result<QuizResult, StorageError> {
    let id = QuizResultId::new(id_from_i64("id", row.try_get("id").map_err(ser)?)?);
    let label: String = row.try_get("session_label").map_err(ser)?;
    let score = u32_from_i64("score", row.try_get("score").map_err(ser)?)?;
    let total = u32_from_i64("total_questions", row.try_get("total_questions").map_err(ser)?)?;
    let percentage = u32_from_i64("percentage", row.try_get("percentage").map_err(ser)?)?;
    let completed_at = row.try_get("completed_at").map_err(ser)?;

    QuizResult::from_persisted(id, label, score, total, percentage, completed_at).map_err(ser)
}

/// Options are kept as a JSON array so a question stays one row.
pub(crate) fn options_to_json(mcq: &Mcq) -> Result<String, StorageError> {
    serde_json::to_string(mcq.options()).map_err(ser)
}

pub(crate) fn map_question_row(row: &sqlx::sqlite::SqliteRow) -> Result<Mcq, StorageError> {
    let question: String = row.try_get("question").map_err(ser)?;
    let options_json: String = row.try_get("options").map_err(ser)?;
    let options: Vec<String> = serde_json::from_str(&options_json).map_err(ser)?;
    let answer: String = row.try_get("answer").map_err(ser)?;
    Mcq::from_persisted(question, options, answer).map_err(ser)
}

pub(crate) fn map_flashcard_row(row: &sqlx::sqlite::SqliteRow) -> Result<Flashcard, StorageError> {
    let term: String = row.try_get("term").map_err(ser)?;
    let definition: String = row.try_get("definition").map_err(ser)?;
    Flashcard::new(term, definition).map_err(ser)
}

/// Splits asset content into the `body` / `css` columns.
pub(crate) fn asset_columns(content: &AssetContent) -> (&str, Option<&str>) {
    match content {
        AssetContent::Summary(text) => (text.as_str(), None),
        AssetContent::StudyNote(note) => (note.html_content(), Some(note.css_styles())),
    }
}

pub(crate) fn map_asset_row(row: &sqlx::sqlite::SqliteRow) -> Result<StudyAsset, StorageError> {
    let id = AssetId::new(id_from_i64("id", row.try_get("id").map_err(ser)?)?);
    let kind_raw: String = row.try_get("kind").map_err(ser)?;
    let body: String = row.try_get("body").map_err(ser)?;
    let css: Option<String> = row.try_get("css").map_err(ser)?;

    let content = match StudyAssetKind::parse(&kind_raw)? {
        StudyAssetKind::Summary => AssetContent::Summary(body),
        StudyAssetKind::StudyNote => {
            let css = css.ok_or_else(|| StorageError::Serialization("missing css".into()))?;
            AssetContent::StudyNote(StudyNote::new(body, css).map_err(ser)?)
        }
    };

    Ok(StudyAsset {
        id: Some(id),
        label: row.try_get("label").map_err(ser)?,
        content,
        created_at: row.try_get("created_at").map_err(ser)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use study_core::model::McqDraft;

    #[test]
    fn options_serialize_as_json_array() {
        let mcq = McqDraft {
            question: "Q".into(),
            options: vec!["a \"quoted\"".into(), "b".into(), "c".into(), "d".into()],
            answer: "b".into(),
        }
        .validate()
        .unwrap();
        let json = options_to_json(&mcq).unwrap();
        let back: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, mcq.options());
    }

    #[test]
    fn summary_has_no_css_column() {
        let content = AssetContent::Summary("- a".into());
        let (body, css) = asset_columns(&content);
        assert_eq!(body, "- a");
        assert!(css.is_none());
    }
}
