use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use services::{
    AiError, AppServices, Clock, GeneratedArtifact, GenerativeModel, QuizFlowError, QuizStep,
    StudyError,
};
use storage::repository::{Storage, StudyAssetKind};
use study_core::model::{GenerationKind, QuestionCount, SourceDocument, StudySet, StudySetError};
use study_core::time::fixed_now;

/// Replays canned replies in order and records every prompt it saw.
#[derive(Default)]
struct ScriptedModel {
    replies: Mutex<VecDeque<Result<String, AiError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    fn with_replies(replies: Vec<Result<String, AiError>>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            prompts: Mutex::default(),
        })
    }

    fn next(&self, prompt: &str) -> Result<String, AiError> {
        self.prompts.lock().unwrap().push(prompt.to_owned());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(AiError::EmptyResponse))
    }

    fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

#[async_trait]
impl GenerativeModel for ScriptedModel {
    async fn generate_text(&self, prompt: &str) -> Result<String, AiError> {
        self.next(prompt)
    }

    async fn generate_json(&self, prompt: &str, _schema: &Value) -> Result<String, AiError> {
        self.next(prompt)
    }

    async fn generate_image(&self, prompt: &str) -> Result<String, AiError> {
        self.next(prompt)
    }
}

fn services(model: Arc<ScriptedModel>) -> AppServices {
    AppServices::from_storage(Storage::in_memory(), Clock::fixed(fixed_now()), model)
}

fn study_set() -> StudySet {
    let mut set = StudySet::new();
    set.add_sources(vec![SourceDocument::new(
        "Cell Biology.pdf",
        "Mitochondria produce ATP.",
        1024,
    )]);
    set
}

const QUIZ_JSON: &str = r#"[
    {"question": "What produces ATP?", "options": ["Nucleus", "Mitochondria", "Ribosome", "Golgi"], "answer": "Mitochondria"},
    {"question": "Broken", "options": ["only", "three", "options"], "answer": "only"},
    {"question": "ATP stands for?", "options": ["Adenosine triphosphate", "Amino acid", "Actin", "Apoptosis"], "answer": "Adenosine triphosphate"}
]"#;

#[tokio::test]
async fn generated_quiz_runs_and_lands_on_dashboard() {
    let model = ScriptedModel::with_replies(vec![Ok(QUIZ_JSON.into())]);
    let app = services(Arc::clone(&model));

    let artifact = app
        .study()
        .generate(&study_set(), GenerationKind::Quiz, QuestionCount::new(2).unwrap())
        .await
        .unwrap();
    let GeneratedArtifact::Quiz(quiz) = artifact else {
        panic!("expected a quiz");
    };
    assert_eq!(quiz.label, "Cell Biology");
    assert_eq!(quiz.questions.len(), 2);
    assert!(model.prompts.lock().unwrap()[0].contains("--- SOURCE: Cell Biology.pdf ---"));

    let quiz_svc = app.quiz();
    let mut session = quiz_svc.start().await.unwrap();
    assert_eq!(quiz_svc.answer_current(&mut session, 1).await.unwrap(), QuizStep::Next(1));
    let QuizStep::Finished(result) = quiz_svc.answer_current(&mut session, 3).await.unwrap()
    else {
        panic!("expected the quiz to finish");
    };
    assert_eq!(result.score(), 1);
    assert_eq!(result.total_questions(), 2);
    assert_eq!(result.percentage(), 50);
    assert!(result.id().is_some());

    let stats = app.dashboard().stats().await.unwrap();
    assert_eq!(stats.total_quizzes, 1);
    assert_eq!(stats.total_questions_answered, 2);
    assert_eq!(stats.xp, 20);
    assert_eq!(
        quiz_svc.share_text().await.unwrap(),
        "I just scored 1/2 (50%) on \"Cell Biology\" via STUDY AI! 🚀"
    );

    // The stored quiz can be retaken.
    let again = quiz_svc.start().await.unwrap();
    assert_eq!(again.current_index(), 0);
    assert!(again.selected(0).is_none());
}

#[tokio::test]
async fn invalid_study_set_never_reaches_the_model() {
    let model = ScriptedModel::with_replies(vec![]);
    let app = services(Arc::clone(&model));

    let err = app
        .study()
        .generate(&StudySet::new(), GenerationKind::Summary, QuestionCount::default())
        .await
        .unwrap_err();
    assert!(matches!(err, StudyError::StudySet(StudySetError::NoContent)));

    let mut unnamed = study_set();
    unnamed.set_label(" ");
    let err = app
        .study()
        .generate(&unnamed, GenerationKind::Quiz, QuestionCount::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Please provide a name for this study session.");
    assert_eq!(model.prompt_count(), 0);
}

#[tokio::test]
async fn model_failure_uses_user_facing_message() {
    let model = ScriptedModel::with_replies(vec![
        Err(AiError::Disabled),
        Ok(r#"{"question": "not an array"}"#.into()),
    ]);
    let app = services(model);

    for _ in 0..2 {
        let err = app
            .study()
            .generate(&study_set(), GenerationKind::Quiz, QuestionCount::default())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Failed to generate quiz. The AI model might be overloaded or the content is invalid."
        );
    }

    assert!(matches!(
        app.quiz().start().await,
        Err(QuizFlowError::NoActiveQuiz)
    ));
    assert!(matches!(
        app.quiz().share_text().await,
        Err(QuizFlowError::NoResults)
    ));
}

#[tokio::test]
async fn flashcards_replace_previous_generation() {
    let model = ScriptedModel::with_replies(vec![
        Ok(r#"[{"term": "ATP", "definition": "Energy carrier"}, {"term": "", "definition": "x"}]"#.into()),
        Ok(r#"[{"term": "Mitosis", "definition": "Cell division"}]"#.into()),
    ]);
    let app = services(model);
    let study = app.study();

    study
        .generate(&study_set(), GenerationKind::Flashcards, QuestionCount::default())
        .await
        .unwrap();
    assert_eq!(study.flashcards().await.unwrap().len(), 1);

    study
        .generate(&study_set(), GenerationKind::Flashcards, QuestionCount::default())
        .await
        .unwrap();
    let cards = study.flashcards().await.unwrap();
    assert_eq!(cards.len(), 1);
    assert_eq!(cards[0].term(), "Mitosis");
}

#[tokio::test]
async fn summary_is_stored_as_latest_asset() {
    let model = ScriptedModel::with_replies(vec![Ok("- Mitochondria make ATP".into())]);
    let app = services(model);

    let artifact = app
        .study()
        .generate(&study_set(), GenerationKind::Summary, QuestionCount::default())
        .await
        .unwrap();
    assert_eq!(artifact.kind(), GenerationKind::Summary);

    let stored = app
        .study()
        .latest_asset(StudyAssetKind::Summary)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.label, "Cell Biology");
    assert!(stored.id.is_some());
}

#[tokio::test]
async fn study_note_is_illustrated_where_images_succeed() {
    let note_json = r##"{
        "htmlContent": "<h1>Cells</h1><div class=\"image-placeholder\" data-prompt=\"a mitochondrion\"></div><div class=\"image-placeholder\" data-prompt=\"a ribosome\"></div>",
        "cssStyles": "#study-note-content { color: #222; }"
    }"##;
    let model = ScriptedModel::with_replies(vec![
        Ok(note_json.into()),
        Ok("UE5HREFUQQ==".into()),
        Err(AiError::NoImage),
    ]);
    let app = services(Arc::clone(&model));
    let study = app.study();

    let GeneratedArtifact::StudyNote(asset) = study
        .generate(&study_set(), GenerationKind::StudyNote, QuestionCount::default())
        .await
        .unwrap()
    else {
        panic!("expected a study note");
    };
    let storage::repository::AssetContent::StudyNote(note) = &asset.content else {
        panic!("expected note content");
    };
    assert_eq!(note.image_prompts(), ["a mitochondrion", "a ribosome"]);

    let illustrated = study.illustrate(&asset.label, note).await.unwrap();
    let storage::repository::AssetContent::StudyNote(illustrated_note) = &illustrated.content
    else {
        panic!("expected note content");
    };
    assert!(
        illustrated_note
            .html_content()
            .contains("data:image/png;base64,UE5HREFUQQ==")
    );
    assert_eq!(illustrated_note.image_prompts(), ["a ribosome"]);
    assert!(model.prompts.lock().unwrap()[1].ends_with("illustrating: a mitochondrion"));

    let latest = study
        .latest_asset(StudyAssetKind::StudyNote)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(latest, illustrated);
}

#[tokio::test]
async fn study_note_without_css_fails() {
    let model = ScriptedModel::with_replies(vec![Ok(r#"{"htmlContent": "<p>x</p>"}"#.into())]);
    let app = services(model);

    let err = app
        .study()
        .generate(&study_set(), GenerationKind::StudyNote, QuestionCount::default())
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Failed to generate study note.");
    assert!(
        app.study()
            .latest_asset(StudyAssetKind::StudyNote)
            .await
            .unwrap()
            .is_none()
    );
}
