use std::error::Error;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::warn;

use services::{AppServices, GeneratedArtifact, QuizStep, load_sources};
use storage::repository::AssetContent;
use study_core::model::{AppSettingsDraft, GenerationKind, QuestionCount, StudySet};
use ui::render::{
    render_dashboard, render_flashcards, render_question, render_review, render_settings,
};
use ui::vm::{
    QuizQuestionVm, map_dashboard, map_flashcards, map_quiz_review, map_settings, option_letter,
    parse_choice, study_note_document, summary_document,
};

use crate::cli::{Commands, SettingsAction, SourceArgs};

type CommandResult = Result<(), Box<dyn Error>>;

const RESET_WARNING: &str =
    "WARNING: All progress and generated assets will be permanently deleted. Continue?";

pub async fn dispatch(app: &AppServices, command: Commands) -> CommandResult {
    match command {
        Commands::Quiz {
            sources,
            questions,
            no_run,
        } => quiz(app, &sources, questions, no_run).await,
        Commands::Take => take_quiz(app).await,
        Commands::Summary { sources, out } => summary(app, &sources, out.as_deref()).await,
        Commands::Flashcards { show: true, .. } => show_flashcards(app).await,
        Commands::Flashcards { files, name, .. } => {
            flashcards(app, &SourceArgs { files, name }).await
        }
        Commands::Note {
            sources,
            out,
            images,
        } => note(app, &sources, &out, images).await,
        Commands::Dashboard { limit } => dashboard(app, limit).await,
        Commands::Share => {
            println!("{}", app.quiz().share_text().await?);
            Ok(())
        }
        Commands::Settings { action } => settings(app, action).await,
        Commands::Reset { yes } => reset(app, yes).await,
    }
}

/// Read the PDFs into a study set, reporting files that could not be used.
fn study_set(sources: &SourceArgs) -> StudySet {
    let report = load_sources(&sources.files);
    for path in &report.skipped {
        eprintln!("Skipping {}: not a PDF", path.display());
    }
    for failure in &report.failures {
        eprintln!("{failure}");
    }
    for doc in &report.documents {
        eprintln!("Loaded {} ({:.1} KB)", doc.name, doc.size_bytes as f64 / 1024.0);
    }

    let mut set = StudySet::new();
    if let Some(name) = &sources.name {
        set.set_label(name.clone());
    }
    set.add_sources(report.documents);
    set
}

fn require_ai(app: &AppServices) {
    if !app.ai_enabled() {
        warn!("no API key configured; set STUDY_AI_API_KEY or `settings set --api-key`");
    }
}

async fn quiz(
    app: &AppServices,
    sources: &SourceArgs,
    questions: Option<u32>,
    no_run: bool,
) -> CommandResult {
    require_ai(app);
    let count = match questions {
        Some(n) => QuestionCount::new(n)?,
        None => app.app_settings().load().await?.default_question_count(),
    };

    let set = study_set(sources);
    let artifact = app
        .study()
        .generate(&set, GenerationKind::Quiz, count)
        .await?;
    if let GeneratedArtifact::Quiz(quiz) = &artifact {
        println!(
            "Generated {} questions for \"{}\".",
            quiz.questions.len(),
            quiz.label
        );
    }

    if no_run {
        println!("Run `study-ai take` to start the quiz.");
        return Ok(());
    }
    println!();
    take_quiz(app).await
}

fn read_answer(prompt: &str) -> io::Result<Option<String>> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut line = String::new();
    if io::stdin().lock().read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line))
}

async fn take_quiz(app: &AppServices) -> CommandResult {
    let quiz = app.quiz();
    let mut session = quiz.start().await?;

    loop {
        let vm = QuizQuestionVm::from(&session);
        print!("{}", render_question(&vm));

        let last_letter = option_letter(vm.options.len().saturating_sub(1));
        let prompt = if vm.is_last {
            format!("Answer (A-{last_letter}) to finish, q to quit: ")
        } else {
            format!("Answer (A-{last_letter}), q to quit: ")
        };

        let Some(line) = read_answer(&prompt)? else {
            println!();
            println!("Quiz abandoned; no result saved.");
            return Ok(());
        };
        if line.trim().eq_ignore_ascii_case("q") {
            println!("Quiz abandoned; no result saved.");
            return Ok(());
        }
        let Some(position) = parse_choice(&line, vm.options.len()) else {
            println!("Please choose one of A-{last_letter}.");
            println!();
            continue;
        };

        match quiz.answer_current(&mut session, position).await? {
            QuizStep::Next(_) => println!(),
            QuizStep::Finished(result) => {
                println!();
                print!("{}", render_review(&map_quiz_review(&session, &result)));
                println!();
                println!("Share: {}", result.share_text());
                return Ok(());
            }
        }
    }
}

async fn summary(app: &AppServices, sources: &SourceArgs, out: Option<&Path>) -> CommandResult {
    require_ai(app);
    let set = study_set(sources);
    let artifact = app
        .study()
        .generate(&set, GenerationKind::Summary, QuestionCount::default())
        .await?;
    let GeneratedArtifact::Summary(asset) = artifact else {
        return Ok(());
    };
    let AssetContent::Summary(markdown) = &asset.content else {
        return Ok(());
    };

    println!("{markdown}");
    if let Some(path) = out {
        write_file(path, &summary_document(&asset.label, markdown))?;
        println!();
        println!("Summary written to {}", path.display());
    }
    Ok(())
}

async fn flashcards(app: &AppServices, sources: &SourceArgs) -> CommandResult {
    require_ai(app);
    let set = study_set(sources);
    let artifact = app
        .study()
        .generate(&set, GenerationKind::Flashcards, QuestionCount::default())
        .await?;
    if let GeneratedArtifact::Flashcards(cards) = artifact {
        print!("{}", render_flashcards(&map_flashcards(&cards)));
    }
    Ok(())
}

async fn show_flashcards(app: &AppServices) -> CommandResult {
    let cards = app.study().flashcards().await?;
    print!("{}", render_flashcards(&map_flashcards(&cards)));
    Ok(())
}

async fn note(app: &AppServices, sources: &SourceArgs, out: &PathBuf, images: bool) -> CommandResult {
    require_ai(app);
    let study = app.study();
    let set = study_set(sources);
    let GeneratedArtifact::StudyNote(mut asset) = study
        .generate(&set, GenerationKind::StudyNote, QuestionCount::default())
        .await?
    else {
        return Ok(());
    };

    if images {
        let illustrated = match &asset.content {
            AssetContent::StudyNote(note) if !note.image_prompts().is_empty() => {
                println!("Generating {} illustrations...", note.image_prompts().len());
                Some(study.illustrate(&asset.label, note).await?)
            }
            _ => None,
        };
        if let Some(illustrated) = illustrated {
            asset = illustrated;
        }
    }

    let AssetContent::StudyNote(note) = &asset.content else {
        return Ok(());
    };
    write_file(out, &study_note_document(&asset.label, note))?;
    println!("Study note written to {}", out.display());
    Ok(())
}

async fn dashboard(app: &AppServices, limit: u32) -> CommandResult {
    let dashboard = app.dashboard();
    let stats = dashboard.stats().await?;
    let history = dashboard.history(limit).await?;
    print!("{}", render_dashboard(&map_dashboard(&stats, &history)));
    Ok(())
}

async fn settings(app: &AppServices, action: SettingsAction) -> CommandResult {
    let service = app.app_settings();
    let current = service.load().await?;

    let settings = match action {
        SettingsAction::Show => current,
        SettingsAction::Set {
            api_key,
            model,
            image_model,
            base_url,
            temperature,
            questions,
        } => {
            let mut draft = AppSettingsDraft::from_settings(&current);
            if api_key.is_some() {
                draft.api_key = api_key;
            }
            if model.is_some() {
                draft.api_model = model;
            }
            if image_model.is_some() {
                draft.image_model = image_model;
            }
            if base_url.is_some() {
                draft.api_base_url = base_url;
            }
            if temperature.is_some() {
                draft.temperature = temperature;
            }
            if questions.is_some() {
                draft.default_question_count = questions;
            }
            let saved = service.save(draft).await?;
            println!("Settings saved.");
            saved
        }
    };

    print!("{}", render_settings(&map_settings(&settings)));
    Ok(())
}

async fn reset(app: &AppServices, yes: bool) -> CommandResult {
    if !yes {
        let answer = read_answer(&format!("{RESET_WARNING} [y/N] "))?.unwrap_or_default();
        if !matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes") {
            println!("Nothing was deleted.");
            return Ok(());
        }
    }
    app.app_settings().clear_all_data().await?;
    println!("All stored data has been deleted.");
    Ok(())
}

fn write_file(path: &Path, contents: &str) -> io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, contents)
}
