use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};

pub const DEFAULT_DB_URL: &str = "sqlite://study.sqlite3";

/// Turn PDFs into quizzes, summaries, flashcards and study notes.
#[derive(Debug, Parser)]
#[command(name = "study-ai", about, version)]
pub struct Cli {
    /// SQLite database URL or file path
    #[arg(long, global = true, env = "STUDY_DB_URL", default_value = DEFAULT_DB_URL)]
    pub db: String,

    /// More log output (-v info, -vv debug); STUDY_LOG overrides
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// PDFs plus an optional session name.
#[derive(Debug, Args)]
pub struct SourceArgs {
    /// PDF files to study from (other files are skipped)
    #[arg(value_name = "PDF", required = true)]
    pub files: Vec<PathBuf>,

    /// Session name. Default: the first file's name
    #[arg(long)]
    pub name: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a multiple-choice quiz and take it
    Quiz {
        #[command(flatten)]
        sources: SourceArgs,

        /// Number of questions (1-100). Default: the saved setting, else 20
        #[arg(long, short = 'n', value_parser = clap::value_parser!(u32).range(1..=100))]
        questions: Option<u32>,

        /// Only generate and store the quiz
        #[arg(long)]
        no_run: bool,
    },

    /// Take the stored quiz again
    Take,

    /// Generate a bullet-point summary
    Summary {
        #[command(flatten)]
        sources: SourceArgs,

        /// Also write the summary as an HTML page
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },

    /// Generate flashcards, or show the stored set
    Flashcards {
        /// PDF files to study from
        #[arg(
            value_name = "PDF",
            required_unless_present = "show",
            conflicts_with = "show"
        )]
        files: Vec<PathBuf>,

        /// Session name. Default: the first file's name
        #[arg(long, conflicts_with = "show")]
        name: Option<String>,

        /// Print the stored flashcards instead of generating new ones
        #[arg(long)]
        show: bool,
    },

    /// Generate a styled study note as a standalone HTML page
    Note {
        #[command(flatten)]
        sources: SourceArgs,

        /// Where to write the HTML page
        #[arg(long, value_name = "FILE")]
        out: PathBuf,

        /// Fill image placeholders with generated illustrations
        #[arg(long)]
        images: bool,
    },

    /// Show quiz statistics and history
    Dashboard {
        /// Maximum history rows
        #[arg(long, default_value_t = 50)]
        limit: u32,
    },

    /// Print a shareable line for the latest result
    Share,

    /// Show or change settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Permanently delete history, generated content and settings
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum SettingsAction {
    /// Print the current settings
    Show,

    /// Update settings; pass an empty string to clear a value
    Set {
        #[arg(long)]
        api_key: Option<String>,

        #[arg(long)]
        model: Option<String>,

        #[arg(long)]
        image_model: Option<String>,

        #[arg(long)]
        base_url: Option<String>,

        /// Sampling temperature (0-2)
        #[arg(long)]
        temperature: Option<f32>,

        /// Default questions per quiz (1-100)
        #[arg(long)]
        questions: Option<u32>,
    },
}
