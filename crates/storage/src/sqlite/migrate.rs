use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use super::SqliteInitError;

const SCHEMA_V1: &[&str] = &[
    r"
        CREATE TABLE IF NOT EXISTS quiz_results (
            id INTEGER PRIMARY KEY,
            session_label TEXT NOT NULL,
            score INTEGER NOT NULL CHECK (score >= 0),
            total_questions INTEGER NOT NULL CHECK (total_questions >= 0),
            percentage INTEGER NOT NULL CHECK (percentage BETWEEN 0 AND 100),
            completed_at TEXT NOT NULL,
            CHECK (score <= total_questions)
        );
    ",
    r"
        CREATE INDEX IF NOT EXISTS idx_quiz_results_completed
            ON quiz_results (completed_at, id);
    ",
    r"
        CREATE TABLE IF NOT EXISTS current_quiz (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            label TEXT NOT NULL,
            saved_at TEXT NOT NULL
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS current_quiz_questions (
            position INTEGER PRIMARY KEY,
            quiz_id INTEGER NOT NULL DEFAULT 1,
            question TEXT NOT NULL,
            options TEXT NOT NULL,
            answer TEXT NOT NULL,
            FOREIGN KEY (quiz_id) REFERENCES current_quiz(id) ON DELETE CASCADE
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS flashcards (
            position INTEGER PRIMARY KEY,
            term TEXT NOT NULL,
            definition TEXT NOT NULL
        );
    ",
    r"
        CREATE TABLE IF NOT EXISTS study_assets (
            id INTEGER PRIMARY KEY,
            kind TEXT NOT NULL CHECK (kind IN ('summary', 'study_note')),
            label TEXT NOT NULL,
            body TEXT NOT NULL,
            css TEXT,
            created_at TEXT NOT NULL
        );
    ",
    r"
        CREATE INDEX IF NOT EXISTS idx_study_assets_kind_created
            ON study_assets (kind, created_at, id);
    ",
    r"
        CREATE TABLE IF NOT EXISTS app_settings (
            id INTEGER PRIMARY KEY CHECK (id = 1),
            api_key TEXT,
            api_model TEXT,
            image_model TEXT,
            api_base_url TEXT,
            temperature REAL,
            default_question_count INTEGER
        );
    ",
];

/// Applies pending schema versions, tracked in `schema_migrations`.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;
        for statement in SCHEMA_V1 {
            sqlx::query(*statement).execute(&mut *tx).await?;
        }

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(version = 1, "applied schema migration");
    }

    Ok(())
}
