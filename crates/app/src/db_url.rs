use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum DbUrlError {
    Empty,
    Invalid { raw: String },
}

impl fmt::Display for DbUrlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DbUrlError::Empty => write!(f, "--db requires a value"),
            DbUrlError::Invalid { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for DbUrlError {}

/// Accepts `sqlite://...`, `sqlite:path` or a bare path; relative paths
/// resolve against the working directory.
///
/// # Errors
///
/// Returns `DbUrlError::Empty` for a blank value.
pub fn normalize_sqlite_url(raw: &str) -> Result<String, DbUrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(DbUrlError::Empty);
    }
    if trimmed == "sqlite::memory:" || trimmed.starts_with("sqlite://") {
        return Ok(trimmed.to_owned());
    }

    let path = Path::new(trimmed.strip_prefix("sqlite:").unwrap_or(trimmed));
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    Ok(format!("sqlite://{}", absolute.display()))
}

/// Create the database file (and its directory) so `SQLite` can open it.
///
/// # Errors
///
/// Returns an error for malformed URLs or when the file cannot be created.
pub fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| DbUrlError::Invalid {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(DbUrlError::Invalid {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn urls_pass_through() {
        assert_eq!(
            normalize_sqlite_url("sqlite://study.sqlite3").unwrap(),
            "sqlite://study.sqlite3"
        );
        assert_eq!(
            normalize_sqlite_url("sqlite::memory:").unwrap(),
            "sqlite::memory:"
        );
    }

    #[test]
    fn paths_become_absolute_urls() {
        let url = normalize_sqlite_url("data/study.db").unwrap();
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/study.db"));

        let url = normalize_sqlite_url("sqlite:/tmp/x.db").unwrap();
        assert_eq!(url, "sqlite:///tmp/x.db");
    }

    #[test]
    fn blank_is_rejected() {
        assert!(matches!(normalize_sqlite_url("  "), Err(DbUrlError::Empty)));
    }

    #[test]
    fn prepare_creates_missing_file() {
        let dir = std::env::temp_dir().join(format!("study-ai-db-{}", std::process::id()));
        let file = dir.join("nested").join("study.sqlite3");
        prepare_sqlite_file(&format!("sqlite://{}", file.display())).unwrap();
        assert!(file.exists());
        std::fs::remove_dir_all(&dir).ok();

        assert!(prepare_sqlite_file("postgres://nope").is_err());
    }
}
