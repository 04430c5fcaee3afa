//! PDF loading and text extraction.

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use study_core::model::SourceDocument;

use crate::error::PdfError;

/// Outcome of loading a batch of files: what worked and what did not.
#[derive(Debug, Default)]
pub struct SourceLoadReport {
    pub documents: Vec<SourceDocument>,
    pub skipped: Vec<PathBuf>,
    pub failures: Vec<PdfError>,
}

impl SourceLoadReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Whether the file name carries a `.pdf` extension (any case).
#[must_use]
pub fn is_pdf(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"))
}

/// Extracts the text of an in-memory PDF.
///
/// Pages are trimmed, empty pages dropped, and the rest joined with a blank
/// line.
///
/// # Errors
///
/// Returns `PdfError::Extract` when the bytes are not a readable PDF.
pub fn extract_pdf_bytes(name: &str, bytes: &[u8]) -> Result<SourceDocument, PdfError> {
    let pages = pdf_extract::extract_text_from_mem_by_pages(bytes).map_err(|e| {
        PdfError::Extract {
            name: name.to_owned(),
            reason: e.to_string(),
        }
    })?;

    let pages: Vec<&str> = pages
        .iter()
        .map(|page| page.trim())
        .filter(|page| !page.is_empty())
        .collect();
    debug!(name, pages = pages.len(), "extracted pdf text");

    Ok(SourceDocument::new(
        name,
        pages.join("\n\n"),
        bytes.len() as u64,
    ))
}

/// Loads every PDF in `paths`; other files are skipped.
///
/// A file that cannot be read or parsed is recorded in `failures` and the
/// rest of the batch continues.
#[must_use]
pub fn load_sources<P: AsRef<Path>>(paths: &[P]) -> SourceLoadReport {
    let mut report = SourceLoadReport::default();

    for path in paths {
        let path = path.as_ref();
        if !is_pdf(path) {
            debug!(path = %path.display(), "skipping non-pdf file");
            report.skipped.push(path.to_path_buf());
            continue;
        }

        let name = path
            .file_name()
            .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());

        let loaded = std::fs::read(path)
            .map_err(|source| PdfError::Io {
                name: name.clone(),
                source,
            })
            .and_then(|bytes| extract_pdf_bytes(&name, &bytes));

        match loaded {
            Ok(doc) => report.documents.push(doc),
            Err(err) => {
                warn!(error = %err, "failed to load source");
                report.failures.push(err);
            }
        }
    }

    info!(
        loaded = report.documents.len(),
        skipped = report.skipped.len(),
        failed = report.failures.len(),
        "loaded study sources"
    );
    report
}
