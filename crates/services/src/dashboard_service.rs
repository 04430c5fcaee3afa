use std::sync::Arc;

use study_core::dashboard::DashboardStats;
use study_core::model::QuizResult;
use storage::repository::{QuizResultRepository, StorageError};

/// Every stored result is read for the aggregate figures.
const ALL_RESULTS: u32 = u32::MAX;

#[derive(Clone)]
pub struct DashboardService {
    results: Arc<dyn QuizResultRepository>,
}

impl DashboardService {
    #[must_use]
    pub fn new(results: Arc<dyn QuizResultRepository>) -> Self {
        Self { results }
    }

    /// Aggregate stats over the whole history.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    pub async fn stats(&self) -> Result<DashboardStats, StorageError> {
        let history = self.results.list_results(ALL_RESULTS).await?;
        Ok(DashboardStats::from_history(&history))
    }

    /// Newest-first results, at most `limit`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on repository failures.
    pub async fn history(&self, limit: u32) -> Result<Vec<QuizResult>, StorageError> {
        self.results.list_results(limit).await
    }
}
