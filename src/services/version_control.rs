use async_trait::async_trait;

use crate::domain::change::DiffSummary;
use crate::error::AppResult;

#[async_trait]
pub trait VersionControlService: Send + Sync {
    /// Collects the pending diff, its stat, and the parsed file changes.
    /// `None` means the repository has nothing to commit.
    async fn collect_changes(&self, max_diff_chars: usize) -> AppResult<Option<DiffSummary>>;
}
