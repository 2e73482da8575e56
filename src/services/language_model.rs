use async_trait::async_trait;

use crate::domain::change::DiffSummary;
use crate::domain::message::CommitMessage;
use crate::error::AppResult;

#[async_trait]
pub trait LanguageModelService: Send + Sync {
    async fn generate_commit_message(&self, changes: &DiffSummary) -> AppResult<CommitMessage>;
}
