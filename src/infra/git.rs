use std::path::PathBuf;
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;

use crate::domain::change::{DiffSummary, parse_stat, truncate_diff};
use crate::error::{AppError, AppResult};
use crate::services::VersionControlService;

pub struct GitCli {
    workspace_root: PathBuf,
}

impl GitCli {
    pub fn new(workspace_root: PathBuf) -> Self {
        Self { workspace_root }
    }

    // A non-zero exit reads as empty output; only a git binary that cannot
    // be spawned is a hard failure.
    async fn run_git(&self, args: &[&str]) -> AppResult<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.workspace_root)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|err| AppError::VersionControl(format!("failed to run git: {err}")))?;

        if !output.status.success() {
            return Ok(String::new());
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

#[async_trait]
impl VersionControlService for GitCli {
    async fn collect_changes(&self, max_diff_chars: usize) -> AppResult<Option<DiffSummary>> {
        // Staged changes win; otherwise fall back to the working tree.
        let mut diff = self.run_git(&["diff", "--cached"]).await?;
        let mut stat = self.run_git(&["diff", "--cached", "--stat"]).await?;

        if diff.is_empty() {
            diff = self.run_git(&["diff"]).await?;
            stat = self.run_git(&["diff", "--stat"]).await?;
        }

        if diff.is_empty() {
            return Ok(None);
        }

        let files = parse_stat(&stat);

        Ok(Some(DiffSummary {
            diff: truncate_diff(&diff, max_diff_chars),
            stat,
            files,
        }))
    }
}
