use crate::context::AppContext;
use crate::domain::message::{CommitMessage, fallback_message};
use crate::error::AppResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageSource {
    LanguageModel,
    Fallback,
}

pub struct MessageWorkflowOutcome {
    pub message: CommitMessage,
    pub source: MessageSource,
}

#[derive(Debug, Clone, Copy)]
pub struct MessageOptions {
    pub offline: bool,
    pub include_scope: bool,
}

/// Runs one generation cycle: collect pending changes, ask the language
/// model when enabled, synthesize the heuristic message otherwise. A model
/// failure never surfaces; the fallback guarantees a message whenever any
/// change exists.
pub async fn generate_from_changes(
    ctx: &AppContext,
    options: MessageOptions,
) -> AppResult<Option<MessageWorkflowOutcome>> {
    let Some(changes) = ctx
        .version_control
        .collect_changes(ctx.config.max_diff_chars)
        .await?
    else {
        return Ok(None);
    };

    if ctx.config.enable_gemini && !options.offline {
        // An empty reply counts as a failure, same as an unreachable API.
        match ctx.language_model.generate_commit_message(&changes).await {
            Ok(message) if !message.as_str().is_empty() => {
                return Ok(Some(MessageWorkflowOutcome {
                    message,
                    source: MessageSource::LanguageModel,
                }));
            }
            _ => {}
        }
    }

    Ok(Some(MessageWorkflowOutcome {
        message: fallback_message(&changes.files, options.include_scope),
        source: MessageSource::Fallback,
    }))
}
