use crate::context::AppContext;
use crate::error::AppResult;
use crate::workflow::message::{MessageOptions, MessageWorkflowOutcome, generate_from_changes};

#[derive(Debug, Clone)]
pub struct MessageCommandArgs {
    pub offline: bool,
    pub no_scope: bool,
}

pub async fn run(
    ctx: &AppContext,
    args: MessageCommandArgs,
) -> AppResult<Option<MessageWorkflowOutcome>> {
    let options = MessageOptions {
        offline: args.offline,
        include_scope: ctx.config.include_scope && !args.no_scope,
    };
    generate_from_changes(ctx, options).await
}
