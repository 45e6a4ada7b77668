use desk_core::errors::DeskError;
use desk_core::payloads::CommentPayload;

use super::Reply;
use crate::cli::GlobalFlags;
use crate::cli::commands::CommentCommands;
use crate::context::AppContext;

/// Handle `desk comment`.
pub async fn handle(
    action: CommentCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> Result<Reply, DeskError> {
    let requester = ctx.session(flags).await?;

    match action {
        CommentCommands::List { ticket_id } => {
            Reply::ok(&ctx.service.list_comments(&ticket_id, &requester).await?)
        }
        CommentCommands::Add { ticket_id, message } => {
            let payload = CommentPayload {
                message: Some(message),
            };
            Reply::created(&ctx.service.add_comment(&ticket_id, &payload, &requester).await?)
        }
    }
}
