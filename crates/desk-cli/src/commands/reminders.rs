use desk_core::errors::DeskError;

use super::Reply;
use crate::cli::commands::ReminderCommands;
use crate::context::AppContext;

/// Handle `desk reminders`. Authorized by shared secret, not by session.
pub async fn handle(action: ReminderCommands, ctx: &AppContext) -> Result<Reply, DeskError> {
    match action {
        ReminderCommands::Scan { secret } => {
            ctx.service.authorize_scan(secret.as_deref())?;
            Reply::ok(&ctx.service.scan_stale_tickets().await?)
        }
    }
}
