use desk_core::errors::DeskError;
use desk_core::payloads::RegisterPayload;

use super::Reply;
use crate::cli::GlobalFlags;
use crate::cli::commands::UserCommands;
use crate::context::AppContext;

/// Handle `desk user`.
pub async fn handle(
    action: UserCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> Result<Reply, DeskError> {
    match action {
        UserCommands::Register {
            name,
            email,
            password,
        } => {
            let payload = RegisterPayload {
                name: Some(name),
                email: Some(email),
                password: Some(password),
            };
            let user = ctx.service.register_user(&payload).await?;
            Reply::created(&user.session())
        }
        UserCommands::List => {
            let requester = ctx.session(flags).await?;
            let mut users = ctx.service.list_users(&requester).await?;
            users.truncate(ctx.limit(flags));
            Reply::ok(&users)
        }
        UserCommands::SetRole { id, role } => {
            let requester = ctx.session(flags).await?;
            let user = ctx.service.update_user_role(&id, &role, &requester).await?;
            Reply::ok(&user)
        }
    }
}
