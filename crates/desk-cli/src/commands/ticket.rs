use desk_core::enums::{TicketPriority, TicketStatus};
use desk_core::errors::{DeskError, ValidationError};
use desk_core::payloads::{NewTicketPayload, TicketFilter, TicketUpdatePayload};

use super::Reply;
use crate::cli::GlobalFlags;
use crate::cli::commands::TicketCommands;
use crate::context::AppContext;

/// Handle `desk ticket`.
pub async fn handle(
    action: TicketCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> Result<Reply, DeskError> {
    let requester = ctx.session(flags).await?;

    match action {
        TicketCommands::Create {
            title,
            description,
            priority,
            image_url,
        } => {
            let payload = NewTicketPayload {
                title: Some(title),
                description: Some(description),
                priority,
                image_url,
            };
            let ticket = ctx.service.create_ticket(&payload, &requester).await?;
            Reply::created(&ticket)
        }
        TicketCommands::Get { id } => Reply::ok(&ctx.service.get_ticket(&id, &requester).await?),
        TicketCommands::List { status, priority } => {
            let filter = parse_filter(status.as_deref(), priority.as_deref())?;
            let mut tickets = ctx.service.list_tickets(&requester, filter).await?;
            tickets.truncate(ctx.limit(flags));
            Reply::ok(&tickets)
        }
        TicketCommands::Update {
            id,
            title,
            description,
            image_url,
            status,
            priority,
            assign,
            unassign,
        } => {
            let assigned_to = if unassign { Some(None) } else { assign.map(Some) };
            let payload = TicketUpdatePayload {
                title,
                description,
                image_url,
                status,
                priority,
                assigned_to,
            };
            Reply::ok(&ctx.service.update_ticket(&id, &payload, &requester).await?)
        }
        TicketCommands::Delete { id } => {
            Reply::ok(&ctx.service.delete_ticket(&id, &requester).await?)
        }
    }
}

fn parse_filter(status: Option<&str>, priority: Option<&str>) -> Result<TicketFilter, DeskError> {
    let status = status
        .map(|s| {
            TicketStatus::parse(s)
                .ok_or_else(|| ValidationError::Invalid(format!("Unknown status '{s}'")))
        })
        .transpose()?;
    let priority = priority
        .map(|p| {
            TicketPriority::parse(p)
                .ok_or_else(|| ValidationError::Invalid(format!("Unknown priority '{p}'")))
        })
        .transpose()?;
    Ok(TicketFilter { status, priority })
}
