use serde::Serialize;

use desk_core::errors::DeskError;

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

pub mod comment;
pub mod reminders;
pub mod ticket;
pub mod user;

/// A successful command result: JSON payload plus its HTTP-class status.
#[derive(Debug)]
pub struct Reply {
    pub data: serde_json::Value,
    pub status: u16,
}

impl Reply {
    pub fn ok<T: Serialize>(value: &T) -> Result<Self, DeskError> {
        Self::with_status(value, 200)
    }

    pub fn created<T: Serialize>(value: &T) -> Result<Self, DeskError> {
        Self::with_status(value, 201)
    }

    fn with_status<T: Serialize>(value: &T, status: u16) -> Result<Self, DeskError> {
        let data = serde_json::to_value(value).map_err(DeskError::internal)?;
        Ok(Self { data, status })
    }
}

/// Dispatch a parsed command to its handler module.
pub async fn dispatch(
    command: Commands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> Result<Reply, DeskError> {
    match command {
        Commands::User { action } => user::handle(action, ctx, flags).await,
        Commands::Ticket { action } => ticket::handle(action, ctx, flags).await,
        Commands::Comment { action } => comment::handle(action, ctx, flags).await,
        Commands::Reminders { action } => reminders::handle(action, ctx).await,
    }
}
