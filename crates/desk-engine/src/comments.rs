//! Comment thread operations.

use desk_core::entities::Comment;
use desk_core::enums::AuthorRole;
use desk_core::errors::DeskError;
use desk_core::identity::SessionUser;
use desk_core::payloads::CommentPayload;
use desk_core::roles::is_agent_or_admin;
use desk_core::validation::validate_comment_input;
use desk_db::repos::NewComment;
use desk_notify::Notification;

use crate::{DeskService, at_boundary};

const TICKET_NOT_FOUND: &str = "Ticket not found";

impl DeskService {
    /// A ticket's comments, oldest first.
    ///
    /// # Errors
    ///
    /// `NotFound("Ticket not found")` or `Forbidden`, as for reading the ticket.
    pub async fn list_comments(
        &self,
        ticket_id: &str,
        requester: &SessionUser,
    ) -> Result<Vec<Comment>, DeskError> {
        self.list_comments_inner(ticket_id, requester)
            .await
            .map_err(|e| at_boundary("load comments", e))
    }

    async fn list_comments_inner(
        &self,
        ticket_id: &str,
        requester: &SessionUser,
    ) -> Result<Vec<Comment>, DeskError> {
        let ticket = self
            .load_accessible_ticket(ticket_id, requester, TICKET_NOT_FOUND)
            .await?;
        Ok(self.db.list_comments(&ticket.id).await?)
    }

    /// Append a comment stamped with the caller's name and role.
    ///
    /// When staff comment, the ticket owner is notified. Client comments
    /// notify nobody.
    ///
    /// # Errors
    ///
    /// `Validation` for a blank message (checked before the ticket is
    /// loaded), then `NotFound("Ticket not found")` or `Forbidden`.
    pub async fn add_comment(
        &self,
        ticket_id: &str,
        payload: &CommentPayload,
        requester: &SessionUser,
    ) -> Result<Comment, DeskError> {
        self.add_comment_inner(ticket_id, payload, requester)
            .await
            .map_err(|e| at_boundary("add comment", e))
    }

    async fn add_comment_inner(
        &self,
        ticket_id: &str,
        payload: &CommentPayload,
        requester: &SessionUser,
    ) -> Result<Comment, DeskError> {
        validate_comment_input(payload)?;
        let ticket = self
            .load_accessible_ticket(ticket_id, requester, TICKET_NOT_FOUND)
            .await?;

        let comment = self
            .db
            .insert_comment(
                NewComment {
                    ticket_id: &ticket.id,
                    author_id: &requester.id,
                    author_name: &requester.name,
                    author_role: AuthorRole::from(requester.role),
                    message: payload.message.as_deref().unwrap_or_default(),
                },
                self.now(),
            )
            .await?;
        tracing::info!(
            ticket_id = %ticket.id,
            comment_id = %comment.id,
            author_role = %comment.author_role,
            "comment added"
        );

        if is_agent_or_admin(requester.role) {
            self.notify_owner(&ticket, |to| Notification::AgentComment {
                to,
                title: ticket.title.clone(),
                agent_name: requester.name.clone(),
            })
            .await;
        }
        Ok(comment)
    }
}
