//! Pure payload validators.
//!
//! Every function is total: it inspects the payload and returns a result,
//! never panics, never touches storage.

use crate::enums::{Role, TicketStatus};
use crate::errors::{
    MSG_COMMENT_REQUIRED, MSG_REGISTER_REQUIRED, MSG_TICKET_REQUIRED, ValidationError,
};
use crate::payloads::{
    CommentPayload, NewTicketPayload, RegisterPayload, TicketUpdatePayload, provided,
    provided_trimmed,
};
use crate::roles::is_agent_or_admin;

/// Name, email, and password must all be present and non-empty.
///
/// # Errors
///
/// Returns `ValidationError::MissingFields` when any of them is missing.
pub fn validate_register_input(payload: &RegisterPayload) -> Result<(), ValidationError> {
    if provided(payload.name.as_deref())
        && provided(payload.email.as_deref())
        && provided(payload.password.as_deref())
    {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(MSG_REGISTER_REQUIRED))
    }
}

/// Title and description must be non-blank after trimming.
///
/// # Errors
///
/// Returns `ValidationError::MissingFields` when either is blank.
pub fn validate_ticket_input(payload: &NewTicketPayload) -> Result<(), ValidationError> {
    if provided_trimmed(payload.title.as_deref())
        && provided_trimmed(payload.description.as_deref())
    {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(MSG_TICKET_REQUIRED))
    }
}

/// The message must be non-blank after trimming.
///
/// # Errors
///
/// Returns `ValidationError::MissingFields` when the message is blank.
pub fn validate_comment_input(payload: &CommentPayload) -> Result<(), ValidationError> {
    if provided_trimmed(payload.message.as_deref()) {
        Ok(())
    } else {
        Err(ValidationError::MissingFields(MSG_COMMENT_REQUIRED))
    }
}

/// Decide whether `role` may submit `payload` against a ticket in `current_status`.
///
/// Staff always pass. For clients the checks run in a fixed order and the
/// first failure wins: status gate, then emptiness, then managed fields.
///
/// # Errors
///
/// Returns `TicketNotEditable`, `NoOpUpdate`, or `ForbiddenFieldChange`.
pub fn validate_ticket_update(
    payload: &TicketUpdatePayload,
    role: Role,
    current_status: TicketStatus,
) -> Result<(), ValidationError> {
    if is_agent_or_admin(role) {
        return Ok(());
    }

    if current_status != TicketStatus::Open {
        return Err(ValidationError::TicketNotEditable);
    }

    if !payload.has_content_change() {
        return Err(ValidationError::NoOpUpdate);
    }

    if payload.touches_managed_fields() {
        return Err(ValidationError::ForbiddenFieldChange);
    }

    Ok(())
}
