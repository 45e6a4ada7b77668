//! Business error taxonomy for the helpdesk.
//!
//! `DeskError` is what every engine operation returns. Storage and transport
//! crates keep their own error enums; they surface here only as
//! [`DeskError::Internal`], whose `Display` never includes the source.

use thiserror::Error;

pub const MSG_REGISTER_REQUIRED: &str = "Name, email, and password are required";
pub const MSG_TICKET_REQUIRED: &str = "Title and description are required";
pub const MSG_COMMENT_REQUIRED: &str = "Message is required";

/// A payload was rejected before any mutation happened.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Required fields are absent or blank.
    #[error("{0}")]
    MissingFields(&'static str),

    /// A client update carried nothing a client may change.
    #[error("Nothing to update")]
    NoOpUpdate,

    /// A client tried to edit a ticket that is no longer open.
    #[error("Clients can only edit open tickets")]
    TicketNotEditable,

    /// A client tried to touch status, priority, or assignment.
    #[error("Clients cannot change status or assignment")]
    ForbiddenFieldChange,

    /// Any other rejected value (unknown role, duplicate email, ...).
    #[error("{0}")]
    Invalid(String),
}

impl ValidationError {
    /// HTTP-class status: 403 when the message concerns clients, else 400.
    #[must_use]
    pub fn status_code(&self) -> u16 {
        if self.to_string().to_lowercase().contains("client") {
            403
        } else {
            400
        }
    }
}

/// Errors returned by engine operations.
#[derive(Debug, Error)]
pub enum DeskError {
    /// No valid session accompanied the request.
    #[error("Unauthorized")]
    Unauthenticated,

    /// Authenticated, but the role or ownership check failed.
    #[error("{0}")]
    Forbidden(String),

    /// The referenced entity does not exist.
    #[error("{0}")]
    NotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The ticket was written by someone else between load and save.
    #[error("Ticket was changed by another request; reload and retry")]
    Conflict,

    /// Unexpected storage or transport fault. The message is safe to show.
    #[error("{message}")]
    Internal {
        message: String,
        #[source]
        source: anyhow::Error,
    },
}

impl DeskError {
    #[must_use]
    pub fn forbidden() -> Self {
        Self::Forbidden("Forbidden".into())
    }

    #[must_use]
    pub fn not_found() -> Self {
        Self::NotFound("Not found".into())
    }

    pub fn internal(source: impl Into<anyhow::Error>) -> Self {
        Self::Internal {
            message: "Operation failed".into(),
            source: source.into(),
        }
    }

    /// Replace an internal error's message with `Unable to {operation}`.
    /// Other variants pass through untouched.
    #[must_use]
    pub fn for_operation(self, operation: &str) -> Self {
        match self {
            Self::Internal { source, .. } => Self::Internal {
                message: format!("Unable to {operation}"),
                source,
            },
            other => other,
        }
    }

    #[must_use]
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Unauthenticated => 401,
            Self::Forbidden(_) => 403,
            Self::NotFound(_) => 404,
            Self::Validation(e) => e.status_code(),
            Self::Conflict => 409,
            Self::Internal { .. } => 500,
        }
    }
}
