//! Entity structs for all helpdesk domain objects.
//!
//! JSON field names are camelCase to match the public API shape.

mod comment;
mod ticket;
mod user;

pub use comment::Comment;
pub use ticket::Ticket;
pub use user::User;
