//! Repository methods, implemented as `impl DeskDb` blocks per entity.

pub mod comment;
pub mod ticket;
pub mod user;

pub use comment::NewComment;
pub use ticket::NewTicket;
