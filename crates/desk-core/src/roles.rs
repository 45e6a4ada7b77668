//! Role capability predicates.
//!
//! Roles are a flat tag; capabilities are computed from the tag. Agent and
//! admin hold identical ticket privileges.

use crate::enums::Role;

#[must_use]
pub const fn is_agent_or_admin(role: Role) -> bool {
    matches!(role, Role::Agent | Role::Admin)
}

#[must_use]
pub const fn is_client(role: Role) -> bool {
    matches!(role, Role::Client)
}

#[must_use]
pub const fn is_admin(role: Role) -> bool {
    matches!(role, Role::Admin)
}

/// Whether `role`/`user_id` may read or write the ticket owned by `owner_id`.
///
/// Staff may access every ticket; anyone else only their own.
#[must_use]
pub fn can_access_ticket(role: Role, user_id: &str, owner_id: &str) -> bool {
    is_agent_or_admin(role) || owner_id == user_id
}
