//! Caller identity lookup.

use desk_core::errors::DeskError;
use desk_core::identity::SessionUser;

use crate::{DeskService, at_boundary};

impl DeskService {
    /// Resolve a caller's user id into a session identity.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` when no id is given or the id is unknown.
    pub async fn resolve_session(&self, user_id: Option<&str>) -> Result<SessionUser, DeskError> {
        let Some(user_id) = user_id.filter(|id| !id.trim().is_empty()) else {
            return Err(DeskError::Unauthenticated);
        };
        let user = self
            .db
            .find_user(user_id)
            .await
            .map_err(|e| at_boundary("resolve session", e.into()))?;
        user.map(|u| u.session()).ok_or(DeskError::Unauthenticated)
    }
}
