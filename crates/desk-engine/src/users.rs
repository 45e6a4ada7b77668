//! Registration and the user directory.

use desk_core::entities::User;
use desk_core::enums::Role;
use desk_core::errors::{DeskError, ValidationError};
use desk_core::identity::SessionUser;
use desk_core::payloads::RegisterPayload;
use desk_core::roles::{is_admin, is_agent_or_admin};
use desk_core::validation::validate_register_input;

use crate::{DeskService, at_boundary};

impl DeskService {
    /// Create a client-role account.
    ///
    /// The password is only checked for presence; credential storage
    /// belongs to the identity provider.
    ///
    /// # Errors
    ///
    /// `Validation` when a field is missing or the email is taken.
    pub async fn register_user(&self, payload: &RegisterPayload) -> Result<User, DeskError> {
        self.register_user_inner(payload)
            .await
            .map_err(|e| at_boundary("register user", e))
    }

    async fn register_user_inner(&self, payload: &RegisterPayload) -> Result<User, DeskError> {
        validate_register_input(payload)?;
        let name = payload.name.as_deref().unwrap_or_default();
        let email = payload.email.as_deref().unwrap_or_default();

        if self.db.find_user_by_email(email).await?.is_some() {
            return Err(ValidationError::Invalid("Email is already in use.".into()).into());
        }

        let user = self.db.insert_user(name, email, Role::Client, self.now()).await?;
        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    /// Users visible to the caller: admins see everyone, agents see agents.
    ///
    /// # Errors
    ///
    /// `Forbidden` for clients.
    pub async fn list_users(&self, requester: &SessionUser) -> Result<Vec<SessionUser>, DeskError> {
        if !is_agent_or_admin(requester.role) {
            return Err(DeskError::forbidden());
        }
        let role = (!is_admin(requester.role)).then_some(Role::Agent);
        let users = self
            .db
            .list_users(role)
            .await
            .map_err(|e| at_boundary("load users", e.into()))?;
        Ok(users.iter().map(User::session).collect())
    }

    /// Change a user's role. Admin only.
    ///
    /// # Errors
    ///
    /// `Forbidden` for non-admins, `Invalid("Invalid role")` for an unknown
    /// role name, `NotFound("User not found")` for an unknown id.
    pub async fn update_user_role(
        &self,
        user_id: &str,
        role: &str,
        requester: &SessionUser,
    ) -> Result<SessionUser, DeskError> {
        self.update_user_role_inner(user_id, role, requester)
            .await
            .map_err(|e| at_boundary("update user role", e))
    }

    async fn update_user_role_inner(
        &self,
        user_id: &str,
        role: &str,
        requester: &SessionUser,
    ) -> Result<SessionUser, DeskError> {
        if !is_admin(requester.role) {
            return Err(DeskError::forbidden());
        }
        let role = Role::parse(role).ok_or_else(|| ValidationError::Invalid("Invalid role".into()))?;

        let user = self
            .db
            .set_user_role(user_id, role, self.now())
            .await?
            .ok_or_else(|| DeskError::NotFound("User not found".into()))?;
        tracing::info!(user_id = %user.id, role = %role, by = %requester.id, "user role changed");
        Ok(user.session())
    }
}
