//! User repository.

use chrono::{DateTime, Utc};

use desk_core::entities::User;
use desk_core::enums::Role;
use desk_core::ids::PREFIX_USER;

use crate::DeskDb;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, parse_datetime, parse_enum};

const SELECT_COLS: &str = "id, name, email, role, created_at, updated_at";

fn row_to_user(row: &libsql::Row) -> Result<User, DatabaseError> {
    Ok(User {
        id: row.get(0)?,
        name: row.get(1)?,
        email: row.get(2)?,
        role: parse_enum(&row.get::<String>(3)?)?,
        created_at: parse_datetime(&row.get::<String>(4)?)?,
        updated_at: parse_datetime(&row.get::<String>(5)?)?,
    })
}

impl DeskDb {
    pub async fn insert_user(
        &self,
        name: &str,
        email: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<User, DatabaseError> {
        let id = self.generate_id(PREFIX_USER).await?;
        let ts = format_datetime(now);

        self.conn()
            .execute(
                "INSERT INTO users (id, name, email, role, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![id.as_str(), name, email, role.as_str(), ts.as_str(), ts.as_str()],
            )
            .await?;

        Ok(User {
            id,
            name: name.to_string(),
            email: email.to_string(),
            role,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn find_user(&self, id: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM users WHERE id = ?1"), [id])
            .await?;
        rows.next().await?.as_ref().map(row_to_user).transpose()
    }

    pub async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM users WHERE email = ?1"),
                [email],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_user).transpose()
    }

    /// List users, optionally restricted to one role, ordered by name.
    pub async fn list_users(&self, role: Option<Role>) -> Result<Vec<User>, DatabaseError> {
        let mut rows = match role {
            Some(role) => {
                self.conn()
                    .query(
                        &format!("SELECT {SELECT_COLS} FROM users WHERE role = ?1 ORDER BY name"),
                        [role.as_str()],
                    )
                    .await?
            }
            None => {
                self.conn()
                    .query(&format!("SELECT {SELECT_COLS} FROM users ORDER BY name"), ())
                    .await?
            }
        };

        let mut users = Vec::new();
        while let Some(row) = rows.next().await? {
            users.push(row_to_user(&row)?);
        }
        Ok(users)
    }

    /// Change a user's role. Returns `None` if the user does not exist.
    pub async fn set_user_role(
        &self,
        id: &str,
        role: Role,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, DatabaseError> {
        let changed = self
            .conn()
            .execute(
                "UPDATE users SET role = ?1, updated_at = ?2 WHERE id = ?3",
                libsql::params![role.as_str(), format_datetime(now), id],
            )
            .await?;
        if changed == 0 {
            return Ok(None);
        }
        self.find_user(id).await
    }
}
