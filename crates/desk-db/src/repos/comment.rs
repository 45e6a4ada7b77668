//! Comment repository.

use chrono::{DateTime, Utc};

use desk_core::entities::Comment;
use desk_core::enums::AuthorRole;
use desk_core::ids::PREFIX_COMMENT;

use crate::DeskDb;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, parse_datetime, parse_enum};

const SELECT_COLS: &str =
    "id, ticket_id, author_id, author_name, author_role, message, created_at, updated_at";

fn row_to_comment(row: &libsql::Row) -> Result<Comment, DatabaseError> {
    Ok(Comment {
        id: row.get(0)?,
        ticket_id: row.get(1)?,
        author_id: row.get(2)?,
        author_name: row.get(3)?,
        author_role: parse_enum(&row.get::<String>(4)?)?,
        message: row.get(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
        updated_at: parse_datetime(&row.get::<String>(7)?)?,
    })
}

/// A comment about to be stored. Author name and role are snapshots taken
/// at write time.
#[derive(Debug, Clone)]
pub struct NewComment<'a> {
    pub ticket_id: &'a str,
    pub author_id: &'a str,
    pub author_name: &'a str,
    pub author_role: AuthorRole,
    pub message: &'a str,
}

impl DeskDb {
    pub async fn insert_comment(
        &self,
        new: NewComment<'_>,
        now: DateTime<Utc>,
    ) -> Result<Comment, DatabaseError> {
        let id = self.generate_id(PREFIX_COMMENT).await?;
        let ts = format_datetime(now);

        self.conn()
            .execute(
                "INSERT INTO comments (id, ticket_id, author_id, author_name, author_role, message, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    id.as_str(),
                    new.ticket_id,
                    new.author_id,
                    new.author_name,
                    new.author_role.as_str(),
                    new.message,
                    ts.as_str(),
                    ts.as_str()
                ],
            )
            .await?;

        Ok(Comment {
            id,
            ticket_id: new.ticket_id.to_string(),
            author_id: new.author_id.to_string(),
            author_name: new.author_name.to_string(),
            author_role: new.author_role,
            message: new.message.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Comments on a ticket, oldest first.
    pub async fn list_comments(&self, ticket_id: &str) -> Result<Vec<Comment>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM comments WHERE ticket_id = ?1 \
                     ORDER BY created_at ASC, rowid ASC"
                ),
                [ticket_id],
            )
            .await?;

        let mut comments = Vec::new();
        while let Some(row) = rows.next().await? {
            comments.push(row_to_comment(&row)?);
        }
        Ok(comments)
    }

    /// Most recent comment on a ticket, if any.
    pub async fn latest_comment(&self, ticket_id: &str) -> Result<Option<Comment>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM comments WHERE ticket_id = ?1 \
                     ORDER BY created_at DESC, rowid DESC LIMIT 1"
                ),
                [ticket_id],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_comment).transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repos::NewTicket;
    use crate::test_support::helpers::{t0, test_db};
    use chrono::Duration;
    use desk_core::enums::TicketPriority;
    use pretty_assertions::assert_eq;

    async fn seed_ticket(db: &DeskDb) -> String {
        db.insert_ticket(
            NewTicket {
                title: "Printer jam",
                description: "Tray 2",
                priority: TicketPriority::Medium,
                created_by: "usr-1",
                image_url: None,
            },
            t0(),
        )
        .await
        .unwrap()
        .id
    }

    fn comment<'a>(ticket_id: &'a str, role: AuthorRole, message: &'a str) -> NewComment<'a> {
        NewComment {
            ticket_id,
            author_id: "usr-1",
            author_name: "Ada",
            author_role: role,
            message,
        }
    }

    #[tokio::test]
    async fn comments_list_oldest_first_regardless_of_insert_order() {
        let db = test_db().await;
        let ticket_id = seed_ticket(&db).await;

        db.insert_comment(comment(&ticket_id, AuthorRole::Client, "C1"), t0() + Duration::minutes(1))
            .await
            .unwrap();
        db.insert_comment(comment(&ticket_id, AuthorRole::Agent, "C2"), t0() + Duration::minutes(2))
            .await
            .unwrap();
        db.insert_comment(comment(&ticket_id, AuthorRole::Client, "C3"), t0())
            .await
            .unwrap();

        let messages: Vec<_> = db
            .list_comments(&ticket_id)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.message)
            .collect();
        assert_eq!(messages, vec!["C3", "C1", "C2"]);
    }

    #[tokio::test]
    async fn latest_comment_is_newest() {
        let db = test_db().await;
        let ticket_id = seed_ticket(&db).await;
        assert!(db.latest_comment(&ticket_id).await.unwrap().is_none());

        db.insert_comment(comment(&ticket_id, AuthorRole::Agent, "first"), t0())
            .await
            .unwrap();
        db.insert_comment(comment(&ticket_id, AuthorRole::Client, "second"), t0() + Duration::hours(1))
            .await
            .unwrap();

        let latest = db.latest_comment(&ticket_id).await.unwrap().unwrap();
        assert_eq!(latest.message, "second");
        assert_eq!(latest.author_role, AuthorRole::Client);
    }

    #[tokio::test]
    async fn comment_requires_existing_ticket() {
        let db = test_db().await;
        let result = db
            .insert_comment(comment("tkt-missing0", AuthorRole::Client, "hi"), t0())
            .await;
        assert!(result.is_err(), "foreign key should reject orphan comments");
    }

    #[tokio::test]
    async fn deleting_ticket_cascades_to_comments() {
        let db = test_db().await;
        let ticket_id = seed_ticket(&db).await;
        db.insert_comment(comment(&ticket_id, AuthorRole::Client, "bye"), t0())
            .await
            .unwrap();

        db.delete_ticket(&ticket_id).await.unwrap();
        assert!(db.list_comments(&ticket_id).await.unwrap().is_empty());
    }
}
