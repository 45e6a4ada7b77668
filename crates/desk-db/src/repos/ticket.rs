//! Ticket repository: CRUD, filtered listing, stale lookup, versioned updates.

use chrono::{DateTime, Utc};

use desk_core::entities::Ticket;
use desk_core::enums::{TicketPriority, TicketStatus};
use desk_core::ids::PREFIX_TICKET;
use desk_core::payloads::TicketFilter;

use crate::DeskDb;
use crate::error::DatabaseError;
use crate::helpers::{format_datetime, get_opt_string, parse_datetime, parse_enum};
use crate::updates::ticket::TicketUpdate;

const SELECT_COLS: &str = "id, title, description, status, priority, created_by, assigned_to, \
                           image_url, version, created_at, updated_at";

fn row_to_ticket(row: &libsql::Row) -> Result<Ticket, DatabaseError> {
    Ok(Ticket {
        id: row.get(0)?,
        title: row.get(1)?,
        description: row.get(2)?,
        status: parse_enum(&row.get::<String>(3)?)?,
        priority: parse_enum(&row.get::<String>(4)?)?,
        created_by: row.get(5)?,
        assigned_to: get_opt_string(row, 6)?,
        image_url: get_opt_string(row, 7)?,
        version: row.get(8)?,
        created_at: parse_datetime(&row.get::<String>(9)?)?,
        updated_at: parse_datetime(&row.get::<String>(10)?)?,
    })
}

async fn collect_tickets(mut rows: libsql::Rows) -> Result<Vec<Ticket>, DatabaseError> {
    let mut tickets = Vec::new();
    while let Some(row) = rows.next().await? {
        tickets.push(row_to_ticket(&row)?);
    }
    Ok(tickets)
}

/// Fields supplied when a ticket is first stored.
#[derive(Debug, Clone)]
pub struct NewTicket<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub priority: TicketPriority,
    pub created_by: &'a str,
    pub image_url: Option<&'a str>,
}

impl DeskDb {
    /// Store a new ticket with status `open` and version 1.
    pub async fn insert_ticket(
        &self,
        new: NewTicket<'_>,
        now: DateTime<Utc>,
    ) -> Result<Ticket, DatabaseError> {
        let id = self.generate_id(PREFIX_TICKET).await?;
        let ts = format_datetime(now);

        self.conn()
            .execute(
                "INSERT INTO tickets (id, title, description, status, priority, created_by, image_url, version, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, 1, ?8, ?9)",
                libsql::params![
                    id.as_str(),
                    new.title,
                    new.description,
                    TicketStatus::Open.as_str(),
                    new.priority.as_str(),
                    new.created_by,
                    new.image_url.map_or(libsql::Value::Null, Into::into),
                    ts.as_str(),
                    ts.as_str()
                ],
            )
            .await?;

        Ok(Ticket {
            id,
            title: new.title.to_string(),
            description: new.description.to_string(),
            status: TicketStatus::Open,
            priority: new.priority,
            created_by: new.created_by.to_string(),
            assigned_to: None,
            image_url: new.image_url.map(String::from),
            version: 1,
            created_at: now,
            updated_at: now,
        })
    }

    pub async fn find_ticket(&self, id: &str) -> Result<Option<Ticket>, DatabaseError> {
        let mut rows = self
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM tickets WHERE id = ?1"),
                [id],
            )
            .await?;
        rows.next().await?.as_ref().map(row_to_ticket).transpose()
    }

    /// List tickets newest first.
    ///
    /// `created_by` scopes the result to one owner; `None` returns all owners.
    pub async fn list_tickets(
        &self,
        created_by: Option<&str>,
        filter: TicketFilter,
    ) -> Result<Vec<Ticket>, DatabaseError> {
        let mut clauses = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(owner) = created_by {
            params.push(owner.into());
            clauses.push(format!("created_by = ?{}", params.len()));
        }
        if let Some(status) = filter.status {
            params.push(status.as_str().into());
            clauses.push(format!("status = ?{}", params.len()));
        }
        if let Some(priority) = filter.priority {
            params.push(priority.as_str().into());
            clauses.push(format!("priority = ?{}", params.len()));
        }

        let where_sql = if clauses.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", clauses.join(" AND "))
        };
        let sql = format!("SELECT {SELECT_COLS} FROM tickets {where_sql} ORDER BY created_at DESC");
        let rows = self
            .conn()
            .query(&sql, libsql::params_from_iter(params))
            .await?;
        collect_tickets(rows).await
    }

    /// Active tickets (`open`, `in_progress`) last touched at or before `threshold`.
    pub async fn list_stale_tickets(
        &self,
        threshold: DateTime<Utc>,
    ) -> Result<Vec<Ticket>, DatabaseError> {
        let rows = self
            .conn()
            .query(
                &format!(
                    "SELECT {SELECT_COLS} FROM tickets \
                     WHERE status IN ('open', 'in_progress') AND updated_at <= ?1 \
                     ORDER BY updated_at"
                ),
                [format_datetime(threshold)],
            )
            .await?;
        collect_tickets(rows).await
    }

    /// Apply `update` to the ticket if it is still at `expected_version`.
    ///
    /// `updated_at` is refreshed and the version bumped even when `update`
    /// is empty.
    ///
    /// # Errors
    ///
    /// `NoResult` if the ticket is gone, `Conflict` if another write moved
    /// the version on.
    pub async fn update_ticket(
        &self,
        id: &str,
        expected_version: i64,
        update: &TicketUpdate,
        now: DateTime<Utc>,
    ) -> Result<Ticket, DatabaseError> {
        let mut sets = Vec::new();
        let mut params: Vec<libsql::Value> = Vec::new();

        if let Some(ref title) = update.title {
            params.push(title.clone().into());
            sets.push(format!("title = ?{}", params.len()));
        }
        if let Some(ref description) = update.description {
            params.push(description.clone().into());
            sets.push(format!("description = ?{}", params.len()));
        }
        if let Some(ref image_url) = update.image_url {
            params.push(image_url.clone().into());
            sets.push(format!("image_url = ?{}", params.len()));
        }
        if let Some(status) = update.status {
            params.push(status.as_str().into());
            sets.push(format!("status = ?{}", params.len()));
        }
        if let Some(priority) = update.priority {
            params.push(priority.as_str().into());
            sets.push(format!("priority = ?{}", params.len()));
        }
        if let Some(ref assigned_to) = update.assigned_to {
            params.push(assigned_to.clone().map_or(libsql::Value::Null, Into::into));
            sets.push(format!("assigned_to = ?{}", params.len()));
        }

        params.push(format_datetime(now).into());
        sets.push(format!("updated_at = ?{}", params.len()));
        sets.push("version = version + 1".to_string());

        params.push(id.into());
        let id_idx = params.len();
        params.push(expected_version.into());
        let version_idx = params.len();

        let sql = format!(
            "UPDATE tickets SET {} WHERE id = ?{id_idx} AND version = ?{version_idx}",
            sets.join(", ")
        );
        let changed = self
            .conn()
            .execute(&sql, libsql::params_from_iter(params))
            .await?;

        if changed == 0 {
            return match self.find_ticket(id).await? {
                Some(_) => Err(DatabaseError::Conflict {
                    entity: "ticket",
                    id: id.to_string(),
                }),
                None => Err(DatabaseError::NoResult),
            };
        }

        self.find_ticket(id).await?.ok_or(DatabaseError::NoResult)
    }

    /// Delete a ticket and (by cascade) its comments. Returns the deleted row.
    pub async fn delete_ticket(&self, id: &str) -> Result<Option<Ticket>, DatabaseError> {
        let Some(ticket) = self.find_ticket(id).await? else {
            return Ok(None);
        };
        self.conn()
            .execute("DELETE FROM tickets WHERE id = ?1", [id])
            .await?;
        Ok(Some(ticket))
    }
}
