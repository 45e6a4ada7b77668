//! Stale-ticket reminder scan.
//!
//! An active ticket untouched for the reminder window, whose latest comment
//! is not from an agent and which has an assignee on record, earns that
//! assignee one `AgentReminder`. The scan never writes to tickets.

use chrono::{DateTime, Duration, Utc};
use desk_core::enums::AuthorRole;
use desk_core::errors::DeskError;
use desk_core::responses::ScanSummary;
use desk_notify::Notification;

use crate::{DeskService, at_boundary};

/// Check the secret presented by a scan trigger.
///
/// With no secret configured every caller passes.
///
/// # Errors
///
/// `Unauthenticated` when a secret is configured and `presented` differs.
pub fn authorize_scan(expected: Option<&str>, presented: Option<&str>) -> Result<(), DeskError> {
    match expected {
        Some(secret) if presented != Some(secret) => Err(DeskError::Unauthenticated),
        _ => Ok(()),
    }
}

impl DeskService {
    /// [`authorize_scan`] against the configured secret.
    ///
    /// # Errors
    ///
    /// `Unauthenticated` on a missing or wrong secret.
    pub fn authorize_scan(&self, presented: Option<&str>) -> Result<(), DeskError> {
        authorize_scan(self.cron_secret.as_deref(), presented)
    }

    /// Run the scan at the current time.
    ///
    /// # Errors
    ///
    /// Only storage faults, reported as "Unable to run reminders".
    pub async fn scan_stale_tickets(&self) -> Result<ScanSummary, DeskError> {
        self.scan_stale_at(self.now()).await
    }

    /// Run the scan as if the current time were `now`.
    ///
    /// # Errors
    ///
    /// Only storage faults.
    pub async fn scan_stale_at(&self, now: DateTime<Utc>) -> Result<ScanSummary, DeskError> {
        self.scan_inner(now)
            .await
            .map_err(|e| at_boundary("run reminders", e))
    }

    async fn scan_inner(&self, now: DateTime<Utc>) -> Result<ScanSummary, DeskError> {
        let threshold = now - Duration::hours(i64::from(self.window_hours));
        let stale = self.db.list_stale_tickets(threshold).await?;

        let mut summary = ScanSummary {
            scanned: 0,
            notified: 0,
            window_hours: self.window_hours,
        };

        for ticket in stale {
            summary.scanned += 1;

            let latest = self.db.latest_comment(&ticket.id).await?;
            if latest.is_some_and(|c| c.author_role == AuthorRole::Agent) {
                tracing::debug!(ticket_id = %ticket.id, "agent already replied; no reminder");
                continue;
            }

            let Some(assignee) = ticket.assigned_to.as_deref() else {
                tracing::debug!(ticket_id = %ticket.id, "unassigned; no reminder");
                continue;
            };

            let Some(agent) = self.db.find_user(assignee).await? else {
                tracing::debug!(ticket_id = %ticket.id, assignee, "assignee not on record; no reminder");
                continue;
            };
            if agent.email.is_empty() {
                continue;
            }

            self.notifier.emit(Notification::AgentReminder {
                to: agent.email,
                title: ticket.title,
            });
            summary.notified += 1;
        }

        tracing::info!(
            scanned = summary.scanned,
            notified = summary.notified,
            window_hours = summary.window_hours,
            "reminder scan finished"
        );
        Ok(summary)
    }
}
