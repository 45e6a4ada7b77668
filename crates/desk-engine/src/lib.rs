//! # desk-engine
//!
//! Authorization and lifecycle rules for the helpdesk.
//!
//! [`DeskService`] is the single entry point. Each public method is one
//! operation: it authorizes the caller, validates the payload, reads or
//! writes through [`DeskDb`], and queues any owed notification on a
//! [`Notifier`]. Operations are implemented as `impl DeskService` blocks
//! split by concern:
//!
//! - `tickets`: create, get, list, update, delete
//! - `comments`: list and add on a ticket's thread
//! - `reminders`: the stale-ticket scan and its shared-secret check
//! - `users`: registration and the role directory
//! - `session`: caller identity lookup

use std::sync::Arc;

use chrono::{DateTime, Utc};
use desk_config::ReminderConfig;
use desk_core::errors::DeskError;
use desk_db::DeskDb;
use desk_notify::Notifier;

pub mod comments;
pub mod reminders;
pub mod session;
pub mod tickets;
pub mod users;

#[cfg(test)]
mod test_support;

pub use reminders::authorize_scan;

/// Source of the current time.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Helpdesk operations over an injected storage handle and notifier.
pub struct DeskService {
    db: Arc<DeskDb>,
    notifier: Notifier,
    window_hours: u32,
    cron_secret: Option<String>,
    clock: Clock,
}

impl DeskService {
    /// Build a service with a 24-hour reminder window, no scan secret, and
    /// the system clock.
    #[must_use]
    pub fn new(db: Arc<DeskDb>, notifier: Notifier) -> Self {
        Self {
            db,
            notifier,
            window_hours: 24,
            cron_secret: None,
            clock: Arc::new(Utc::now),
        }
    }

    /// Apply the reminder section of the configuration.
    #[must_use]
    pub fn with_reminders(mut self, config: &ReminderConfig) -> Self {
        self.window_hours = config.window_hours;
        self.cron_secret = config.secret().map(String::from);
        self
    }

    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    #[must_use]
    pub fn db(&self) -> &DeskDb {
        &self.db
    }

    #[must_use]
    pub const fn window_hours(&self) -> u32 {
        self.window_hours
    }

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}

/// Close out an operation's error: internal faults are logged with their
/// source and reduced to an opaque `Unable to {operation}` message.
fn at_boundary(operation: &'static str, err: DeskError) -> DeskError {
    if let DeskError::Internal { source, .. } = &err {
        tracing::error!(operation, error = ?source, "operation failed");
    }
    err.for_operation(operation)
}
