//! Shared fixtures for desk-engine unit tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, TimeZone, Utc};
use desk_core::enums::Role;
use desk_core::identity::SessionUser;
use desk_db::DeskDb;
use desk_notify::{Notification, Notifier};
use tokio::sync::mpsc;

use crate::DeskService;

/// In-memory service with a hand-driven clock and a captured outbox.
pub struct Harness {
    pub service: DeskService,
    pub outbox: mpsc::UnboundedReceiver<Notification>,
    now: Arc<Mutex<DateTime<Utc>>>,
}

impl Harness {
    pub async fn new() -> Self {
        let db = Arc::new(DeskDb::open_local(":memory:").await.unwrap());
        let (notifier, outbox) = Notifier::channel();
        let now = Arc::new(Mutex::new(Utc.with_ymd_and_hms(2026, 3, 2, 8, 0, 0).unwrap()));
        let clock_now = Arc::clone(&now);
        let service = DeskService::new(db, notifier)
            .with_clock(Arc::new(move || *clock_now.lock().unwrap()));
        Self {
            service,
            outbox,
            now,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }

    pub fn advance(&self, by: Duration) {
        *self.now.lock().unwrap() += by;
    }

    /// Insert a user whose email is `<lowercased name>@example.com`.
    pub async fn user(&self, name: &str, role: Role) -> SessionUser {
        let email = format!("{}@example.com", name.to_lowercase());
        self.service
            .db()
            .insert_user(name, &email, role, self.now())
            .await
            .unwrap()
            .session()
    }

    /// Make every later user lookup fail with a storage error.
    pub async fn break_user_lookup(&self) {
        self.service
            .db()
            .conn()
            .execute("ALTER TABLE users RENAME TO users_gone", ())
            .await
            .unwrap();
    }

    /// Everything queued since the last drain.
    pub fn drain(&mut self) -> Vec<Notification> {
        let mut out = Vec::new();
        while let Ok(n) = self.outbox.try_recv() {
            out.push(n);
        }
        out
    }
}
