//! Shared test utilities for desk-db unit tests.

pub(crate) mod helpers {
    use chrono::{DateTime, TimeZone, Utc};
    use desk_core::entities::User;
    use desk_core::enums::Role;

    use crate::DeskDb;

    pub async fn test_db() -> DeskDb {
        DeskDb::open_local(":memory:").await.unwrap()
    }

    /// A fixed instant so ordering assertions don't depend on the wall clock.
    pub fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap()
    }

    pub async fn seed_user(db: &DeskDb, name: &str, role: Role) -> User {
        let email = format!("{}@example.com", name.to_lowercase().replace(' ', "."));
        db.insert_user(name, &email, role, t0()).await.unwrap()
    }
}
