//! Stale-ticket reminder configuration.

use serde::{Deserialize, Serialize};

const fn default_window_hours() -> u32 {
    24
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReminderConfig {
    /// Tickets untouched for at least this many hours are considered stale.
    #[serde(default = "default_window_hours")]
    pub window_hours: u32,

    /// Shared secret a scheduler must present to trigger a scan.
    #[serde(default)]
    pub cron_secret: Option<String>,
}

impl Default for ReminderConfig {
    fn default() -> Self {
        Self {
            window_hours: default_window_hours(),
            cron_secret: None,
        }
    }
}

impl ReminderConfig {
    /// The configured secret, treating an empty string as unset.
    #[must_use]
    pub fn secret(&self) -> Option<&str> {
        self.cron_secret.as_deref().filter(|s| !s.is_empty())
    }
}
