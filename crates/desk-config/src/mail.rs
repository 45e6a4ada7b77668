//! Outbound mail configuration.

use serde::{Deserialize, Serialize};

fn default_from() -> String {
    "no-reply@helpdeskpro.local".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MailConfig {
    /// Sender address on every notification.
    #[serde(default = "default_from")]
    pub from: String,

    /// HTTP endpoint of the mail relay. Empty means log-only delivery.
    #[serde(default)]
    pub relay_url: String,

    /// Bearer token sent to the relay.
    #[serde(default)]
    pub api_key: String,
}

impl Default for MailConfig {
    fn default() -> Self {
        Self {
            from: default_from(),
            relay_url: String::new(),
            api_key: String::new(),
        }
    }
}

impl MailConfig {
    #[must_use]
    pub fn has_relay(&self) -> bool {
        !self.relay_url.is_empty()
    }
}
