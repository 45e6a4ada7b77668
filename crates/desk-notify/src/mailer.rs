//! Mail transports.

use std::sync::Arc;

use async_trait::async_trait;
use desk_config::MailConfig;

use crate::error::NotifyError;
use crate::message::Email;

/// Delivers a rendered email. Implementations must be safe to share across
/// tasks.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), NotifyError>;
}

/// Writes each email to the log instead of sending it. Used when no relay
/// is configured.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        tracing::info!(
            from = %email.from,
            to = %email.to,
            subject = %email.subject,
            text = %email.text,
            "mail (log transport)"
        );
        Ok(())
    }
}

/// Posts each email as JSON to an HTTP mail relay.
#[derive(Debug, Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl HttpMailer {
    #[must_use]
    pub fn new(url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.into(),
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        let mut request = self.client.post(&self.url).json(email);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(NotifyError::Rejected {
                status: status.as_u16(),
            });
        }
        tracing::debug!(to = %email.to, subject = %email.subject, "mail relayed");
        Ok(())
    }
}

/// Pick a transport from configuration: the HTTP relay when a URL is set,
/// otherwise the log transport.
#[must_use]
pub fn mailer_from_config(config: &MailConfig) -> Arc<dyn Mailer> {
    if config.has_relay() {
        Arc::new(HttpMailer::new(
            config.relay_url.clone(),
            Some(config.api_key.clone()),
        ))
    } else {
        Arc::new(LogMailer)
    }
}
