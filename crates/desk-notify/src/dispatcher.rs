//! Fire-and-forget notification queue.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::mailer::Mailer;
use crate::message::Notification;

/// Sending half of the notification queue. Cheap to clone.
///
/// [`Notifier::emit`] never blocks and never fails the caller.
#[derive(Debug, Clone)]
pub struct Notifier {
    tx: Option<mpsc::UnboundedSender<Notification>>,
}

impl Notifier {
    /// Create a notifier and the receiver a worker should drain.
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx: Some(tx) }, rx)
    }

    /// A notifier that drops everything.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { tx: None }
    }

    /// Queue a notification. Messages with an empty recipient are dropped.
    pub fn emit(&self, notification: Notification) {
        if notification.recipient().trim().is_empty() {
            tracing::debug!(kind = notification.kind(), "notification without recipient dropped");
            return;
        }
        let Some(tx) = &self.tx else {
            return;
        };
        if let Err(e) = tx.send(notification) {
            tracing::warn!(kind = e.0.kind(), "notification queue closed; message dropped");
        }
    }
}

/// Drain `rx`, delivering each notification through `mailer`.
///
/// The task ends once every [`Notifier`] clone has been dropped and the
/// queue is empty. Delivery errors are logged and skipped.
pub fn spawn_worker(
    mut rx: mpsc::UnboundedReceiver<Notification>,
    mailer: Arc<dyn Mailer>,
    from: String,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(notification) = rx.recv().await {
            let email = notification.render(&from);
            match mailer.send(&email).await {
                Ok(()) => tracing::debug!(kind = notification.kind(), to = %email.to, "notification sent"),
                Err(e) => tracing::warn!(
                    kind = notification.kind(),
                    to = %email.to,
                    error = %e,
                    "failed to send notification"
                ),
            }
        }
    })
}
