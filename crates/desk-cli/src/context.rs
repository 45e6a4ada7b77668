use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use desk_config::DeskConfig;
use desk_core::errors::DeskError;
use desk_core::identity::SessionUser;
use desk_db::DeskDb;
use desk_engine::DeskService;
use desk_notify::{Notifier, mailer_from_config, spawn_worker};
use tokio::task::JoinHandle;

use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: DeskService,
    pub config: DeskConfig,
    mail_worker: JoinHandle<()>,
}

impl AppContext {
    /// Open storage, start the mail worker, and build the service.
    pub async fn init(config: DeskConfig) -> anyhow::Result<Self> {
        if !config.database.is_in_memory() {
            if let Some(parent) = Path::new(&config.database.path).parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent).with_context(|| {
                        format!("failed to create database directory {}", parent.display())
                    })?;
                }
            }
        }

        let db = DeskDb::open_local(&config.database.path)
            .await
            .with_context(|| format!("failed to open database at {}", config.database.path))?;

        if !config.mail.has_relay() {
            tracing::debug!("no mail relay configured; notifications go to the log");
        }
        let (notifier, rx) = Notifier::channel();
        let mail_worker = spawn_worker(rx, mailer_from_config(&config.mail), config.mail.from.clone());

        let service = DeskService::new(Arc::new(db), notifier).with_reminders(&config.reminders);

        Ok(Self {
            service,
            config,
            mail_worker,
        })
    }

    /// Resolve the `--as` user into a session.
    pub async fn session(&self, flags: &GlobalFlags) -> Result<SessionUser, DeskError> {
        self.service.resolve_session(flags.as_user.as_deref()).await
    }

    /// Row cap for list output.
    pub fn limit(&self, flags: &GlobalFlags) -> usize {
        let limit = flags.limit.unwrap_or(self.config.general.default_limit);
        usize::try_from(limit).unwrap_or(usize::MAX)
    }

    /// Drop the service and wait for queued notifications to be delivered.
    pub async fn shutdown(self) {
        drop(self.service);
        if let Err(error) = self.mail_worker.await {
            tracing::warn!(%error, "mail worker ended abnormally");
        }
    }
}
