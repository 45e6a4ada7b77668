//! # desk-notify
//!
//! Outbound notifications for the helpdesk.
//!
//! Engine operations never wait on delivery. They hand a [`Notification`]
//! to a [`Notifier`], which queues it on an unbounded channel; a worker task
//! spawned with [`spawn_worker`] renders each message and passes it to a
//! [`Mailer`]. Delivery failures are logged and dropped.

pub mod dispatcher;
pub mod error;
pub mod mailer;
pub mod message;

pub use dispatcher::{Notifier, spawn_worker};
pub use error::NotifyError;
pub use mailer::{HttpMailer, LogMailer, Mailer, mailer_from_config};
pub use message::{Email, Notification};
