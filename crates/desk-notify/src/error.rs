use thiserror::Error;

/// Errors raised by a mail transport.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("mail relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("mail relay rejected message with status {status}")]
    Rejected { status: u16 },
}
