use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] notifica_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Notification ID cannot be empty")]
    EmptyNotificationId,
    #[error("--pages must be at least 1")]
    InvalidPageCount,
}
