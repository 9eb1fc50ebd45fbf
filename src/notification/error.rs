//! Notification system error types.

use thiserror::Error;

/// Errors that can occur while dispatching a desktop notification.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotificationError {
    /// Notification permission was denied by the user.
    #[error("notification permission was denied")]
    PermissionDenied,

    /// The notification server rejected or failed to show the notification.
    #[error("failed to show notification: {0}")]
    SendFailed(String),
}

impl NotificationError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "run without --no-notify to enable notifications",
            Self::SendFailed(_) => "check that a notification daemon is running",
        }
    }
}
