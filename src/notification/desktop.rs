//! Desktop notifications through `notify-rust`.

use std::sync::{Mutex, PoisonError};

use notify_rust::Notification;
use tracing::debug;

use super::error::NotificationError;
use super::{NotificationPermission, Notifier};

/// Application name reported to the notification server.
const APP_NAME: &str = "pomodoro";

/// Shows notifications on the desktop notification server.
///
/// Desktop notification servers have no permission prompt, so a request
/// grants permission unless the notifier was created denied.
#[derive(Debug, Default)]
pub struct DesktopNotifier {
    permission: Mutex<NotificationPermission>,
}

impl DesktopNotifier {
    /// Creates a notifier that has not been granted permission yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a notifier that never shows anything.
    #[must_use]
    pub fn denied() -> Self {
        Self {
            permission: Mutex::new(NotificationPermission::Denied),
        }
    }
}

impl Notifier for DesktopNotifier {
    fn permission(&self) -> NotificationPermission {
        *self
            .permission
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn request_permission(&self) -> NotificationPermission {
        let mut permission = self
            .permission
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *permission == NotificationPermission::Default {
            *permission = NotificationPermission::Granted;
            debug!("Desktop notifications granted");
        }
        *permission
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        if self.permission() == NotificationPermission::Denied {
            return Err(NotificationError::PermissionDenied);
        }

        Notification::new()
            .appname(APP_NAME)
            .summary(title)
            .body(body)
            .show()
            .map(|_| ())
            .map_err(|e| NotificationError::SendFailed(e.to_string()))?;

        debug!("Notification shown: {}", body);
        Ok(())
    }
}
