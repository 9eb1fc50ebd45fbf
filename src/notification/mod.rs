//! Desktop notifications for finished phases.
//!
//! The timer engine never notifies anyone itself. The session forwards each
//! [`PhaseEnded`] signal to [`dispatch_phase_end`], which checks the
//! notifier's permission state and shows `"<Phase label> finished"`.
//!
//! Permission follows a three-state model:
//!
//! ```text
//! Default ──request──▶ Granted
//!    │
//!    └──(--no-notify)──▶ Denied
//! ```
//!
//! Only `Granted` lets a notification through.

mod desktop;
pub mod error;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use crate::types::{Phase, PhaseEnded};

pub use self::desktop::DesktopNotifier;
pub use self::error::NotificationError;

/// Title shown on every notification.
pub const NOTIFICATION_TITLE: &str = "Pomodoro";

/// Permission state of a notifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotificationPermission {
    /// Not asked yet
    #[default]
    Default,
    /// Notifications may be shown
    Granted,
    /// Notifications are suppressed
    Denied,
}

impl NotificationPermission {
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

/// A capability that can show notifications.
pub trait Notifier {
    /// Current permission state.
    fn permission(&self) -> NotificationPermission;

    /// Asks for permission if it has not been decided yet.
    ///
    /// Returns the resulting state.
    fn request_permission(&self) -> NotificationPermission;

    /// Shows a notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the notification could not be shown.
    fn notify(&self, title: &str, body: &str) -> Result<(), NotificationError>;
}

/// Message for a finished phase, e.g. `"Short break finished"`.
pub fn phase_finished_message(phase: Phase) -> String {
    format!("{} finished", phase.label())
}

/// Shows the phase-end notification if permission is granted.
///
/// Returns `Ok(true)` if a notification was shown and `Ok(false)` if it was
/// suppressed by the permission state.
///
/// # Errors
///
/// Returns an error if the notifier failed to show the notification.
pub fn dispatch_phase_end(
    notifier: &dyn Notifier,
    event: PhaseEnded,
) -> Result<bool, NotificationError> {
    if !notifier.permission().is_granted() {
        debug!(
            phase = event.ended_phase.as_str(),
            "Notification suppressed, permission not granted"
        );
        return Ok(false);
    }

    notifier.notify(NOTIFICATION_TITLE, &phase_finished_message(event.ended_phase))?;
    Ok(true)
}

// ============================================================================
// MockNotifier
// ============================================================================

/// Mock notifier for testing.
#[derive(Debug, Default)]
pub struct MockNotifier {
    sent: Mutex<Vec<(String, String)>>,
    permission: Mutex<NotificationPermission>,
    grant_on_request: AtomicBool,
    should_fail: AtomicBool,
}

impl MockNotifier {
    /// Creates a mock that grants permission when asked.
    #[must_use]
    pub fn new() -> Self {
        Self {
            grant_on_request: AtomicBool::new(true),
            ..Self::default()
        }
    }

    /// Creates a mock that already has permission.
    #[must_use]
    pub fn granted() -> Self {
        let mock = Self::new();
        mock.set_permission(NotificationPermission::Granted);
        mock
    }

    pub fn set_permission(&self, permission: NotificationPermission) {
        *self
            .permission
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = permission;
    }

    pub fn set_grant_on_request(&self, grant: bool) {
        self.grant_on_request.store(grant, Ordering::SeqCst);
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    /// Returns the `(title, body)` pairs shown so far.
    #[must_use]
    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    #[must_use]
    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

impl Notifier for MockNotifier {
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
            *permission = if self.grant_on_request.load(Ordering::SeqCst) {
                NotificationPermission::Granted
            } else {
                NotificationPermission::Denied
            };
        }
        *permission
    }

    fn notify(&self, title: &str, body: &str) -> Result<(), NotificationError> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(NotificationError::SendFailed("Mock failure".to_string()));
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((title.to_string(), body.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ended(phase: Phase) -> PhaseEnded {
        PhaseEnded { ended_phase: phase }
    }

    #[test]
    fn test_phase_finished_message() {
        assert_eq!(phase_finished_message(Phase::Work), "Work finished");
        assert_eq!(
            phase_finished_message(Phase::ShortBreak),
            "Short break finished"
        );
        assert_eq!(
            phase_finished_message(Phase::LongBreak),
            "Long break finished"
        );
    }

    #[test]
    fn test_dispatch_when_granted() {
        let mock = MockNotifier::granted();

        let shown = dispatch_phase_end(&mock, ended(Phase::Work)).unwrap();

        assert!(shown);
        assert_eq!(
            mock.sent(),
            vec![("Pomodoro".to_string(), "Work finished".to_string())]
        );
    }

    #[test]
    fn test_dispatch_suppressed_before_request() {
        let mock = MockNotifier::new();

        let shown = dispatch_phase_end(&mock, ended(Phase::Work)).unwrap();

        assert!(!shown);
        assert_eq!(mock.sent_count(), 0);
    }

    #[test]
    fn test_dispatch_suppressed_when_denied() {
        let mock = MockNotifier::new();
        mock.set_permission(NotificationPermission::Denied);

        assert!(!dispatch_phase_end(&mock, ended(Phase::LongBreak)).unwrap());
        assert_eq!(mock.sent_count(), 0);
    }

    #[test]
    fn test_dispatch_failure_propagates() {
        let mock = MockNotifier::granted();
        mock.set_should_fail(true);

        let result = dispatch_phase_end(&mock, ended(Phase::ShortBreak));
        assert!(matches!(result, Err(NotificationError::SendFailed(_))));
    }

    #[test]
    fn test_request_permission_decides_once() {
        let mock = MockNotifier::new();
        mock.set_grant_on_request(false);

        assert_eq!(mock.request_permission(), NotificationPermission::Denied);

        mock.set_grant_on_request(true);
        assert_eq!(mock.request_permission(), NotificationPermission::Denied);
    }

    #[test]
    fn test_request_permission_grants() {
        let mock = MockNotifier::new();
        assert_eq!(mock.permission(), NotificationPermission::Default);
        assert_eq!(mock.request_permission(), NotificationPermission::Granted);
        assert!(mock.permission().is_granted());
    }
}
