//! The user-notification port.

/// Severity of a user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    /// Operation concluded successfully.
    Success,
    /// Operation failed; the message says what happened.
    Error,
    /// Neutral status information.
    Info,
}

/// Host-platform user notifications (toasts, banners, system messages).
pub trait Notifier: Send + Sync {
    /// Present `message` to the user at the given severity.
    fn notify(&self, level: NotificationLevel, message: &str);

    /// Present a success notification.
    fn success(&self, message: &str) {
        self.notify(NotificationLevel::Success, message);
    }

    /// Present an error notification.
    fn error(&self, message: &str) {
        self.notify(NotificationLevel::Error, message);
    }
}
