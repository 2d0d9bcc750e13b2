//! Notification recorder.

use std::sync::{Arc, Mutex};

use crate::notify::{NotificationLevel, Notifier};

/// Notifier that records every message for assertions.
///
/// Clones share the recording.
#[derive(Debug, Clone, Default)]
pub struct MockNotifier {
    messages: Arc<Mutex<Vec<(NotificationLevel, String)>>>,
}

impl MockNotifier {
    /// Create a notifier with an empty recording.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every notification recorded so far, oldest first.
    #[must_use]
    pub fn messages(&self) -> Vec<(NotificationLevel, String)> {
        self.messages
            .lock()
            .map_or_else(|_| Vec::new(), |messages| messages.clone())
    }

    /// `true` when a message at `level` contains `needle`.
    #[must_use]
    pub fn contains(&self, level: NotificationLevel, needle: &str) -> bool {
        self.messages.lock().is_ok_and(|messages| {
            messages
                .iter()
                .any(|(recorded, message)| *recorded == level && message.contains(needle))
        })
    }

    /// `true` when nothing has been notified.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages
            .lock()
            .is_ok_and(|messages| messages.is_empty())
    }
}

impl Notifier for MockNotifier {
    fn notify(&self, level: NotificationLevel, message: &str) {
        if let Ok(mut messages) = self.messages.lock() {
            messages.push((level, message.to_string()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_records_levels_and_messages() {
        let notifier = MockNotifier::new();

        notifier.success("Signed in successfully");
        notifier.error("Signin failed");

        assert!(notifier.contains(NotificationLevel::Success, "Signed in"));
        assert!(notifier.contains(NotificationLevel::Error, "failed"));
        assert!(!notifier.contains(NotificationLevel::Info, "Signed in"));
        assert_eq!(notifier.messages().len(), 2);
    }
}
