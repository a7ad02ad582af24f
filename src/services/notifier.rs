use crate::models::{Notification, NotificationKind};
use std::sync::Mutex;

/// Receiver for user-facing notifications raised by the match controller
pub trait Notifier {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        let description = notification.description.as_deref().unwrap_or("");
        match notification.kind {
            NotificationKind::Destructive => tracing::warn!("{} {}", notification.title, description),
            _ => tracing::info!("{} {}", notification.title, description),
        }
    }
}

/// Buffers notifications until a UI drains them
#[derive(Debug, Default)]
pub struct MemoryNotifier {
    pending: Mutex<Vec<Notification>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending notification, oldest first
    pub fn drain(&self) -> Vec<Notification> {
        match self.pending.lock() {
            Ok(mut pending) => std::mem::take(&mut *pending),
            Err(poisoned) => std::mem::take(&mut *poisoned.into_inner()),
        }
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        match self.pending.lock() {
            Ok(mut pending) => pending.push(notification),
            Err(poisoned) => poisoned.into_inner().push(notification),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_notifier_drains_in_order() {
        let notifier = MemoryNotifier::new();
        notifier.notify(Notification::success("first"));
        notifier.notify(Notification::neutral("second"));

        let drained = notifier.drain();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].title, "first");
        assert_eq!(drained[1].title, "second");
        assert!(notifier.drain().is_empty());
    }
}
