//! Notification sinks for user-visible toasts.

use std::sync::{Arc, Mutex};

use serde::Serialize;

/// Severity of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Error,
}

/// A toast shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub severity: Severity,
    pub title: String,
    pub message: String,
}

impl Notification {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Receives notifications emitted by the dispatcher.
pub trait Notifier: Send + Sync + std::fmt::Debug {
    fn notify(&self, notification: Notification);
}

/// Writes notifications to the log and nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.severity {
            Severity::Success => tracing::info!(
                name: "notify.success",
                title = %notification.title,
                message = %notification.message,
                "Success"
            ),
            Severity::Error => tracing::warn!(
                name: "notify.error",
                title = %notification.title,
                message = %notification.message,
                "Error"
            ),
        }
    }
}

/// Queues notifications for a front end to drain.
///
/// Clones share the same queue.
#[derive(Debug, Default, Clone)]
pub struct MemoryNotifier {
    queue: Arc<Mutex<Vec<Notification>>>,
}

impl MemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every queued notification.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(std::sync::PoisonError::into_inner))
    }

    /// Copy of the queue without consuming it.
    pub fn snapshot(&self) -> Vec<Notification> {
        self.queue
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn count(&self, severity: Severity) -> usize {
        self.snapshot()
            .iter()
            .filter(|n| n.severity == severity)
            .count()
    }
}

impl Notifier for MemoryNotifier {
    fn notify(&self, notification: Notification) {
        self.queue
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(notification);
    }
}
