//! Toast-style notifications emitted by the generation flow.
//!
//! Rendering is up to the host; this module only defines what is said and
//! gives hosts a sink to receive it.

use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Notification severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Informational note.
    Info,
    /// Something the user should act on.
    Error,
}

/// A single user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    /// Short title line.
    pub title: String,
    /// Body text.
    pub description: String,
    /// Severity.
    pub severity: Severity,
}

impl Notification {
    /// Builds a notification from its parts.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        severity: Severity,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity,
        }
    }

    /// Shown when generate is pressed with a blank prompt.
    pub fn empty_prompt() -> Self {
        Self::new(
            "Please enter a prompt",
            "Describe the image you want to generate",
            Severity::Error,
        )
    }

    /// Shown when an image arrives.
    pub fn generated() -> Self {
        Self::new(
            "Image generated!",
            "Your AI-generated image is ready",
            Severity::Info,
        )
    }

    /// Shown for any failure of the request. Deliberately generic.
    pub fn generation_failed() -> Self {
        Self::new(
            "Generation failed",
            "There was an error generating your image. Please try again.",
            Severity::Error,
        )
    }

    /// True for error-severity notices.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Receives notifications for display.
pub trait Notifier: Send + Sync {
    /// Shows or records one notification.
    fn notify(&self, notification: Notification);
}

impl<T: Notifier + ?Sized> Notifier for Arc<T> {
    fn notify(&self, notification: Notification) {
        (**self).notify(notification)
    }
}

/// Logs every notification through `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, n: Notification) {
        match n.severity {
            Severity::Info => tracing::info!(title = %n.title, "{}", n.description),
            Severity::Error => tracing::warn!(title = %n.title, "{}", n.description),
        }
    }
}

/// Keeps every notification in memory. Clones share the same log.
#[derive(Debug, Clone, Default)]
pub struct NotificationLog {
    entries: Arc<Mutex<Vec<Notification>>>,
}

impl NotificationLog {
    /// Empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of everything received so far.
    pub fn entries(&self) -> Vec<Notification> {
        self.lock().clone()
    }

    /// Most recent notification.
    pub fn last(&self) -> Option<Notification> {
        self.lock().last().cloned()
    }

    /// Removes and returns everything received so far.
    pub fn drain(&self) -> Vec<Notification> {
        std::mem::take(&mut *self.lock())
    }

    /// Number of notifications received.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// True if nothing was received.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Notification>> {
        // A poisoned log still holds valid entries.
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Notifier for NotificationLog {
    fn notify(&self, notification: Notification) {
        self.lock().push(notification);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_copy() {
        let n = Notification::empty_prompt();
        assert_eq!(n.title, "Please enter a prompt");
        assert_eq!(n.description, "Describe the image you want to generate");
        assert!(n.is_error());

        let n = Notification::generated();
        assert_eq!(n.title, "Image generated!");
        assert_eq!(n.description, "Your AI-generated image is ready");
        assert_eq!(n.severity, Severity::Info);

        let n = Notification::generation_failed();
        assert_eq!(n.title, "Generation failed");
        assert_eq!(
            n.description,
            "There was an error generating your image. Please try again."
        );
        assert!(n.is_error());
    }

    #[test]
    fn test_log_is_shared_between_clones() {
        let log = NotificationLog::new();
        let sink = log.clone();
        sink.notify(Notification::generated());
        sink.notify(Notification::generation_failed());

        assert_eq!(log.len(), 2);
        assert_eq!(log.last().unwrap().title, "Generation failed");
        assert_eq!(log.drain().len(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_severity_serializes_lowercase() {
        let json = serde_json::to_value(Notification::generated()).unwrap();
        assert_eq!(json["severity"], "info");
    }
}
