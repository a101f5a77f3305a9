//! Parse diagnostics.
//!
//! Decoding never fails on bad data; malformed pairs, unknown records and
//! unparseable values are skipped. [`ParseDiagnostics`] counts what was
//! skipped so a caller can tell a clean file from one that was mostly
//! garbage, and keeps a short list of [`Notification`]s for conditions
//! worth reporting by name.

use serde::Serialize;
use std::fmt;

/// Category of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NotificationType {
    /// A section or record kind that is recognised but not decoded.
    NotSupported,
    /// Data was dropped (nameless layer, nameless block, ...).
    Warning,
}

impl fmt::Display for NotificationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotSupported => write!(f, "NotSupported"),
            Self::Warning => write!(f, "Warning"),
        }
    }
}

/// A single notification produced during decoding.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub notification_type: NotificationType,
    pub message: String,
}

impl Notification {
    /// Create a new notification.
    pub fn new(notification_type: NotificationType, message: impl Into<String>) -> Self {
        Self {
            notification_type,
            message: message.into(),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.notification_type, self.message)
    }
}

/// Counters and notifications collected by one parse.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseDiagnostics {
    /// Line pairs dropped by the tokenizer (non-integer code, dangling line)
    pub skipped_pairs: usize,
    /// Entity records of an unsupported type
    pub skipped_entities: usize,
    /// Values that failed numeric conversion, or vertex continuations with
    /// no open vertex
    pub malformed_fields: usize,
    pub notifications: Vec<Notification>,
}

impl ParseDiagnostics {
    /// Create an empty diagnostics record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a notification.
    pub fn notify(&mut self, notification_type: NotificationType, message: impl Into<String>) {
        self.notifications.push(Notification::new(notification_type, message));
    }

    /// True when no pair, entity or field was dropped.
    ///
    /// Notifications do not count; skipping an OBJECTS section is routine.
    pub fn is_clean(&self) -> bool {
        self.skipped_pairs == 0 && self.skipped_entities == 0 && self.malformed_fields == 0
    }

    /// Get all notifications of a specific type.
    pub fn of_type(&self, nt: NotificationType) -> Vec<&Notification> {
        self.notifications.iter().filter(|n| n.notification_type == nt).collect()
    }
}
