//! Notification status enumeration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle status of a notification.
///
/// The machine is monotonic: `sent` is terminal, and `failed` becomes
/// terminal once the retry budget is exhausted. The wire additionally knows
/// an `unknown` value for statuses it cannot map, which never appears in
/// storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationStatus {
    /// Stored but not yet attempted, or waiting on its scheduled time.
    Queued,
    /// Delivered to the provider. Terminal.
    Sent,
    /// The most recent dispatch attempt failed, or the row was cancelled.
    Failed,
}

impl NotificationStatus {
    /// Parse the wire form. Case-insensitive; canonical form is lowercase.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "queued" => Some(Self::Queued),
            "sent" => Some(Self::Sent),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }

    /// Return the status as its canonical lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Sent => "sent",
            Self::Failed => "failed",
        }
    }

    /// Whether the state machine forbids any further transition out of
    /// this status regardless of retry budget.
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent)
    }
}

impl fmt::Display for NotificationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
