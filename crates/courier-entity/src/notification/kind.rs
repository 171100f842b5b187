//! Notification kind enumeration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The delivery channel of a notification. Immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Electronic mail via SMTP. The only kind that may carry attachments.
    Email,
    /// Short message via the tenant's SMS provider.
    Sms,
}

impl NotificationKind {
    /// Parse the wire form. Case-insensitive; canonical form is lowercase.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "email" => Some(Self::Email),
            "sms" => Some(Self::Sms),
            _ => None,
        }
    }

    /// Return the kind as its canonical lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "email",
            Self::Sms => "sms",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
