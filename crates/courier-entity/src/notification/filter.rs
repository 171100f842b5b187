//! Listing filters for the read surface.

use serde::{Deserialize, Serialize};

use super::status::NotificationStatus;

/// Optional status filter for notification listings.
///
/// An empty filter matches every row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NotificationFilter {
    /// Statuses to include. De-duplicated at construction.
    pub statuses: Vec<NotificationStatus>,
}

impl NotificationFilter {
    /// A filter that matches every notification.
    pub fn all() -> Self {
        Self::default()
    }

    /// Build a filter from the given statuses, dropping duplicates while
    /// preserving first-seen order.
    pub fn with_statuses(statuses: impl IntoIterator<Item = NotificationStatus>) -> Self {
        let mut unique = Vec::new();
        for status in statuses {
            if !unique.contains(&status) {
                unique.push(status);
            }
        }
        Self { statuses: unique }
    }

    /// Whether the filter constrains the status column at all.
    pub fn is_unfiltered(&self) -> bool {
        self.statuses.is_empty()
    }
}
