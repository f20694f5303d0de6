use chrono::{DateTime, Utc};
use serde::Serialize;
use crate::structs::notification::notification::Notification;
use crate::structs::notification::unread_notifications::UnreadNotifications;

/// Client-held view of the unread notifications, replaced wholesale on every refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Inbox {
    pub unread_count: usize,
    pub notifications: Vec<Notification>,
    pub last_refreshed: Option<DateTime<Utc>>,
}

impl Inbox {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the inbox from a server answer. The count is derived from the
    /// items so it can never disagree with them.
    pub fn from_unread(unread: UnreadNotifications, refreshed_at: DateTime<Utc>) -> Self {
        let mut notifications = unread.notifications;
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let unread_count = notifications.iter().filter(|n| !n.is_read).count();
        if unread_count != unread.unread_count {
            log::debug!(
                "Server reported {} unread notifications, derived {}",
                unread.unread_count,
                unread_count
            );
        }

        Self {
            unread_count,
            notifications,
            last_refreshed: Some(refreshed_at),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn find(&self, id: &str) -> Option<&Notification> {
        self.notifications.iter().find(|n| n.id == id)
    }

    pub fn for_analysis<'a>(&'a self, analysis_id: &'a str) -> impl Iterator<Item = &'a Notification> + 'a {
        self.notifications.iter().filter(move |n| n.analysis_id == analysis_id)
    }
}
