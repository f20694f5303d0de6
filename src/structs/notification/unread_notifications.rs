use serde::{Deserialize, Serialize};
use crate::structs::notification::notification::Notification;

/// Wire shape of `GET /notifications/unread`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UnreadNotifications {
    pub unread_count: usize,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}
