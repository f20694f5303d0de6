use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Notification {
    pub id: String,
    /// Lookup key only; the analysis may no longer be loaded anywhere.
    pub analysis_id: String,
    pub title: String,
    pub message: String,
    pub link: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}
