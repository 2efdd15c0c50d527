use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Draft entity - a single manuscript record with authorship metadata
/// and lifecycle timestamps.
///
/// `id` and `created_at` are written once at creation and never change;
/// `deleted_at` marks the record archived without erasing any field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Draft {
    pub id: String,
    pub title: String,
    pub class_label: String,
    pub author_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Draft {
    /// Create a new active draft with a fresh server-generated id.
    pub fn new(title: String, class_label: String, author_name: String, content: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            class_label,
            author_name,
            content,
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    /// Whether the record is soft-deleted.
    pub fn is_archived(&self) -> bool {
        self.deleted_at.is_some()
    }
}

/// Client-supplied fields for a save. A missing or empty `id` requests
/// creation; an id that matches no record also falls through to creation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DraftInput {
    pub id: Option<String>,
    pub title: String,
    pub class_label: String,
    pub author_name: String,
    pub content: String,
}
