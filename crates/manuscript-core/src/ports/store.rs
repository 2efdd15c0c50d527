use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::Draft;

/// Backend-specific locator of a record within the ordered collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowPos(pub u64);

/// Field subset written by [`DraftStore::update_fields`].
///
/// A `None` field is left untouched. `deleted_at` is two-level:
/// `Some(None)` clears the archive marker, `Some(Some(ts))` sets it.
/// There is deliberately no `created_at` field - updates can never
/// overwrite it.
#[derive(Debug, Clone, Default)]
pub struct DraftPatch {
    pub title: Option<String>,
    pub class_label: Option<String>,
    pub author_name: Option<String>,
    pub content: Option<String>,
    pub updated_at: Option<DateTime<Utc>>,
    pub deleted_at: Option<Option<DateTime<Utc>>>,
}

/// Store backend operation errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query execution failed: {0}")]
    Query(String),

    #[error("Row position {0} out of bounds")]
    RowOutOfBounds(u64),
}

/// Store backend - abstraction over durable storage of an ordered
/// collection of draft records.
///
/// A write completed while the caller held the write gate must be observed
/// by any later scan as fully-before or fully-after - never torn.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// All records in persisted insertion order.
    async fn scan(&self) -> Result<Vec<(RowPos, Draft)>, StoreError>;

    /// Exact-match lookup. Ids are unique, so at most one row matches.
    async fn find_by_id(&self, id: &str) -> Result<Option<RowPos>, StoreError>;

    /// Add a record positioned after all existing ones.
    async fn append(&self, draft: Draft) -> Result<RowPos, StoreError>;

    /// Write only the fields named by the patch. Must not reorder rows.
    async fn update_fields(&self, pos: RowPos, patch: DraftPatch) -> Result<(), StoreError>;

    async fn row_count(&self) -> Result<u64, StoreError>;
}
