//! In-memory draft store - used when no database is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use manuscript_core::domain::Draft;
use manuscript_core::ports::{DraftPatch, DraftStore, RowPos, StoreError};

#[derive(Default)]
struct Rows {
    /// Records in insertion order; a row's index is its position.
    rows: Vec<Draft>,
    /// id -> row position, maintained incrementally on append. Ids are
    /// never reused, so entries are never removed.
    index: HashMap<String, u64>,
}

/// In-memory store using a row vector with an id index behind an async
/// RwLock.
///
/// The write lock makes each mutation visible fully-before or fully-after
/// any scan. Note: data is lost on process restart.
pub struct InMemoryDraftStore {
    inner: RwLock<Rows>,
}

impl InMemoryDraftStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Rows::default()),
        }
    }
}

impl Default for InMemoryDraftStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DraftStore for InMemoryDraftStore {
    async fn scan(&self) -> Result<Vec<(RowPos, Draft)>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .iter()
            .cloned()
            .enumerate()
            .map(|(i, draft)| (RowPos(i as u64), draft))
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<RowPos>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.index.get(id).copied().map(RowPos))
    }

    async fn append(&self, draft: Draft) -> Result<RowPos, StoreError> {
        let mut inner = self.inner.write().await;
        let pos = inner.rows.len() as u64;
        inner.index.insert(draft.id.clone(), pos);
        inner.rows.push(draft);
        Ok(RowPos(pos))
    }

    async fn update_fields(&self, pos: RowPos, patch: DraftPatch) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let row = inner
            .rows
            .get_mut(pos.0 as usize)
            .ok_or(StoreError::RowOutOfBounds(pos.0))?;

        if let Some(title) = patch.title {
            row.title = title;
        }
        if let Some(class_label) = patch.class_label {
            row.class_label = class_label;
        }
        if let Some(author_name) = patch.author_name {
            row.author_name = author_name;
        }
        if let Some(content) = patch.content {
            row.content = content;
        }
        if let Some(updated_at) = patch.updated_at {
            row.updated_at = updated_at;
        }
        if let Some(deleted_at) = patch.deleted_at {
            row.deleted_at = deleted_at;
        }

        Ok(())
    }

    async fn row_count(&self) -> Result<u64, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.len() as u64)
    }
}
