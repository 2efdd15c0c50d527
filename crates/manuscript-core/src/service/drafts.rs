//! Draft service - upsert, listing, load and soft-delete over a store
//! backend, with all mutations serialized through the write gate.
//!
//! Mutating operations hold one [`WriteToken`](crate::gate::WriteToken)
//! across the full read-modify-write sequence so two writers targeting the
//! same id can never interleave. Reads are deliberately ungated: a list or
//! load may race an in-flight write, but the backend's visibility guarantee
//! keeps every observed record whole.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde::Serialize;

use crate::domain::{Draft, DraftInput};
use crate::error::DraftError;
use crate::gate::WriteGate;
use crate::ports::{DraftPatch, DraftStore, StoreError};

/// Listing never returns more than this many entries.
pub const LIST_LIMIT: usize = 50;

/// Display format applied to `updated_at` in listings.
const LIST_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Lock-wait budgets for the mutating operations.
///
/// Delete has a smaller critical section, so failing faster is acceptable.
#[derive(Debug, Clone)]
pub struct GateTimeouts {
    pub save: Duration,
    pub delete: Duration,
}

impl Default for GateTimeouts {
    fn default() -> Self {
        Self {
            save: Duration::from_secs(10),
            delete: Duration::from_secs(5),
        }
    }
}

/// Result of a successful save.
#[derive(Debug, Clone, Serialize)]
pub struct SavedDraft {
    pub id: String,
    /// `true` when a new record was appended, `false` for an in-place update.
    pub created: bool,
}

/// One row of the draft listing, newest first.
#[derive(Debug, Clone, Serialize)]
pub struct DraftSummary {
    pub id: String,
    pub title: String,
    pub author_name: String,
    /// Pre-formatted display timestamp; only the retained rows are formatted.
    pub updated_at: String,
}

/// The editable fields returned by a load. Lifecycle timestamps are not
/// part of the load payload.
#[derive(Debug, Clone, Serialize)]
pub struct DraftContent {
    pub id: String,
    pub title: String,
    pub class_label: String,
    pub author_name: String,
    pub content: String,
}

/// The sole writer of draft record state.
///
/// Constructed with an injected store backend; owns the process-wide
/// write gate for that store.
pub struct DraftService {
    store: Arc<dyn DraftStore>,
    gate: WriteGate,
    timeouts: GateTimeouts,
}

impl DraftService {
    pub fn new(store: Arc<dyn DraftStore>, timeouts: GateTimeouts) -> Self {
        Self {
            store,
            gate: WriteGate::new(),
            timeouts,
        }
    }

    /// Create a draft, or update the record whose id matches the input.
    ///
    /// An id that matches no record is treated as a request to create a new
    /// one, not as an error. An update unconditionally clears `deleted_at`,
    /// so updating an archived draft restores its visibility.
    pub async fn save_or_update(&self, input: DraftInput) -> Result<SavedDraft, DraftError> {
        let _token = self
            .gate
            .acquire(self.timeouts.save)
            .await
            .map_err(|_| DraftError::Busy)?;

        match self.save_locked(input).await {
            Ok(saved) => Ok(saved),
            Err(err) => {
                tracing::error!(error = %err, "draft save failed");
                Err(DraftError::Backend("failed to save draft".into()))
            }
        }
    }

    async fn save_locked(&self, input: DraftInput) -> Result<SavedDraft, StoreError> {
        let now = Utc::now();

        if let Some(id) = input.id.as_deref().filter(|id| !id.is_empty()) {
            if let Some(pos) = self.store.find_by_id(id).await? {
                // created_at is never written; deleted_at is cleared
                // unconditionally so an update always restores visibility.
                let patch = DraftPatch {
                    title: Some(input.title),
                    class_label: Some(input.class_label),
                    author_name: Some(input.author_name),
                    content: Some(input.content),
                    updated_at: Some(now),
                    deleted_at: Some(None),
                };
                self.store.update_fields(pos, patch).await?;
                tracing::debug!(id = %id, "draft updated");
                return Ok(SavedDraft {
                    id: id.to_string(),
                    created: false,
                });
            }
            // Unmatched id: fall through to creation.
        }

        let draft = Draft::new(
            input.title,
            input.class_label,
            input.author_name,
            input.content,
        );
        let id = draft.id.clone();
        self.store.append(draft).await?;
        tracing::debug!(id = %id, "draft created");
        Ok(SavedDraft { id, created: true })
    }

    /// The most recently updated active drafts, at most [`LIST_LIMIT`].
    ///
    /// Read-only and ungated. Degrades to an empty listing on storage
    /// faults rather than failing the caller.
    pub async fn get_draft_list(&self) -> Vec<DraftSummary> {
        let rows = match self.store.scan().await {
            Ok(rows) => rows,
            Err(err) => {
                tracing::error!(error = %err, "draft listing failed");
                return Vec::new();
            }
        };

        let mut active: Vec<Draft> = rows
            .into_iter()
            .map(|(_, draft)| draft)
            .filter(|draft| !draft.is_archived())
            .collect();

        // Stable sort: records with equal timestamps keep their scan order.
        active.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        active.truncate(LIST_LIMIT);

        active
            .into_iter()
            .map(|draft| DraftSummary {
                id: draft.id,
                title: draft.title,
                author_name: draft.author_name,
                updated_at: draft.updated_at.format(LIST_TIME_FORMAT).to_string(),
            })
            .collect()
    }

    /// Load one draft's editable fields.
    ///
    /// The lookup covers archived records so a soft-deleted id is reported
    /// as [`DraftError::Archived`] rather than [`DraftError::NotFound`].
    pub async fn load_draft(&self, id: &str) -> Result<DraftContent, DraftError> {
        let rows = self.store.scan().await.map_err(|err| {
            tracing::error!(error = %err, id = %id, "draft load failed");
            DraftError::Backend("failed to load draft".into())
        })?;

        let Some((_, draft)) = rows.into_iter().find(|(_, draft)| draft.id == id) else {
            return Err(DraftError::NotFound(id.to_string()));
        };

        if draft.is_archived() {
            return Err(DraftError::Archived(id.to_string()));
        }

        Ok(DraftContent {
            id: draft.id,
            title: draft.title,
            class_label: draft.class_label,
            author_name: draft.author_name,
            content: draft.content,
        })
    }

    /// Archive a draft. Writes `deleted_at` and nothing else; the record
    /// stays in the backend and an update on its id resurrects it.
    pub async fn delete_draft(&self, id: &str) -> Result<(), DraftError> {
        let _token = self
            .gate
            .acquire(self.timeouts.delete)
            .await
            .map_err(|_| DraftError::Busy)?;

        match self.delete_locked(id).await {
            Ok(true) => Ok(()),
            Ok(false) => Err(DraftError::NotFound(id.to_string())),
            Err(err) => {
                tracing::error!(error = %err, id = %id, "draft delete failed");
                Err(DraftError::Backend("failed to delete draft".into()))
            }
        }
    }

    async fn delete_locked(&self, id: &str) -> Result<bool, StoreError> {
        let Some(pos) = self.store.find_by_id(id).await? else {
            return Ok(false);
        };

        let patch = DraftPatch {
            deleted_at: Some(Some(Utc::now())),
            ..DraftPatch::default()
        };
        self.store.update_fields(pos, patch).await?;
        tracing::debug!(id = %id, "draft archived");
        Ok(true)
    }
}
