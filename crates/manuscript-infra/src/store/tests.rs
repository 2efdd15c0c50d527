//! Behavior tests for the draft service over the in-memory store, plus
//! mock-database tests for the PostgreSQL store.

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeDelta, Utc};

use manuscript_core::domain::{Draft, DraftInput};
use manuscript_core::error::DraftError;
use manuscript_core::ports::{DraftPatch, DraftStore, RowPos, StoreError};
use manuscript_core::service::{DraftService, GateTimeouts, LIST_LIMIT};

use super::memory::InMemoryDraftStore;

fn service() -> (Arc<InMemoryDraftStore>, DraftService) {
    let store = Arc::new(InMemoryDraftStore::new());
    let service = DraftService::new(store.clone(), GateTimeouts::default());
    (store, service)
}

fn input(title: &str, content: &str) -> DraftInput {
    DraftInput {
        id: None,
        title: title.into(),
        class_label: "4-A".into(),
        author_name: "Sol".into(),
        content: content.into(),
    }
}

fn update_input(id: &str, title: &str, content: &str) -> DraftInput {
    DraftInput {
        id: Some(id.into()),
        ..input(title, content)
    }
}

async fn stored(store: &InMemoryDraftStore, id: &str) -> Draft {
    store
        .scan()
        .await
        .unwrap()
        .into_iter()
        .map(|(_, draft)| draft)
        .find(|draft| draft.id == id)
        .expect("record should exist")
}

#[tokio::test]
async fn save_without_id_creates_a_new_record() {
    let (store, service) = service();

    let saved = service.save_or_update(input("T1", "c")).await.unwrap();
    assert!(saved.created);

    let record = stored(&store, &saved.id).await;
    assert_eq!(record.title, "T1");
    assert_eq!(record.created_at, record.updated_at);
    assert!(record.deleted_at.is_none());
}

#[tokio::test]
async fn update_preserves_id_and_created_at_and_advances_updated_at() {
    let (store, service) = service();

    let saved = service.save_or_update(input("T1", "c1")).await.unwrap();
    let before = stored(&store, &saved.id).await;

    let again = service
        .save_or_update(update_input(&saved.id, "T2", "c2"))
        .await
        .unwrap();
    assert!(!again.created);
    assert_eq!(again.id, saved.id);

    let after = stored(&store, &saved.id).await;
    assert_eq!(after.id, before.id);
    assert_eq!(after.created_at, before.created_at);
    assert!(after.updated_at >= before.updated_at);
    assert_eq!(after.title, "T2");
    assert_eq!(after.content, "c2");
}

#[tokio::test]
async fn repeated_updates_keep_a_single_record_per_id() {
    let (store, service) = service();

    let saved = service.save_or_update(input("T", "v0")).await.unwrap();
    for n in 1..=5 {
        service
            .save_or_update(update_input(&saved.id, "T", &format!("v{n}")))
            .await
            .unwrap();
    }

    assert_eq!(store.row_count().await.unwrap(), 1);
    assert_eq!(stored(&store, &saved.id).await.content, "v5");
}

#[tokio::test]
async fn unmatched_id_falls_through_to_creation() {
    let (store, service) = service();

    let saved = service
        .save_or_update(update_input("no-such-id", "T", "c"))
        .await
        .unwrap();

    // A fresh server-side id is generated; the unmatched one is not reused.
    assert!(saved.created);
    assert_ne!(saved.id, "no-such-id");
    assert_eq!(store.row_count().await.unwrap(), 1);
}

#[tokio::test]
async fn delete_writes_deleted_at_and_nothing_else() {
    let (store, service) = service();

    let saved = service.save_or_update(input("T", "c")).await.unwrap();
    let before = stored(&store, &saved.id).await;

    service.delete_draft(&saved.id).await.unwrap();

    let mut after = stored(&store, &saved.id).await;
    assert!(after.deleted_at.is_some());
    after.deleted_at = None;
    assert_eq!(after, before);
}

#[tokio::test]
async fn delete_unknown_id_is_not_found() {
    let (_, service) = service();
    let err = service.delete_draft("u9").await.unwrap_err();
    assert!(matches!(err, DraftError::NotFound(_)));
}

#[tokio::test]
async fn update_on_archived_id_resurrects_the_draft() {
    let (store, service) = service();

    let saved = service.save_or_update(input("T", "c")).await.unwrap();
    service.delete_draft(&saved.id).await.unwrap();
    assert!(service.get_draft_list().await.is_empty());

    service
        .save_or_update(update_input(&saved.id, "T back", "c2"))
        .await
        .unwrap();

    assert!(stored(&store, &saved.id).await.deleted_at.is_none());
    let listing = service.get_draft_list().await;
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, saved.id);
}

#[tokio::test]
async fn load_distinguishes_archived_from_not_found() {
    let (_, service) = service();

    let saved = service.save_or_update(input("T", "c")).await.unwrap();
    service.delete_draft(&saved.id).await.unwrap();

    let archived = service.load_draft(&saved.id).await.unwrap_err();
    assert!(matches!(archived, DraftError::Archived(_)));

    let missing = service.load_draft("u9").await.unwrap_err();
    assert!(matches!(missing, DraftError::NotFound(_)));
}

#[tokio::test]
async fn load_returns_editable_fields_only() {
    let (_, service) = service();

    let saved = service.save_or_update(input("T1", "body")).await.unwrap();
    let content = service.load_draft(&saved.id).await.unwrap();

    assert_eq!(content.id, saved.id);
    assert_eq!(content.title, "T1");
    assert_eq!(content.class_label, "4-A");
    assert_eq!(content.author_name, "Sol");
    assert_eq!(content.content, "body");
}

#[tokio::test]
async fn empty_store_lists_empty() {
    let (_, service) = service();
    assert!(service.get_draft_list().await.is_empty());
}

#[tokio::test]
async fn listing_is_newest_first_and_capped() {
    let (store, service) = service();

    let mut ids = Vec::new();
    for n in 0..(LIST_LIMIT + 5) {
        let saved = service
            .save_or_update(input(&format!("T{n}"), "c"))
            .await
            .unwrap();
        ids.push(saved.id);
    }

    // Pin strictly increasing timestamps so the expected order is exact.
    let base = Utc::now();
    for (n, id) in ids.iter().enumerate() {
        let pos = store.find_by_id(id).await.unwrap().unwrap();
        let patch = DraftPatch {
            updated_at: Some(base + TimeDelta::seconds(n as i64)),
            ..DraftPatch::default()
        };
        store.update_fields(pos, patch).await.unwrap();
    }

    let listing = service.get_draft_list().await;
    assert_eq!(listing.len(), LIST_LIMIT);

    let expected: Vec<&String> = ids.iter().rev().take(LIST_LIMIT).collect();
    for (entry, id) in listing.iter().zip(expected) {
        assert_eq!(&entry.id, id);
    }
}

#[tokio::test]
async fn listing_keeps_scan_order_on_equal_timestamps() {
    let (store, service) = service();

    let mut ids = Vec::new();
    for n in 0..3 {
        let saved = service
            .save_or_update(input(&format!("T{n}"), "c"))
            .await
            .unwrap();
        ids.push(saved.id);
    }

    let tied = Utc::now();
    for id in &ids {
        let pos = store.find_by_id(id).await.unwrap().unwrap();
        let patch = DraftPatch {
            updated_at: Some(tied),
            ..DraftPatch::default()
        };
        store.update_fields(pos, patch).await.unwrap();
    }

    let listing: Vec<String> = service
        .get_draft_list()
        .await
        .into_iter()
        .map(|entry| entry.id)
        .collect();
    assert_eq!(listing, ids);
}

#[tokio::test]
async fn listing_formats_timestamps_for_display() {
    let (_, service) = service();
    service.save_or_update(input("T", "c")).await.unwrap();

    let listing = service.get_draft_list().await;
    // "%Y-%m-%d %H:%M"
    assert_eq!(listing[0].updated_at.len(), 16);
}

#[tokio::test]
async fn scenario_update_moves_draft_to_front_of_listing() {
    let (_, service) = service();

    let a = service.save_or_update(input("T1", "a")).await.unwrap();
    let b = service.save_or_update(input("B", "b")).await.unwrap();
    service
        .save_or_update(update_input(&a.id, "T2", "a"))
        .await
        .unwrap();

    let listing = service.get_draft_list().await;
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].id, a.id);
    assert_eq!(listing[0].title, "T2");
    assert_eq!(listing[1].id, b.id);
}

#[tokio::test]
async fn scenario_deleted_draft_disappears_from_listing() {
    let (_, service) = service();

    let a = service.save_or_update(input("A", "a")).await.unwrap();
    let b = service.save_or_update(input("B", "b")).await.unwrap();

    service.delete_draft(&a.id).await.unwrap();

    let listing = service.get_draft_list().await;
    assert_eq!(listing.len(), 1);
    assert_eq!(listing[0].id, b.id);

    let err = service.load_draft(&a.id).await.unwrap_err();
    assert!(matches!(err, DraftError::Archived(_)));
}

#[tokio::test]
async fn concurrent_saves_to_one_id_serialize_without_merging() {
    let (store, service) = service();

    let saved = service.save_or_update(input("T", "seed")).await.unwrap();
    let service = Arc::new(service);

    let first = {
        let service = service.clone();
        let id = saved.id.clone();
        tokio::spawn(
            async move { service.save_or_update(update_input(&id, "T", "one")).await },
        )
    };
    let second = {
        let service = service.clone();
        let id = saved.id.clone();
        tokio::spawn(
            async move { service.save_or_update(update_input(&id, "T", "two")).await },
        )
    };

    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    let record = stored(&store, &saved.id).await;
    // Whichever critical section completed second wins outright.
    assert!(record.content == "one" || record.content == "two");
    assert_eq!(store.row_count().await.unwrap(), 1);
}

/// Store wrapper whose `append` parks until released, to keep the write
/// gate held while a second writer times out.
mod blocking {
    use async_trait::async_trait;
    use tokio::sync::Notify;

    use super::*;

    pub struct BlockingStore {
        pub inner: InMemoryDraftStore,
        pub release: Notify,
    }

    impl BlockingStore {
        pub fn new() -> Self {
            Self {
                inner: InMemoryDraftStore::new(),
                release: Notify::new(),
            }
        }
    }

    #[async_trait]
    impl DraftStore for BlockingStore {
        async fn scan(&self) -> Result<Vec<(RowPos, Draft)>, StoreError> {
            self.inner.scan().await
        }

        async fn find_by_id(&self, id: &str) -> Result<Option<RowPos>, StoreError> {
            self.inner.find_by_id(id).await
        }

        async fn append(&self, draft: Draft) -> Result<RowPos, StoreError> {
            self.release.notified().await;
            self.inner.append(draft).await
        }

        async fn update_fields(&self, pos: RowPos, patch: DraftPatch) -> Result<(), StoreError> {
            self.inner.update_fields(pos, patch).await
        }

        async fn row_count(&self) -> Result<u64, StoreError> {
            self.inner.row_count().await
        }
    }
}

#[tokio::test]
async fn contended_gate_returns_busy_and_leaves_state_unchanged() {
    let store = Arc::new(blocking::BlockingStore::new());
    let timeouts = GateTimeouts {
        save: Duration::from_millis(50),
        delete: Duration::from_millis(25),
    };
    let service = Arc::new(DraftService::new(store.clone(), timeouts));

    let holder = {
        let service = service.clone();
        tokio::spawn(async move { service.save_or_update(input("held", "x")).await })
    };
    // Let the first save take the gate and park inside its critical section.
    tokio::task::yield_now().await;

    let busy = service.save_or_update(input("waiter", "y")).await;
    assert!(matches!(busy, Err(DraftError::Busy)));
    // Nothing was written by the rejected attempt.
    assert_eq!(store.row_count().await.unwrap(), 0);

    store.release.notify_one();
    holder.await.unwrap().unwrap();
    assert_eq!(store.row_count().await.unwrap(), 1);
}

#[cfg(feature = "postgres")]
mod postgres {
    use sea_orm::{DatabaseBackend, MockDatabase};

    use super::*;
    use crate::store::PostgresDraftStore;
    use crate::store::entity::draft;

    fn model(row_idx: i64, id: &str) -> draft::Model {
        let now = Utc::now();
        draft::Model {
            row_idx,
            id: id.into(),
            title: "Test Draft".into(),
            class_label: "4-A".into(),
            author_name: "Sol".into(),
            content: "Content".into(),
            created_at: now.into(),
            updated_at: now.into(),
            deleted_at: None,
        }
    }

    #[tokio::test]
    async fn find_by_id_maps_row_idx_to_position() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(3, "u1")]])
            .into_connection();

        let store = PostgresDraftStore::new(db);
        let pos = store.find_by_id("u1").await.unwrap();
        assert_eq!(pos, Some(RowPos(3)));
    }

    #[tokio::test]
    async fn scan_preserves_row_order() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results(vec![vec![model(1, "u1"), model(2, "u2")]])
            .into_connection();

        let store = PostgresDraftStore::new(db);
        let rows = store.scan().await.unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].0, RowPos(1));
        assert_eq!(rows[0].1.id, "u1");
        assert_eq!(rows[1].0, RowPos(2));
        assert_eq!(rows[1].1.id, "u2");
    }
}
