//! PostgreSQL draft store.

use async_trait::async_trait;
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbConn, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use manuscript_core::domain::Draft;
use manuscript_core::ports::{DraftPatch, DraftStore, RowPos, StoreError};

use super::entity::draft::{self, Entity as DraftEntity};

/// SQL-backed draft store.
///
/// Row positions are the `row_idx` sequence values, so persisted insertion
/// order survives restarts. Each update is a single statement against the
/// primary key, which gives ungated readers the fully-before-or-fully-after
/// visibility the port requires.
pub struct PostgresDraftStore {
    db: DbConn,
}

impl PostgresDraftStore {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn query_err(err: DbErr) -> StoreError {
    StoreError::Query(err.to_string())
}

#[async_trait]
impl DraftStore for PostgresDraftStore {
    async fn scan(&self) -> Result<Vec<(RowPos, Draft)>, StoreError> {
        let rows = DraftEntity::find()
            .order_by_asc(draft::Column::RowIdx)
            .all(&self.db)
            .await
            .map_err(query_err)?;

        Ok(rows
            .into_iter()
            .map(|model| (RowPos(model.row_idx as u64), model.into()))
            .collect())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<RowPos>, StoreError> {
        let row = DraftEntity::find()
            .filter(draft::Column::Id.eq(id))
            .one(&self.db)
            .await
            .map_err(query_err)?;

        Ok(row.map(|model| RowPos(model.row_idx as u64)))
    }

    async fn append(&self, d: Draft) -> Result<RowPos, StoreError> {
        let model = draft::ActiveModel {
            row_idx: NotSet,
            id: Set(d.id),
            title: Set(d.title),
            class_label: Set(d.class_label),
            author_name: Set(d.author_name),
            content: Set(d.content),
            created_at: Set(d.created_at.into()),
            updated_at: Set(d.updated_at.into()),
            deleted_at: Set(d.deleted_at.map(Into::into)),
        };

        let inserted = model.insert(&self.db).await.map_err(query_err)?;
        Ok(RowPos(inserted.row_idx as u64))
    }

    async fn update_fields(&self, pos: RowPos, patch: DraftPatch) -> Result<(), StoreError> {
        let mut model = draft::ActiveModel {
            row_idx: Set(pos.0 as i64),
            ..Default::default()
        };

        if let Some(title) = patch.title {
            model.title = Set(title);
        }
        if let Some(class_label) = patch.class_label {
            model.class_label = Set(class_label);
        }
        if let Some(author_name) = patch.author_name {
            model.author_name = Set(author_name);
        }
        if let Some(content) = patch.content {
            model.content = Set(content);
        }
        if let Some(updated_at) = patch.updated_at {
            model.updated_at = Set(updated_at.into());
        }
        if let Some(deleted_at) = patch.deleted_at {
            model.deleted_at = Set(deleted_at.map(Into::into));
        }

        match model.update(&self.db).await {
            Ok(_) => Ok(()),
            Err(DbErr::RecordNotUpdated) => Err(StoreError::RowOutOfBounds(pos.0)),
            Err(err) => Err(query_err(err)),
        }
    }

    async fn row_count(&self) -> Result<u64, StoreError> {
        DraftEntity::find().count(&self.db).await.map_err(query_err)
    }
}
