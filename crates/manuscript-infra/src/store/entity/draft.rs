//! Draft entity for SeaORM.

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "drafts")]
pub struct Model {
    /// Persisted insertion order; doubles as the store's row position.
    #[sea_orm(primary_key)]
    pub row_idx: i64,
    #[sea_orm(unique)]
    pub id: String,
    pub title: String,
    pub class_label: String,
    pub author_name: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    /// NULL = active, set = archived.
    pub deleted_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Conversion from SeaORM Model to the domain Draft.
impl From<Model> for manuscript_core::domain::Draft {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            class_label: model.class_label,
            author_name: model.author_name,
            content: model.content,
            created_at: model.created_at.into(),
            updated_at: model.updated_at.into(),
            deleted_at: model.deleted_at.map(Into::into),
        }
    }
}
