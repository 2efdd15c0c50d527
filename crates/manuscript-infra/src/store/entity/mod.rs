//! SeaORM entities for the drafts table.

pub mod draft;
