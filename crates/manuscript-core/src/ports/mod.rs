//! Ports - trait definitions for external dependencies.
//! These are the "interfaces" that infrastructure must implement.

mod store;

pub use store::{DraftPatch, DraftStore, RowPos, StoreError};
