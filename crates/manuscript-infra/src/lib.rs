//! # Manuscript Infrastructure
//!
//! Concrete implementations of the ports defined in `manuscript-core`.
//! This crate contains the draft store backends.
//!
//! ## Feature Flags
//!
//! - `full` (default) - All features enabled
//! - `minimal` - No external dependencies, in-memory only
//! - `postgres` - PostgreSQL store via SeaORM

pub mod store;

// Re-exports - In-Memory
pub use store::{DatabaseConfig, InMemoryDraftStore};

// Re-exports - PostgreSQL
#[cfg(feature = "postgres")]
pub use store::PostgresDraftStore;
