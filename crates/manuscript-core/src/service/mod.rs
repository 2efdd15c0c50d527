//! Draft service - the orchestration layer over the store backend.

mod drafts;

pub use drafts::{DraftContent, DraftService, DraftSummary, GateTimeouts, SavedDraft, LIST_LIMIT};
