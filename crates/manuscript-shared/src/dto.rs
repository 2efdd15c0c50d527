//! Data Transfer Objects - request/response types for the draft API.
//!
//! Wire names follow the client contract: `class`, `name`, `updatedAt`.

use serde::{Deserialize, Serialize};

/// Request to save a draft. A missing or empty `id` asks for creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveDraftRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: String,
    #[serde(rename = "class")]
    pub class_label: String,
    #[serde(rename = "name")]
    pub author_name: String,
    pub content: String,
}

/// One row of the draft listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftSummaryDto {
    pub id: String,
    pub title: String,
    pub name: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

/// The editable fields of one draft, as returned by a load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftDataDto {
    pub id: String,
    pub title: String,
    #[serde(rename = "class")]
    pub class_label: String,
    #[serde(rename = "name")]
    pub author_name: String,
    pub content: String,
}
