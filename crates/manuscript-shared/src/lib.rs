//! # Manuscript Shared
//!
//! Wire types shared between the draft store API and its clients.

pub mod dto;
pub mod response;

pub use response::{DataResponse, ResponseStatus, StatusResponse};
