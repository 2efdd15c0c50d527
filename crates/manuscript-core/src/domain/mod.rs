//! Domain entities - the core business objects.

mod draft;

pub use draft::{Draft, DraftInput};
