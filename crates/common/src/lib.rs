//! Shared identifiers and name handling for the book catalog.

pub mod names;
pub mod types;

pub use names::{display_name, normalize_name};
pub use types::{BookId, ParseBookIdError};
