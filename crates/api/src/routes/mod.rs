//! HTTP route handlers.

pub mod books;
pub mod health;
pub mod metrics;
pub mod stats;
pub mod taxonomy;

use catalog::CatalogStore;

/// Shared application state accessible from all handlers.
pub struct AppState<S: CatalogStore> {
    pub catalog: S,
    /// Length of the top books list when the request does not ask for one.
    pub top_books_limit: usize,
}
