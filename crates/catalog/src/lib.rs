pub mod error;
pub mod filter;
pub mod memory;
pub mod postgres;
pub mod store;

pub use common::BookId;
pub use error::{CatalogError, Result};
pub use filter::BookFilter;
pub use memory::InMemoryCatalog;
pub use postgres::PostgresCatalog;
pub use store::{CatalogStore, CatalogStoreExt};
