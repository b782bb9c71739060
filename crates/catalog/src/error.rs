use domain::{AuthzError, DomainError};
use thiserror::Error;

use crate::BookId;

/// Errors that can occur when interacting with the catalog store.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No book is stored under this ID.
    #[error("Book not found: {0}")]
    BookNotFound(BookId),

    /// A book with the same title and author already exists.
    #[error("Book '{title}' by {author} already exists")]
    DuplicateBook { title: String, author: String },

    /// An author with the same name already exists.
    #[error("Author already exists: {0}")]
    DuplicateAuthor(String),

    /// A genre with the same name already exists.
    #[error("Genre already exists: {0}")]
    DuplicateGenre(String),

    /// The supplied edit password was rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] AuthzError),

    /// The input failed domain validation.
    #[error("Invalid input: {0}")]
    Invalid(#[from] DomainError),

    /// A database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A database migration error occurred.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A serialization/deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CatalogError {
    pub(crate) fn duplicate_book(key: &domain::BookKey) -> Self {
        CatalogError::DuplicateBook {
            title: key.title.clone(),
            author: key.author.clone(),
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
