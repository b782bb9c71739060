use async_trait::async_trait;
use domain::{Author, Book, BookEdit, Comment, Genre, NewBook, RatingEvent};

use crate::{BookFilter, BookId, CatalogError, Result};

/// Core trait for catalog storage implementations.
///
/// A catalog stores books with their rating and comment histories, plus the
/// curated author and genre lists. All implementations must be thread-safe
/// (Send + Sync) and must return books in a stable order (insertion order).
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Inserts a new book with an empty rating history.
    ///
    /// Fails with `DuplicateBook` if a book with the same normalized
    /// title and author exists.
    async fn insert_book(&self, book: NewBook) -> Result<Book>;

    /// Retrieves a book by ID.
    async fn get_book(&self, id: BookId) -> Result<Option<Book>>;

    /// Retrieves a book by title and author.
    ///
    /// Legacy lookup path; prefer `get_book` whenever an ID is known.
    async fn find_book_by_key(&self, title: &str, author: &str) -> Result<Option<Book>>;

    /// Retrieves every book.
    async fn list_books(&self) -> Result<Vec<Book>>;

    /// Retrieves books matching a filter.
    async fn find_books(&self, filter: BookFilter) -> Result<Vec<Book>>;

    /// Retrieves books whose title, author or genre contains `text`.
    async fn search_books(&self, text: &str) -> Result<Vec<Book>>;

    /// Appends a rating event to a book's history.
    ///
    /// The append is a single atomic update against the stored document, so
    /// concurrent ratings for the same book are never lost.
    async fn append_rating(&self, id: BookId, rating: RatingEvent) -> Result<()>;

    /// Appends a comment to a book.
    async fn append_comment(&self, id: BookId, comment: Comment) -> Result<()>;

    /// Overwrites a book's title, author, genre and description.
    ///
    /// Requires the book's edit password.
    async fn update_book(&self, id: BookId, edit: BookEdit, password: &str) -> Result<Book>;

    /// Removes a book and its whole history.
    ///
    /// Requires the book's edit password.
    async fn delete_book(&self, id: BookId, password: &str) -> Result<()>;

    /// Adds an author to the curated list.
    async fn insert_author(&self, author: Author) -> Result<Author>;

    /// Lists curated authors in insertion order.
    async fn list_authors(&self) -> Result<Vec<Author>>;

    /// Adds a genre to the curated list.
    async fn insert_genre(&self, genre: Genre) -> Result<Genre>;

    /// Lists curated genres in insertion order.
    async fn list_genres(&self) -> Result<Vec<Genre>>;
}

/// Extension trait providing convenience methods for catalog stores.
#[async_trait]
pub trait CatalogStoreExt: CatalogStore {
    /// Retrieves a book, failing with `BookNotFound` if it doesn't exist.
    async fn require_book(&self, id: BookId) -> Result<Book> {
        self.get_book(id)
            .await?
            .ok_or(CatalogError::BookNotFound(id))
    }

    /// Checks if a book exists.
    async fn book_exists(&self, id: BookId) -> Result<bool> {
        Ok(self.get_book(id).await?.is_some())
    }

    /// Counts books stored under an author.
    async fn count_by_author(&self, author: &str) -> Result<usize> {
        Ok(self.find_books(BookFilter::for_author(author)).await?.len())
    }
}

// Blanket implementation for all CatalogStore implementations
impl<T: CatalogStore + ?Sized> CatalogStoreExt for T {}
