use std::sync::Arc;

use async_trait::async_trait;
use common::normalize_name;
use domain::{Author, Book, BookEdit, BookKey, Comment, Genre, NewBook, RatingEvent};
use tokio::sync::RwLock;

use crate::{BookFilter, BookId, CatalogError, Result, store::CatalogStore};

/// In-memory catalog implementation for testing and local runs.
///
/// Books are held in insertion order. Every mutation of a book happens under
/// the collection's write lock, which makes rating and comment appends atomic.
#[derive(Clone, Default)]
pub struct InMemoryCatalog {
    books: Arc<RwLock<Vec<Book>>>,
    authors: Arc<RwLock<Vec<Author>>>,
    genres: Arc<RwLock<Vec<Genre>>>,
}

impl InMemoryCatalog {
    /// Creates a new empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of books stored.
    pub async fn book_count(&self) -> usize {
        self.books.read().await.len()
    }

    /// Clears all books, authors and genres.
    pub async fn clear(&self) {
        self.books.write().await.clear();
        self.authors.write().await.clear();
        self.genres.write().await.clear();
    }

    async fn modify_book<T>(
        &self,
        id: BookId,
        f: impl FnOnce(&mut Book) -> Result<T> + Send,
    ) -> Result<T> {
        let mut books = self.books.write().await;
        let book = books
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or(CatalogError::BookNotFound(id))?;
        f(book)
    }
}

fn key_taken(books: &[Book], key: &BookKey, except: Option<BookId>) -> bool {
    books
        .iter()
        .any(|b| Some(b.id) != except && b.title == key.title && b.author == key.author)
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    #[tracing::instrument(skip(self, book), fields(title = %book.title, author = %book.author))]
    async fn insert_book(&self, book: NewBook) -> Result<Book> {
        let book = book.into_book(BookId::new())?;
        let key = book.key();

        let mut books = self.books.write().await;
        if key_taken(&books, &key, None) {
            return Err(CatalogError::duplicate_book(&key));
        }
        books.push(book.clone());

        metrics::counter!("catalog_books_inserted").increment(1);
        tracing::debug!(book_id = %book.id, "book inserted");
        Ok(book)
    }

    async fn get_book(&self, id: BookId) -> Result<Option<Book>> {
        let books = self.books.read().await;
        Ok(books.iter().find(|b| b.id == id).cloned())
    }

    async fn find_book_by_key(&self, title: &str, author: &str) -> Result<Option<Book>> {
        let key = BookKey::new(title, author);
        let books = self.books.read().await;
        Ok(books
            .iter()
            .find(|b| b.title == key.title && b.author == key.author)
            .cloned())
    }

    async fn list_books(&self) -> Result<Vec<Book>> {
        Ok(self.books.read().await.clone())
    }

    async fn find_books(&self, filter: BookFilter) -> Result<Vec<Book>> {
        let books = self.books.read().await;
        let matching = books.iter().filter(|b| filter.matches(b)).cloned();
        Ok(match filter.limit {
            Some(limit) => matching.take(limit).collect(),
            None => matching.collect(),
        })
    }

    async fn search_books(&self, text: &str) -> Result<Vec<Book>> {
        let needle = normalize_name(text);
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let books = self.books.read().await;
        Ok(books
            .iter()
            .filter(|b| {
                b.title.contains(&needle) || b.author.contains(&needle) || b.genre.contains(&needle)
            })
            .cloned()
            .collect())
    }

    #[tracing::instrument(skip(self))]
    async fn append_rating(&self, id: BookId, rating: RatingEvent) -> Result<()> {
        self.modify_book(id, |book| {
            book.ratings.push(rating);
            Ok(())
        })
        .await?;
        metrics::counter!("catalog_ratings_appended").increment(1);
        Ok(())
    }

    #[tracing::instrument(skip(self, comment))]
    async fn append_comment(&self, id: BookId, comment: Comment) -> Result<()> {
        self.modify_book(id, |book| {
            book.comments.push(comment);
            Ok(())
        })
        .await
    }

    #[tracing::instrument(skip(self, edit, password))]
    async fn update_book(&self, id: BookId, edit: BookEdit, password: &str) -> Result<Book> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|b| b.id == id)
            .ok_or(CatalogError::BookNotFound(id))?;
        books[index].credential.verify(password)?;

        let edit = edit.normalized()?;
        let key = edit.key();
        if key_taken(&books, &key, Some(id)) {
            return Err(CatalogError::duplicate_book(&key));
        }
        books[index].apply_edit(edit);
        Ok(books[index].clone())
    }

    #[tracing::instrument(skip(self, password))]
    async fn delete_book(&self, id: BookId, password: &str) -> Result<()> {
        let mut books = self.books.write().await;
        let index = books
            .iter()
            .position(|b| b.id == id)
            .ok_or(CatalogError::BookNotFound(id))?;
        books[index].credential.verify(password)?;
        books.remove(index);
        Ok(())
    }

    async fn insert_author(&self, author: Author) -> Result<Author> {
        let mut authors = self.authors.write().await;
        if authors.contains(&author) {
            return Err(CatalogError::DuplicateAuthor(author.name));
        }
        authors.push(author.clone());
        Ok(author)
    }

    async fn list_authors(&self) -> Result<Vec<Author>> {
        Ok(self.authors.read().await.clone())
    }

    async fn insert_genre(&self, genre: Genre) -> Result<Genre> {
        let mut genres = self.genres.write().await;
        if genres.contains(&genre) {
            return Err(CatalogError::DuplicateGenre(genre.name));
        }
        genres.push(genre.clone());
        Ok(genre)
    }

    async fn list_genres(&self) -> Result<Vec<Genre>> {
        Ok(self.genres.read().await.clone())
    }
}
