use async_trait::async_trait;
use common::normalize_name;
use domain::{
    Author, Book, BookEdit, BookKey, Comment, EditCredential, Genre, NewBook, RatingEvent,
};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::{BookFilter, BookId, CatalogError, Result, store::CatalogStore};

const BOOK_COLUMNS: &str =
    "id, title, author, genre, description, ratings, comments, password_salt, password_hash";

const UNIQUE_BOOK_CONSTRAINT: &str = "unique_book_title_author";

/// PostgreSQL-backed catalog implementation.
///
/// Ratings and comments live in JSONB arrays on the book row; appends are
/// single `UPDATE` statements so the database serializes concurrent writers.
#[derive(Clone)]
pub struct PostgresCatalog {
    pool: PgPool,
}

impl PostgresCatalog {
    /// Creates a new PostgreSQL catalog.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        Ok(())
    }

    fn row_to_book(row: PgRow) -> Result<Book> {
        let ratings: serde_json::Value = row.try_get("ratings")?;
        let comments: serde_json::Value = row.try_get("comments")?;

        Ok(Book {
            id: BookId::from_uuid(row.try_get::<Uuid, _>("id")?),
            title: row.try_get("title")?,
            author: row.try_get("author")?,
            genre: row.try_get("genre")?,
            description: row.try_get("description")?,
            ratings: serde_json::from_value(ratings)?,
            comments: serde_json::from_value(comments)?,
            credential: EditCredential::from_parts(
                row.try_get::<String, _>("password_salt")?,
                row.try_get::<String, _>("password_hash")?,
            ),
        })
    }

    /// Maps a violation of the (title, author) constraint to `DuplicateBook`.
    fn book_write_error(e: sqlx::Error, key: &BookKey) -> CatalogError {
        if let sqlx::Error::Database(ref db_err) = e
            && db_err.constraint() == Some(UNIQUE_BOOK_CONSTRAINT)
        {
            return CatalogError::duplicate_book(key);
        }
        CatalogError::Database(e)
    }

    fn is_unique_violation(e: &sqlx::Error) -> bool {
        matches!(e, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
    }

    /// Loads the stored credential of a book inside a transaction, locking the row.
    async fn lock_credential(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: BookId,
    ) -> Result<EditCredential> {
        let row: Option<PgRow> =
            sqlx::query("SELECT password_salt, password_hash FROM books WHERE id = $1 FOR UPDATE")
                .bind(id.as_uuid())
                .fetch_optional(&mut **tx)
                .await?;

        let row = row.ok_or(CatalogError::BookNotFound(id))?;
        Ok(EditCredential::from_parts(
            row.try_get::<String, _>("password_salt")?,
            row.try_get::<String, _>("password_hash")?,
        ))
    }

    async fn append_to_array(
        &self,
        column: &str,
        id: BookId,
        value: serde_json::Value,
    ) -> Result<()> {
        let sql = format!(
            "UPDATE books SET {column} = {column} || jsonb_build_array($2::jsonb) WHERE id = $1"
        );
        let result = sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(value)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(CatalogError::BookNotFound(id));
        }
        Ok(())
    }
}

fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl CatalogStore for PostgresCatalog {
    #[tracing::instrument(skip(self, book), fields(title = %book.title, author = %book.author))]
    async fn insert_book(&self, book: NewBook) -> Result<Book> {
        let book = book.into_book(BookId::new())?;
        let key = book.key();

        sqlx::query(
            r#"
            INSERT INTO books (id, title, author, genre, description, password_salt, password_hash)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(book.id.as_uuid())
        .bind(&book.title)
        .bind(&book.author)
        .bind(&book.genre)
        .bind(&book.description)
        .bind(book.credential.salt())
        .bind(book.credential.digest())
        .execute(&self.pool)
        .await
        .map_err(|e| Self::book_write_error(e, &key))?;

        metrics::counter!("catalog_books_inserted").increment(1);
        tracing::debug!(book_id = %book.id, "book inserted");
        Ok(book)
    }

    async fn get_book(&self, id: BookId) -> Result<Option<Book>> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = $1");
        let row: Option<PgRow> = sqlx::query(&sql)
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_book).transpose()
    }

    async fn find_book_by_key(&self, title: &str, author: &str) -> Result<Option<Book>> {
        let key = BookKey::new(title, author);
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE title = $1 AND author = $2");
        let row: Option<PgRow> = sqlx::query(&sql)
            .bind(&key.title)
            .bind(&key.author)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Self::row_to_book).transpose()
    }

    async fn list_books(&self) -> Result<Vec<Book>> {
        let sql = format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY seq ASC");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.into_iter().map(Self::row_to_book).collect()
    }

    async fn find_books(&self, filter: BookFilter) -> Result<Vec<Book>> {
        let mut sql = format!("SELECT {BOOK_COLUMNS} FROM books WHERE 1=1");
        let mut param_count = 0;

        // Build dynamic query
        if filter.author.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND author = ${param_count}"));
        }
        if filter.genre.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND genre = ${param_count}"));
        }
        if filter.title.is_some() {
            param_count += 1;
            sql.push_str(&format!(" AND title = ${param_count}"));
        }

        sql.push_str(" ORDER BY seq ASC");

        if filter.limit.is_some() {
            param_count += 1;
            sql.push_str(&format!(" LIMIT ${param_count}"));
        }

        let mut sqlx_query = sqlx::query(&sql);

        if let Some(author) = filter.author {
            sqlx_query = sqlx_query.bind(author);
        }
        if let Some(genre) = filter.genre {
            sqlx_query = sqlx_query.bind(genre);
        }
        if let Some(title) = filter.title {
            sqlx_query = sqlx_query.bind(title);
        }
        if let Some(limit) = filter.limit {
            sqlx_query = sqlx_query.bind(limit as i64);
        }

        let rows = sqlx_query.fetch_all(&self.pool).await?;
        rows.into_iter().map(Self::row_to_book).collect()
    }

    async fn search_books(&self, text: &str) -> Result<Vec<Book>> {
        let needle = normalize_name(text);
        if needle.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT {BOOK_COLUMNS} FROM books \
             WHERE title LIKE $1 OR author LIKE $1 OR genre LIKE $1 \
             ORDER BY seq ASC"
        );
        let rows = sqlx::query(&sql)
            .bind(like_pattern(&needle))
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(Self::row_to_book).collect()
    }

    #[tracing::instrument(skip(self))]
    async fn append_rating(&self, id: BookId, rating: RatingEvent) -> Result<()> {
        self.append_to_array("ratings", id, serde_json::to_value(rating)?)
            .await?;
        metrics::counter!("catalog_ratings_appended").increment(1);
        Ok(())
    }

    #[tracing::instrument(skip(self, comment))]
    async fn append_comment(&self, id: BookId, comment: Comment) -> Result<()> {
        self.append_to_array("comments", id, serde_json::to_value(comment)?)
            .await
    }

    #[tracing::instrument(skip(self, edit, password))]
    async fn update_book(&self, id: BookId, edit: BookEdit, password: &str) -> Result<Book> {
        let mut tx = self.pool.begin().await?;
        Self::lock_credential(&mut tx, id).await?.verify(password)?;

        let edit = edit.normalized()?;
        let key = edit.key();

        let sql = format!(
            "UPDATE books SET title = $2, author = $3, genre = $4, description = $5 \
             WHERE id = $1 RETURNING {BOOK_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id.as_uuid())
            .bind(&edit.title)
            .bind(&edit.author)
            .bind(&edit.genre)
            .bind(&edit.description)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| Self::book_write_error(e, &key))?;

        tx.commit().await?;
        Self::row_to_book(row)
    }

    #[tracing::instrument(skip(self, password))]
    async fn delete_book(&self, id: BookId, password: &str) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        Self::lock_credential(&mut tx, id).await?.verify(password)?;

        sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }

    async fn insert_author(&self, author: Author) -> Result<Author> {
        sqlx::query("INSERT INTO authors (name) VALUES ($1)")
            .bind(&author.name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if Self::is_unique_violation(&e) {
                    CatalogError::DuplicateAuthor(author.name.clone())
                } else {
                    CatalogError::Database(e)
                }
            })?;
        Ok(author)
    }

    async fn list_authors(&self) -> Result<Vec<Author>> {
        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM authors ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(names.into_iter().map(|name| Author { name }).collect())
    }

    async fn insert_genre(&self, genre: Genre) -> Result<Genre> {
        sqlx::query("INSERT INTO genres (name) VALUES ($1)")
            .bind(&genre.name)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if Self::is_unique_violation(&e) {
                    CatalogError::DuplicateGenre(genre.name.clone())
                } else {
                    CatalogError::Database(e)
                }
            })?;
        Ok(genre)
    }

    async fn list_genres(&self) -> Result<Vec<Genre>> {
        let names: Vec<String> = sqlx::query_scalar("SELECT name FROM genres ORDER BY seq ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(names.into_iter().map(|name| Genre { name }).collect())
    }
}
