//! PostgreSQL integration tests
//!
//! These tests use a shared PostgreSQL container for efficiency.
//! Run with:
//!
//! ```bash
//! cargo test -p catalog --test postgres_integration -- --test-threads=1
//! ```

use std::sync::Arc;

use catalog::{BookFilter, BookId, CatalogError, CatalogStore, CatalogStoreExt, PostgresCatalog};
use chrono::NaiveDate;
use domain::{Author, BookEdit, Comment, Genre, NewBook, RatingEvent, Score};
use sqlx::PgPool;
use testcontainers::{ContainerAsync, runners::AsyncRunner};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

/// Shared container info - container stays alive for all tests
struct ContainerInfo {
    #[allow(dead_code)] // Container must stay alive for tests
    container: ContainerAsync<Postgres>,
    connection_string: String,
}

/// Global shared container
static CONTAINER: OnceCell<Arc<ContainerInfo>> = OnceCell::const_new();

async fn get_container_info() -> Arc<ContainerInfo> {
    CONTAINER
        .get_or_init(|| async {
            let container = Postgres::default().start().await.unwrap();

            let host = container.get_host().await.unwrap();
            let port = container.get_host_port_ipv4(5432).await.unwrap();

            let connection_string =
                format!("postgres://postgres:postgres@{}:{}/postgres", host, port);

            // Create a temporary pool just for migrations
            let temp_pool = PgPool::connect(&connection_string).await.unwrap();

            // Run migrations using raw_sql to execute multiple statements
            sqlx::raw_sql(include_str!(
                "../../../migrations/001_create_catalog_tables.sql"
            ))
            .execute(&temp_pool)
            .await
            .unwrap();

            temp_pool.close().await;

            Arc::new(ContainerInfo {
                container,
                connection_string,
            })
        })
        .await
        .clone()
}

/// Get a fresh store with its own pool and cleared tables
async fn get_test_store() -> PostgresCatalog {
    let info = get_container_info().await;

    // Create a fresh pool for each test to avoid connection issues
    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&info.connection_string)
        .await
        .unwrap();

    // Clear tables for test isolation
    sqlx::query("TRUNCATE TABLE books, authors, genres")
        .execute(&pool)
        .await
        .unwrap();

    PostgresCatalog::new(pool)
}

fn new_book(title: &str, author: &str, genre: &str) -> NewBook {
    NewBook::new(title, author, genre, "First sentence. Second.", "pw")
}

fn rating(score: i64) -> RatingEvent {
    RatingEvent::new(
        Score::new(score).unwrap(),
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
    )
}

#[tokio::test]
async fn insert_and_retrieve_book() {
    let store = get_test_store().await;

    let book = store
        .insert_book(new_book("A Christmas Carol", "Charles Dickens", "Classic"))
        .await
        .unwrap();

    let fetched = store.get_book(book.id).await.unwrap().unwrap();
    assert_eq!(fetched.title, "a christmas carol");
    assert_eq!(fetched.author, "charles dickens");
    assert!(fetched.ratings.is_empty());
    assert!(fetched.comments.is_empty());
    assert!(fetched.credential.verify("pw").is_ok());
}

#[tokio::test]
async fn duplicate_book_is_rejected() {
    let store = get_test_store().await;

    store
        .insert_book(new_book("Emma", "Jane Austen", "Romance"))
        .await
        .unwrap();
    let result = store
        .insert_book(new_book("EMMA", "jane austen", "Romance"))
        .await;

    assert!(matches!(result, Err(CatalogError::DuplicateBook { .. })));
}

#[tokio::test]
async fn ratings_append_in_order() {
    let store = get_test_store().await;
    let book = store.insert_book(new_book("Emma", "x", "g")).await.unwrap();

    store.append_rating(book.id, rating(5)).await.unwrap();
    store.append_rating(book.id, rating(2)).await.unwrap();

    let book = store.require_book(book.id).await.unwrap();
    let scores: Vec<u8> = book.ratings.iter().map(|r| r.score.value()).collect();
    assert_eq!(scores, [5, 2]);
    assert_eq!(
        book.ratings[0].occurred_on,
        NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
    );
}

#[tokio::test]
async fn concurrent_ratings_are_not_lost() {
    let store = get_test_store().await;
    let id = store.insert_book(new_book("Emma", "x", "g")).await.unwrap().id;

    let handles: Vec<_> = (0..20)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move { store.append_rating(id, rating(i % 6)).await })
        })
        .collect();
    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let book = store.require_book(id).await.unwrap();
    assert_eq!(book.ratings.len(), 20);
}

#[tokio::test]
async fn append_to_missing_book_fails() {
    let store = get_test_store().await;
    let result = store.append_rating(BookId::new(), rating(1)).await;
    assert!(matches!(result, Err(CatalogError::BookNotFound(_))));
}

#[tokio::test]
async fn comments_round_trip() {
    let store = get_test_store().await;
    let book = store.insert_book(new_book("Emma", "x", "g")).await.unwrap();
    let comment = Comment::new("Sharp and funny", "ann").unwrap();

    store.append_comment(book.id, comment.clone()).await.unwrap();

    let book = store.require_book(book.id).await.unwrap();
    assert_eq!(book.comments, vec![comment]);
}

#[tokio::test]
async fn list_and_filter_keep_insertion_order() {
    let store = get_test_store().await;
    store.insert_book(new_book("Persuasion", "Jane Austen", "Romance")).await.unwrap();
    store.insert_book(new_book("Dracula", "Bram Stoker", "Horror")).await.unwrap();
    store.insert_book(new_book("Emma", "Jane Austen", "Romance")).await.unwrap();

    let all: Vec<_> = store.list_books().await.unwrap().into_iter().map(|b| b.title).collect();
    assert_eq!(all, ["persuasion", "dracula", "emma"]);

    let austen: Vec<_> = store
        .find_books(BookFilter::for_author("JANE AUSTEN"))
        .await
        .unwrap()
        .into_iter()
        .map(|b| b.title)
        .collect();
    assert_eq!(austen, ["persuasion", "emma"]);

    let limited = store
        .find_books(BookFilter::for_genre("romance").limit(1))
        .await
        .unwrap();
    assert_eq!(limited.len(), 1);
}

#[tokio::test]
async fn search_and_legacy_lookup() {
    let store = get_test_store().await;
    let book = store
        .insert_book(new_book("A Christmas Carol", "Charles Dickens", "Classic"))
        .await
        .unwrap();

    let hits = store.search_books("Christmas").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert!(store.search_books("qWertY29").await.unwrap().is_empty());

    let found = store
        .find_book_by_key("A CHRISTMAS CAROL", "charles dickens")
        .await
        .unwrap();
    assert_eq!(found.map(|b| b.id), Some(book.id));
}

#[tokio::test]
async fn update_and_delete_are_password_gated() {
    let store = get_test_store().await;
    let book = store.insert_book(new_book("Emma", "x", "g")).await.unwrap();
    let edit = BookEdit {
        title: "Emma".into(),
        author: "x".into(),
        genre: "Comedy".into(),
        description: "Revised.".into(),
    };

    let denied = store.update_book(book.id, edit.clone(), "wrong").await;
    assert!(matches!(denied, Err(CatalogError::Unauthorized(_))));

    let updated = store.update_book(book.id, edit, "pw").await.unwrap();
    assert_eq!(updated.genre, "comedy");

    assert!(store.delete_book(book.id, "wrong").await.is_err());
    store.delete_book(book.id, "pw").await.unwrap();
    assert!(!store.book_exists(book.id).await.unwrap());
}

#[tokio::test]
async fn update_checks_password_before_fields() {
    let store = get_test_store().await;
    let book = store.insert_book(new_book("Emma", "x", "g")).await.unwrap();
    let blank_title = BookEdit {
        title: "  ".into(),
        author: "x".into(),
        genre: "g".into(),
        description: String::new(),
    };

    let denied = store.update_book(book.id, blank_title.clone(), "wrong").await;
    assert!(matches!(denied, Err(CatalogError::Unauthorized(_))));

    let invalid = store.update_book(book.id, blank_title, "pw").await;
    assert!(matches!(invalid, Err(CatalogError::Invalid(_))));
}

#[tokio::test]
async fn authors_and_genres() {
    let store = get_test_store().await;

    store.insert_author(Author::new("Jane Austen").unwrap()).await.unwrap();
    let dup = store.insert_author(Author::new("JANE AUSTEN").unwrap()).await;
    assert!(matches!(dup, Err(CatalogError::DuplicateAuthor(_))));

    store.insert_genre(Genre::new("Poetry").unwrap()).await.unwrap();
    store.insert_genre(Genre::new("Horror").unwrap()).await.unwrap();
    let genres: Vec<_> = store
        .list_genres()
        .await
        .unwrap()
        .into_iter()
        .map(|g| g.name)
        .collect();
    assert_eq!(genres, ["poetry", "horror"]);
    assert_eq!(store.list_authors().await.unwrap().len(), 1);
}
