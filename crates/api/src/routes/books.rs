//! Book CRUD, rating and comment endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use catalog::{BookId, CatalogStore, CatalogStoreExt};
use domain::{BookEdit, Comment, NewBook, RatingEvent, Score};
use ratings::{BookProjection, project, project_all};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

#[derive(Deserialize)]
pub struct UpdateBookRequest {
    #[serde(flatten)]
    pub edit: BookEdit,
    pub password: String,
}

#[derive(Deserialize)]
pub struct DeleteBookRequest {
    pub password: String,
}

#[derive(Deserialize)]
pub struct RateBookRequest {
    pub score: i64,
}

#[derive(Deserialize)]
pub struct CommentRequest {
    pub text: String,
    #[serde(default)]
    pub author_name: String,
}

// -- Response types --

#[derive(Serialize)]
pub struct BookDetailResponse {
    #[serde(flatten)]
    pub book: BookProjection,
    /// Whether the catalog holds other books by the same author.
    pub more_by_author: bool,
}

// -- Handlers --

/// POST /books: add a book with an empty rating history.
#[tracing::instrument(skip(state, req), fields(title = %req.title))]
pub async fn create<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<NewBook>,
) -> Result<(StatusCode, Json<BookProjection>), ApiError> {
    let book = state.catalog.insert_book(req).await?;
    tracing::info!(book_id = %book.id, "book added");
    Ok((StatusCode::CREATED, Json(project(&book))))
}

/// GET /books: every book, projected, in catalog order.
#[tracing::instrument(skip(state))]
pub async fn list<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<BookProjection>>, ApiError> {
    let books = state.catalog.list_books().await?;
    Ok(Json(project_all(&books)))
}

/// GET /books/search?q=: books whose title, author or genre contains `q`.
#[tracing::instrument(skip(state))]
pub async fn search<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<BookProjection>>, ApiError> {
    let books = state.catalog.search_books(&params.q).await?;
    if books.is_empty() {
        return Err(ApiError::NotFound(format!(
            "No book matches '{}'",
            params.q.trim()
        )));
    }
    Ok(Json(project_all(&books)))
}

/// GET /books/by-key/{author}/{title}: lookup by author and title.
#[tracing::instrument(skip(state))]
pub async fn get_by_key<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path((author, title)): Path<(String, String)>,
) -> Result<Json<BookDetailResponse>, ApiError> {
    let book = state
        .catalog
        .find_book_by_key(&title, &author)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Book '{title}' by {author} not found")))?;

    detail(&state, project(&book), &book.author).await
}

/// GET /books/{id}: a single book with its projection.
#[tracing::instrument(skip(state))]
pub async fn get<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<BookDetailResponse>, ApiError> {
    let book = state.catalog.require_book(parse_book_id(&id)?).await?;
    detail(&state, project(&book), &book.author).await
}

/// PUT /books/{id}: overwrite the editable fields, gated by the edit password.
#[tracing::instrument(skip(state, req))]
pub async fn update<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<UpdateBookRequest>,
) -> Result<Json<BookProjection>, ApiError> {
    let id = parse_book_id(&id)?;
    let book = state
        .catalog
        .update_book(id, req.edit, &req.password)
        .await?;
    tracing::info!(book_id = %id, "book updated");
    Ok(Json(project(&book)))
}

/// DELETE /books/{id}: remove a book, gated by the edit password.
#[tracing::instrument(skip(state, req))]
pub async fn delete<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<DeleteBookRequest>,
) -> Result<StatusCode, ApiError> {
    let id = parse_book_id(&id)?;
    state.catalog.delete_book(id, &req.password).await?;
    tracing::info!(book_id = %id, "book deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// POST /books/{id}/ratings: record a score dated today (UTC).
#[tracing::instrument(skip(state, req), fields(score = req.score))]
pub async fn rate<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<RateBookRequest>,
) -> Result<(StatusCode, Json<BookProjection>), ApiError> {
    let id = parse_book_id(&id)?;
    let score = Score::new(req.score)?;

    state
        .catalog
        .append_rating(id, RatingEvent::today(score))
        .await?;

    let book = state.catalog.require_book(id).await?;
    Ok((StatusCode::CREATED, Json(project(&book))))
}

/// POST /books/{id}/comments: attach a comment; a blank author is anonymous.
#[tracing::instrument(skip(state, req))]
pub async fn comment<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> Result<(StatusCode, Json<BookProjection>), ApiError> {
    let id = parse_book_id(&id)?;
    let comment = Comment::new(req.text, req.author_name)?;

    state.catalog.append_comment(id, comment).await?;

    let book = state.catalog.require_book(id).await?;
    Ok((StatusCode::CREATED, Json(project(&book))))
}

// -- Helpers --

async fn detail<S: CatalogStore + Clone + 'static>(
    state: &AppState<S>,
    book: BookProjection,
    author: &str,
) -> Result<Json<BookDetailResponse>, ApiError> {
    let more_by_author = state.catalog.count_by_author(author).await? > 1;
    Ok(Json(BookDetailResponse {
        book,
        more_by_author,
    }))
}

pub(crate) fn parse_book_id(id: &str) -> Result<BookId, ApiError> {
    id.parse()
        .map_err(|e| ApiError::BadRequest(format!("Invalid book id: {e}")))
}
