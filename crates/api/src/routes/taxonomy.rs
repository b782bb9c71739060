//! Author and genre endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use catalog::{BookFilter, CatalogStore};
use domain::{Author, Genre};
use ratings::{BookProjection, GroupField, best_in_group, project_all};
use serde::{Deserialize, Serialize};

use super::AppState;
use super::stats::RankedBookResponse;
use crate::error::ApiError;

#[derive(Deserialize)]
pub struct NameRequest {
    pub name: String,
}

#[derive(Serialize)]
pub struct NameResponse {
    pub name: String,
    pub display_name: String,
}

impl From<Author> for NameResponse {
    fn from(author: Author) -> Self {
        Self {
            display_name: author.display_name(),
            name: author.name,
        }
    }
}

impl From<Genre> for NameResponse {
    fn from(genre: Genre) -> Self {
        Self {
            display_name: genre.display_name(),
            name: genre.name,
        }
    }
}

/// GET /authors
#[tracing::instrument(skip(state))]
pub async fn list_authors<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<NameResponse>>, ApiError> {
    let authors = state.catalog.list_authors().await?;
    Ok(Json(authors.into_iter().map(Into::into).collect()))
}

/// POST /authors
#[tracing::instrument(skip(state, req))]
pub async fn create_author<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<NameRequest>,
) -> Result<(StatusCode, Json<NameResponse>), ApiError> {
    let author = state.catalog.insert_author(Author::new(&req.name)?).await?;
    Ok((StatusCode::CREATED, Json(author.into())))
}

/// GET /genres
#[tracing::instrument(skip(state))]
pub async fn list_genres<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<Vec<NameResponse>>, ApiError> {
    let genres = state.catalog.list_genres().await?;
    Ok(Json(genres.into_iter().map(Into::into).collect()))
}

/// POST /genres
#[tracing::instrument(skip(state, req))]
pub async fn create_genre<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Json(req): Json<NameRequest>,
) -> Result<(StatusCode, Json<NameResponse>), ApiError> {
    let genre = state.catalog.insert_genre(Genre::new(&req.name)?).await?;
    Ok((StatusCode::CREATED, Json(genre.into())))
}

/// GET /authors/{name}/books
#[tracing::instrument(skip(state))]
pub async fn author_books<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<BookProjection>>, ApiError> {
    let books = state.catalog.find_books(BookFilter::for_author(&name)).await?;
    Ok(Json(project_all(&books)))
}

/// GET /genres/{name}/books
#[tracing::instrument(skip(state))]
pub async fn genre_books<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(name): Path<String>,
) -> Result<Json<Vec<BookProjection>>, ApiError> {
    let books = state.catalog.find_books(BookFilter::for_genre(&name)).await?;
    Ok(Json(project_all(&books)))
}

/// GET /authors/{name}/best: the author's highest rated book.
#[tracing::instrument(skip(state))]
pub async fn author_best<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(name): Path<String>,
) -> Result<Json<RankedBookResponse>, ApiError> {
    best(&state, GroupField::Author, &name).await
}

/// GET /genres/{name}/best: the genre's highest rated book.
#[tracing::instrument(skip(state))]
pub async fn genre_best<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(name): Path<String>,
) -> Result<Json<RankedBookResponse>, ApiError> {
    best(&state, GroupField::Genre, &name).await
}

// Ranks over the whole catalog: an empty catalog reports `empty_input`,
// otherwise an unknown name reports `not_found`.
async fn best<S: CatalogStore + Clone + 'static>(
    state: &AppState<S>,
    field: GroupField,
    name: &str,
) -> Result<Json<RankedBookResponse>, ApiError> {
    let books = state.catalog.list_books().await?;
    Ok(Json(best_in_group(&books, field, name)?.into()))
}
