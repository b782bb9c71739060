//! Leaderboard endpoints.
//!
//! Each request fetches a fresh snapshot of the catalog and ranks it; no
//! leaderboard is cached between requests.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use catalog::CatalogStore;
use chrono::{NaiveDate, Utc};
use ratings::{BookProjection, RankedBook, most_voted, project, top_n, top_rated_on};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct TopParams {
    pub n: Option<usize>,
}

#[derive(Debug, Deserialize)]
pub struct TodayParams {
    pub date: Option<NaiveDate>,
}

// -- Response types --

/// A ranked book with the score it was ranked by.
///
/// For `/stats/today` the score and votes cover the requested day only.
#[derive(Serialize)]
pub struct RankedBookResponse {
    pub book: BookProjection,
    pub mean_score: f64,
    pub votes: usize,
}

impl From<RankedBook<'_>> for RankedBookResponse {
    fn from(ranked: RankedBook<'_>) -> Self {
        Self {
            book: project(ranked.book),
            mean_score: ranked.mean_score,
            votes: ranked.votes,
        }
    }
}

// -- Handlers --

/// GET /stats/top?n=: the `n` best rated books, best first.
#[tracing::instrument(skip(state))]
pub async fn top<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<TopParams>,
) -> Result<Json<Vec<RankedBookResponse>>, ApiError> {
    let books = state.catalog.list_books().await?;
    // An empty catalog is an empty leaderboard here, not an error.
    if books.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let n = params.n.unwrap_or(state.top_books_limit);
    let ranked = top_n(&books, n)?;
    Ok(Json(ranked.into_iter().map(Into::into).collect()))
}

/// GET /stats/most-voted: the book with the most ratings.
#[tracing::instrument(skip(state))]
pub async fn most_voted_book<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
) -> Result<Json<RankedBookResponse>, ApiError> {
    let books = state.catalog.list_books().await?;
    Ok(Json(most_voted(&books)?.into()))
}

/// GET /stats/today?date=: the best book by ratings cast on one day.
///
/// `date` defaults to today (UTC).
#[tracing::instrument(skip(state))]
pub async fn top_rated_today<S: CatalogStore + Clone + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<TodayParams>,
) -> Result<Json<RankedBookResponse>, ApiError> {
    let date = params.date.unwrap_or_else(|| Utc::now().date_naive());
    let books = state.catalog.list_books().await?;
    Ok(Json(top_rated_on(&books, date)?.into()))
}
