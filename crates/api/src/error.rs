//! API error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use catalog::CatalogError;
use domain::DomainError;
use ratings::LeaderboardError;
use serde_json::json;
use thiserror::Error;

/// API-level error type that maps to HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found.
    #[error("{0}")]
    NotFound(String),
    /// Bad request from the client.
    #[error("{0}")]
    BadRequest(String),
    /// Catalog storage error.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// A leaderboard query had nothing to rank.
    #[error(transparent)]
    Leaderboard(#[from] LeaderboardError),
    /// Input rejected by domain validation.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::Domain(err) => (
                StatusCode::BAD_REQUEST,
                json!({ "error": err.to_string() }),
            ),
            ApiError::Catalog(err) => {
                let (status, msg) = catalog_error_to_response(err);
                (status, json!({ "error": msg }))
            }
            ApiError::Leaderboard(err) => {
                let condition = leaderboard_condition(&err);
                metrics::counter!("api_leaderboard_conditions", "condition" => condition)
                    .increment(1);
                (
                    StatusCode::NOT_FOUND,
                    json!({ "error": err.to_string(), "condition": condition }),
                )
            }
        };

        (status, axum::Json(body)).into_response()
    }
}

fn catalog_error_to_response(err: CatalogError) -> (StatusCode, String) {
    match &err {
        CatalogError::BookNotFound(_) => (StatusCode::NOT_FOUND, err.to_string()),
        CatalogError::DuplicateBook { .. }
        | CatalogError::DuplicateAuthor(_)
        | CatalogError::DuplicateGenre(_) => (StatusCode::CONFLICT, err.to_string()),
        CatalogError::Unauthorized(_) => (StatusCode::FORBIDDEN, err.to_string()),
        CatalogError::Invalid(_) => (StatusCode::BAD_REQUEST, err.to_string()),
        CatalogError::Database(_)
        | CatalogError::Migration(_)
        | CatalogError::Serialization(_) => {
            tracing::error!(error = %err, "internal server error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal server error".to_string(),
            )
        }
    }
}

/// Machine-readable name of a leaderboard condition.
pub fn leaderboard_condition(err: &LeaderboardError) -> &'static str {
    match err {
        LeaderboardError::EmptyInput => "empty_input",
        LeaderboardError::NotFound { .. } => "not_found",
        LeaderboardError::NoRatingsToday { .. } => "no_ratings_today",
    }
}
