//! HTTP API for the book catalog.
//!
//! Provides REST endpoints for books, ratings, comments, authors and genres,
//! plus leaderboard views computed by the `ratings` engine, with structured
//! logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use catalog::CatalogStore;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::AppState;
use routes::{books, stats, taxonomy};

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S: CatalogStore + Clone + 'static>(
    state: Arc<AppState<S>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .route("/books", get(books::list::<S>).post(books::create::<S>))
        .route("/books/search", get(books::search::<S>))
        .route("/books/by-key/{author}/{title}", get(books::get_by_key::<S>))
        .route(
            "/books/{id}",
            get(books::get::<S>)
                .put(books::update::<S>)
                .delete(books::delete::<S>),
        )
        .route("/books/{id}/ratings", post(books::rate::<S>))
        .route("/books/{id}/comments", post(books::comment::<S>))
        .route(
            "/authors",
            get(taxonomy::list_authors::<S>).post(taxonomy::create_author::<S>),
        )
        .route("/authors/{name}/books", get(taxonomy::author_books::<S>))
        .route("/authors/{name}/best", get(taxonomy::author_best::<S>))
        .route(
            "/genres",
            get(taxonomy::list_genres::<S>).post(taxonomy::create_genre::<S>),
        )
        .route("/genres/{name}/books", get(taxonomy::genre_books::<S>))
        .route("/genres/{name}/best", get(taxonomy::genre_best::<S>))
        .route("/stats/top", get(stats::top::<S>))
        .route("/stats/most-voted", get(stats::most_voted_book::<S>))
        .route("/stats/today", get(stats::top_rated_today::<S>))
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates application state over a catalog using the given configuration.
pub fn create_state<S: CatalogStore + Clone + 'static>(
    catalog: S,
    config: &Config,
) -> Arc<AppState<S>> {
    Arc::new(AppState {
        catalog,
        top_books_limit: config.top_books_limit,
    })
}

/// Creates application state over a catalog with default settings.
pub fn create_default_state<S: CatalogStore + Clone + 'static>(catalog: S) -> Arc<AppState<S>> {
    create_state(catalog, &Config::default())
}
