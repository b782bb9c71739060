//! Rating aggregation for the book catalog.
//!
//! Every function here is a pure transformation over book records handed in
//! by the caller:
//! - [`RatingHistory`] for mean scores and vote counts over rating events
//! - [`render`] for the five-glyph star scale
//! - [`summarize`] for short descriptions
//! - [`project`] / [`project_all`] for display-ready [`BookProjection`]s
//! - [`leaderboard`] queries: top-N, best in group, most voted, top rated on a day

pub mod error;
pub mod history;
pub mod leaderboard;
pub mod projector;
pub mod stars;
pub mod summary;

pub use error::{LeaderboardError, Result};
pub use history::RatingHistory;
pub use leaderboard::{GroupField, RankedBook, best_in_group, most_voted, top_n, top_rated_on};
pub use projector::{BookProjection, project, project_all};
pub use stars::{Star, StarGlyphs, render};
pub use summary::summarize;
