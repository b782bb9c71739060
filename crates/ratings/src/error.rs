//! Leaderboard error types.

use chrono::NaiveDate;
use thiserror::Error;

use crate::leaderboard::GroupField;

/// Recoverable empty-state conditions of the leaderboard queries.
///
/// Callers branch on these to render an empty state; none of them stands in
/// for a real score.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LeaderboardError {
    /// The query was given no books at all.
    #[error("No books to rank")]
    EmptyInput,

    /// No book matched the author or genre filter.
    #[error("No books found for {field} '{value}'")]
    NotFound { field: GroupField, value: String },

    /// No book has a rating dated on the requested day.
    #[error("No ratings submitted on {date}")]
    NoRatingsToday { date: NaiveDate },
}

/// Result type for leaderboard queries.
pub type Result<T> = std::result::Result<T, LeaderboardError>;
