//! Ranked views across a snapshot of books.
//!
//! All queries take the caller's snapshot by reference and never refetch.
//! Ties always resolve to the book that appears first in the snapshot.

use std::cmp::Ordering;

use chrono::NaiveDate;
use common::normalize_name;
use domain::Book;
use serde::Serialize;

use crate::error::{LeaderboardError, Result};
use crate::history::RatingHistory;

/// Field used to group books for [`best_in_group`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupField {
    Author,
    Genre,
}

impl GroupField {
    pub fn value_of(self, book: &Book) -> &str {
        match self {
            GroupField::Author => &book.author,
            GroupField::Genre => &book.genre,
        }
    }
}

impl std::fmt::Display for GroupField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupField::Author => write!(f, "author"),
            GroupField::Genre => write!(f, "genre"),
        }
    }
}

/// A book together with the figures it was ranked by.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankedBook<'a> {
    pub book: &'a Book,
    pub mean_score: f64,
    pub votes: usize,
}

impl<'a> RankedBook<'a> {
    /// Ranks a book on its whole history; unrated books score 0.
    fn all_time(book: &'a Book) -> Self {
        let history = RatingHistory::new(&book.ratings);
        Self {
            book,
            mean_score: history.mean().unwrap_or(0.0),
            votes: history.votes(),
        }
    }

    /// Ranks a book on the events of a single day, if it has any.
    fn on_day(book: &'a Book, date: NaiveDate) -> Option<Self> {
        let history = RatingHistory::new(&book.ratings);
        history.mean_on(date).map(|mean_score| Self {
            book,
            mean_score,
            votes: history.votes_on(date),
        })
    }
}

/// Returns the `n` highest-scoring books, best first.
///
/// Books with equal mean scores keep their snapshot order.
#[tracing::instrument(level = "debug", skip(books), fields(books = books.len()))]
pub fn top_n(books: &[Book], n: usize) -> Result<Vec<RankedBook<'_>>> {
    ensure_not_empty(books)?;
    record_query("top_n");

    let mut ranked: Vec<_> = books.iter().map(RankedBook::all_time).collect();
    ranked.sort_by(|a, b| b.mean_score.total_cmp(&a.mean_score));
    ranked.truncate(n);
    Ok(ranked)
}

/// Returns the highest-scoring book whose author or genre equals `value`.
///
/// Matching ignores case. Fails with `NotFound` when nothing matches, even
/// if every matching book would have scored 0.
#[tracing::instrument(level = "debug", skip(books), fields(books = books.len()))]
pub fn best_in_group<'a>(
    books: &'a [Book],
    field: GroupField,
    value: &str,
) -> Result<RankedBook<'a>> {
    ensure_not_empty(books)?;
    record_query("best_in_group");

    let wanted = normalize_name(value);
    let matching = books
        .iter()
        .filter(|book| normalize_name(field.value_of(book)) == wanted)
        .map(RankedBook::all_time);

    first_max_by(matching, |a, b| a.mean_score.total_cmp(&b.mean_score)).ok_or_else(|| {
        LeaderboardError::NotFound {
            field,
            value: value.to_string(),
        }
    })
}

/// Returns the book with the most rating events.
#[tracing::instrument(level = "debug", skip(books), fields(books = books.len()))]
pub fn most_voted(books: &[Book]) -> Result<RankedBook<'_>> {
    ensure_not_empty(books)?;
    record_query("most_voted");

    first_max_by(books.iter().map(RankedBook::all_time), |a, b| {
        a.votes.cmp(&b.votes)
    })
    .ok_or(LeaderboardError::EmptyInput)
}

/// Returns the book with the best mean over ratings dated `date`.
///
/// Ratings from any other day are ignored entirely. Books without a rating
/// on `date` do not compete.
#[tracing::instrument(level = "debug", skip(books), fields(books = books.len()))]
pub fn top_rated_on(books: &[Book], date: NaiveDate) -> Result<RankedBook<'_>> {
    ensure_not_empty(books)?;
    record_query("top_rated_on");

    let rated_that_day = books.iter().filter_map(|book| RankedBook::on_day(book, date));

    first_max_by(rated_that_day, |a, b| a.mean_score.total_cmp(&b.mean_score))
        .ok_or(LeaderboardError::NoRatingsToday { date })
}

fn ensure_not_empty(books: &[Book]) -> Result<()> {
    if books.is_empty() {
        return Err(LeaderboardError::EmptyInput);
    }
    Ok(())
}

fn record_query(query: &'static str) {
    metrics::counter!("ratings_leaderboard_queries", "query" => query).increment(1);
}

/// Maximum by `compare`, keeping the earliest item among equals.
fn first_max_by<T>(
    items: impl Iterator<Item = T>,
    compare: impl Fn(&T, &T) -> Ordering,
) -> Option<T> {
    items.fold(None, |best, candidate| match best {
        Some(current) if compare(&candidate, &current) != Ordering::Greater => Some(current),
        _ => Some(candidate),
    })
}
