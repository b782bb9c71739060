//! Display-ready projections of book records.

use common::{BookId, display_name};
use domain::{Book, Comment};
use serde::Serialize;

use crate::history::RatingHistory;
use crate::stars::{StarGlyphs, render};
use crate::summary::summarize;

/// A book augmented with derived display fields.
///
/// Projections are never persisted and never carry the edit credential.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookProjection {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    pub short_description: String,
    pub star_glyphs: StarGlyphs,
    /// Mean score, `None` when the book has no ratings.
    pub mean_score: Option<f64>,
    pub votes: usize,
    pub comments: Vec<Comment>,
}

/// Projects a single book.
pub fn project(book: &Book) -> BookProjection {
    let history = RatingHistory::new(&book.ratings);
    let mean_score = history.mean();

    BookProjection {
        id: book.id,
        title: display_name(&book.title),
        author: display_name(&book.author),
        genre: display_name(&book.genre),
        description: book.description.clone(),
        short_description: summarize(&book.description),
        star_glyphs: render(mean_score),
        mean_score,
        votes: history.votes(),
        comments: book.comments.clone(),
    }
}

/// Projects every book, preserving input order.
pub fn project_all(books: &[Book]) -> Vec<BookProjection> {
    books.iter().map(project).collect()
}
