//! Book records and the inputs that create or edit them.

use common::{BookId, normalize_name};
use serde::{Deserialize, Serialize};

use crate::credential::EditCredential;
use crate::error::DomainError;
use crate::rating::RatingEvent;

/// A reader comment attached to a book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub text: String,
    pub author_name: String,
}

impl Comment {
    /// Name recorded when a comment is left without one.
    pub const ANONYMOUS: &'static str = "anonymous";

    /// Creates a comment, rejecting blank text.
    pub fn new(text: impl Into<String>, author_name: impl Into<String>) -> Result<Self, DomainError> {
        let text = text.into().trim().to_string();
        if text.is_empty() {
            return Err(DomainError::EmptyField { field: "text" });
        }
        let author_name = author_name.into().trim().to_string();
        let author_name = if author_name.is_empty() {
            Self::ANONYMOUS.to_string()
        } else {
            author_name
        };
        Ok(Self { text, author_name })
    }
}

/// Uniqueness key of a book: normalized title and author.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BookKey {
    pub title: String,
    pub author: String,
}

impl BookKey {
    pub fn new(title: &str, author: &str) -> Self {
        Self {
            title: normalize_name(title),
            author: normalize_name(author),
        }
    }
}

impl std::fmt::Display for BookKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}' by {}", self.title, self.author)
    }
}

/// A stored book.
///
/// Title, author and genre are held in normalized (lowercase) form.
/// `ratings` is in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub description: String,
    pub ratings: Vec<RatingEvent>,
    pub comments: Vec<Comment>,
    pub credential: EditCredential,
}

impl Book {
    /// Returns the uniqueness key of this book.
    pub fn key(&self) -> BookKey {
        BookKey {
            title: self.title.clone(),
            author: self.author.clone(),
        }
    }

    /// Overwrites the editable fields with a validated edit.
    pub fn apply_edit(&mut self, edit: BookEdit) {
        self.title = edit.title;
        self.author = edit.author;
        self.genre = edit.genre;
        self.description = edit.description;
    }
}

/// Input for inserting a new book.
#[derive(Clone, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(default)]
    pub description: String,
    pub password: String,
}

impl NewBook {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        genre: impl Into<String>,
        description: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            genre: genre.into(),
            description: description.into(),
            password: password.into(),
        }
    }

    /// Returns the uniqueness key this book would be stored under.
    pub fn key(&self) -> BookKey {
        BookKey::new(&self.title, &self.author)
    }

    /// Validates and normalizes the input into a book with an empty history.
    pub fn into_book(self, id: BookId) -> Result<Book, DomainError> {
        let fields = BookEdit {
            title: self.title,
            author: self.author,
            genre: self.genre,
            description: self.description,
        }
        .normalized()?;
        let credential = EditCredential::from_password(&self.password)?;

        Ok(Book {
            id,
            title: fields.title,
            author: fields.author,
            genre: fields.genre,
            description: fields.description,
            ratings: Vec::new(),
            comments: Vec::new(),
            credential,
        })
    }
}

impl std::fmt::Debug for NewBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewBook")
            .field("title", &self.title)
            .field("author", &self.author)
            .field("genre", &self.genre)
            .finish_non_exhaustive()
    }
}

/// Replacement values for a book's editable fields.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BookEdit {
    pub title: String,
    pub author: String,
    pub genre: String,
    #[serde(default)]
    pub description: String,
}

impl BookEdit {
    /// Normalizes names and rejects blank title, author or genre.
    pub fn normalized(self) -> Result<Self, DomainError> {
        let title = required("title", &self.title)?;
        let author = required("author", &self.author)?;
        let genre = required("genre", &self.genre)?;
        Ok(Self {
            title,
            author,
            genre,
            description: self.description.trim().to_string(),
        })
    }

    pub fn key(&self) -> BookKey {
        BookKey::new(&self.title, &self.author)
    }
}

fn required(field: &'static str, raw: &str) -> Result<String, DomainError> {
    let value = normalize_name(raw);
    if value.is_empty() {
        Err(DomainError::EmptyField { field })
    } else {
        Ok(value)
    }
}
