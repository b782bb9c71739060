//! Domain records for the book catalog.
//!
//! This crate provides:
//! - [`Book`] with its append-only [`RatingEvent`] history and comments
//! - [`Score`], the validated 0..=5 rating value
//! - [`Author`] and [`Genre`] taxonomy entries
//! - [`EditCredential`], the salted hash guarding edit and delete

pub mod book;
pub mod credential;
pub mod error;
pub mod rating;
pub mod taxonomy;

pub use book::{Book, BookEdit, BookKey, Comment, NewBook};
pub use credential::{AuthzError, EditCredential};
pub use error::DomainError;
pub use rating::{RatingEvent, Score};
pub use taxonomy::{Author, Genre};
