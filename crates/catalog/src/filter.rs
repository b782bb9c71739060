use common::normalize_name;
use domain::Book;

/// Builder for filtering books by author, genre or title.
///
/// Values are normalized on the way in, so matching is case-insensitive.
/// An empty filter matches every book.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookFilter {
    /// Filter by exact (normalized) author.
    pub author: Option<String>,

    /// Filter by exact (normalized) genre.
    pub genre: Option<String>,

    /// Filter by exact (normalized) title.
    pub title: Option<String>,

    /// Maximum number of books to return.
    pub limit: Option<usize>,
}

impl BookFilter {
    /// Creates a filter that matches everything.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a filter for books by one author.
    pub fn for_author(author: &str) -> Self {
        Self::new().author(author)
    }

    /// Creates a filter for books in one genre.
    pub fn for_genre(genre: &str) -> Self {
        Self::new().genre(genre)
    }

    pub fn author(mut self, author: &str) -> Self {
        self.author = Some(normalize_name(author));
        self
    }

    pub fn genre(mut self, genre: &str) -> Self {
        self.genre = Some(normalize_name(genre));
        self
    }

    pub fn title(mut self, title: &str) -> Self {
        self.title = Some(normalize_name(title));
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns whether a stored book passes every set criterion.
    pub fn matches(&self, book: &Book) -> bool {
        if let Some(ref author) = self.author
            && &book.author != author
        {
            return false;
        }
        if let Some(ref genre) = self.genre
            && &book.genre != genre
        {
            return false;
        }
        if let Some(ref title) = self.title
            && &book.title != title
        {
            return false;
        }
        true
    }
}
