//! Read-only view over a book's rating events.

use chrono::NaiveDate;
use domain::RatingEvent;

/// Borrowed view of an append-only rating history.
#[derive(Debug, Clone, Copy)]
pub struct RatingHistory<'a> {
    events: &'a [RatingEvent],
}

impl<'a> RatingHistory<'a> {
    pub fn new(events: &'a [RatingEvent]) -> Self {
        Self { events }
    }

    /// Number of rating events (votes).
    pub fn votes(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Arithmetic mean of all scores, or `None` for an unrated book.
    pub fn mean(&self) -> Option<f64> {
        mean_of(self.events.iter())
    }

    /// Mean of the scores submitted on `date` only.
    pub fn mean_on(&self, date: NaiveDate) -> Option<f64> {
        mean_of(self.on(date))
    }

    /// Number of rating events submitted on `date`.
    pub fn votes_on(&self, date: NaiveDate) -> usize {
        self.on(date).count()
    }

    /// Events submitted on `date`, in submission order.
    pub fn on(&self, date: NaiveDate) -> impl Iterator<Item = &'a RatingEvent> + use<'a> {
        self.events.iter().filter(move |e| e.occurred_on == date)
    }
}

fn mean_of<'a>(events: impl Iterator<Item = &'a RatingEvent>) -> Option<f64> {
    let (sum, count) = events.fold((0u64, 0u64), |(sum, count), e| {
        (sum + u64::from(e.score.value()), count + 1)
    });
    (count > 0).then(|| sum as f64 / count as f64)
}
