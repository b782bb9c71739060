//! Rating scores and the events that record them.

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A user-submitted score between 0 and 5 inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "u8")]
pub struct Score(u8);

impl Score {
    /// Highest score a user can give.
    pub const MAX: u8 = 5;

    /// Validates and wraps a raw score.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if (0..=i64::from(Self::MAX)).contains(&value) {
            Ok(Self(value as u8))
        } else {
            Err(DomainError::InvalidScore { score: value })
        }
    }

    /// Returns the score as a plain integer.
    pub fn value(&self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Score {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Score> for u8 {
    fn from(score: Score) -> Self {
        score.0
    }
}

impl std::fmt::Display for Score {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One rating submission: a score and the calendar day it was given.
///
/// Rating events are appended to a book's history and never edited or
/// removed individually.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingEvent {
    pub score: Score,
    pub occurred_on: NaiveDate,
}

impl RatingEvent {
    /// Creates a rating event for a given day.
    pub fn new(score: Score, occurred_on: NaiveDate) -> Self {
        Self { score, occurred_on }
    }

    /// Creates a rating event dated today (UTC).
    pub fn today(score: Score) -> Self {
        Self::new(score, Utc::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_accepts_full_range() {
        for value in 0..=5 {
            assert_eq!(Score::new(value).unwrap().value(), value as u8);
        }
    }

    #[test]
    fn score_rejects_out_of_range() {
        assert_eq!(
            Score::new(6),
            Err(DomainError::InvalidScore { score: 6 })
        );
        assert!(Score::new(-1).is_err());
    }

    #[test]
    fn score_deserialization_is_validated() {
        let ok: Score = serde_json::from_str("4").unwrap();
        assert_eq!(ok.value(), 4);
        assert!(serde_json::from_str::<Score>("9").is_err());
    }

    #[test]
    fn rating_event_serializes_date_as_iso() {
        let event = RatingEvent::new(
            Score::new(3).unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 17).unwrap(),
        );
        let json = serde_json::to_value(event).unwrap();
        assert_eq!(json, serde_json::json!({"score": 3, "occurred_on": "2024-05-17"}));
    }

    #[test]
    fn rating_event_today_uses_current_date() {
        let event = RatingEvent::today(Score::new(5).unwrap());
        assert_eq!(event.occurred_on, Utc::now().date_naive());
    }
}
