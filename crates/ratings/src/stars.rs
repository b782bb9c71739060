//! Five-position star scale.

use serde::{Serialize, Serializer};

/// Number of positions on the scale.
pub const SCALE_WIDTH: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Star {
    Filled,
    Empty,
}

impl Star {
    pub fn glyph(self) -> char {
        match self {
            Star::Filled => '✭',
            Star::Empty => '✩',
        }
    }
}

/// A rendered scale: always exactly five stars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StarGlyphs([Star; SCALE_WIDTH]);

impl StarGlyphs {
    /// The scale shown for a book with no ratings.
    pub const UNRATED: Self = Self([Star::Empty; SCALE_WIDTH]);

    pub fn stars(&self) -> &[Star; SCALE_WIDTH] {
        &self.0
    }

    /// Number of filled positions.
    pub fn filled(&self) -> usize {
        self.0.iter().filter(|s| **s == Star::Filled).count()
    }
}

impl std::fmt::Display for StarGlyphs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for star in &self.0 {
            write!(f, "{}", star.glyph())?;
        }
        Ok(())
    }
}

impl Serialize for StarGlyphs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Renders a mean score on the five-star scale.
///
/// `None` (no ratings) renders all positions empty. Otherwise position `i`
/// is filled iff `mean >= i + 0.5`.
pub fn render(mean: Option<f64>) -> StarGlyphs {
    let Some(mean) = mean else {
        return StarGlyphs::UNRATED;
    };
    let mut stars = [Star::Empty; SCALE_WIDTH];
    for (i, star) in stars.iter_mut().enumerate() {
        if mean >= i as f64 + 0.5 {
            *star = Star::Filled;
        }
    }
    StarGlyphs(stars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrated_is_all_empty() {
        assert_eq!(render(None), StarGlyphs::UNRATED);
        assert_eq!(render(None).to_string(), "✩✩✩✩✩");
    }

    #[test]
    fn mean_three_fills_three() {
        let glyphs = render(Some(3.0));
        assert_eq!(
            glyphs.stars(),
            &[Star::Filled, Star::Filled, Star::Filled, Star::Empty, Star::Empty]
        );
        assert_eq!(glyphs.to_string(), "✭✭✭✩✩");
    }

    #[test]
    fn thresholds_are_half_points() {
        assert_eq!(render(Some(0.0)).filled(), 0);
        assert_eq!(render(Some(0.49)).filled(), 0);
        assert_eq!(render(Some(0.5)).filled(), 1);
        assert_eq!(render(Some(3.2)).filled(), 3);
        assert_eq!(render(Some(3.5)).filled(), 4);
        assert_eq!(render(Some(4.5)).filled(), 5);
        assert_eq!(render(Some(5.0)).filled(), 5);
    }

    #[test]
    fn rated_zero_renders_empty_scale() {
        // Same glyphs as unrated; the projection keeps the mean to tell them apart.
        assert_eq!(render(Some(0.0)), StarGlyphs::UNRATED);
    }

    #[test]
    fn filled_count_is_monotonic() {
        let mut previous = 0;
        for step in 0..=500 {
            let mean = f64::from(step) / 100.0;
            let glyphs = render(Some(mean));
            assert_eq!(glyphs.stars().len(), SCALE_WIDTH);
            assert!(glyphs.filled() >= previous, "regressed at {mean}");
            previous = glyphs.filled();
        }
        assert_eq!(previous, SCALE_WIDTH);
    }

    #[test]
    fn serializes_as_glyph_string() {
        let json = serde_json::to_string(&render(Some(1.0))).unwrap();
        assert_eq!(json, "\"✭✩✩✩✩\"");
    }
}
