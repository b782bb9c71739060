//! Short-form description shown in book listings.

/// Returns the description up to and including its first period.
///
/// A description without a period is returned whole, without a period
/// appended.
pub fn summarize(description: &str) -> String {
    let text = description.trim();
    match text.find('.') {
        Some(end) => text[..=end].to_string(),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_first_sentence() {
        assert_eq!(summarize("A teaser. More detail follows."), "A teaser.");
    }

    #[test]
    fn no_period_returns_whole_text() {
        assert_eq!(summarize("Just a teaser"), "Just a teaser");
    }

    #[test]
    fn single_sentence_is_unchanged() {
        assert_eq!(summarize("One sentence only."), "One sentence only.");
    }

    #[test]
    fn empty_description_stays_empty() {
        assert_eq!(summarize(""), "");
        assert_eq!(summarize("   "), "");
    }

    #[test]
    fn leading_whitespace_is_trimmed() {
        assert_eq!(summarize("\n  Intro. Rest"), "Intro.");
    }
}
