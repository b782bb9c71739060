//! Canonical storage form and display form of titles, authors and genres.

/// Normalizes a name for storage and comparison.
///
/// Trims surrounding whitespace, collapses inner runs of whitespace to a
/// single space and lowercases the result.
pub fn normalize_name(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Re-capitalizes a stored name for display: first letter of each word.
pub fn display_name(stored: &str) -> String {
    stored
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_and_trims() {
        assert_eq!(normalize_name("  Charles   DICKENS "), "charles dickens");
    }

    #[test]
    fn normalize_empty_is_empty() {
        assert_eq!(normalize_name("   "), "");
    }

    #[test]
    fn display_capitalizes_each_word() {
        assert_eq!(display_name("a christmas carol"), "A Christmas Carol");
    }

    #[test]
    fn display_handles_non_ascii_initials() {
        assert_eq!(display_name("émile zola"), "Émile Zola");
    }

    #[test]
    fn display_of_normalized_is_stable() {
        let stored = normalize_name("The Old Man And The Sea");
        assert_eq!(display_name(&stored), "The Old Man And The Sea");
    }
}
