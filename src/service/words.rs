//! Word lists for slugs.
//!
//! Every entry is lowercase ASCII letters only, so a slug can always be split
//! back into its words on any separator that contains a non-letter. The lists
//! live in `words/*.txt`, one word per line.

use std::sync::LazyLock;

/// Adjectives drawn for every slug word except the last.
pub static ADJECTIVES: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| lines(include_str!("words/adjectives.txt")));

/// Nouns drawn for the last slug word.
pub static NOUNS: LazyLock<Vec<&'static str>> =
    LazyLock::new(|| lines(include_str!("words/nouns.txt")));

fn lines(raw: &'static str) -> Vec<&'static str> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_lowercase_letters() {
        for word in ADJECTIVES.iter().chain(NOUNS.iter()) {
            assert!(!word.is_empty());
            assert!(
                word.chars().all(|c| c.is_ascii_lowercase()),
                "unexpected character in {word}"
            );
        }
    }

    #[test]
    fn test_lists_have_no_duplicates() {
        for list in [&*ADJECTIVES, &*NOUNS] {
            let mut sorted = list.clone();
            sorted.sort_unstable();
            sorted.dedup();
            assert_eq!(sorted.len(), list.len());
        }
    }

    #[test]
    fn test_slug_spaces_are_large() {
        // One-word slugs draw a noun; the default two-word slug pairs an adjective with one.
        assert!(NOUNS.len() >= 1_500, "only {} nouns", NOUNS.len());
        assert!(ADJECTIVES.len() >= 1_200, "only {} adjectives", ADJECTIVES.len());
        assert!(ADJECTIVES.len() * NOUNS.len() >= 2_000_000);
    }
}
