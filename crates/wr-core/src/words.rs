//! Dictionary of playable words.
//!
//! Built once from the newline-separated word file at startup and handed to
//! scoring by reference. Tests build their own small lists.

use std::collections::HashSet;

#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: HashSet<String>,
}

impl WordList {
    /// Build from newline-separated text. Lines are trimmed and upper-cased;
    /// blank lines are skipped.
    pub fn parse(text: &str) -> Self {
        text.lines().collect()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_uppercase())
    }
}

impl<'a> FromIterator<&'a str> for WordList {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let words = iter
            .into_iter()
            .map(str::trim)
            .filter(|w| !w.is_empty())
            .map(str::to_uppercase)
            .collect();
        Self { words }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_lines() {
        let list = WordList::parse("cat\n  Dirt \n\nBRAVO\r\n");
        assert_eq!(list.len(), 3);
        assert!(list.contains("CAT"));
        assert!(list.contains("dirt"));
        assert!(list.contains("Bravo"));
        assert!(!list.contains(""));
    }

    #[test]
    fn fresh_lists_are_independent() {
        let a = WordList::parse("CAT");
        let b = WordList::default();
        assert!(a.contains("cat"));
        assert!(!b.contains("cat"));
        assert!(b.is_empty());
    }
}
