//! Fitness function for candidate strings.

use crate::trie::Trie;

/// Counts dictionary words appearing as substrings of a text
#[derive(Debug, Clone, Copy)]
pub struct WordScorer<'a> {
    trie: &'a Trie,
}

impl<'a> WordScorer<'a> {
    pub fn new(trie: &'a Trie) -> Self {
        Self { trie }
    }

    /// Count every substring of `text` that is a dictionary word.
    ///
    /// Overlapping occurrences all count. From each offset the trie is walked
    /// forward until the path ends, so the cost is bounded by the trie depth
    /// rather than the text length.
    pub fn count_words(&self, text: &str) -> usize {
        let bytes = text.as_bytes();
        let mut count = 0;

        for start in 0..bytes.len() {
            let mut node = self.trie.root();
            for &character in &bytes[start..] {
                if !character.is_ascii_lowercase() {
                    break;
                }
                match node.child(character) {
                    Some(next) => node = next,
                    None => break,
                }
                if node.is_terminal() {
                    count += 1;
                }
            }
        }

        count
    }
}
