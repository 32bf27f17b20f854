//! # Monoglyph
//!
//! A multithreaded search for the string with no repeated letter that
//! contains the most dictionary words as substrings.
//!
//! The dictionary is stored in a trie whose nodes know which letters their
//! prefix uses. Starting from each seed word, the search repeatedly swaps the
//! tail of the candidate for a longer word that begins with that tail and
//! shares no letter with the rest of the candidate, scoring every result.

pub mod config;
pub mod dictionary;
pub mod letters;
pub mod pool;
pub mod scorer;
pub mod search;
pub mod trie;

pub use config::{Config, ConfigError};
pub use dictionary::{filter_words, is_valid_word, load_dictionary, DictionaryError};
pub use letters::LetterSet;
pub use pool::{prepare_seeds, Outcome, PoolError, SeedQueue, WorkerPool};
pub use scorer::WordScorer;
pub use search::{
    BestRecord, Record, Reporter, SearchEngine, StdoutReporter, StopSignal, SuffixMiss,
};
pub use trie::{Trie, TrieNode};

/// Number of letters in the supported alphabet
pub const ALPHABET_SIZE: usize = 26;

/// Build the trie from filtered `words` and search from every eligible seed
pub fn search<R: Reporter>(
    words: &[String],
    config: &Config,
    reporter: R,
    stop: &StopSignal,
) -> Result<Outcome, PoolError> {
    let trie = Trie::from_words(words);
    let seeds = prepare_seeds(&trie, words, config);
    WorkerPool::new(&trie, config).run(seeds, reporter, stop)
}
