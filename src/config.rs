//! Run configuration shared by the pool and the search engine.

use crate::search::SuffixMiss;
use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("worker count must be at least 1")]
    NoThreads,
    #[error("minimum seed length must be at least 1")]
    EmptySeeds,
}

/// Settings for one search run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Number of worker threads
    pub threads: usize,
    /// Seeds shorter than this are not queued. They still go into the trie
    pub min_seed_len: usize,
    /// Queue seeds by descending self-score instead of dictionary order
    pub sort_seeds: bool,
    /// What `augment` does when a suffix is not a prefix of any word
    pub suffix_miss: SuffixMiss,
    /// Stop the search after this much wall-clock time
    pub time_limit: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            threads: available_threads(),
            min_seed_len: 1,
            sort_seeds: true,
            suffix_miss: SuffixMiss::Abort,
            time_limit: None,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.threads == 0 {
            return Err(ConfigError::NoThreads);
        }
        if self.min_seed_len == 0 {
            return Err(ConfigError::EmptySeeds);
        }
        Ok(())
    }
}

/// Hardware parallelism, falling back to a single worker
pub fn available_threads() -> usize {
    thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}
