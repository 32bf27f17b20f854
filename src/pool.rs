//! Parallel search over seed words.
//!
//! A fixed number of workers compete for seeds from one ordered queue. Each
//! worker runs its own [`SearchEngine`] to exhaustion on a seed before taking
//! the next one. The trie is shared read-only; the best record is the only
//! shared mutable state.

use crate::config::Config;
use crate::scorer::WordScorer;
use crate::search::{BestRecord, Record, Reporter, SearchEngine, StopSignal};
use crate::trie::Trie;
use log::{debug, info};
use rayon::prelude::*;
use std::cmp::Reverse;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PoolError {
    #[error("failed to build worker pool")]
    Build(#[from] rayon::ThreadPoolBuildError),
}

/// Result of a completed or stopped run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub best: Record,
    /// Seeds searched to exhaustion; a seed abandoned on stop is not counted
    pub seeds: usize,
    pub candidates: u64,
    pub stopped: bool,
}

/// Ordered queue of seeds consumed by competing workers.
///
/// The queue is filled once and then only drained, so a shared cursor is
/// enough to hand out every seed exactly once.
#[derive(Debug)]
pub struct SeedQueue {
    seeds: Vec<String>,
    cursor: AtomicUsize,
}

impl SeedQueue {
    pub fn new(seeds: Vec<String>) -> Self {
        Self {
            seeds,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Take the next seed, or `None` once the queue is drained
    pub fn take_next(&self) -> Option<&str> {
        let index = self.cursor.fetch_add(1, Ordering::Relaxed);
        self.seeds.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.seeds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seeds.is_empty()
    }
}

/// Select and order the seeds for a run.
///
/// Words shorter than `config.min_seed_len` are dropped. With
/// `config.sort_seeds` the rest are ordered by descending self-score; the
/// sort is stable, so ties keep dictionary order.
pub fn prepare_seeds(trie: &Trie, words: &[String], config: &Config) -> Vec<String> {
    let scorer = WordScorer::new(trie);
    let mut scored: Vec<(usize, &String)> = words
        .par_iter()
        .filter(|word| word.len() >= config.min_seed_len)
        .map(|word| (scorer.count_words(word), word))
        .collect();

    if config.sort_seeds {
        scored.sort_by_key(|&(score, _)| Reverse(score));
    }

    scored.into_iter().map(|(_, word)| word.clone()).collect()
}

/// Fixed-size pool of search workers
pub struct WorkerPool<'a> {
    trie: &'a Trie,
    config: &'a Config,
}

impl<'a> WorkerPool<'a> {
    pub fn new(trie: &'a Trie, config: &'a Config) -> Self {
        Self { trie, config }
    }

    /// Search from every seed and block until all workers are done.
    ///
    /// Raising `stop` makes workers abandon their current seed and exit.
    pub fn run<R: Reporter>(
        &self,
        seeds: Vec<String>,
        reporter: R,
        stop: &StopSignal,
    ) -> Result<Outcome, PoolError> {
        let threads = self.config.threads.max(1);
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("monoglyph-worker-{}", index))
            .build()?;

        let queue = SeedQueue::new(seeds);
        let best = BestRecord::new(reporter);
        let seeds_done = AtomicUsize::new(0);
        let candidates = AtomicU64::new(0);

        info!("searching {} seeds with {} workers", queue.len(), threads);

        thread::scope(|scope| {
            let (done, finished) = mpsc::channel::<()>();
            if let Some(limit) = self.config.time_limit {
                scope.spawn(move || watchdog(finished, limit, stop));
            }

            pool.scope(|workers| {
                for worker in 0..threads {
                    let (queue, best, seeds_done, candidates) =
                        (&queue, &best, &seeds_done, &candidates);
                    workers.spawn(move |_| {
                        let mut engine = SearchEngine::new(self.trie, best, stop)
                            .with_suffix_miss(self.config.suffix_miss);
                        let mut completed = 0;
                        debug!("worker {} started", worker);
                        while !stop.is_stopped() {
                            let Some(seed) = queue.take_next() else {
                                break;
                            };
                            engine.augment(seed);
                            // A seed cut short by the stop signal does not count.
                            if !stop.is_stopped() {
                                completed += 1;
                            }
                        }
                        debug!(
                            "worker {} finished: {} seeds, {} candidates",
                            worker,
                            completed,
                            engine.candidates()
                        );
                        seeds_done.fetch_add(completed, Ordering::Relaxed);
                        candidates.fetch_add(engine.candidates(), Ordering::Relaxed);
                    });
                }
            });

            drop(done);
        });

        let outcome = Outcome {
            best: best.into_record(),
            seeds: seeds_done.into_inner(),
            candidates: candidates.into_inner(),
            stopped: stop.is_stopped(),
        };
        info!(
            "searched {} seeds, scored {} candidates",
            outcome.seeds, outcome.candidates
        );
        Ok(outcome)
    }
}

/// Raise `stop` after `limit` unless the run finishes first
fn watchdog(finished: mpsc::Receiver<()>, limit: Duration, stop: &StopSignal) {
    if let Err(RecvTimeoutError::Timeout) = finished.recv_timeout(limit) {
        info!("time limit of {:?} reached, stopping", limit);
        stop.stop();
    }
}
