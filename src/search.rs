//! The recursive growth search.
//!
//! A candidate grows by picking a split point, keeping everything before it,
//! and replacing the trailing fragment with a longer dictionary word that
//! starts with that fragment and shares no letter with the kept prefix. Every
//! string the search produces is therefore monoglyphic by construction.
//!
//! Split points are tried from the end of the candidate towards the start, so
//! appending whole words is tried before rewriting longer tails.

use crate::letters::LetterSet;
use crate::scorer::WordScorer;
use crate::trie::{Trie, TrieNode};
use log::trace;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// Behavior of `augment` when a trailing fragment is not a prefix of any word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SuffixMiss {
    /// Give up on the remaining, longer fragments of this candidate
    #[default]
    Abort,
    /// Move on to the next split point
    Skip,
}

/// A scored candidate string
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Record {
    pub score: usize,
    pub text: String,
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.text, self.score)
    }
}

/// Receives every improvement of the best record, in order
pub trait Reporter: Sync {
    fn improved(&self, record: &Record);
}

impl<F> Reporter for F
where
    F: Fn(&Record) + Sync,
{
    fn improved(&self, record: &Record) {
        self(record)
    }
}

/// Prints each improvement as `<text> <score>` on stdout
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutReporter;

impl Reporter for StdoutReporter {
    fn improved(&self, record: &Record) {
        println!("{}", record);
    }
}

/// The best candidate found by any worker.
///
/// The pair is guarded by one mutex and the reporter is called while it is
/// held, so improvements are reported once each and in increasing score
/// order. The atomic score lets workers skip the lock for candidates that
/// cannot win.
#[derive(Debug)]
pub struct BestRecord<R> {
    score: AtomicUsize,
    record: Mutex<Record>,
    reporter: R,
}

impl<R: Reporter> BestRecord<R> {
    pub fn new(reporter: R) -> Self {
        Self {
            score: AtomicUsize::new(0),
            record: Mutex::new(Record::default()),
            reporter,
        }
    }

    /// Replace the record if `score` beats it. Returns true on improvement
    pub fn offer(&self, score: usize, text: &str) -> bool {
        if score <= self.score.load(Ordering::Relaxed) {
            return false;
        }

        let mut record = self.record.lock().unwrap_or_else(PoisonError::into_inner);
        if score <= record.score {
            return false;
        }
        record.score = score;
        record.text.clear();
        record.text.push_str(text);
        self.score.store(score, Ordering::Relaxed);
        self.reporter.improved(&record);
        true
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    pub fn score(&self) -> usize {
        self.score.load(Ordering::Relaxed)
    }

    pub fn snapshot(&self) -> Record {
        self.record
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn into_record(self) -> Record {
        self.record
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

/// Cooperative cancellation flag shared between workers
#[derive(Debug, Clone, Default)]
pub struct StopSignal(Arc<AtomicBool>);

impl StopSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stop(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_stopped(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// Where a candidate was split, carried to each extension of its tail
#[derive(Debug, Clone, Copy)]
struct Extension<'p> {
    parent: &'p str,
    prefix: &'p str,
    suffix_len: usize,
    depth: usize,
}

/// Single-threaded search state for one worker
pub struct SearchEngine<'a, R> {
    trie: &'a Trie,
    scorer: WordScorer<'a>,
    best: &'a BestRecord<R>,
    stop: &'a StopSignal,
    suffix_miss: SuffixMiss,
    candidates: u64,
    observer: Option<&'a mut dyn FnMut(&str, &str)>,
}

impl<'a, R: Reporter> SearchEngine<'a, R> {
    pub fn new(trie: &'a Trie, best: &'a BestRecord<R>, stop: &'a StopSignal) -> Self {
        Self {
            trie,
            scorer: WordScorer::new(trie),
            best,
            stop,
            suffix_miss: SuffixMiss::default(),
            candidates: 0,
            observer: None,
        }
    }

    pub fn with_suffix_miss(mut self, suffix_miss: SuffixMiss) -> Self {
        self.suffix_miss = suffix_miss;
        self
    }

    /// Call `observer` with `(parent, candidate)` for every candidate scored
    pub fn with_observer(mut self, observer: &'a mut dyn FnMut(&str, &str)) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Number of candidates scored so far
    pub fn candidates(&self) -> u64 {
        self.candidates
    }

    /// Grow `partial` exhaustively, offering every candidate to the best
    /// record.
    pub fn augment(&mut self, partial: &str) {
        self.augment_at(partial, 0);
    }

    fn augment_at(&mut self, partial: &str, depth: usize) {
        let trie = self.trie;

        for split in (0..=partial.len()).rev() {
            if self.stop.is_stopped() {
                return;
            }

            let (prefix, suffix) = partial.split_at(split);
            let Some(suffix_node) = trie.walk(suffix) else {
                match self.suffix_miss {
                    SuffixMiss::Abort => break,
                    SuffixMiss::Skip => continue,
                }
            };

            let context = Extension {
                parent: partial,
                prefix,
                suffix_len: suffix.len(),
                depth,
            };
            suffix_node.find_unconflicted_terminals(LetterSet::from_word(prefix), &mut |word| {
                extend(self, &context, word)
            });
        }
    }
}

/// Try `word` as the new tail of a candidate split at `context`
fn extend<R: Reporter>(engine: &mut SearchEngine<'_, R>, context: &Extension<'_>, word: &TrieNode) {
    let tail = word.partial();
    if tail.len() <= context.suffix_len || engine.stop.is_stopped() {
        return;
    }

    let mut candidate = String::with_capacity(context.prefix.len() + tail.len());
    candidate.push_str(context.prefix);
    candidate.push_str(tail);
    debug_assert_eq!(
        LetterSet::from_word(&candidate).len(),
        candidate.len(),
        "candidate repeats a letter: {candidate}"
    );

    engine.candidates += 1;
    if let Some(observer) = engine.observer.as_deref_mut() {
        observer(context.parent, &candidate);
    }
    let score = engine.scorer.count_words(&candidate);
    trace!("depth {} candidate {} scores {}", context.depth, candidate, score);
    engine.best.offer(score, &candidate);

    engine.augment_at(&candidate, context.depth + 1);
}
