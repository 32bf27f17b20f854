//! Monoglyph CLI
//!
//! Loads a word list, searches it, and prints every improvement of the best
//! monoglyphic string as `<string> <score>`.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use monoglyph::config::available_threads;
use monoglyph::dictionary::DEFAULT_WORDS_PATH;
use monoglyph::{load_dictionary, Config, StdoutReporter, StopSignal, SuffixMiss, Trie};
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[command(version, about = "Find the letter-unique string containing the most dictionary words")]
struct Options {
    /// Newline-delimited word list
    #[arg(short, long, default_value = DEFAULT_WORDS_PATH)]
    words: PathBuf,

    /// Number of worker threads [default: available parallelism]
    #[arg(short, long)]
    threads: Option<usize>,

    /// Only start searches from words at least this long
    #[arg(long, default_value_t = 1)]
    min_seed_len: usize,

    /// Queue seeds in dictionary order instead of by self-score
    #[arg(long)]
    no_sort_seeds: bool,

    /// Keep trying longer tails when a tail is not a prefix of any word
    #[arg(long)]
    skip_missing_suffix: bool,

    /// Stop searching after this many seconds
    #[arg(long, value_name = "SECS")]
    time_limit: Option<u64>,

    /// Print the filtered dictionary and exit
    #[arg(long)]
    dump: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Options {
    fn config(&self) -> Config {
        Config {
            threads: self.threads.unwrap_or_else(available_threads),
            min_seed_len: self.min_seed_len,
            sort_seeds: !self.no_sort_seeds,
            suffix_miss: if self.skip_missing_suffix {
                SuffixMiss::Skip
            } else {
                SuffixMiss::Abort
            },
            time_limit: self.time_limit.map(Duration::from_secs),
        }
    }
}

fn main() -> Result<()> {
    let options = Options::parse();

    let level = if options.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let config = options.config();
    config.validate().context("invalid configuration")?;

    let start = Instant::now();
    let words = load_dictionary(&options.words)?;
    info!(
        "loaded {} words from {} in {:.2?}",
        words.len(),
        options.words.display(),
        start.elapsed()
    );

    if options.dump {
        let trie = Trie::from_words(&words);
        let stdout = io::stdout();
        let mut out = stdout.lock();
        trie.dump(&mut out).context("failed to write dictionary")?;
        out.flush()?;
        return Ok(());
    }

    let stop = StopSignal::new();
    let outcome = monoglyph::search(&words, &config, StdoutReporter, &stop)?;

    if outcome.stopped {
        info!("search stopped early");
    }
    info!(
        "best: {} ({} words) after {:.2?}",
        outcome.best.text,
        outcome.best.score,
        start.elapsed()
    );
    Ok(())
}
