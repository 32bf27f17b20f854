use monoglyph::{
    prepare_seeds, search, Config, ConfigError, LetterSet, Record, SeedQueue, StopSignal, SuffixMiss,
    Trie, WorkerPool,
};
use std::sync::Mutex;
use std::time::Duration;

#[derive(Default)]
struct Reports(Mutex<Vec<(String, usize)>>);

impl Reports {
    fn reporter(&self) -> impl Fn(&Record) + Sync + '_ {
        move |record: &Record| {
            self.0
                .lock()
                .unwrap()
                .push((record.text.clone(), record.score))
        }
    }

    fn take(&self) -> Vec<(String, usize)> {
        std::mem::take(&mut *self.0.lock().unwrap())
    }
}

fn get_test_words() -> Vec<String> {
    ["a", "at", "ta", "cat", "tab"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn single_worker() -> Config {
    Config {
        threads: 1,
        ..Config::default()
    }
}

#[test]
fn test_seed_queue_order() {
    let queue = SeedQueue::new(vec!["one".to_string(), "two".to_string()]);
    assert_eq!(queue.len(), 2);
    assert_eq!(queue.take_next(), Some("one"));
    assert_eq!(queue.take_next(), Some("two"));
    assert_eq!(queue.take_next(), None);
    assert_eq!(queue.take_next(), None);
    assert!(SeedQueue::new(Vec::new()).is_empty());
}

#[test]
fn test_prepare_seeds_sorted_by_self_score() {
    let words = get_test_words();
    let trie = Trie::from_words(&words);

    let seeds = prepare_seeds(&trie, &words, &single_worker());
    assert_eq!(seeds, vec!["cat", "tab", "at", "ta", "a"]);
}

#[test]
fn test_prepare_seeds_unsorted_and_min_length() {
    let words = get_test_words();
    let trie = Trie::from_words(&words);

    let config = Config {
        sort_seeds: false,
        ..single_worker()
    };
    assert_eq!(prepare_seeds(&trie, &words, &config), words);

    let config = Config {
        min_seed_len: 3,
        ..config
    };
    assert_eq!(prepare_seeds(&trie, &words, &config), vec!["cat", "tab"]);
}

#[test]
fn test_end_to_end_sorted_seeds() {
    let reporter = Reports::default();
    let stop = StopSignal::new();
    let outcome = search(&get_test_words(), &single_worker(), reporter.reporter(), &stop).unwrap();

    assert_eq!(reporter.take(), vec![("tab".to_string(), 3)]);
    assert_eq!(outcome.best.text, "tab");
    assert_eq!(outcome.best.score, 3);
    assert_eq!(outcome.seeds, 5);
    assert_eq!(outcome.candidates, 2);
    assert!(!outcome.stopped);
}

#[test]
fn test_end_to_end_dictionary_order() {
    let reporter = Reports::default();
    let config = Config {
        sort_seeds: false,
        ..single_worker()
    };
    let stop = StopSignal::new();
    let outcome = search(&get_test_words(), &config, reporter.reporter(), &stop).unwrap();

    assert_eq!(
        reporter.take(),
        vec![("at".to_string(), 2), ("tab".to_string(), 3)]
    );
    assert_eq!(outcome.best.text, "tab");
    assert_eq!(outcome.candidates, 2);
}

#[test]
fn test_end_to_end_is_reproducible() {
    let words: Vec<String> = [
        "a", "i", "an", "at", "in", "it", "on", "to", "ant", "tan", "nit", "tin", "ton", "not",
        "pan", "nap", "tap", "pat", "pin", "spin", "spit", "stop", "post", "pots", "snap",
        "paint", "inapt", "pinto", "piston", "potash",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    for suffix_miss in [SuffixMiss::Abort, SuffixMiss::Skip] {
        let config = Config {
            suffix_miss,
            ..single_worker()
        };
        let first = Reports::default();
        let second = Reports::default();
        let a = search(&words, &config, first.reporter(), &StopSignal::new()).unwrap();
        let b = search(&words, &config, second.reporter(), &StopSignal::new()).unwrap();

        assert_eq!(first.take(), second.take());
        assert_eq!(a, b);
        assert!(a.best.score > 0);
    }
}

#[test]
fn test_many_workers_agree_on_best_score() {
    let words: Vec<String> = ["ab", "cd", "ef"].iter().map(|s| s.to_string()).collect();
    let config = Config {
        threads: 4,
        ..Config::default()
    };
    let reporter = Reports::default();
    let outcome = search(&words, &config, reporter.reporter(), &StopSignal::new()).unwrap();

    assert_eq!(outcome.best.score, 3);
    assert_eq!(outcome.best.text.len(), 6);
    assert_eq!(LetterSet::from_word(&outcome.best.text).len(), 6);
    assert_eq!(outcome.seeds, 3);

    let reports = reporter.take();
    for pair in reports.windows(2) {
        assert!(pair[0].1 < pair[1].1);
    }
    assert_eq!(reports.last().map(|(_, score)| *score), Some(3));
}

#[test]
fn test_stopped_before_start() {
    let words = get_test_words();
    let trie = Trie::from_words(&words);
    let config = Config {
        threads: 2,
        ..Config::default()
    };
    let stop = StopSignal::new();
    stop.stop();

    let reporter = Reports::default();
    let outcome = WorkerPool::new(&trie, &config)
        .run(words.clone(), reporter.reporter(), &stop)
        .unwrap();

    assert!(outcome.stopped);
    assert_eq!(outcome.seeds, 0);
    assert_eq!(outcome.candidates, 0);
    assert_eq!(outcome.best, Record::default());
    assert!(reporter.take().is_empty());
}

#[test]
fn test_time_limit_not_reached() {
    let config = Config {
        time_limit: Some(Duration::from_secs(60)),
        ..single_worker()
    };
    let reporter = Reports::default();
    let stop = StopSignal::new();
    let outcome = search(&get_test_words(), &config, reporter.reporter(), &stop).unwrap();

    assert!(!outcome.stopped);
    assert_eq!(outcome.best.score, 3);
}

#[test]
fn test_time_limit_stops_search() {
    let words: Vec<String> = ["ab", "cd", "ef", "gh", "ij", "kl"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let config = Config {
        time_limit: Some(Duration::from_millis(50)),
        ..single_worker()
    };
    // Every improvement takes longer than the whole limit.
    let slow = |_: &Record| std::thread::sleep(Duration::from_millis(100));
    let outcome = search(&words, &config, slow, &StopSignal::new()).unwrap();

    assert!(outcome.stopped);
    assert!(outcome.best.score < 6, "ran to completion: {:?}", outcome.best);
    assert!(outcome.seeds < words.len());
}

#[test]
fn test_abandoned_seed_not_counted() {
    let words = get_test_words();
    let trie = Trie::from_words(&words);
    let config = single_worker();
    let stop = StopSignal::new();

    // Stop on the first improvement, found while searching the fourth seed.
    let stopper = |_: &Record| stop.stop();
    let seeds = prepare_seeds(&trie, &words, &config);
    let outcome = WorkerPool::new(&trie, &config)
        .run(seeds, stopper, &stop)
        .unwrap();

    assert!(outcome.stopped);
    assert_eq!(outcome.best.text, "tab");
    // cat, tab and at finished; ta was cut short.
    assert_eq!(outcome.seeds, 3);
    assert_eq!(outcome.candidates, 1);
}

#[test]
fn test_config_validation() {
    assert!(Config::default().validate().is_ok());
    assert!(Config::default().threads >= 1);

    let config = Config {
        threads: 0,
        ..Config::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::NoThreads));

    let config = Config {
        min_seed_len: 0,
        ..Config::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::EmptySeeds));
}
