//! Loading and filtering the word list.
//!
//! Only words that can take part in a monoglyphic string are kept: lowercase
//! ASCII letters with no letter repeated. Single letters are mostly noise in
//! system word lists, so only a few real one-letter words are accepted.

use crate::letters::LetterSet;
use itertools::Itertools;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default word list location
pub const DEFAULT_WORDS_PATH: &str = "/usr/share/dict/words";

/// One-letter words accepted by the filter
pub const SINGLE_LETTER_WORDS: &[&str] = &["a", "i"];

#[derive(Error, Debug)]
pub enum DictionaryError {
    #[error("failed to read word list {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Check whether a raw line is usable as a dictionary word
pub fn is_valid_word(word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    if word.len() == 1 && !SINGLE_LETTER_WORDS.contains(&word) {
        return false;
    }

    let mut used = LetterSet::EMPTY;
    for letter in word.bytes() {
        if !letter.is_ascii_lowercase() || used.contains(letter) {
            return false;
        }
        used.add(letter);
    }
    true
}

/// Keep the valid words of `lines`, in order, without duplicates
pub fn filter_words<I, S>(lines: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    lines
        .into_iter()
        .map(|line| {
            let line = line.as_ref();
            line.strip_suffix('\r').unwrap_or(line).to_string()
        })
        .filter(|word| is_valid_word(word))
        .unique()
        .collect()
}

/// Read and filter the newline-delimited word list at `path`.
///
/// Lines that are not valid UTF-8 are dropped along with the other invalid
/// lines; only failing to read the file is an error.
pub fn load_dictionary(path: impl AsRef<Path>) -> Result<Vec<String>, DictionaryError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| DictionaryError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(filter_words(
        bytes
            .split(|b| *b == b'\n')
            .filter_map(|line| std::str::from_utf8(line).ok()),
    ))
}
