//! Letter sets over the lowercase ASCII alphabet.
//!
//! A [`LetterSet`] is a 26-bit mask where bit `i` is set iff the letter
//! `'a' + i` is present. It is the pruning currency of the search: two
//! strings can be joined without repeating a letter exactly when their
//! sets do not conflict.

use crate::ALPHABET_SIZE;
use std::fmt;

const MASK: u32 = (1 << ALPHABET_SIZE) - 1;

/// A set of lowercase letters stored as a bitmask
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LetterSet(u32);

impl LetterSet {
    /// The empty set
    pub const EMPTY: Self = Self(0);

    pub fn new() -> Self {
        Self::EMPTY
    }

    /// Build the set of letters used by `text`
    pub fn from_word(text: &str) -> Self {
        text.bytes().fold(Self::EMPTY, |set, letter| set.with(letter))
    }

    /// Index of a lowercase letter in the alphabet
    #[inline]
    pub fn index(letter: u8) -> usize {
        debug_assert!(letter.is_ascii_lowercase(), "letter out of range: {letter}");
        (letter - b'a') as usize
    }

    /// Add `letter` to the set
    #[inline]
    pub fn add(&mut self, letter: u8) {
        self.0 |= 1 << Self::index(letter);
        debug_assert_eq!(self.0 & !MASK, 0);
    }

    /// Copy of this set with `letter` added
    #[inline]
    pub fn with(mut self, letter: u8) -> Self {
        self.add(letter);
        self
    }

    #[inline]
    pub fn contains(self, letter: u8) -> bool {
        self.0 & (1 << Self::index(letter)) != 0
    }

    /// True iff the two sets share at least one letter
    #[inline]
    pub fn conflicts_with(self, other: LetterSet) -> bool {
        self.0 & other.0 != 0
    }

    pub fn union(self, other: LetterSet) -> Self {
        Self(self.0 | other.0)
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Raw bits, only bits 0 to 25 can be set
    pub fn bits(self) -> u32 {
        self.0
    }

    /// Letters in the set in ascending order
    pub fn letters(self) -> impl Iterator<Item = u8> {
        (0..ALPHABET_SIZE as u8)
            .filter(move |i| self.0 & (1 << i) != 0)
            .map(|i| b'a' + i)
    }
}

impl fmt::Debug for LetterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for letter in self.letters() {
            write!(f, "{}", letter as char)?;
        }
        write!(f, "]")
    }
}

impl FromIterator<u8> for LetterSet {
    fn from_iter<T: IntoIterator<Item = u8>>(iter: T) -> Self {
        iter.into_iter().fold(Self::EMPTY, |set, letter| set.with(letter))
    }
}
