//! Prefix tree over the filtered dictionary.
//!
//! Every node caches the string leading to it and the set of letters that
//! string uses. Children are stored in a fixed array indexed by letter, so
//! every traversal visits them in ascending letter order and the search is
//! reproducible from run to run.

use crate::letters::LetterSet;
use crate::ALPHABET_SIZE;
use std::io::{self, Write};

/// One prefix position in the [`Trie`]
#[derive(Debug)]
pub struct TrieNode {
    character: Option<u8>,
    terminal: bool,
    partial: String,
    used: LetterSet,
    children: [Option<Box<TrieNode>>; ALPHABET_SIZE],
}

impl TrieNode {
    fn root() -> Self {
        Self {
            character: None,
            terminal: false,
            partial: String::new(),
            used: LetterSet::EMPTY,
            children: Default::default(),
        }
    }

    fn child_of(prefix: &str, used: LetterSet, character: u8) -> Self {
        let mut partial = String::with_capacity(prefix.len() + 1);
        partial.push_str(prefix);
        partial.push(character as char);
        Self {
            character: Some(character),
            terminal: false,
            partial,
            used: used.with(character),
            children: Default::default(),
        }
    }

    /// The letter this node adds to its parent's prefix, `None` at the root
    pub fn character(&self) -> Option<u8> {
        self.character
    }

    /// True iff the prefix ending here is a dictionary word
    pub fn is_terminal(&self) -> bool {
        self.terminal
    }

    /// The prefix from the root to this node
    pub fn partial(&self) -> &str {
        &self.partial
    }

    /// Letters used along the path from the root to this node
    pub fn used(&self) -> LetterSet {
        self.used
    }

    pub fn child(&self, character: u8) -> Option<&TrieNode> {
        self.children[LetterSet::index(character)].as_deref()
    }

    /// Children in ascending letter order
    pub fn children(&self) -> impl Iterator<Item = &TrieNode> {
        self.children.iter().filter_map(|child| child.as_deref())
    }

    /// Returns true if this node was newly marked terminal
    fn insert(&mut self, word: &[u8]) -> bool {
        let Some((&character, rest)) = word.split_first() else {
            let added = !self.terminal;
            self.terminal = true;
            return added;
        };

        let (prefix, used) = (&self.partial, self.used);
        self.children[LetterSet::index(character)]
            .get_or_insert_with(|| Box::new(TrieNode::child_of(prefix, used, character)))
            .insert(rest)
    }

    /// Follow `text` from this node, one letter at a time.
    ///
    /// Returns `None` as soon as a letter has no matching child. An empty
    /// `text` returns this node.
    pub fn walk(&self, text: &str) -> Option<&TrieNode> {
        text.bytes().try_fold(self, |node, character| {
            if character.is_ascii_lowercase() {
                node.child(character)
            } else {
                None
            }
        })
    }

    /// Visit every terminal node under this one whose letters are disjoint
    /// from `excluded`.
    ///
    /// Subtrees whose accumulated letters conflict with `excluded` are never
    /// entered. Terminals are visited before their children, children in
    /// ascending letter order.
    pub fn find_unconflicted_terminals<'a, F>(&'a self, excluded: LetterSet, visit: &mut F)
    where
        F: FnMut(&'a TrieNode),
    {
        if self.used.conflicts_with(excluded) {
            return;
        }

        if self.terminal {
            visit(self);
        }

        for child in self.children() {
            child.find_unconflicted_terminals(excluded, visit);
        }
    }

    fn collect_words<'a>(&'a self, words: &mut Vec<&'a str>) {
        if self.terminal {
            words.push(&self.partial);
        }
        for child in self.children() {
            child.collect_words(words);
        }
    }
}

/// The dictionary as a prefix tree. Built once, then only read
#[derive(Debug)]
pub struct Trie {
    root: TrieNode,
    len: usize,
}

impl Default for Trie {
    fn default() -> Self {
        Self::new()
    }
}

impl Trie {
    pub fn new() -> Self {
        Self {
            root: TrieNode::root(),
            len: 0,
        }
    }

    /// Build a trie from an iterator of already filtered words
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut trie = Self::new();
        for word in words {
            trie.insert(word.as_ref());
        }
        trie
    }

    /// Insert a word made of lowercase letters.
    ///
    /// Words with any other character are ignored, as is the empty word.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() || !word.bytes().all(|b| b.is_ascii_lowercase()) {
            return;
        }
        if self.root.insert(word.as_bytes()) {
            self.len += 1;
        }
    }

    pub fn root(&self) -> &TrieNode {
        &self.root
    }

    /// Follow `text` from the root. See [`TrieNode::walk`]
    pub fn walk(&self, text: &str) -> Option<&TrieNode> {
        self.root.walk(text)
    }

    /// True iff `word` is a dictionary word
    pub fn contains(&self, word: &str) -> bool {
        self.walk(word).is_some_and(TrieNode::is_terminal)
    }

    /// Number of distinct words stored
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Every stored word in ascending letter order
    pub fn words(&self) -> Vec<&str> {
        let mut words = Vec::with_capacity(self.len);
        self.root.collect_words(&mut words);
        words
    }

    /// Write every stored word on its own line, in the order of [`Trie::words`]
    pub fn dump<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for word in self.words() {
            writeln!(out, "{}", word)?;
        }
        Ok(())
    }
}
