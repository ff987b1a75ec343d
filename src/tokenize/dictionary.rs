//! Word lexicon stored as a character trie.

use std::collections::HashMap;
use std::path::Path;

/// Thai word list shipped with the crate.
pub const EMBEDDED_THAI_WORDS: &str = include_str!("../../resources/thai_words.txt");

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, TrieNode>,
    is_word: bool,
}

/// Dictionary used by the segmenter to find word candidates.
#[derive(Debug, Default)]
pub struct Dictionary {
    root: TrieNode,
    len: usize,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dictionary from newline-separated words. Blank lines and
    /// lines starting with `#` are skipped.
    pub fn from_word_list(list: &str) -> Self {
        let mut dict = Self::new();
        for line in list.lines() {
            let word = line.trim();
            if word.is_empty() || word.starts_with('#') {
                continue;
            }
            dict.insert(word);
        }
        dict
    }

    pub fn from_file(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let list = std::fs::read_to_string(path)?;
        Ok(Self::from_word_list(&list))
    }

    /// The embedded Thai lexicon.
    pub fn thai() -> Self {
        Self::from_word_list(EMBEDDED_THAI_WORDS)
    }

    pub fn insert(&mut self, word: &str) {
        let mut node = &mut self.root;
        for ch in word.chars() {
            node = node.children.entry(ch).or_default();
        }
        if !node.is_word {
            node.is_word = true;
            self.len += 1;
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        let mut node = &self.root;
        for ch in word.chars() {
            match node.children.get(&ch) {
                Some(next) => node = next,
                None => return false,
            }
        }
        node.is_word
    }

    /// Byte lengths of every dictionary word that prefixes `text`,
    /// shortest first.
    pub fn prefix_lengths(&self, text: &str) -> Vec<usize> {
        let mut lengths = Vec::new();
        let mut node = &self.root;
        for (idx, ch) in text.char_indices() {
            match node.children.get(&ch) {
                Some(next) => {
                    node = next;
                    if node.is_word {
                        lengths.push(idx + ch.len_utf8());
                    }
                }
                None => break,
            }
        }
        lengths
    }

    /// Every dictionary word that prefixes `text`, shortest first.
    pub fn prefixes<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.prefix_lengths(text)
            .into_iter()
            .map(|len| &text[..len])
            .collect()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
