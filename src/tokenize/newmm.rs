//! Dictionary-based maximal matching segmenter ("newmm").
//!
//! Word candidates come from the dictionary and are only accepted when
//! they end on a Thai Character Cluster boundary. Ambiguous stretches
//! are resolved with a breadth-first search for the path with the fewest
//! words. Runs the dictionary cannot explain are cut at the nearest point
//! where a known word or a non-Thai run starts.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{BTreeSet, HashMap, HashSet, VecDeque};

use super::dictionary::Dictionary;
use super::tcc;
use super::Segmenter;

/// Upper bound on edges in one ambiguous window before candidates stop
/// being added.
const MAX_GRAPH_SIZE: usize = 50;

static NON_THAI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?:[-a-zA-Z]+|\d+(?:[,.]\d+)*|[ \t]+|\r?\n)",
    )
    .expect("valid non-Thai pattern")
});

pub struct NewmmSegmenter {
    dictionary: Dictionary,
}

impl NewmmSegmenter {
    pub fn new(dictionary: Dictionary) -> Self {
        Self { dictionary }
    }

    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    fn cut<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut tokens = Vec::new();
        let valid = tcc::boundaries(text);
        let len = text.len();

        let mut graph: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut graph_size = 0;
        let mut frontier: BTreeSet<usize> = BTreeSet::from([0]);
        let mut end_pos = 0;

        while let Some(&begin) = frontier.first() {
            if begin >= len {
                break;
            }
            frontier.remove(&begin);

            for word_len in self.dictionary.prefix_lengths(&text[begin..]) {
                let candidate = begin + word_len;
                if valid.contains(&candidate) {
                    graph.entry(begin).or_default().push(candidate);
                    graph_size += 1;
                    frontier.insert(candidate);
                    if graph_size > MAX_GRAPH_SIZE {
                        break;
                    }
                }
            }

            match frontier.len() {
                1 => {
                    let goal = *frontier.first().unwrap_or(&len);
                    match shortest_path(&graph, end_pos, goal) {
                        Some(path) => {
                            for pos in path.into_iter().skip(1) {
                                tokens.push(&text[end_pos..pos]);
                                end_pos = pos;
                            }
                        }
                        None => {
                            tokens.push(&text[end_pos..goal]);
                            end_pos = goal;
                        }
                    }
                    graph_size = 0;
                }
                0 => {
                    end_pos = self.skip_unknown(text, begin, &valid);
                    graph.entry(begin).or_default().push(end_pos);
                    graph_size += 1;
                    tokens.push(&text[begin..end_pos]);
                    frontier.insert(end_pos);
                }
                _ => {}
            }
        }

        tokens
    }

    /// End offset of the out-of-vocabulary token starting at `begin`.
    fn skip_unknown(&self, text: &str, begin: usize, valid: &HashSet<usize>) -> usize {
        if let Some(m) = NON_THAI.find(&text[begin..]) {
            if m.end() > 0 {
                return begin + m.end();
            }
        }

        for (offset, _) in text[begin..].char_indices().skip(1) {
            let pos = begin + offset;
            if !valid.contains(&pos) {
                continue;
            }
            let rest = &text[pos..];
            let known_word = self
                .dictionary
                .prefixes(rest)
                .into_iter()
                .any(|word| valid.contains(&(pos + word.len())) && !is_short_consonant_run(word));
            if known_word || NON_THAI.is_match(rest) {
                return pos;
            }
        }

        text.len()
    }
}

impl Segmenter for NewmmSegmenter {
    fn segment(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        self.cut(text).into_iter().map(str::to_string).collect()
    }
}

/// Words of at most two bare consonants are too weak to justify cutting
/// an unknown run.
fn is_short_consonant_run(word: &str) -> bool {
    word.chars().count() <= 2 && word.chars().all(|c| ('ก'..='ฮ').contains(&c))
}

/// Breadth-first search from `start` to `goal`; the first path found has
/// the fewest edges, ties broken by edge insertion order.
fn shortest_path(graph: &HashMap<usize, Vec<usize>>, start: usize, goal: usize) -> Option<Vec<usize>> {
    let mut queue = VecDeque::from([(start, vec![start])]);
    let mut seen = HashSet::from([start]);

    while let Some((vertex, path)) = queue.pop_front() {
        let Some(edges) = graph.get(&vertex) else {
            continue;
        };
        for &next in edges {
            let mut next_path = path.clone();
            next_path.push(next);
            if next == goal {
                return Some(next_path);
            }
            if seen.insert(next) {
                queue.push_back((next, next_path));
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segmenter(words: &str) -> NewmmSegmenter {
        NewmmSegmenter::new(Dictionary::from_word_list(words))
    }

    #[test]
    fn test_dictionary_words() {
        let seg = segmenter("ฉัน\nกิน\nข้าว");
        assert_eq!(seg.segment("ฉันกินข้าว"), vec!["ฉัน", "กิน", "ข้าว"]);
    }

    #[test]
    fn test_prefers_fewest_words() {
        let seg = segmenter("ไป\nเที่ยว\nไปเที่ยว\nทะเล");
        assert_eq!(seg.segment("ไปเที่ยวทะเล"), vec!["ไปเที่ยว", "ทะเล"]);
    }

    #[test]
    fn test_non_thai_runs_and_spaces() {
        let seg = segmenter("ดี");
        assert_eq!(seg.segment("LINK ดี"), vec!["LINK", " ", "ดี"]);
        assert_eq!(seg.segment("well-done 3.14"), vec!["well-done", " ", "3.14"]);
    }

    #[test]
    fn test_unknown_thai_run_stops_at_known_word() {
        let seg = segmenter("อาหาร");
        assert_eq!(seg.segment("ปลาอาหาร"), vec!["ปลา", "อาหาร"]);
    }

    #[test]
    fn test_punctuation_is_split_from_words() {
        let seg = segmenter("ดี");
        assert_eq!(seg.segment("ดี!"), vec!["ดี", "!"]);
    }

    #[test]
    fn test_empty_input() {
        let seg = segmenter("ดี");
        assert!(seg.segment("").is_empty());
    }
}
