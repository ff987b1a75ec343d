//! Thai Character Cluster (TCC) boundaries.
//!
//! A TCC is the smallest unit of Thai text that can never be split: a
//! consonant together with its leading vowel, tone mark and trailing
//! vowel. The segmenter may only cut words on cluster boundaries.

use fancy_regex::Regex;
use once_cell::sync::Lazy;
use std::collections::HashSet;

// `c` stands for any consonant, `t` for an optional tone mark.
const TCC_TEMPLATES: &[&str] = &[
    "เc็c",
    "เcctาะ",
    "เccีtยะ",
    "เccีtย(?=[เ-ไก-ฮ]|$)",
    "เcc็c",
    "เcิc์c",
    "เcิtc",
    "เcีtยะ?",
    "เcืtอะ?",
    "เc[ิีุู]tย(?=[เ-ไก-ฮ]|$)",
    "เctา?ะ?",
    "cัtวะ",
    "c[ัื]tc[ุิะ]?",
    "c[ิุู]์",
    "c[ะ-ู]t",
    "c็",
    "ctะ",
    "ctา",
    "cำ",
    "cรรc์",
    "cรร",
    "ct[ะาำ]?",
    "แc็c",
    "แcc์",
    "แctะ",
    "แcc็c",
    "แccc์",
    "โctะ",
    "[เ-ไ]ct",
];

static TCC_PATTERN: Lazy<Regex> = Lazy::new(|| {
    let alternatives: Vec<String> = TCC_TEMPLATES
        .iter()
        .map(|t| t.replace('c', "[ก-ฮ]").replace('t', "[่-๋]?"))
        .collect();
    Regex::new(&format!("^(?:{})", alternatives.join("|"))).expect("valid TCC pattern")
});

/// Split `text` into character clusters.
pub fn clusters(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < text.len() {
        let rest = &text[pos..];
        let len = cluster_len(rest);
        out.push(&rest[..len]);
        pos += len;
    }
    out
}

/// Byte offsets at which a cluster ends. Every valid cut position of a
/// segmentation is a member; offset 0 is not.
pub fn boundaries(text: &str) -> HashSet<usize> {
    let mut set = HashSet::new();
    let mut pos = 0;
    while pos < text.len() {
        pos += cluster_len(&text[pos..]);
        set.insert(pos);
    }
    set
}

fn cluster_len(rest: &str) -> usize {
    let single = rest.chars().next().map(char::len_utf8).unwrap_or(0);
    match TCC_PATTERN.find(rest) {
        Ok(Some(m)) if m.end() > 0 => m.end(),
        Ok(_) => single,
        Err(e) => {
            tracing::warn!("TCC match failed, falling back to single character: {}", e);
            single
        }
    }
}
