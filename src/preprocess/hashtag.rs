//! Hashtags are pulled out before segmentation, replaced by a marker,
//! and spliced back into the token sequence afterwards so the segmenter
//! never splits them.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

pub const REPLACE_HASHTAG: &str = " HASHTAG ";

/// Token the restore step looks for.
pub const HASHTAG_MARKER: &str = "HASHTAG";

static HASHTAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(#[^\s]+)(?:\z|\s)").unwrap());

/// Hashtags in order of appearance, `#` included.
pub fn extract_hashtags(text: &str) -> Vec<String> {
    HASHTAG
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Replace each hashtag, together with the whitespace that ends it.
pub fn mask_hashtags(text: &str, placeholder: &str) -> String {
    HASHTAG.replace_all(text, NoExpand(placeholder)).into_owned()
}

/// Put the i-th hashtag in place of the i-th marker token. Markers beyond
/// the number of hashtags stay as they are.
pub fn restore_hashtags(mut tokens: Vec<String>, hashtags: &[String]) -> Vec<String> {
    let markers = tokens
        .iter_mut()
        .filter(|token| token.as_str() == HASHTAG_MARKER);
    for (token, hashtag) in markers.zip(hashtags) {
        *token = hashtag.clone();
    }
    tokens
}
