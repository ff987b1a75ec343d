//! Text normalization pipeline: raw user text in, token sequence out.
//!
//! The order of the stages is part of the contract with the trained
//! classifier. Reordering them changes the tokens the model sees.

pub mod hashtag;
pub mod mask;
pub mod normalize;

use crate::tokenize::{tokenize, PunctuationSet, Segmenter};

use hashtag::{extract_hashtags, mask_hashtags, restore_hashtags, REPLACE_HASHTAG};
use mask::{
    mask_emails, mask_laughter, mask_links, mask_mentions, mask_numbers, REPLACE_EMAIL,
    REPLACE_LAUGH, REPLACE_LINK, REPLACE_MENTION,
};
use normalize::{normalize_emoji, normalize_thai_numerals, strip_markup_tags, unescape_html};

type Stage = fn(&str) -> String;

/// Text-to-text stages run before hashtag handling, in order.
pub static NORMALIZATION_STAGES: &[(&str, Stage)] = &[
    ("lowercase", lowercase),
    ("thai_numerals", normalize_thai_numerals),
    ("unescape_html", unescape_html),
    ("strip_markup", strip_markup_tags),
    ("links", links),
    ("mentions", mentions),
    ("emails", emails),
    ("laughter", laughter),
    ("numbers", drop_numbers),
    ("emoji", normalize_emoji),
];

fn lowercase(text: &str) -> String {
    text.to_lowercase()
}

fn links(text: &str) -> String {
    mask_links(text, REPLACE_LINK)
}

fn mentions(text: &str) -> String {
    mask_mentions(text, REPLACE_MENTION)
}

fn emails(text: &str) -> String {
    mask_emails(text, REPLACE_EMAIL)
}

fn laughter(text: &str) -> String {
    mask_laughter(text, REPLACE_LAUGH)
}

// Numbers carry no sentiment and are removed outright.
fn drop_numbers(text: &str) -> String {
    mask_numbers(text, "")
}

/// Owns the segmenter and punctuation set the pipeline tokenizes with.
pub struct Preprocessor {
    segmenter: Box<dyn Segmenter>,
    punctuation: PunctuationSet,
}

impl Preprocessor {
    pub fn new(segmenter: Box<dyn Segmenter>, punctuation: PunctuationSet) -> Self {
        Self {
            segmenter,
            punctuation,
        }
    }

    pub fn segmenter(&self) -> &dyn Segmenter {
        self.segmenter.as_ref()
    }

    pub fn punctuation(&self) -> &PunctuationSet {
        &self.punctuation
    }

    /// Run every normalization stage.
    pub fn normalize(&self, text: &str) -> String {
        NORMALIZATION_STAGES
            .iter()
            .fold(text.to_string(), |acc, (_, stage)| stage(&acc))
    }

    /// Raw text to the token sequence handed to the classifier.
    pub fn transform(&self, text: &str) -> Vec<String> {
        let text = self.normalize(text);
        let hashtags = extract_hashtags(&text);
        let text = mask_hashtags(&text, REPLACE_HASHTAG);
        let tokens = tokenize(self.segmenter(), &text, None, Some(&self.punctuation));
        restore_hashtags(tokens, &hashtags)
    }

    /// Intermediate text after every stage, for debugging parity issues.
    pub fn trace(&self, text: &str) -> Vec<(&'static str, String)> {
        let mut steps = Vec::with_capacity(NORMALIZATION_STAGES.len() + 1);
        let mut current = text.to_string();
        for (name, stage) in NORMALIZATION_STAGES {
            current = stage(&current);
            steps.push((*name, current.clone()));
        }
        steps.push(("hashtags", mask_hashtags(&current, REPLACE_HASHTAG)));
        steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::{Dictionary, NewmmSegmenter, DEFAULT_PUNCTUATION_EXTRA};

    fn preprocessor() -> Preprocessor {
        let dictionary = Dictionary::from_word_list("ดี\nมาก\nราคา\nบาท\nอาหาร\nอร่อย");
        Preprocessor::new(
            Box::new(NewmmSegmenter::new(dictionary)),
            PunctuationSet::with_extra(DEFAULT_PUNCTUATION_EXTRA),
        )
    }

    #[test]
    fn test_hashtags_survive_segmentation() {
        let tokens = preprocessor().transform("I love #cats and #dogs today");
        assert_eq!(tokens, vec!["i", "love", "#cats", "and", "#dogs", "today"]);
        assert!(!tokens.iter().any(|t| t == "HASHTAG"));
    }

    #[test]
    fn test_user_text_never_collides_with_hashtag_marker() {
        let tokens = preprocessor().transform("HASHTAG #a");
        assert_eq!(tokens, vec!["hashtag", "#a"]);

        let tokens = preprocessor().transform("Hashtag HASHTAG");
        assert_eq!(tokens, vec!["hashtag", "hashtag"]);
    }

    #[test]
    fn test_lowercase_runs_before_hashtag_masking() {
        assert_eq!(NORMALIZATION_STAGES[0].0, "lowercase");
        assert_ne!(hashtag::HASHTAG_MARKER.to_lowercase(), hashtag::HASHTAG_MARKER);
    }

    #[test]
    fn test_laughter_masked_before_numbers() {
        let tokens = preprocessor().transform("5555 test");
        assert_eq!(tokens, vec!["LAUGH", "test"]);

        let tokens = preprocessor().transform("อร่อย๕๕๕");
        assert!(tokens.contains(&"LAUGH".to_string()));
    }

    #[test]
    fn test_numbers_are_dropped() {
        let tokens = preprocessor().transform("ราคา 120 บาท");
        assert_eq!(tokens, vec!["ราคา", "บาท"]);
    }

    #[test]
    fn test_entities_and_markup() {
        let tokens = preprocessor().transform("&lt;b&gt;ดีมาก&lt;/b&gt; https://x.com @shop");
        assert_eq!(tokens, vec!["ดี", "มาก", "LINK", "MENTION"]);

        let tokens = preprocessor().transform("mail ME@Shop.com");
        assert_eq!(tokens, vec!["mail", "EMAIL"]);
    }

    #[test]
    fn test_emoji_and_punctuation() {
        let tokens = preprocessor().transform("อาหารอร่อย😊!!");
        assert_eq!(tokens, vec!["อาหาร", "อร่อย", "😊"]);
    }

    #[test]
    fn test_empty_text() {
        assert!(preprocessor().transform("").is_empty());
        assert!(preprocessor().transform("   ").is_empty());
    }

    #[test]
    fn test_trace_lists_every_stage() {
        let steps = preprocessor().trace("Hi #tag");
        assert_eq!(steps.len(), NORMALIZATION_STAGES.len() + 1);
        assert_eq!(steps[0], ("lowercase", "hi #tag".to_string()));
        assert_eq!(steps.last().unwrap().1, "hi  HASHTAG ");
    }
}
