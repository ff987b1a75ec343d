//! Character-level normalizers: numerals, HTML entities, markup, emoji.

use once_cell::sync::Lazy;
use regex::Regex;

static MARKUP_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());

// Flags, keycaps, and pictographs with their modifiers, variation
// selectors and ZWJ continuations.
static EMOJI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"[\x{1F1E6}-\x{1F1FF}]{2}|[0-9#*]\x{FE0F}?\x{20E3}|\p{Extended_Pictographic}(?:\x{FE0F}|\p{Emoji_Modifier})*(?:\x{200D}\p{Extended_Pictographic}(?:\x{FE0F}|\p{Emoji_Modifier})*)*",
    )
    .unwrap()
});

/// Map Thai digits (๐-๙) to ASCII digits.
pub fn normalize_thai_numerals(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '๐'..='๙' => char::from(b'0' + (c as u32 - '๐' as u32) as u8),
            c => c,
        })
        .collect()
}

/// Decode HTML character references with the HTML5 rules: legacy names
/// without a trailing `;` are decoded, C1 code points are remapped through
/// windows-1252 and invalid code points become U+FFFD. Unknown names are
/// kept as-is.
pub fn unescape_html(text: &str) -> String {
    htmlize::unescape(text).into_owned()
}

/// Remove anything that looks like an angle-bracket tag.
pub fn strip_markup_tags(text: &str) -> String {
    MARKUP_TAG.replace_all(text, "").into_owned()
}

/// Surround each emoji with spaces so it becomes its own token.
pub fn normalize_emoji(text: &str) -> String {
    EMOJI.replace_all(text, " $0 ").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thai_numerals() {
        assert_eq!(normalize_thai_numerals("๑๒๓"), "123");
        assert_eq!(normalize_thai_numerals("ปี ๒๕๖๔ ok"), "ปี 2564 ok");
        assert_eq!(normalize_thai_numerals("๐๙"), "09");
    }

    #[test]
    fn test_unescape_html() {
        assert_eq!(unescape_html("fish &amp; chips"), "fish & chips");
        assert_eq!(unescape_html("&lt;b&gt;"), "<b>");
        assert_eq!(unescape_html("it&#39;s"), "it's");
        assert_eq!(unescape_html("AT&T &zzz;"), "AT&T &zzz;");
    }

    #[test]
    fn test_unescape_html5_legacy_and_numeric() {
        assert_eq!(unescape_html("&amp"), "&");
        assert_eq!(unescape_html("&lt"), "<");
        assert_eq!(unescape_html("&#128;"), "\u{20AC}");
        assert_eq!(unescape_html("&#x80;"), "\u{20AC}");
        assert_eq!(unescape_html("&#0;"), "\u{FFFD}");
    }

    #[test]
    fn test_strip_markup_tags() {
        assert_eq!(strip_markup_tags("<b>ดี</b>มาก"), "ดีมาก");
        assert_eq!(strip_markup_tags("<br/>a<foo bar='1'>b"), "ab");
        assert_eq!(strip_markup_tags("a < b"), "a < b");
    }

    #[test]
    fn test_emoji_isolation() {
        assert_eq!(normalize_emoji("good😊job"), "good 😊 job");
        assert_eq!(normalize_emoji("😊ok"), "😊 ok");
        assert_eq!(normalize_emoji("no emoji"), "no emoji");
    }

    #[test]
    fn test_emoji_sequences_stay_whole() {
        assert_eq!(normalize_emoji("a👍🏽b"), "a 👍🏽 b");
        assert_eq!(normalize_emoji("a❤️b"), "a ❤️ b");
    }
}
