//! Entity masking: links, mentions, emails, laughter and numbers are
//! replaced with placeholder tokens.

use once_cell::sync::Lazy;
use regex::{NoExpand, Regex};

pub const REPLACE_LINK: &str = " LINK ";
pub const REPLACE_MENTION: &str = " MENTION ";
pub const REPLACE_EMAIL: &str = " EMAIL ";
pub const REPLACE_LAUGH: &str = " LAUGH ";
pub const REPLACE_NUMBER: &str = " NUMBER ";

// scheme://... and www. hosts
static HTTP_WWW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:\b\S{3,}:/{1,}\S*)|(?:[wW]{2,}\.\S+)").unwrap());

// page.html, script.php3, photo.jpg?size=large
static FILE_EXTENSION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\w+\.(html|htm|shtm|shtml|cgi|php|php3|asp|aspx|cfm|cfml|jsp|png|gif|jpg|java|class|webp|mp3|mp4|mov|pl|do)(\?\S*)?\b",
    )
    .unwrap()
});

static MENTION: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|\s)@\S+").unwrap());

static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}\b").unwrap());

// 555, 55545+, hahaha, ถถถ
static LAUGH: Lazy<fancy_regex::Regex> = Lazy::new(|| {
    fancy_regex::Regex::new(
        r"(?i)(?:\s|\D|\A)(5{2,}[46]*5*\+*)|\b(?:ha\s*){2,}|ถ{3,}|5{3,}(?!.\d)\b",
    )
    .unwrap()
});

static NUMBER: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").unwrap());

pub fn mask_links(text: &str, placeholder: &str) -> String {
    let text = HTTP_WWW.replace_all(text, NoExpand(placeholder));
    FILE_EXTENSION
        .replace_all(&text, NoExpand(placeholder))
        .into_owned()
}

pub fn mask_mentions(text: &str, placeholder: &str) -> String {
    MENTION.replace_all(text, NoExpand(placeholder)).into_owned()
}

pub fn mask_emails(text: &str, placeholder: &str) -> String {
    EMAIL.replace_all(text, NoExpand(placeholder)).into_owned()
}

/// Must run before [`mask_numbers`], otherwise "555" is lost as a number.
pub fn mask_laughter(text: &str, placeholder: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for found in LAUGH.find_iter(text) {
        match found {
            Ok(m) => {
                out.push_str(&text[last..m.start()]);
                out.push_str(placeholder);
                last = m.end();
            }
            Err(e) => {
                tracing::warn!("Laughter match aborted, keeping the rest unmasked: {}", e);
                break;
            }
        }
    }
    out.push_str(&text[last..]);
    out
}

pub fn mask_numbers(text: &str, placeholder: &str) -> String {
    NUMBER.replace_all(text, NoExpand(placeholder)).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_links() {
        assert_eq!(
            mask_links("ดู https://example.com/a?b=1 นะ", REPLACE_LINK),
            "ดู  LINK  นะ"
        );
        assert_eq!(mask_links("go www.example.com now", REPLACE_LINK), "go  LINK  now");
        assert_eq!(mask_links("open index.PHP?id=3 pls", REPLACE_LINK), "open  LINK  pls");
        assert_eq!(mask_links("nothing here", REPLACE_LINK), "nothing here");
    }

    #[test]
    fn test_masking_is_idempotent() {
        let text = "see http://a.co/x and pic.jpg @someone mail me@x.com 555 haha";
        let once = mask_links(text, REPLACE_LINK);
        assert_eq!(mask_links(&once, REPLACE_LINK), once);

        let once = mask_mentions(text, REPLACE_MENTION);
        assert_eq!(mask_mentions(&once, REPLACE_MENTION), once);

        let once = mask_emails(text, REPLACE_EMAIL);
        assert_eq!(mask_emails(&once, REPLACE_EMAIL), once);

        let once = mask_laughter(text, REPLACE_LAUGH);
        assert_eq!(mask_laughter(&once, REPLACE_LAUGH), once);
    }

    #[test]
    fn test_mentions_need_leading_space() {
        assert_eq!(mask_mentions("@bob hi", REPLACE_MENTION), " MENTION  hi");
        assert_eq!(mask_mentions("hi @bob", REPLACE_MENTION), "hi MENTION ");
        assert_eq!(mask_mentions("me@bob.com", REPLACE_MENTION), "me@bob.com");
    }

    #[test]
    fn test_emails() {
        assert_eq!(
            mask_emails("ติดต่อ a.b+c@mail.co.th ได้", REPLACE_EMAIL),
            "ติดต่อ  EMAIL  ได้"
        );
        assert_eq!(mask_emails("a@b.c", REPLACE_EMAIL), "a@b.c");
    }

    #[test]
    fn test_laughter() {
        assert_eq!(mask_laughter("5555 test", REPLACE_LAUGH), " LAUGH  test");
        assert_eq!(mask_laughter("55545+", REPLACE_LAUGH), " LAUGH ");
        assert_eq!(mask_laughter("hahaha", REPLACE_LAUGH), " LAUGH ");
        assert_eq!(mask_laughter("HaHa", REPLACE_LAUGH), " LAUGH ");
        assert_eq!(mask_laughter("ถถถถ", REPLACE_LAUGH), " LAUGH ");
        assert_eq!(mask_laughter("ha", REPLACE_LAUGH), "ha");
        assert_eq!(mask_laughter("2024", REPLACE_LAUGH), "2024");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(mask_numbers("ราคา 120 บาท", REPLACE_NUMBER), "ราคา  NUMBER  บาท");
        assert_eq!(mask_numbers("a1b22", ""), "ab");
    }

    #[test]
    fn test_custom_placeholder_is_literal() {
        assert_eq!(mask_numbers("x 1", "$0"), "x $0");
    }
}
