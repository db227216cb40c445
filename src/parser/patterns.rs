// file: src/parser/patterns.rs
// description: compiled regex patterns for article fields and model replies
// reference: https://docs.rs/regex

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Article blocks are separated by a line of 80 dashes
    pub static ref ARTICLE_DELIMITER: Regex = Regex::new(
        r"(?m)^-{80}[ \t]*\r?$"
    ).expect("ARTICLE_DELIMITER regex is valid");

    // Each field runs until the next later label or the end of the block
    pub static ref TITLE_FIELD: Regex = Regex::new(
        r"(?s)Title:\s*(.*?)\s*(?:Date:|Link:|Content:|\z)"
    ).expect("TITLE_FIELD regex is valid");

    pub static ref DATE_FIELD: Regex = Regex::new(
        r"(?s)Date:\s*(.*?)\s*(?:Link:|Content:|\z)"
    ).expect("DATE_FIELD regex is valid");

    pub static ref LINK_FIELD: Regex = Regex::new(
        r"(?s)Link:\s*(.*?)\s*(?:Content:|\z)"
    ).expect("LINK_FIELD regex is valid");

    pub static ref CONTENT_FIELD: Regex = Regex::new(
        r"(?s)Content:\s*(.*)\z"
    ).expect("CONTENT_FIELD regex is valid");

    // Bare DD-MM-YYYY after a Date: label, in article text or a model reply
    pub static ref EMBEDDED_DATE: Regex = Regex::new(
        r"Date:\s*(\d{2}-\d{2}-\d{4})"
    ).expect("EMBEDDED_DATE regex is valid");

    pub static ref TAGS_LINE: Regex = Regex::new(
        r"(?i)Tags:\s*\[(.*?)\]"
    ).expect("TAGS_LINE regex is valid");
}

/// First capture group of `pattern` in `text`, trimmed; `None` when absent or blank.
pub fn capture_field(pattern: &Regex, text: &str) -> Option<String> {
    pattern
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().trim())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimiter_requires_full_line() {
        let text = "a\n--------------------------------------------------------------------------------\nb";
        assert!(ARTICLE_DELIMITER.is_match(text));
        assert!(!ARTICLE_DELIMITER.is_match("score was 3 -- 2"));
    }

    #[test]
    fn test_short_dash_rule_is_not_a_delimiter() {
        let text = format!("first paragraph\n{}\nsecond paragraph", "-".repeat(30));
        assert!(!ARTICLE_DELIMITER.is_match(&text));
    }

    #[test]
    fn test_title_stops_at_next_label() {
        let text = "Title: Rain in Surat\nLink: https://example.com";
        assert_eq!(
            capture_field(&TITLE_FIELD, text),
            Some("Rain in Surat".to_string())
        );
    }

    #[test]
    fn test_tags_line_is_case_insensitive() {
        let captures = TAGS_LINE.captures("tags: [a, b]").unwrap();
        assert_eq!(&captures[1], "a, b");
    }

    #[test]
    fn test_blank_field_is_absent() {
        assert_eq!(capture_field(&TITLE_FIELD, "Title:   \nDate: 01-01-2024"), None);
    }
}
