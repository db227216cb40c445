// file: src/parser/article.rs
// description: labelled-field extraction from plain-text news article blocks
// reference: Title:/Date:/Link:/Content: article text format

use crate::language::detect_language;
use crate::models::article::{NO_DATE, NO_LINK, NO_TITLE};
use crate::models::Article;
use crate::parser::patterns::*;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;

pub const SOURCE_DATE_FORMAT: &str = "%d-%m-%Y | %I:%M %p";
pub const DISPLAY_DATE_FORMAT: &str = "%d-%m-%Y %I:%M %p";

pub struct ArticleParser;

impl ArticleParser {
    pub fn new() -> Self {
        Self
    }

    /// Parses the first article block of `content`. Never fails: missing
    /// fields fall back to sentinels and a missing body to the whole input.
    pub fn parse(&self, content: &str) -> Article {
        let section = ARTICLE_DELIMITER
            .split(content)
            .next()
            .unwrap_or(content)
            .trim();

        self.parse_section(section, content)
    }

    /// Parses every non-blank block of a multi-article blob.
    pub fn parse_all(&self, content: &str) -> Vec<Article> {
        ARTICLE_DELIMITER
            .split(content)
            .map(str::trim)
            .filter(|section| !section.is_empty())
            .map(|section| self.parse_section(section, section))
            .collect()
    }

    fn parse_section(&self, section: &str, whole_input: &str) -> Article {
        let labelled = [&*TITLE_FIELD, &*DATE_FIELD, &*LINK_FIELD, &*CONTENT_FIELD]
            .iter()
            .any(|pattern| pattern.is_match(section));
        if !labelled {
            debug!("Article has no labelled fields");
            return Article::unparsed(whole_input, detect_language(whole_input));
        }

        let title = capture_field(&TITLE_FIELD, section).unwrap_or_else(|| {
            debug!("Article has no title field");
            NO_TITLE.to_string()
        });

        let date = capture_field(&DATE_FIELD, section)
            .map(|raw| Self::normalize_date(&raw))
            .unwrap_or_else(|| NO_DATE.to_string());

        let link = capture_field(&LINK_FIELD, section).unwrap_or_else(|| NO_LINK.to_string());

        let body = capture_field(&CONTENT_FIELD, section).unwrap_or_else(|| {
            debug!("Article has no content field, using the full text");
            whole_input.to_string()
        });

        let lang = detect_language(&body);
        Article::new(title, date, link, body, lang)
    }

    /// `15-03-2024 | 09:30 AM` becomes `15-03-2024 09:30 AM`; anything else is kept verbatim.
    pub fn normalize_date(raw: &str) -> String {
        match NaiveDateTime::parse_from_str(raw.trim(), SOURCE_DATE_FORMAT) {
            Ok(parsed) => parsed.format(DISPLAY_DATE_FORMAT).to_string(),
            Err(_) => raw.to_string(),
        }
    }
}

impl Default for ArticleParser {
    fn default() -> Self {
        Self::new()
    }
}

/// The first `Date: DD-MM-YYYY` in raw article text, if it is a real calendar date.
pub fn extract_embedded_date(text: &str) -> Option<NaiveDate> {
    let captures = EMBEDDED_DATE.captures(text)?;
    NaiveDate::parse_from_str(captures.get(1)?.as_str(), "%d-%m-%Y").ok()
}
