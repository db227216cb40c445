// file: src/models/article.rs
// description: parsed news article with retained original body
// reference: internal data structures

use crate::models::Lang;
use serde::{Deserialize, Serialize};

pub const NO_TITLE: &str = "No Title";
pub const NO_DATE: &str = "No Date";
pub const NO_LINK: &str = "#";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,

    /// `DD-MM-YYYY HH:MM AM/PM` when the source date parsed, otherwise the raw text
    pub date: String,

    pub link: String,

    /// Display body; rewritten by translation and highlighting
    pub content: String,

    original_content: String,
    original_lang: Lang,
}

impl Article {
    pub fn new(title: String, date: String, link: String, body: String, lang: Lang) -> Self {
        Self {
            title,
            date,
            link,
            content: body.clone(),
            original_content: body,
            original_lang: lang,
        }
    }

    /// Article carrying only the raw input, used when the text could not be parsed.
    pub fn unparsed(raw: &str, lang: Lang) -> Self {
        Self::new(
            NO_TITLE.to_string(),
            NO_DATE.to_string(),
            NO_LINK.to_string(),
            raw.to_string(),
            lang,
        )
    }

    pub fn original_content(&self) -> &str {
        &self.original_content
    }

    pub fn original_lang(&self) -> Lang {
        self.original_lang
    }

    pub fn has_link(&self) -> bool {
        self.link != NO_LINK
    }

    pub fn preview(&self, max_chars: usize) -> String {
        let body = self.original_content.trim();
        if body.chars().count() <= max_chars {
            body.to_string()
        } else {
            let cut: String = body.chars().take(max_chars).collect();
            format!("{}...", cut)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_article_keeps_original() {
        let article = Article::new(
            "Title".to_string(),
            "01-01-2024".to_string(),
            "https://example.com".to_string(),
            "Body".to_string(),
            Lang::En,
        );

        assert_eq!(article.content, "Body");
        assert_eq!(article.original_content(), "Body");
        assert!(article.has_link());
    }

    #[test]
    fn test_unparsed_uses_sentinels() {
        let article = Article::unparsed("garbage", Lang::En);
        assert_eq!(article.title, NO_TITLE);
        assert_eq!(article.date, NO_DATE);
        assert!(!article.has_link());
        assert_eq!(article.original_content(), "garbage");
    }

    #[test]
    fn test_preview_respects_char_boundaries() {
        let article = Article::unparsed("ગુજરાત સમાચાર", Lang::Gu);
        assert_eq!(article.preview(3), "ગુજ...");
    }
}
