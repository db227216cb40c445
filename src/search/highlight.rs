// file: src/search/highlight.rs
// description: per-tag background-colour highlighting and legend generation
// reference: https://docs.rs/regex

use crate::config::DEFAULT_PALETTE;
use regex::{Regex, RegexBuilder};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HighlightTerm {
    pub term: String,
    pub color: String,
    /// Position of the term in the original tag list
    pub position: usize,
}

/// Index-stable set of non-blank terms shared by `highlight` and `legend`.
///
/// A term's colour is `palette[position % palette.len()]` where `position` is
/// its index in the tag list it came from. Blank tags are dropped but still
/// occupy their position, so highlight and legend always agree.
#[derive(Debug, Clone)]
pub struct HighlightTerms {
    terms: Vec<HighlightTerm>,
    pattern: Option<Regex>,
}

impl HighlightTerms {
    pub fn new(tags: &[String], palette: &[String]) -> Self {
        let palette: Vec<String> = if palette.is_empty() {
            DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
        } else {
            palette.to_vec()
        };

        let terms: Vec<HighlightTerm> = tags
            .iter()
            .enumerate()
            .filter(|(_, tag)| !tag.trim().is_empty())
            .map(|(position, tag)| HighlightTerm {
                term: tag.clone(),
                color: palette[position % palette.len()].clone(),
                position,
            })
            .collect();

        let pattern = Self::compile(&terms);
        Self { terms, pattern }
    }

    fn compile(terms: &[HighlightTerm]) -> Option<Regex> {
        if terms.is_empty() {
            return None;
        }

        let alternation = terms
            .iter()
            .map(|t| format!("({})", regex::escape(&t.term)))
            .collect::<Vec<_>>()
            .join("|");

        match RegexBuilder::new(&alternation).case_insensitive(true).build() {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!("Could not build highlight pattern: {}", e);
                None
            }
        }
    }

    pub fn terms(&self) -> &[HighlightTerm] {
        &self.terms
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Wraps every case-insensitive literal occurrence of a term using `wrap`.
    /// Matches are found in one pass over the input, so wrapper output is never re-matched.
    pub fn highlight_with<F>(&self, text: &str, wrap: F) -> String
    where
        F: Fn(&HighlightTerm, &str) -> String,
    {
        let Some(pattern) = &self.pattern else {
            return text.to_string();
        };

        let mut output = String::with_capacity(text.len());
        let mut last = 0;

        for captures in pattern.captures_iter(text) {
            let Some(whole) = captures.get(0) else {
                continue;
            };
            let Some(term) = (1..captures.len())
                .find(|&group| captures.get(group).is_some())
                .and_then(|group| self.terms.get(group - 1))
            else {
                continue;
            };

            output.push_str(&text[last..whole.start()]);
            output.push_str(&wrap(term, whole.as_str()));
            last = whole.end();
        }

        output.push_str(&text[last..]);
        output
    }

    pub fn highlight(&self, text: &str) -> String {
        self.highlight_with(text, |term, matched| {
            format!(
                r#"<span style="background-color: {}; padding: 0 2px; border-radius: 3px;">{}</span>"#,
                term.color, matched
            )
        })
    }

    pub fn legend(&self) -> String {
        if self.terms.is_empty() {
            return String::new();
        }

        let mut html = String::from(
            "<div style='margin: 10px 0; padding: 10px; border: 1px solid #ddd; border-radius: 5px;'>",
        );
        html.push_str("<p style='margin: 0 0 5px 0;'><strong>Search Terms:</strong></p>");

        for term in &self.terms {
            html.push_str(&format!(
                "<span style='margin-right: 10px; background-color: {}; padding: 2px 5px; border-radius: 3px;'>{}</span>",
                term.color, term.term
            ));
        }

        html.push_str("</div>");
        html
    }
}

pub fn highlight_matching_text(text: &str, terms: &[String], palette: &[String]) -> String {
    HighlightTerms::new(terms, palette).highlight(text)
}

pub fn color_legend(terms: &[String], palette: &[String]) -> String {
    HighlightTerms::new(terms, palette).legend()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn palette() -> Vec<String> {
        DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect()
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_highlight_first_palette_color() {
        let output = highlight_matching_text("Cricket news", &tags(&["cricket"]), &palette());
        assert_eq!(
            output,
            r#"<span style="background-color: #FFE082; padding: 0 2px; border-radius: 3px;">Cricket</span> news"#
        );
    }

    #[test]
    fn test_regex_special_terms_are_literal() {
        let output = highlight_matching_text("I like C++ and cxx", &tags(&["c++"]), &palette());
        assert!(output.contains(">C++</span>"));
        assert!(!output.contains(">cxx</span>"));
        assert!(output.ends_with(" and cxx"));
    }

    #[test]
    fn test_blank_terms_keep_positions() {
        let terms = HighlightTerms::new(&tags(&["rain", "  ", "flood"]), &palette());
        assert_eq!(terms.terms().len(), 2);
        assert_eq!(terms.terms()[1].term, "flood");
        assert_eq!(terms.terms()[1].color, "#90CAF9");

        let html = terms.highlight("flood after rain");
        assert!(html.contains("background-color: #90CAF9; padding: 0 2px; border-radius: 3px;\">flood"));
        assert!(terms.legend().contains("background-color: #90CAF9; padding: 2px 5px; border-radius: 3px;'>flood"));
    }

    #[test]
    fn test_palette_cycles() {
        let many = tags(&["a1", "a2", "a3", "a4", "a5", "a6"]);
        let terms = HighlightTerms::new(&many, &palette());
        assert_eq!(terms.terms()[5].color, terms.terms()[0].color);
    }

    #[test]
    fn test_markup_is_not_rematched() {
        let output = highlight_matching_text("padding news", &tags(&["news", "span", "background"]), &palette());
        assert_eq!(output.matches("<span").count(), 1);
    }

    #[test]
    fn test_no_terms_leaves_text_and_empty_legend() {
        let terms = HighlightTerms::new(&tags(&["", " "]), &palette());
        assert!(terms.is_empty());
        assert_eq!(terms.highlight("plain"), "plain");
        assert_eq!(terms.legend(), "");
        assert_eq!(color_legend(&[], &palette()), "");
    }

    #[test]
    fn test_gujarati_terms() {
        let output = highlight_matching_text("ગુજરાતમાં વરસાદ", &tags(&["વરસાદ"]), &palette());
        assert!(output.ends_with(">વરસાદ</span>"));
    }

    #[test]
    fn test_custom_wrapper() {
        let terms = HighlightTerms::new(&tags(&["rain"]), &palette());
        assert_eq!(terms.highlight_with("Rain, rain", |_, m| format!("*{}*", m)), "*Rain*, *rain*");
    }
}
