// file: src/language/detector.rs
// description: script-frequency language detection for English/Gujarati text
// reference: Unicode Gujarati block U+0A80..U+0AFF

use crate::models::Lang;

const GUJARATI_BLOCK: std::ops::RangeInclusive<char> = '\u{0A80}'..='\u{0AFF}';
const GUJARATI_THRESHOLD: f64 = 0.3;

pub fn is_gujarati_char(ch: char) -> bool {
    GUJARATI_BLOCK.contains(&ch)
}

/// Gujarati when more than 30% of all characters fall in the Gujarati block.
pub fn detect_language(text: &str) -> Lang {
    let mut total = 0usize;
    let mut gujarati = 0usize;

    for ch in text.chars() {
        total += 1;
        if is_gujarati_char(ch) {
            gujarati += 1;
        }
    }

    if gujarati as f64 > total as f64 * GUJARATI_THRESHOLD {
        Lang::Gu
    } else {
        Lang::En
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gujarati_text() {
        let text: String = std::iter::repeat('ક').take(100).collect();
        assert_eq!(detect_language(&text), Lang::Gu);
    }

    #[test]
    fn test_ascii_text() {
        let text: String = std::iter::repeat('a').take(100).collect();
        assert_eq!(detect_language(&text), Lang::En);
    }

    #[test]
    fn test_empty_text_is_english() {
        assert_eq!(detect_language(""), Lang::En);
    }

    #[test]
    fn test_threshold_is_strict() {
        // exactly 30% Gujarati is not enough
        let text = format!("{}{}", "ગગગ", "aaaaaaa");
        assert_eq!(detect_language(&text), Lang::En);

        let text = format!("{}{}", "ગગગગ", "aaaaaa");
        assert_eq!(detect_language(&text), Lang::Gu);
    }

    #[test]
    fn test_mixed_headline() {
        assert_eq!(detect_language("ગુજરાતમાં ક્રિકેટ સમાચાર"), Lang::Gu);
        assert_eq!(detect_language("Cricket news from ગુજરાત"), Lang::En);
    }
}
