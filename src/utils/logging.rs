// file: src/utils/logging.rs
// description: Tracing subscriber initialization and colored CLI message helpers

use colored::*;
use lazy_static::lazy_static;
use regex::Regex;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

lazy_static! {
    static ref HIGHLIGHT_SPAN: Regex =
        Regex::new(r#"(?s)<span style="background-color: ([^;"]+);[^"]*">(.*?)</span>"#)
            .expect("HIGHLIGHT_SPAN regex is valid");
}

pub fn init_logger(colored_output: bool, verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let fmt_layer = fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_file(true)
        .with_line_number(true)
        .compact()
        .with_ansi(colored_output)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}

pub fn format_success(msg: &str) -> String {
    format!("{} {}", "✓".green().bold(), msg.green())
}

pub fn format_error(msg: &str) -> String {
    format!("{} {}", "✗".red().bold(), msg.red())
}

pub fn format_warning(msg: &str) -> String {
    format!("{} {}", "⚠".yellow().bold(), msg.yellow())
}

pub fn format_info(msg: &str) -> String {
    format!("{} {}", "ℹ".blue().bold(), msg)
}

pub fn format_heading(msg: &str) -> String {
    format!("{}", msg.bold().underline())
}

/// Renders `text` on a `#RRGGBB` background; falls back to reverse video for malformed colours.
pub fn on_hex_color(text: &str, hex: &str) -> String {
    match parse_hex_color(hex) {
        Some((r, g, b)) => text.on_truecolor(r, g, b).black().to_string(),
        None => text.reversed().to_string(),
    }
}

pub fn parse_hex_color(hex: &str) -> Option<(u8, u8, u8)> {
    let digits = hex.trim().strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }

    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some((channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

/// Replaces highlight `<span>` markup with terminal background colours.
pub fn ansi_from_markup(html: &str) -> String {
    HIGHLIGHT_SPAN
        .replace_all(html, |captures: &regex::Captures| on_hex_color(&captures[2], &captures[1]))
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(parse_hex_color("#FFE082"), Some((0xFF, 0xE0, 0x82)));
        assert_eq!(parse_hex_color("#a5d6a7"), Some((0xA5, 0xD6, 0xA7)));
        assert_eq!(parse_hex_color("FFE082"), None);
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }

    #[test]
    fn test_markup_without_spans_is_unchanged() {
        assert_eq!(ansi_from_markup("plain <b>text</b>"), "plain <b>text</b>");
    }

    #[test]
    fn test_spans_are_replaced() {
        let html = r#"a <span style="background-color: #FFE082; padding: 0 2px; border-radius: 3px;">Rain</span> day"#;
        let rendered = ansi_from_markup(html);
        assert!(!rendered.contains("<span"));
        assert!(rendered.contains("Rain"));
        assert!(rendered.ends_with(" day"));
    }
}
