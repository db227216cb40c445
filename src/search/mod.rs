// file: src/search/mod.rs
// description: matching, formatting and highlighting module exports
// reference: internal module structure

pub mod engine;
pub mod formatter;
pub mod highlight;
pub mod matcher;

pub use engine::{NewsSearch, SearchOutcome};
pub use formatter::ResultFormatter;
pub use highlight::{HighlightTerm, HighlightTerms, color_legend, highlight_matching_text};
pub use matcher::{MatchOutcome, Matcher, contains_all_tags, file_matches, passes_date_filter};
