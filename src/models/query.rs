// file: src/models/query.rs
// description: structured search intent extracted from a free-text query
// reference: internal data structures

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const QUERY_DATE_FORMAT: &str = "%d-%m-%Y";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Lowercase, non-empty tags in model order; duplicates are kept
    pub tags: Vec<String>,

    /// `DD-MM-YYYY`, only ever a valid calendar date
    pub date: Option<String>,
}

impl QueryResult {
    pub fn new(tags: Vec<String>, date: Option<String>) -> Self {
        Self { tags, date }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty() && self.date.is_none()
    }

    pub fn date_floor(&self) -> Option<NaiveDate> {
        self.date.as_deref().and_then(parse_query_date)
    }
}

pub fn parse_query_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), QUERY_DATE_FORMAT).ok()
}

pub fn is_valid_query_date(value: &str) -> bool {
    parse_query_date(value).is_some()
}
