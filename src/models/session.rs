// file: src/models/session.rs
// description: per-session presentation state (current tags, toggles, history)
// reference: internal data structures

use crate::models::{Lang, QueryResult};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize)]
pub struct HistoryEntry {
    pub query: String,
    pub detected_lang: Lang,
    pub tags: Vec<String>,
    pub date: Option<String>,
    pub result_count: usize,
    pub searched_at: DateTime<Utc>,
}

/// Owned by the caller for the lifetime of one user session.
#[derive(Debug, Default)]
pub struct SearchSession {
    current_tags: Vec<String>,
    show_original: HashMap<usize, bool>,
    history: Vec<HistoryEntry>,
}

impl SearchSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a finished search; toggles belong to the previous result list and are cleared.
    pub fn record(
        &mut self,
        query: &str,
        detected_lang: Lang,
        result: &QueryResult,
        result_count: usize,
    ) {
        self.current_tags = result.tags.clone();
        self.show_original.clear();
        self.history.push(HistoryEntry {
            query: query.to_string(),
            detected_lang,
            tags: result.tags.clone(),
            date: result.date.clone(),
            result_count,
            searched_at: Utc::now(),
        });
    }

    pub fn current_tags(&self) -> &[String] {
        &self.current_tags
    }

    /// Flips the "show original" flag for a result index and returns the new value.
    pub fn toggle_original(&mut self, index: usize) -> bool {
        let flag = self.show_original.entry(index).or_insert(false);
        *flag = !*flag;
        *flag
    }

    pub fn is_showing_original(&self, index: usize) -> bool {
        self.show_original.get(&index).copied().unwrap_or(false)
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }
}
