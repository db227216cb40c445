// file: src/search/matcher.rs
// description: conjunctive tag matching and date filtering over a full corpus scan
// reference: case-insensitive substring containment per corpus file

use crate::cache::{ResponseCache, cache_key};
use crate::corpus::CorpusStore;
use crate::error::{Result, SearchError};
use crate::models::{Article, CorpusEntry, QueryResult, RawCorpusFile};
use crate::parser::{ArticleParser, extract_embedded_date};
use crate::pipeline::{ProgressTracker, ScanStats};
use chrono::NaiveDate;
use futures::stream::{self, StreamExt};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Default)]
pub struct MatchOutcome {
    pub articles: Vec<Article>,
    pub stats: ScanStats,
}

/// True when every tag occurs in `text`, ignoring case. An empty tag list matches nothing.
pub fn contains_all_tags(text: &str, tags: &[String]) -> bool {
    if tags.is_empty() {
        return false;
    }

    let haystack = text.to_lowercase();
    tags.iter()
        .all(|tag| haystack.contains(&tag.to_lowercase()))
}

/// With a floor, the text must carry an embedded `Date:` on or after it.
pub fn passes_date_filter(text: &str, floor: Option<NaiveDate>) -> bool {
    match floor {
        None => true,
        Some(floor) => extract_embedded_date(text).is_some_and(|date| date >= floor),
    }
}

pub fn file_matches(text: &str, tags: &[String], floor: Option<NaiveDate>) -> bool {
    contains_all_tags(text, tags) && passes_date_filter(text, floor)
}

pub struct Matcher {
    parser: ArticleParser,
    cache: Arc<dyn ResponseCache>,
    parallel_workers: usize,
    timeout: Duration,
    show_progress: bool,
}

impl Matcher {
    pub fn new(cache: Arc<dyn ResponseCache>, parallel_workers: usize, timeout: Duration) -> Self {
        Self {
            parser: ArticleParser::new(),
            cache,
            parallel_workers: parallel_workers.max(1),
            timeout,
            show_progress: false,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Scans every corpus file; results keep the store's listing order.
    /// Never fails: listing errors yield no results, per-file errors skip the file.
    pub async fn match_corpus(&self, query: &QueryResult, store: &dyn CorpusStore) -> MatchOutcome {
        if query.tags.is_empty() {
            info!("No search tags, nothing to match");
            return MatchOutcome::default();
        }

        let floor = query.date_floor();
        if query.date.is_some() && floor.is_none() {
            warn!("Ignoring unparseable date filter: {:?}", query.date);
        }

        let entries = match store.list_files().await {
            Ok(entries) => entries,
            Err(e) => {
                error!("Failed to list corpus files: {}", e);
                return MatchOutcome::default();
            }
        };

        let progress = if self.show_progress {
            ProgressTracker::new(entries.len())
        } else {
            ProgressTracker::hidden(entries.len())
        };

        let tags = &query.tags;
        let progress_ref = &progress;

        let results: Vec<Option<Article>> = stream::iter(entries.into_iter().map(|entry| async move {
            match self.fetch(store, &entry).await {
                Ok(file) => {
                    progress_ref.inc_files_scanned(file.size());
                    if file_matches(&file.content, tags, floor) {
                        debug!("Matched {}", file.name);
                        progress_ref.add_match();
                        Some(self.parser.parse(&file.content))
                    } else {
                        None
                    }
                }
                Err(e) => {
                    progress_ref.inc_files_failed();
                    error!("Error processing file {}: {}", entry.name, e);
                    None
                }
            }
        }))
        .buffered(self.parallel_workers)
        .collect()
        .await;

        let articles: Vec<Article> = results.into_iter().flatten().collect();
        let stats = progress.get_stats();
        progress.finish();

        info!("{}", stats.summary());
        MatchOutcome { articles, stats }
    }

    async fn fetch(&self, store: &dyn CorpusStore, entry: &CorpusEntry) -> Result<RawCorpusFile> {
        let key = cache_key("corpus", &[&entry.handle]);
        if let Some(content) = self.cache.get(&key) {
            return Ok(RawCorpusFile::new(&entry.name, content));
        }

        let content = tokio::time::timeout(self.timeout, store.fetch_content(&entry.handle))
            .await
            .map_err(|_| SearchError::Timeout {
                operation: format!("fetch {}", entry.name),
                secs: self.timeout.as_secs(),
            })??;

        self.cache.insert(key, content.clone());
        Ok(RawCorpusFile::new(&entry.name, content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{NoopCache, TtlCache};
    use crate::models::CorpusStats;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    struct MemoryCorpus {
        files: Vec<(String, Option<String>)>,
        fetches: Mutex<HashMap<String, usize>>,
    }

    impl MemoryCorpus {
        fn new(files: &[(&str, Option<&str>)]) -> Self {
            Self {
                files: files
                    .iter()
                    .map(|(name, content)| (name.to_string(), content.map(str::to_string)))
                    .collect(),
                fetches: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl CorpusStore for MemoryCorpus {
        async fn list_files(&self) -> Result<Vec<CorpusEntry>> {
            Ok(self
                .files
                .iter()
                .map(|(name, _)| CorpusEntry {
                    name: name.clone(),
                    handle: name.clone(),
                })
                .collect())
        }

        async fn fetch_content(&self, handle: &str) -> Result<String> {
            *self.fetches.lock().entry(handle.to_string()).or_insert(0) += 1;
            self.files
                .iter()
                .find(|(name, _)| name == handle)
                .and_then(|(_, content)| content.clone())
                .ok_or_else(|| SearchError::Corpus(format!("cannot fetch {}", handle)))
        }

        async fn stats(&self) -> Result<CorpusStats> {
            Ok(CorpusStats::default())
        }
    }

    fn tags(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn matcher() -> Matcher {
        Matcher::new(Arc::new(NoopCache), 4, Duration::from_secs(5))
    }

    #[test]
    fn test_all_tags_required() {
        let text = "Title: CRICKET in Gujarat\nContent: ...";
        assert!(contains_all_tags(text, &tags(&["cricket", "gujarat"])));
        assert!(!contains_all_tags("Cricket only", &tags(&["cricket", "gujarat"])));
    }

    #[test]
    fn test_empty_tags_match_nothing() {
        assert!(!contains_all_tags("anything at all", &[]));
    }

    #[test]
    fn test_date_filter() {
        let floor = NaiveDate::from_ymd_opt(2024, 6, 1);
        assert!(passes_date_filter("Date: 15-06-2024 | 10:00 AM", floor));
        assert!(passes_date_filter("Date: 01-06-2024 | 10:00 AM", floor));
        assert!(!passes_date_filter("Date: 01-01-2024 | 10:00 AM", floor));
        assert!(!passes_date_filter("no date in this file", floor));
        assert!(passes_date_filter("no date in this file", None));
    }

    #[tokio::test]
    async fn test_match_corpus_keeps_order_and_skips_failures() {
        let corpus = MemoryCorpus::new(&[
            ("b.txt", Some("Title: B\nContent: cricket and GUJARAT")),
            ("broken.txt", None),
            ("c.txt", Some("Title: C\nContent: only cricket")),
            ("a.txt", Some("Title: A\nContent: Gujarat cricket")),
        ]);

        let query = QueryResult::new(tags(&["cricket", "gujarat"]), None);
        let outcome = matcher().match_corpus(&query, &corpus).await;

        let titles: Vec<&str> = outcome.articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["B", "A"]);
        assert_eq!(outcome.stats.files_failed, 1);
        assert_eq!(outcome.stats.files_scanned, 3);
        assert_eq!(outcome.stats.files_matched, 2);
    }

    #[tokio::test]
    async fn test_match_corpus_with_date_floor() {
        let corpus = MemoryCorpus::new(&[
            ("new.txt", Some("Title: New\nDate: 15-06-2024 | 09:00 AM\nContent: cricket")),
            ("old.txt", Some("Title: Old\nDate: 01-01-2024 | 09:00 AM\nContent: cricket")),
            ("undated.txt", Some("Title: Undated\nContent: cricket")),
        ]);

        let query = QueryResult::new(tags(&["cricket"]), Some("01-06-2024".to_string()));
        let outcome = matcher().match_corpus(&query, &corpus).await;

        assert_eq!(outcome.articles.len(), 1);
        assert_eq!(outcome.articles[0].title, "New");
    }

    #[tokio::test]
    async fn test_undated_files_match_without_filter() {
        let corpus = MemoryCorpus::new(&[("undated.txt", Some("Title: Undated\nContent: cricket"))]);
        let query = QueryResult::new(tags(&["cricket"]), None);
        let outcome = matcher().match_corpus(&query, &corpus).await;
        assert_eq!(outcome.articles.len(), 1);
    }

    #[tokio::test]
    async fn test_empty_tags_skip_the_scan() {
        let corpus = MemoryCorpus::new(&[("a.txt", Some("cricket"))]);
        let outcome = matcher().match_corpus(&QueryResult::empty(), &corpus).await;
        assert!(outcome.articles.is_empty());
        assert!(corpus.fetches.lock().is_empty());
    }

    #[tokio::test]
    async fn test_file_content_is_cached_between_searches() {
        let corpus = MemoryCorpus::new(&[("a.txt", Some("cricket"))]);
        let matcher = Matcher::new(
            Arc::new(TtlCache::new(Duration::from_secs(60))),
            2,
            Duration::from_secs(5),
        );
        let query = QueryResult::new(tags(&["cricket"]), None);

        matcher.match_corpus(&query, &corpus).await;
        matcher.match_corpus(&query, &corpus).await;

        assert_eq!(corpus.fetches.lock().get("a.txt"), Some(&1));
    }
}
