// file: src/corpus/local.rs
// description: directory-backed article store with name-pattern and size filtering
// reference: https://docs.rs/walkdir

use crate::config::CorpusConfig;
use crate::corpus::{CorpusStore, FileNamePattern};
use crate::error::{Result, SearchError};
use crate::models::{CorpusEntry, CorpusStats};
use async_trait::async_trait;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info};
use walkdir::WalkDir;

pub struct LocalCorpus {
    config: CorpusConfig,
    pattern: FileNamePattern,
}

impl LocalCorpus {
    pub fn new(config: CorpusConfig) -> Self {
        let pattern = FileNamePattern::from_config(&config);
        Self { config, pattern }
    }

    fn root(&self) -> &Path {
        &self.config.local_path
    }

    fn max_bytes(&self) -> u64 {
        (self.config.max_file_size_mb as u64) * 1_048_576
    }

    /// Matching files in a stable (name-sorted) order, with their modification times.
    fn scan(&self) -> Result<Vec<(PathBuf, String, Option<SystemTime>)>> {
        let root = self.root();
        if !root.is_dir() {
            return Err(SearchError::Corpus(format!(
                "Corpus directory not found: {}",
                root.display()
            )));
        }

        let mut files = Vec::new();

        for entry in WalkDir::new(root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }

            let name = entry.file_name().to_string_lossy().to_string();
            if !self.pattern.matches(&name) {
                continue;
            }

            let modified = entry.metadata().ok().and_then(|m| m.modified().ok());
            files.push((entry.path().to_path_buf(), name, modified));
        }

        Ok(files)
    }
}

#[async_trait]
impl CorpusStore for LocalCorpus {
    async fn list_files(&self) -> Result<Vec<CorpusEntry>> {
        info!("Scanning corpus directory: {}", self.root().display());

        let entries: Vec<CorpusEntry> = self
            .scan()?
            .into_iter()
            .map(|(path, name, _)| CorpusEntry {
                name,
                handle: path.display().to_string(),
            })
            .collect();

        info!("Found {} news files", entries.len());
        Ok(entries)
    }

    async fn fetch_content(&self, handle: &str) -> Result<String> {
        let path = PathBuf::from(handle);

        let metadata = tokio::fs::metadata(&path)
            .await
            .map_err(|source| SearchError::FileOperation {
                path: path.clone(),
                source,
            })?;

        let max_bytes = self.max_bytes();
        if max_bytes > 0 && metadata.len() > max_bytes {
            debug!(
                "Skipping large file ({} MB): {}",
                metadata.len() / 1_048_576,
                path.display()
            );
            return Err(SearchError::Validation(format!(
                "File too large: {}",
                path.display()
            )));
        }

        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| SearchError::FileOperation {
                path: path.clone(),
                source,
            })?;

        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    async fn stats(&self) -> Result<CorpusStats> {
        let files = self.scan()?;

        let last_updated = files
            .iter()
            .filter_map(|(_, _, modified)| *modified)
            .max()
            .map(|time| {
                DateTime::<Local>::from(time)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            });

        Ok(CorpusStats {
            source: self.root().display().to_string(),
            total_files: files.len(),
            last_updated,
            stars: None,
            forks: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use std::fs;
    use tempfile::TempDir;

    fn corpus_config(root: &Path) -> CorpusConfig {
        let mut config = Config::default_config().corpus;
        config.local_path = root.to_path_buf();
        config.max_file_size_mb = 1;
        config
    }

    #[tokio::test]
    async fn test_lists_only_matching_files_in_order() {
        let temp = TempDir::new().unwrap();
        fs::create_dir_all(temp.path().join("nested")).unwrap();
        fs::write(temp.path().join("dd_news_page_2.txt"), "b").unwrap();
        fs::write(temp.path().join("dd_news_page_1.txt"), "a").unwrap();
        fs::write(temp.path().join("nested/dd_news_page_3.txt"), "c").unwrap();
        fs::write(temp.path().join("notes.txt"), "skip").unwrap();

        let corpus = LocalCorpus::new(corpus_config(temp.path()));
        let files = corpus.list_files().await.unwrap();
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["dd_news_page_1.txt", "dd_news_page_2.txt", "dd_news_page_3.txt"]);
        assert_eq!(corpus.fetch_content(&files[0].handle).await.unwrap(), "a");
    }

    #[tokio::test]
    async fn test_oversized_file_is_rejected() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("dd_news_page_big.txt");
        fs::write(&path, "a".repeat(2 * 1_048_576)).unwrap();

        let corpus = LocalCorpus::new(corpus_config(temp.path()));
        let result = corpus.fetch_content(&path.display().to_string()).await;
        assert!(matches!(result, Err(SearchError::Validation(_))));
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let corpus = LocalCorpus::new(corpus_config(Path::new("/nonexistent/news")));
        assert!(corpus.list_files().await.is_err());
    }

    #[tokio::test]
    async fn test_stats_counts_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("dd_news_page_1.txt"), "a").unwrap();

        let corpus = LocalCorpus::new(corpus_config(temp.path()));
        let stats = corpus.stats().await.unwrap();
        assert_eq!(stats.total_files, 1);
        assert!(stats.last_updated.is_some());
    }
}
