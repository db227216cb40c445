// file: src/corpus/mod.rs
// description: article store seam and backend selection
// reference: internal module structure

pub mod github;
pub mod local;

use crate::config::{CorpusBackend, CorpusConfig};
use crate::error::Result;
use crate::models::{CorpusEntry, CorpusStats};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;

pub use github::GithubCorpus;
pub use local::LocalCorpus;

#[async_trait]
pub trait CorpusStore: Send + Sync {
    async fn list_files(&self) -> Result<Vec<CorpusEntry>>;
    async fn fetch_content(&self, handle: &str) -> Result<String>;
    async fn stats(&self) -> Result<CorpusStats>;
}

/// Naming convention for news files: `<prefix>*.<extension>`.
#[derive(Debug, Clone)]
pub struct FileNamePattern {
    prefix: String,
    extension: String,
}

impl FileNamePattern {
    pub fn new(prefix: &str, extension: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn from_config(config: &CorpusConfig) -> Self {
        Self::new(&config.file_prefix, &config.file_extension)
    }

    pub fn matches(&self, file_name: &str) -> bool {
        file_name.starts_with(&self.prefix)
            && file_name
                .rsplit_once('.')
                .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case(&self.extension))
    }
}

pub fn build_store(config: &CorpusConfig, timeout: Duration) -> Result<Arc<dyn CorpusStore>> {
    match config.backend {
        CorpusBackend::Local => Ok(Arc::new(LocalCorpus::new(config.clone()))),
        CorpusBackend::Github => Ok(Arc::new(GithubCorpus::new(config.clone(), timeout)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_pattern() {
        let pattern = FileNamePattern::new("dd_news_page_", ".txt");
        assert!(pattern.matches("dd_news_page_12.txt"));
        assert!(pattern.matches("dd_news_page_12.TXT"));
        assert!(!pattern.matches("dd_news_page_12.md"));
        assert!(!pattern.matches("other_12.txt"));
        assert!(!pattern.matches("dd_news_page_"));
    }
}
