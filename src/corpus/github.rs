// file: src/corpus/github.rs
// description: GitHub repository article store using the contents API
// reference: https://docs.github.com/en/rest/repos/contents

use crate::config::CorpusConfig;
use crate::corpus::{CorpusStore, FileNamePattern};
use crate::error::{Result, SearchError};
use crate::models::{CorpusEntry, CorpusStats};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, info, warn};

const GITHUB_API: &str = "https://api.github.com";
const USER_AGENT: &str = "news_search/0.1 (Rust)";

#[derive(Debug, Deserialize)]
struct ContentItem {
    name: String,
    path: String,
    #[serde(rename = "type")]
    item_type: String,
    download_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RepoInfo {
    stargazers_count: u64,
    forks_count: u64,
    updated_at: Option<String>,
}

pub struct GithubCorpus {
    client: Client,
    config: CorpusConfig,
    pattern: FileNamePattern,
}

impl GithubCorpus {
    pub fn new(config: CorpusConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        let pattern = FileNamePattern::from_config(&config);

        Ok(Self {
            client,
            config,
            pattern,
        })
    }

    fn repo_url(&self) -> String {
        format!(
            "{}/repos/{}/{}",
            GITHUB_API, self.config.github_owner, self.config.github_repo
        )
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.config.github_token {
            Some(token) => request.header("Authorization", format!("Bearer {}", token)),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .authorized(self.client.get(url))
            .header("Accept", "application/vnd.github+json")
            .send()
            .await
            .map_err(|e| SearchError::Corpus(format!("GitHub request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SearchError::Corpus(format!(
                "GitHub request to {} failed with status {}: {}",
                url, status, error_text
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SearchError::Corpus(format!("Failed to parse GitHub response: {}", e)))
    }

    async fn list_directory(&self, path: &str) -> Result<Vec<ContentItem>> {
        let url = format!(
            "{}/contents/{}?ref={}",
            self.repo_url(),
            path,
            self.config.github_branch
        );
        self.get_json(&url).await
    }
}

#[async_trait]
impl CorpusStore for GithubCorpus {
    async fn list_files(&self) -> Result<Vec<CorpusEntry>> {
        info!(
            "Listing news files in {}/{}@{}",
            self.config.github_owner, self.config.github_repo, self.config.github_branch
        );

        let mut pending: VecDeque<ContentItem> = self.list_directory("").await?.into();
        let mut entries = Vec::new();

        while let Some(item) = pending.pop_front() {
            match item.item_type.as_str() {
                "dir" => match self.list_directory(&item.path).await {
                    Ok(children) => pending.extend(children),
                    Err(e) => warn!("Skipping directory {}: {}", item.path, e),
                },
                "file" if self.pattern.matches(&item.name) => match item.download_url {
                    Some(url) => entries.push(CorpusEntry {
                        name: item.name,
                        handle: url,
                    }),
                    None => debug!("File {} has no download URL", item.path),
                },
                _ => {}
            }
        }

        info!("Found {} news files", entries.len());
        Ok(entries)
    }

    async fn fetch_content(&self, handle: &str) -> Result<String> {
        let response = self
            .authorized(self.client.get(handle))
            .send()
            .await
            .map_err(|e| SearchError::Corpus(format!("Failed to download {}: {}", handle, e)))?
            .error_for_status()?;

        let max_bytes = (self.config.max_file_size_mb as u64) * 1_048_576;
        if let Some(length) = response.content_length()
            && max_bytes > 0
            && length > max_bytes
        {
            return Err(SearchError::Validation(format!("File too large: {}", handle)));
        }

        Ok(response.text().await?)
    }

    async fn stats(&self) -> Result<CorpusStats> {
        let repo: RepoInfo = self.get_json(&self.repo_url()).await?;
        let total_files = self.list_files().await?.len();

        Ok(CorpusStats {
            source: format!("{}/{}", self.config.github_owner, self.config.github_repo),
            total_files,
            last_updated: repo.updated_at,
            stars: Some(repo.stargazers_count),
            forks: Some(repo.forks_count),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_repo_url() {
        let config = Config::default_config().corpus;
        let corpus = GithubCorpus::new(config, Duration::from_secs(5)).unwrap();
        assert_eq!(
            corpus.repo_url(),
            "https://api.github.com/repos/sleeky-glitch/Gujratinewsbotprod"
        );
    }

    #[test]
    fn test_contents_listing_shape() {
        let items: Vec<ContentItem> = serde_json::from_str(
            r#"[
                {"name": "dd_news_page_1.txt", "path": "pages/dd_news_page_1.txt", "type": "file",
                 "download_url": "https://raw.githubusercontent.com/o/r/main/pages/dd_news_page_1.txt", "sha": "abc"},
                {"name": "pages", "path": "pages", "type": "dir", "download_url": null}
            ]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_type, "file");
        assert!(items[1].download_url.is_none());
    }
}
