// file: src/config.rs
// description: application configuration management with toml support
// reference: https://docs.rs/config

use crate::error::{Result, SearchError};
use dotenvy::dotenv;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PALETTE: [&str; 5] = ["#FFE082", "#A5D6A7", "#90CAF9", "#F48FB1", "#B39DDB"];

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub corpus: CorpusConfig,
    pub model: ModelConfig,
    pub translation: TranslationConfig,
    pub search: SearchConfig,
    pub highlight: HighlightConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CorpusBackend {
    Local,
    Github,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CorpusConfig {
    pub backend: CorpusBackend,
    pub local_path: PathBuf,
    pub github_owner: String,
    pub github_repo: String,
    pub github_branch: String,
    #[serde(default)]
    pub github_token: Option<String>,
    pub file_prefix: String,
    pub file_extension: String,
    pub max_file_size_mb: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ModelConfig {
    pub api_url: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
    pub return_full_text: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TranslationConfig {
    pub endpoint: String,
    pub max_chunk_chars: usize,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    pub parallel_workers: usize,
    pub request_timeout_secs: u64,
    /// Budget for translating and highlighting one result
    #[serde(default = "default_format_timeout_secs")]
    pub format_timeout_secs: u64,
    pub cache_enabled: bool,
    pub cache_ttl_secs: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HighlightConfig {
    pub palette: Vec<String>,
}

fn default_format_timeout_secs() -> u64 {
    120
}

impl SearchConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn format_timeout(&self) -> Duration {
        Duration::from_secs(self.format_timeout_secs)
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl Config {
    pub fn load(path: Option<&Path>) -> Result<Self> {
        dotenv().ok();

        let mut builder = config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        } else {
            builder = builder.add_source(config::File::from(Path::new("config/default.toml")));
        }

        builder = builder.add_source(
            config::Environment::with_prefix("NEWS_SEARCH")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        let mut config: Config = settings
            .try_deserialize()
            .map_err(|e| SearchError::Config(e.to_string()))?;

        config.apply_secrets_from_env();
        config.validate()?;
        Ok(config)
    }

    pub fn default_config() -> Self {
        let mut config = Self {
            corpus: CorpusConfig {
                backend: CorpusBackend::Local,
                local_path: PathBuf::from("./news"),
                github_owner: "sleeky-glitch".to_string(),
                github_repo: "Gujratinewsbotprod".to_string(),
                github_branch: "main".to_string(),
                github_token: None,
                file_prefix: "dd_news_page_".to_string(),
                file_extension: "txt".to_string(),
                max_file_size_mb: 10,
            },
            model: ModelConfig {
                api_url:
                    "https://api-inference.huggingface.co/models/mistralai/Mixtral-8x7B-Instruct-v0.1"
                        .to_string(),
                api_key: None,
                max_new_tokens: 200,
                temperature: 0.3,
                top_p: 0.9,
                return_full_text: false,
            },
            translation: TranslationConfig {
                endpoint: "https://translate.googleapis.com/translate_a/single".to_string(),
                max_chunk_chars: 4500,
            },
            search: SearchConfig {
                parallel_workers: 4,
                request_timeout_secs: 30,
                format_timeout_secs: default_format_timeout_secs(),
                cache_enabled: true,
                cache_ttl_secs: 3600,
            },
            highlight: HighlightConfig::default(),
        };
        config.apply_secrets_from_env();
        config
    }

    /// Secrets live outside the config file; fill them from the environment when unset.
    fn apply_secrets_from_env(&mut self) {
        if self.model.api_key.is_none() {
            self.model.api_key = std::env::var("HUGGINGFACE_API_KEY")
                .ok()
                .filter(|v| !v.trim().is_empty());
        }

        if self.corpus.github_token.is_none() {
            self.corpus.github_token = std::env::var("GITHUB_TOKEN")
                .ok()
                .filter(|v| !v.trim().is_empty());
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.search.parallel_workers == 0 {
            return Err(SearchError::Config(
                "parallel_workers must be greater than 0".to_string(),
            ));
        }

        if self.search.request_timeout_secs == 0 {
            return Err(SearchError::Config(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.search.format_timeout_secs == 0 {
            return Err(SearchError::Config(
                "format_timeout_secs must be greater than 0".to_string(),
            ));
        }

        if self.highlight.palette.is_empty() {
            return Err(SearchError::Config(
                "highlight palette must contain at least one color".to_string(),
            ));
        }

        if self.corpus.file_prefix.trim().is_empty() {
            return Err(SearchError::Config(
                "corpus file_prefix must not be empty".to_string(),
            ));
        }

        if self.translation.max_chunk_chars == 0 {
            return Err(SearchError::Config(
                "max_chunk_chars must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.highlight.palette.len(), 5);
        assert_eq!(config.corpus.file_prefix, "dd_news_page_");
    }

    #[test]
    fn test_validation_rejects_zero_workers() {
        let mut config = Config::default_config();
        config.search.parallel_workers = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_empty_palette() {
        let mut config = Config::default_config();
        config.highlight.palette.clear();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_rejects_zero_format_timeout() {
        let mut config = Config::default_config();
        config.search.format_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_toml_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("search.toml");
        std::fs::write(
            &path,
            r##"
[corpus]
backend = "local"
local_path = "./fixtures"
github_owner = "owner"
github_repo = "repo"
github_branch = "main"
file_prefix = "news_"
file_extension = "txt"
max_file_size_mb = 2

[model]
api_url = "http://localhost:9000/generate"
max_new_tokens = 64
temperature = 0.1
top_p = 0.5
return_full_text = false

[translation]
endpoint = "http://localhost:9001/translate"
max_chunk_chars = 1000

[search]
parallel_workers = 2
request_timeout_secs = 5
cache_enabled = false
cache_ttl_secs = 60

[highlight]
palette = ["#000000"]
"##,
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.corpus.backend, CorpusBackend::Local);
        assert_eq!(config.corpus.file_prefix, "news_");
        assert_eq!(config.search.parallel_workers, 2);
        assert!(!config.search.cache_enabled);
        assert_eq!(config.search.format_timeout(), Duration::from_secs(120));
        assert_eq!(config.highlight.palette, vec!["#000000".to_string()]);
    }
}
