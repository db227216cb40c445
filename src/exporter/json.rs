// file: src/exporter/json.rs
// description: json export of search outcomes with a run manifest

use crate::error::{Result, SearchError};
use crate::models::Article;
use crate::search::SearchOutcome;
use chrono::Utc;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const MANIFEST_FILE: &str = "manifest.json";

#[derive(Debug, Clone)]
pub struct JsonExporter {
    output_dir: PathBuf,
}

#[derive(Debug, Serialize)]
pub struct ExportedArticle<'a> {
    pub title: &'a str,
    pub date: &'a str,
    pub link: &'a str,
    pub content: &'a str,
    pub original_content: &'a str,
    pub original_lang: String,
}

impl<'a> From<&'a Article> for ExportedArticle<'a> {
    fn from(article: &'a Article) -> Self {
        Self {
            title: &article.title,
            date: &article.date,
            link: &article.link,
            content: &article.content,
            original_content: article.original_content(),
            original_lang: article.original_lang().code().to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ExportedSearch<'a> {
    query: &'a str,
    detected_lang: String,
    output_lang: String,
    tags: &'a [String],
    date: Option<&'a str>,
    articles: Vec<ExportedArticle<'a>>,
}

#[derive(Debug, Serialize)]
pub struct ExportManifest {
    pub exported_at: String,
    pub query: String,
    pub total_articles: usize,
    pub files: Vec<String>,
}

impl JsonExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Result<Self> {
        let output_dir = output_dir.into();
        fs::create_dir_all(&output_dir).map_err(|e| SearchError::FileOperation {
            path: output_dir.clone(),
            source: e,
        })?;
        Ok(Self { output_dir })
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Writes the outcome to a timestamped file and refreshes `manifest.json`.
    pub fn export_outcome(&self, outcome: &SearchOutcome, pretty: bool) -> Result<ExportManifest> {
        info!("Starting JSON export to {:?}", self.output_dir);

        let now = Utc::now();
        let file_name = format!("search_{}.json", now.format("%Y%m%dT%H%M%S%3f"));

        let exported = ExportedSearch {
            query: &outcome.query,
            detected_lang: outcome.detected_lang.code().to_string(),
            output_lang: outcome.output_lang.code().to_string(),
            tags: &outcome.interpretation.tags,
            date: outcome.interpretation.date.as_deref(),
            articles: outcome.articles.iter().map(ExportedArticle::from).collect(),
        };
        self.write_json(&file_name, &exported, pretty)?;

        let manifest = ExportManifest {
            exported_at: now.to_rfc3339(),
            query: outcome.query.clone(),
            total_articles: outcome.articles.len(),
            files: vec![file_name],
        };
        self.write_json(MANIFEST_FILE, &manifest, pretty)?;

        info!(
            "Export complete: {} articles exported",
            manifest.total_articles
        );
        Ok(manifest)
    }

    fn write_json<T: Serialize>(&self, file_name: &str, value: &T, pretty: bool) -> Result<()> {
        let json = if pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };

        let path = self.output_dir.join(file_name);
        fs::write(&path, json).map_err(|e| SearchError::FileOperation { path, source: e })
    }
}
