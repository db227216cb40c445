// file: src/models/corpus_file.rs
// description: corpus listing entries and fetched raw article files
// reference: internal data structures

use serde::{Deserialize, Serialize};

/// A file advertised by a corpus store; `handle` is whatever the store needs to fetch it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusEntry {
    pub name: String,
    pub handle: String,
}

#[derive(Debug, Clone)]
pub struct RawCorpusFile {
    pub name: String,
    pub content: String,
}

impl RawCorpusFile {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn size(&self) -> u64 {
        self.content.len() as u64
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CorpusStats {
    pub source: String,
    pub total_files: usize,
    pub last_updated: Option<String>,
    pub stars: Option<u64>,
    pub forks: Option<u64>,
}

impl CorpusStats {
    pub fn format(&self) -> String {
        let mut output = format!(
            "Source: {}\nTotal Files: {}\nLast Updated: {}",
            self.source,
            self.total_files,
            self.last_updated.as_deref().unwrap_or("N/A")
        );

        if let Some(stars) = self.stars {
            output.push_str(&format!("\nStars: {}", stars));
        }
        if let Some(forks) = self.forks {
            output.push_str(&format!("\nForks: {}", forks));
        }

        output
    }
}
