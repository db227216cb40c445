// file: src/lib.rs
// description: library entry point and public api exports
// reference: rust library patterns
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/readme.md"))]

pub mod cache;
pub mod config;
pub mod corpus;
pub mod error;
pub mod exporter;
pub mod language;
pub mod models;
pub mod parser;
pub mod pipeline;
pub mod query;
pub mod search;
pub mod utils;

pub use cache::{NoopCache, ResponseCache, TtlCache};
pub use config::{Config, CorpusBackend, CorpusConfig, HighlightConfig, ModelConfig, SearchConfig, TranslationConfig};
pub use corpus::{CorpusStore, GithubCorpus, LocalCorpus};
pub use error::{Result, SearchError};
pub use exporter::{ExportManifest, JsonExporter};
pub use language::{GoogleTranslateClient, TranslationService, Translator, detect_language};
pub use models::{Article, CorpusEntry, CorpusStats, Lang, QueryResult, SearchSession};
pub use parser::ArticleParser;
pub use pipeline::{ProgressTracker, ScanStats};
pub use query::{HuggingFaceClient, LanguageModel, QueryInterpreter};
pub use search::{HighlightTerms, Matcher, NewsSearch, ResultFormatter, SearchOutcome};
