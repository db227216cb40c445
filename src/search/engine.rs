// file: src/search/engine.rs
// description: end-to-end search: interpret query, scan corpus, format results
// reference: coordinates interpreter, matcher and formatter for one request

use crate::cache::{ResponseCache, build_cache};
use crate::config::Config;
use crate::corpus::{CorpusStore, build_store};
use crate::error::Result;
use crate::language::{GoogleTranslateClient, TranslationService, Translator, detect_language};
use crate::models::{Article, Lang, QueryResult};
use crate::pipeline::ScanStats;
use crate::query::{HuggingFaceClient, LanguageModel, QueryInterpreter};
use crate::search::formatter::ResultFormatter;
use crate::search::highlight::HighlightTerms;
use crate::search::matcher::Matcher;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub query: String,
    pub detected_lang: Lang,
    pub output_lang: Lang,
    pub interpretation: QueryResult,
    pub legend: String,
    pub articles: Vec<Article>,
    pub stats: ScanStats,
}

pub struct NewsSearch {
    interpreter: QueryInterpreter,
    matcher: Matcher,
    formatter: ResultFormatter,
    translation: TranslationService,
    store: Arc<dyn CorpusStore>,
    palette: Vec<String>,
}

impl NewsSearch {
    pub fn new(
        config: &Config,
        model: Arc<dyn LanguageModel>,
        translator: Arc<dyn Translator>,
        store: Arc<dyn CorpusStore>,
        cache: Arc<dyn ResponseCache>,
    ) -> Self {
        let timeout = config.search.request_timeout();
        let workers = config.search.parallel_workers;
        let translation = TranslationService::new(translator, cache.clone(), timeout);

        Self {
            interpreter: QueryInterpreter::new(model, translation.clone(), cache.clone(), timeout),
            matcher: Matcher::new(cache, workers, timeout),
            formatter: ResultFormatter::new(
                translation.clone(),
                workers,
                config.search.format_timeout(),
            ),
            translation,
            store,
            palette: config.highlight.palette.clone(),
        }
    }

    /// Wires the HTTP-backed collaborators named in `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let timeout = config.search.request_timeout();
        let model = Arc::new(HuggingFaceClient::new(&config.model, timeout)?);
        let translator = Arc::new(GoogleTranslateClient::new(&config.translation, timeout)?);
        let store = build_store(&config.corpus, timeout)?;
        let cache = build_cache(config.search.cache_enabled, config.search.cache_ttl());

        Ok(Self::new(config, model, translator, store, cache))
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.matcher = self.matcher.with_progress(show_progress);
        self
    }

    pub fn store(&self) -> &Arc<dyn CorpusStore> {
        &self.store
    }

    pub fn highlight_terms(&self, tags: &[String]) -> HighlightTerms {
        HighlightTerms::new(tags, &self.palette)
    }

    pub async fn interpret(&self, query: &str) -> (Lang, QueryResult) {
        let detected = detect_language(query);
        let result = self.interpreter.interpret(query, detected).await;
        (detected, result)
    }

    pub async fn search(&self, query: &str, output_lang: Lang) -> SearchOutcome {
        let (detected_lang, interpretation) = self.interpret(query).await;
        self.search_with(query, detected_lang, interpretation, output_lang)
            .await
    }

    /// Runs the scan and formatting for an already interpreted query.
    pub async fn search_with(
        &self,
        query: &str,
        detected_lang: Lang,
        interpretation: QueryResult,
        output_lang: Lang,
    ) -> SearchOutcome {
        info!(
            "Searching for tags {:?} (date: {})",
            interpretation.tags,
            interpretation.date.as_deref().unwrap_or("any")
        );

        let terms = self.highlight_terms(&interpretation.tags);
        let outcome = self
            .matcher
            .match_corpus(&interpretation, self.store.as_ref())
            .await;
        let articles = self
            .formatter
            .format(outcome.articles, &terms, output_lang)
            .await;

        SearchOutcome {
            query: query.to_string(),
            detected_lang,
            output_lang,
            legend: terms.legend(),
            interpretation,
            articles,
            stats: outcome.stats,
        }
    }

    /// "Found N articles", in the output language.
    pub async fn results_heading(&self, count: usize, output_lang: Lang) -> String {
        let heading = format!("Found {} articles", count);
        self.translation
            .translate_text(&heading, Lang::En, output_lang)
            .await
    }

    pub async fn translate(&self, text: &str, target: Lang) -> String {
        let source = detect_language(text);
        self.translation.translate_text(text, source, target).await
    }
}
