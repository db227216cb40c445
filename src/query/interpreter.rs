// file: src/query/interpreter.rs
// description: turns a free-text query into tags and an optional date floor
// reference: prompt the language model, then parse its reply tolerantly

use crate::cache::{ResponseCache, cache_key};
use crate::language::TranslationService;
use crate::models::query::is_valid_query_date;
use crate::models::{Lang, QueryResult};
use crate::parser::patterns::{EMBEDDED_DATE, TAGS_LINE};
use crate::query::model::LanguageModel;
use crate::query::prompt::build_extraction_prompt;
use chrono::{Local, NaiveDate};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct QueryInterpreter {
    model: Arc<dyn LanguageModel>,
    translation: TranslationService,
    cache: Arc<dyn ResponseCache>,
    timeout: Duration,
}

impl QueryInterpreter {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        translation: TranslationService,
        cache: Arc<dyn ResponseCache>,
        timeout: Duration,
    ) -> Self {
        Self {
            model,
            translation,
            cache,
            timeout,
        }
    }

    /// Never fails: an unavailable model or an unusable reply yields an empty result.
    pub async fn interpret(&self, query: &str, source_lang: Lang) -> QueryResult {
        self.interpret_on(query, source_lang, Local::now().date_naive())
            .await
    }

    pub async fn interpret_on(&self, query: &str, source_lang: Lang, today: NaiveDate) -> QueryResult {
        if query.trim().is_empty() {
            return QueryResult::empty();
        }

        let query_en = if source_lang == Lang::Gu {
            self.translation
                .translate_text(query, Lang::Gu, Lang::En)
                .await
        } else {
            query.to_string()
        };

        let prompt = build_extraction_prompt(&query_en, today);

        let Some(reply) = self.complete_cached(&prompt).await else {
            return QueryResult::empty();
        };

        let result = parse_model_reply(&reply);
        info!(
            "Interpreted query into {} tag(s), date {}",
            result.tags.len(),
            result.date.as_deref().unwrap_or("none")
        );
        result
    }

    async fn complete_cached(&self, prompt: &str) -> Option<String> {
        let key = cache_key("model", &[prompt]);
        if let Some(cached) = self.cache.get(&key) {
            return Some(cached);
        }

        match tokio::time::timeout(self.timeout, self.model.complete(prompt)).await {
            Ok(Ok(reply)) => {
                self.cache.insert(key, reply.clone());
                Some(reply)
            }
            Ok(Err(e)) => {
                warn!("Language model call failed: {}", e);
                None
            }
            Err(_) => {
                warn!(
                    "Language model call timed out after {}s",
                    self.timeout.as_secs()
                );
                None
            }
        }
    }
}

/// Extracts `Tags: [..]` and `Date: DD-MM-YYYY` from free model text.
pub fn parse_model_reply(reply: &str) -> QueryResult {
    let tags = TAGS_LINE
        .captures(reply)
        .and_then(|captures| captures.get(1))
        .map(|list| {
            list.as_str()
                .split(',')
                .map(str::trim)
                .filter(|tag| !tag.is_empty())
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
        })
        .unwrap_or_default();

    let date = EMBEDDED_DATE
        .captures(reply)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
        .filter(|value| {
            let valid = is_valid_query_date(value);
            if !valid {
                debug!("Ignoring invalid date in model reply: {}", value);
            }
            valid
        });

    QueryResult::new(tags, date)
}
