// file: src/language/translator.rs
// description: translation service seam with a Google Translate client and failure-tolerant wrapper
// reference: https://translate.googleapis.com/translate_a/single

use crate::cache::{ResponseCache, cache_key};
use crate::config::TranslationConfig;
use crate::error::{Result, SearchError};
use crate::models::Lang;
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: Lang, target: Lang) -> Result<String>;
}

pub struct GoogleTranslateClient {
    client: Client,
    endpoint: String,
    max_chunk_chars: usize,
}

impl GoogleTranslateClient {
    pub fn new(config: &TranslationConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            max_chunk_chars: config.max_chunk_chars,
        })
    }

    async fn translate_chunk(&self, chunk: &str, source: Lang, target: Lang) -> Result<String> {
        debug!(
            "Requesting translation {} -> {} for {} chars",
            source,
            target,
            chunk.chars().count()
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("client", "gtx"),
                ("sl", source.code()),
                ("tl", target.code()),
                ("dt", "t"),
                ("q", chunk),
            ])
            .send()
            .await
            .map_err(|e| {
                SearchError::Translation(format!("Failed to send translation request: {}", e))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SearchError::Translation(format!(
                "Translation request failed with status {}: {}",
                status, error_text
            )));
        }

        let body: Value = response.json().await.map_err(|e| {
            SearchError::Translation(format!("Failed to parse translation response: {}", e))
        })?;

        parse_translation_response(&body)
    }
}

#[async_trait]
impl Translator for GoogleTranslateClient {
    async fn translate(&self, text: &str, source: Lang, target: Lang) -> Result<String> {
        translate_in_chunks(text, self.max_chunk_chars, move |chunk| async move {
            self.translate_chunk(&chunk, source, target).await
        })
        .await
    }
}

/// Concatenates the translated sentence segments of a `translate_a/single` reply.
pub fn parse_translation_response(body: &Value) -> Result<String> {
    let sentences = body
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| SearchError::Translation("Unexpected translation payload".to_string()))?;

    let translated: String = sentences
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect();

    if translated.is_empty() {
        return Err(SearchError::Translation(
            "Translation payload contained no text".to_string(),
        ));
    }

    Ok(translated)
}

/// Splits text on line boundaries into chunks of at most `max_chars` characters.
/// Chunks concatenate back to the input; a single line longer than the limit is
/// cut on character boundaries.
pub fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for line in text.split_inclusive('\n') {
        let line_len = line.chars().count();

        if !current.is_empty() && current_len + line_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }

        if line_len > max_chars {
            let chars: Vec<char> = line.chars().collect();
            for piece in chars.chunks(max_chars) {
                chunks.push(piece.iter().collect());
            }
            continue;
        }

        current.push_str(line);
        current_len += line_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

/// Translates `text` chunk by chunk with `translate_chunk`, keeping the line layout:
/// blank chunks and the newlines around each chunk are copied through untouched.
pub async fn translate_in_chunks<F, Fut>(text: &str, max_chars: usize, mut translate_chunk: F) -> Result<String>
where
    F: FnMut(String) -> Fut,
    Fut: Future<Output = Result<String>>,
{
    let mut translated = String::with_capacity(text.len());
    for chunk in chunk_text(text, max_chars) {
        let (leading, core, trailing) = split_line_margins(&chunk);
        translated.push_str(leading);
        if core.trim().is_empty() {
            translated.push_str(core);
        } else {
            translated.push_str(&translate_chunk(core.to_string()).await?);
        }
        translated.push_str(trailing);
    }
    Ok(translated)
}

/// Separates leading and trailing newlines from a chunk so they survive translation.
pub fn split_line_margins(chunk: &str) -> (&str, &str, &str) {
    let body_start = chunk.len() - chunk.trim_start_matches(['\n', '\r']).len();
    let body_end = chunk.trim_end_matches(['\n', '\r']).len().max(body_start);
    (
        &chunk[..body_start],
        &chunk[body_start..body_end],
        &chunk[body_end..],
    )
}

/// Wraps a translator so that translation is total: failures return the input unchanged.
#[derive(Clone)]
pub struct TranslationService {
    translator: Arc<dyn Translator>,
    cache: Arc<dyn ResponseCache>,
    timeout: Duration,
}

impl TranslationService {
    pub fn new(
        translator: Arc<dyn Translator>,
        cache: Arc<dyn ResponseCache>,
        timeout: Duration,
    ) -> Self {
        Self {
            translator,
            cache,
            timeout,
        }
    }

    pub async fn translate_text(&self, text: &str, source: Lang, target: Lang) -> String {
        if text.trim().is_empty() || source == target {
            return text.to_string();
        }

        let key = cache_key("translate", &[source.code(), target.code(), text]);
        if let Some(cached) = self.cache.get(&key) {
            return cached;
        }

        match tokio::time::timeout(
            self.timeout,
            self.translator.translate(text, source, target),
        )
        .await
        {
            Ok(Ok(translated)) => {
                self.cache.insert(key, translated.clone());
                translated
            }
            Ok(Err(e)) => {
                warn!("Translation {} -> {} failed: {}", source, target, e);
                text.to_string()
            }
            Err(_) => {
                warn!(
                    "Translation {} -> {} timed out after {}s",
                    source,
                    target,
                    self.timeout.as_secs()
                );
                text.to_string()
            }
        }
    }
}
