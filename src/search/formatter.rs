// file: src/search/formatter.rs
// description: translates and highlights matched articles for presentation
// reference: per-article, partial-failure tolerant formatting

use crate::language::{TranslationService, detect_language};
use crate::models::{Article, Lang};
use crate::search::highlight::HighlightTerms;
use futures::stream::{self, StreamExt};
use std::time::Duration;
use tracing::{debug, error};

pub struct ResultFormatter {
    translation: TranslationService,
    parallel_workers: usize,
    timeout: Duration,
}

impl ResultFormatter {
    pub fn new(translation: TranslationService, parallel_workers: usize, timeout: Duration) -> Self {
        Self {
            translation,
            parallel_workers: parallel_workers.max(1),
            timeout,
        }
    }

    /// Formats every article for `target`; output order equals input order.
    /// An article whose formatting times out is emitted unformatted.
    pub async fn format(&self, articles: Vec<Article>, terms: &HighlightTerms, target: Lang) -> Vec<Article> {
        stream::iter(articles.into_iter().map(|article| async move {
            match tokio::time::timeout(self.timeout, self.format_result(article.clone(), terms, target)).await {
                Ok(formatted) => formatted,
                Err(_) => {
                    error!(
                        "Error formatting result '{}': timed out after {}s",
                        article.title,
                        self.timeout.as_secs()
                    );
                    article
                }
            }
        }))
        .buffered(self.parallel_workers)
        .collect()
        .await
    }

    async fn format_result(&self, mut article: Article, terms: &HighlightTerms, target: Lang) -> Article {
        let title_lang = detect_language(&article.title);
        if title_lang != target {
            article.title = self
                .translation
                .translate_text(&article.title, title_lang, target)
                .await;
        }

        self.format_article_content(article, terms, target).await
    }

    /// Rebuilds `content` from the article's original body: translated when the
    /// body language differs from `target`, then highlighted when there are terms.
    pub async fn format_article_content(&self, mut article: Article, terms: &HighlightTerms, target: Lang) -> Article {
        let source = detect_language(article.original_content());

        let body = if source != target {
            debug!("Translating article body {} -> {}", source, target);
            self.translation
                .translate_text(article.original_content(), source, target)
                .await
        } else {
            article.original_content().to_string()
        };

        article.content = if terms.is_empty() {
            body
        } else {
            terms.highlight(&body)
        };

        article
    }
}
