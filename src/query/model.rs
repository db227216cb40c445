// file: src/query/model.rs
// description: language-model completion seam and Hugging Face inference client
// reference: https://huggingface.co/docs/api-inference

use crate::config::ModelConfig;
use crate::error::{Result, SearchError};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct InferenceRequest<'a> {
    inputs: &'a str,
    parameters: InferenceParameters,
}

#[derive(Debug, Clone, Serialize)]
struct InferenceParameters {
    max_new_tokens: u32,
    temperature: f32,
    top_p: f32,
    return_full_text: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    generated_text: String,
}

pub struct HuggingFaceClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    parameters: InferenceParameters,
}

impl HuggingFaceClient {
    pub fn new(config: &ModelConfig, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            api_url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            parameters: InferenceParameters {
                max_new_tokens: config.max_new_tokens,
                temperature: config.temperature,
                top_p: config.top_p,
                return_full_text: config.return_full_text,
            },
        })
    }
}

#[async_trait]
impl LanguageModel for HuggingFaceClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key.as_ref().ok_or_else(|| {
            SearchError::Model("No Hugging Face API key configured".to_string())
        })?;

        let request = InferenceRequest {
            inputs: prompt,
            parameters: self.parameters.clone(),
        };

        let preview: String = prompt.chars().take(100).collect();
        debug!("Querying language model with prompt: {}...", preview);

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchError::Model(format!("Failed to send inference request: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(SearchError::Model(format!(
                "Inference request failed with status {}: {}",
                status, error_text
            )));
        }

        let generations: Vec<GeneratedText> = response.json().await.map_err(|e| {
            SearchError::Model(format!("Failed to parse inference response: {}", e))
        })?;

        generations
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| SearchError::Model("No generated text returned".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_request_serialization() {
        let request = InferenceRequest {
            inputs: "prompt",
            parameters: InferenceParameters {
                max_new_tokens: 200,
                temperature: 0.3,
                top_p: 0.9,
                return_full_text: false,
            },
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["inputs"], "prompt");
        assert_eq!(value["parameters"]["max_new_tokens"], 200);
        assert_eq!(value["parameters"]["return_full_text"], false);
    }

    #[test]
    fn test_response_shape() {
        let parsed: Vec<GeneratedText> =
            serde_json::from_str(r#"[{"generated_text": "Tags: [a]"}]"#).unwrap();
        assert_eq!(parsed[0].generated_text, "Tags: [a]");
    }

    #[tokio::test]
    async fn test_missing_api_key_is_an_error() {
        let mut config = Config::default_config();
        config.model.api_key = None;
        let client = HuggingFaceClient::new(&config.model, Duration::from_secs(1)).unwrap();
        assert!(matches!(
            client.complete("prompt").await,
            Err(SearchError::Model(_))
        ));
    }
}
