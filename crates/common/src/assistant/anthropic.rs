//! Anthropic messages API provider

use super::{analysis_prompt, extraction_prompt, parse_reply, AnalysisReport, Assistant, ExtractedMetadata};
use crate::errors::{AppError, Result};
use crate::metrics::record_assistant_call;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";
const DEFAULT_EXTRACT_MODEL: &str = "claude-3-haiku-20240307";
const DEFAULT_ANALYZE_MODEL: &str = "claude-3-opus-20240229";
const EXTRACT_MAX_TOKENS: u32 = 1024;
const ANALYZE_MAX_TOKENS: u32 = 1500;

/// Assistant backed by the Anthropic messages API
pub struct AnthropicAssistant {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    extract_model: String,
    analyze_model: String,
    timeout_ms: u64,
    max_retries: u32,
}

#[derive(Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

impl AnthropicAssistant {
    /// Create a new Anthropic assistant
    pub fn new(
        api_key: String,
        extract_model: Option<String>,
        analyze_model: Option<String>,
        base_url: Option<String>,
        timeout_secs: u64,
        max_retries: u32,
    ) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .unwrap_or_default();

        Self {
            client,
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            extract_model: extract_model.unwrap_or_else(|| DEFAULT_EXTRACT_MODEL.to_string()),
            analyze_model: analyze_model.unwrap_or_else(|| DEFAULT_ANALYZE_MODEL.to_string()),
            timeout_ms: timeout_secs * 1000,
            max_retries,
        }
    }

    /// Send a prompt with retry, returning the first text block
    async fn complete_with_retry(
        &self,
        model: &str,
        prompt: &str,
        max_tokens: u32,
    ) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                // Exponential backoff
                let delay = Duration::from_millis(100 * 2_u64.pow(attempt));
                tokio::time::sleep(delay).await;
            }

            match self.complete(model, prompt, max_tokens).await {
                Ok(text) => return Ok(text),
                Err(e) => {
                    tracing::warn!(
                        attempt = attempt + 1,
                        max_retries = self.max_retries,
                        model = model,
                        error = %e,
                        "Assistant request failed, retrying"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| AppError::Assistant {
            message: "Unknown error after retries".to_string(),
        }))
    }

    async fn complete(&self, model: &str, prompt: &str, max_tokens: u32) -> Result<String> {
        let url = format!("{}/v1/messages", self.base_url);

        let request = MessagesRequest {
            model: model.to_string(),
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: prompt.to_string(),
            }],
        };

        let response = self
            .client
            .post(&url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::AssistantTimeout {
                        timeout_ms: self.timeout_ms,
                    }
                } else {
                    AppError::Assistant {
                        message: format!("Request failed: {}", e),
                    }
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Assistant {
                message: format!("API error {}: {}", status, body),
            });
        }

        let result: MessagesResponse = response.json().await.map_err(|e| AppError::Assistant {
            message: format!("Failed to parse response: {}", e),
        })?;

        result
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| AppError::Assistant {
                message: "Empty response".to_string(),
            })
    }
}

#[async_trait]
impl Assistant for AnthropicAssistant {
    async fn extract_metadata(&self, text: &str) -> Result<ExtractedMetadata> {
        let start = Instant::now();
        let prompt = extraction_prompt(text);
        let reply = self
            .complete_with_retry(&self.extract_model, &prompt, EXTRACT_MAX_TOKENS)
            .await;
        record_assistant_call(
            start.elapsed().as_secs_f64(),
            self.provider_name(),
            "extract",
            reply.is_ok(),
        );
        parse_reply(&reply?)
    }

    async fn analyze(&self, title: &str, abstract_text: &str) -> Result<AnalysisReport> {
        let start = Instant::now();
        let prompt = analysis_prompt(title, abstract_text);
        let reply = self
            .complete_with_retry(&self.analyze_model, &prompt, ANALYZE_MAX_TOKENS)
            .await;
        record_assistant_call(
            start.elapsed().as_secs_f64(),
            self.provider_name(),
            "analyze",
            reply.is_ok(),
        );
        parse_reply(&reply?)
    }

    fn provider_name(&self) -> &str {
        "anthropic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_defaults() {
        let assistant = AnthropicAssistant::new("key".to_string(), None, None, None, 30, 3);
        assert_eq!(assistant.extract_model, DEFAULT_EXTRACT_MODEL);
        assert_eq!(assistant.analyze_model, DEFAULT_ANALYZE_MODEL);
        assert_eq!(assistant.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_model_overrides() {
        let assistant = AnthropicAssistant::new(
            "key".to_string(),
            Some("claude-3-5-haiku-latest".to_string()),
            None,
            Some("https://proxy.internal".to_string()),
            30,
            3,
        );
        assert_eq!(assistant.extract_model, "claude-3-5-haiku-latest");
        assert_eq!(assistant.base_url, "https://proxy.internal");
    }
}
