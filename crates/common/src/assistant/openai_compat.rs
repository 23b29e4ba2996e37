//! OpenAI-compatible chat completions provider
//!
//! Targets endpoints that speak the OpenAI chat completions shape behind a
//! configurable base URL; the default points at Perplexity.

use super::{analysis_prompt, extraction_prompt, parse_reply, AnalysisReport, Assistant, ExtractedMetadata};
use crate::errors::{AppError, Result};
use crate::metrics::record_assistant_call;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

const DEFAULT_BASE_URL: &str = "https://api.perplexity.ai";
const DEFAULT_EXTRACT_MODEL: &str = "sonar";
const DEFAULT_ANALYZE_MODEL: &str = "sonar-pro";
const SYSTEM_PROMPT: &str = "You are a research assistant. Return ONLY valid JSON.";

/// Assistant backed by an OpenAI-compatible chat completions endpoint
pub struct OpenAiCompatAssistant {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    extract_model: String,
    analyze_model: String,
    timeout_ms: u64,
    max_retries: u32,
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: String,
}

impl OpenAiCompatAssistant {
    /// Create a new OpenAI-compatible assistant
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

    async fn complete_with_retry(&self, model: &str, prompt: &str) -> Result<String> {
        let mut last_error = None;

        for attempt in 0..self.max_retries {
            if attempt > 0 {
                let delay = Duration::from_millis(100 * 2_u64.pow(attempt));
                tokio::time::sleep(delay).await;
            }

            match self.complete(model, prompt).await {
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

    async fn complete(&self, model: &str, prompt: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);

        let request = ChatRequest {
            model: model.to_string(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
        };

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
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

        let result: ChatResponse = response.json().await.map_err(|e| AppError::Assistant {
            message: format!("Failed to parse response: {}", e),
        })?;

        result
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| AppError::Assistant {
                message: "Empty response".to_string(),
            })
    }
}

#[async_trait]
impl Assistant for OpenAiCompatAssistant {
    async fn extract_metadata(&self, text: &str) -> Result<ExtractedMetadata> {
        let start = Instant::now();
        let prompt = extraction_prompt(text);
        let reply = self.complete_with_retry(&self.extract_model, &prompt).await;
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
        let reply = self.complete_with_retry(&self.analyze_model, &prompt).await;
        record_assistant_call(
            start.elapsed().as_secs_f64(),
            self.provider_name(),
            "analyze",
            reply.is_ok(),
        );
        parse_reply(&reply?)
    }

    fn provider_name(&self) -> &str {
        "openai-compat"
    }
}
