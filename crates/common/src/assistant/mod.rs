//! Assistant (AI provider) abstraction
//!
//! Provides a unified interface over the completion providers used for
//! metadata extraction and paper analysis:
//! - Anthropic (messages API)
//! - OpenAI-compatible endpoints (e.g. Perplexity)
//! - Mock (deterministic, for tests)
//!
//! The rest of the system only sees the two capabilities, "extract
//! metadata from text" and "analyze a paper", and never a vendor's
//! request/response shape.

mod anthropic;
mod openai_compat;

pub use anthropic::AnthropicAssistant;
pub use openai_compat::OpenAiCompatAssistant;

use crate::config::AssistantConfig;
use crate::errors::{AppError, Result};
use crate::model::Paper;
use async_trait::async_trait;
use chrono::{Datelike, Utc};
use serde::Deserialize;
use std::sync::Arc;

/// Metadata extracted from an uploaded document.
///
/// Every field is optional; [`ExtractedMetadata::into_paper`] merges the
/// provider reply onto the import defaults, never validating strictly.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExtractedMetadata {
    #[serde(default)]
    pub title: Option<String>,

    #[serde(default)]
    pub authors: Option<Vec<String>>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub journal: Option<String>,

    #[serde(default, rename = "abstract")]
    pub abstract_text: Option<String>,

    #[serde(default)]
    pub methodology: Option<Vec<String>>,

    #[serde(default)]
    pub keywords: Option<Vec<String>>,
}

impl ExtractedMetadata {
    /// Build a paper from extracted metadata, falling back to import
    /// defaults for absent fields.
    pub fn into_paper(self, fallback_title: &str) -> Paper {
        let mut paper = Paper::new(
            self.title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| fallback_title.to_string()),
        );
        paper.authors = self
            .authors
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| vec!["Unknown".to_string()]);
        paper.year = self.year.unwrap_or_else(|| Utc::now().year());
        paper.journal = self
            .journal
            .filter(|j| !j.is_empty())
            .unwrap_or_else(|| "Imported PDF".to_string());
        paper.abstract_text = self
            .abstract_text
            .filter(|a| !a.is_empty())
            .unwrap_or_else(|| "Content extracted from uploaded PDF.".to_string());
        paper.methodology = self
            .methodology
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| vec!["PDF Analysis".to_string()]);
        paper.keywords = self
            .keywords
            .filter(|k| !k.is_empty())
            .unwrap_or_else(|| vec!["imported".to_string()]);
        paper.notes = "Imported via PDF parser.".to_string();
        paper
    }
}

/// Analysis result for a single paper, in the provider wire shape.
///
/// Nominally 3 key findings, a 0-100 relevance score, 2 gaps and 5
/// keywords; carried as opaque data to merge, not validated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisReport {
    #[serde(default)]
    pub key_findings: Vec<String>,

    #[serde(default)]
    pub relevance_score: i32,

    #[serde(default)]
    pub gaps: Vec<String>,

    #[serde(default)]
    pub keywords: Vec<String>,
}

/// Trait for assistant providers
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Extract bibliographic metadata from raw document text
    async fn extract_metadata(&self, text: &str) -> Result<ExtractedMetadata>;

    /// Produce a critical analysis of a paper from its title and abstract
    async fn analyze(&self, title: &str, abstract_text: &str) -> Result<AnalysisReport>;

    /// Provider name for logs and metrics
    fn provider_name(&self) -> &str;
}

/// Strip markdown code fences from a provider reply.
///
/// Providers intermittently wrap JSON replies in ```json fences.
pub(crate) fn clean_reply(raw: &str) -> String {
    raw.replace("```json", "").replace("```", "").trim().to_string()
}

/// Parse a provider reply as JSON after fence cleanup
pub(crate) fn parse_reply<T: serde::de::DeserializeOwned>(raw: &str) -> Result<T> {
    let cleaned = clean_reply(raw);
    serde_json::from_str(&cleaned).map_err(|e| AppError::MalformedAssistantReply {
        message: e.to_string(),
    })
}

/// Prompt for structuring raw document text into metadata JSON
pub(crate) fn extraction_prompt(text: &str) -> String {
    // Truncate on a char boundary; leading pages carry the metadata
    let snippet: String = text.chars().take(crate::EXTRACT_TEXT_LIMIT).collect();
    format!(
        "Extract the following JSON from the provided paper text. Return ONLY the JSON \
         object, nothing else.\n\
         Fields required:\n\
         - title (string)\n\
         - authors (array of strings, format as \"Last, F.\")\n\
         - year (integer)\n\
         - journal (string)\n\
         - abstract (string, summary of the first 200 words)\n\
         - methodology (array of strings, identifying up to 5 key methods)\n\
         - keywords (array of strings, up to 5 terms)\n\n\
         Paper text snippet:\n\n{snippet}"
    )
}

/// Prompt for the critical analysis of a paper
pub(crate) fn analysis_prompt(title: &str, abstract_text: &str) -> String {
    format!(
        "You are an expert academic research assistant. Analyze the following paper \
         abstract and title.\n\n\
         Title: {title}\n\
         Abstract: {abstract_text}\n\n\
         Based on this information, provide a critical summary in a single JSON object \
         with the following strict structure:\n\
         1. \"keyFindings\": Array of 3 highly specific strings summarizing the main contributions.\n\
         2. \"relevanceScore\": Integer between 0 and 100 representing perceived scientific rigor/impact.\n\
         3. \"gaps\": Array of 2 critical research gaps or limitations not addressed by the abstract.\n\
         4. \"keywords\": Array of 5 specific terms for semantic search linking."
    )
}

/// Mock assistant for testing
pub struct MockAssistant;

#[async_trait]
impl Assistant for MockAssistant {
    async fn extract_metadata(&self, _text: &str) -> Result<ExtractedMetadata> {
        Ok(ExtractedMetadata {
            title: Some("Mock Extracted Title".to_string()),
            authors: Some(vec!["Doe, J.".to_string()]),
            year: Some(2024),
            journal: Some("Mock Journal".to_string()),
            abstract_text: Some("A mock abstract produced for testing.".to_string()),
            methodology: Some(vec!["Mock Method".to_string()]),
            keywords: Some(vec!["mock".to_string(), "testing".to_string()]),
        })
    }

    async fn analyze(&self, _title: &str, _abstract_text: &str) -> Result<AnalysisReport> {
        Ok(AnalysisReport {
            key_findings: vec![
                "Finding one".to_string(),
                "Finding two".to_string(),
                "Finding three".to_string(),
            ],
            relevance_score: 75,
            gaps: vec!["Gap one".to_string(), "Gap two".to_string()],
            keywords: vec![
                "alpha".to_string(),
                "beta".to_string(),
                "gamma".to_string(),
                "delta".to_string(),
                "epsilon".to_string(),
            ],
        })
    }

    fn provider_name(&self) -> &str {
        "mock"
    }
}

/// Create an assistant from configuration
pub fn create_assistant(config: &AssistantConfig) -> Result<Arc<dyn Assistant>> {
    match config.provider.as_str() {
        "anthropic" => {
            let api_key = config.api_key.clone().ok_or_else(|| AppError::Configuration {
                message: "Anthropic provider requires assistant.api_key".to_string(),
            })?;
            Ok(Arc::new(AnthropicAssistant::new(
                api_key,
                config.extract_model.clone(),
                config.analyze_model.clone(),
                config.api_base.clone(),
                config.timeout_secs,
                config.max_retries,
            )))
        }
        "openai-compat" | "perplexity" => {
            let api_key = config.api_key.clone().ok_or_else(|| AppError::Configuration {
                message: "OpenAI-compatible provider requires assistant.api_key".to_string(),
            })?;
            Ok(Arc::new(OpenAiCompatAssistant::new(
                api_key,
                config.extract_model.clone(),
                config.analyze_model.clone(),
                config.api_base.clone(),
                config.timeout_secs,
                config.max_retries,
            )))
        }
        "mock" => Ok(Arc::new(MockAssistant)),
        other => {
            tracing::warn!(provider = other, "Unknown assistant provider, using mock");
            Ok(Arc::new(MockAssistant))
        }
    }
}
