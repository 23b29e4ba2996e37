//! Paper model
//!
//! The catalogue entry every component operates on. Identifiers are unique
//! within a library and never reassigned; author order is byline order and
//! is preserved across all operations.

mod samples;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Read status of a catalogued paper
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReadStatus {
    Read,
    Unread,
}

impl ReadStatus {
    /// The other status (read <-> unread)
    pub fn toggled(self) -> Self {
        match self {
            ReadStatus::Read => ReadStatus::Unread,
            ReadStatus::Unread => ReadStatus::Read,
        }
    }
}

/// AI analysis attachment, replaced wholesale on re-analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AiSummary {
    /// Key findings extracted from the abstract
    pub key_findings: Vec<String>,

    /// Relevance score, nominally 0-100; carried as reported
    pub relevance_score: i32,

    /// Titles of related papers in the library, ranked by similarity
    pub related_titles: Vec<String>,
}

/// A catalogued research paper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paper {
    pub id: Uuid,

    pub title: String,

    /// Author names in "Last, First" form, byline order
    pub authors: Vec<String>,

    pub year: i32,

    pub journal: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doi: Option<String>,

    #[serde(rename = "abstract")]
    pub abstract_text: String,

    /// Free-text keywords; duplicates permitted
    pub keywords: Vec<String>,

    pub methodology: Vec<String>,

    pub citation_count: u32,

    pub notes: String,

    pub status: ReadStatus,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ai_summary: Option<AiSummary>,

    #[serde(default)]
    pub gaps: Vec<String>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl Paper {
    /// Create a paper with a fresh time-ordered identifier and defaults
    /// for everything but the title.
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            title: title.into(),
            authors: Vec::new(),
            year: 0,
            journal: String::new(),
            doi: None,
            abstract_text: String::new(),
            keywords: Vec::new(),
            methodology: Vec::new(),
            citation_count: 0,
            notes: String::new(),
            status: ReadStatus::Unread,
            ai_summary: None,
            gaps: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge an analysis result into this paper.
    ///
    /// The summary and gaps are replaced wholesale; analysis keywords are
    /// appended to the existing keyword list and may duplicate.
    pub fn apply_analysis(
        &mut self,
        summary: AiSummary,
        gaps: Vec<String>,
        new_keywords: Vec<String>,
    ) {
        self.ai_summary = Some(summary);
        self.gaps = gaps;
        self.keywords.extend(new_keywords);
        self.updated_at = Utc::now();
    }

    /// First author surname (portion before the comma), if any
    pub fn first_author_surname(&self) -> Option<&str> {
        self.authors
            .first()
            .map(|a| a.split(',').next().unwrap_or(a).trim())
            .filter(|s| !s.is_empty())
    }

    /// First whitespace-separated word of the title, if any
    pub fn first_title_word(&self) -> Option<&str> {
        self.title.split_whitespace().next()
    }

    /// Case-insensitive substring match over title, abstract and keywords
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.abstract_text.to_lowercase().contains(&needle)
            || self
                .keywords
                .iter()
                .any(|k| k.to_lowercase().contains(&needle))
    }
}
