//! In-memory paper library
//!
//! The single owned collection of papers. All views derive their state from
//! this store by identifier lookup; there is no separate "selected paper"
//! copy to keep in sync. Papers are held in insertion order because the
//! relation graph layout is a deterministic function of collection order.
//!
//! Lookups are linear scans. The library is an interactive, human-scale
//! collection (tens to low hundreds of papers), so O(n) access is fine.

use crate::errors::{AppError, Result};
use crate::model::{AiSummary, Paper, ReadStatus};
use chrono::Utc;
use serde::Serialize;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Collection counters for the sidebar stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LibraryStats {
    pub total: usize,
    pub read: usize,
    pub unread: usize,
    pub analyzed: usize,
}

/// Owned, concurrency-safe paper collection
#[derive(Debug, Default)]
pub struct Library {
    papers: RwLock<Vec<Paper>>,
}

impl Library {
    /// Create an empty library
    pub fn new() -> Self {
        Self {
            papers: RwLock::new(Vec::new()),
        }
    }

    /// Create a library pre-populated with papers, keeping the given order
    pub fn with_papers(papers: Vec<Paper>) -> Self {
        Self {
            papers: RwLock::new(papers),
        }
    }

    /// Number of papers in the library
    pub async fn len(&self) -> usize {
        self.papers.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.papers.read().await.is_empty()
    }

    /// Add a paper at the front of the collection.
    ///
    /// New papers go first, matching how the catalogue presents recent
    /// additions. Fails if the identifier is already present.
    pub async fn insert_front(&self, paper: Paper) -> Result<Uuid> {
        let mut papers = self.papers.write().await;
        if papers.iter().any(|p| p.id == paper.id) {
            return Err(AppError::Validation {
                message: format!("Paper id {} already exists", paper.id),
                field: Some("id".to_string()),
            });
        }
        let id = paper.id;
        papers.insert(0, paper);
        Ok(id)
    }

    /// Fetch a paper by id
    pub async fn get(&self, id: Uuid) -> Result<Paper> {
        self.papers
            .read()
            .await
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| AppError::PaperNotFound { id: id.to_string() })
    }

    /// All papers in collection order
    pub async fn list(&self) -> Vec<Paper> {
        self.papers.read().await.clone()
    }

    /// Papers matching a case-insensitive substring query over title,
    /// abstract and keywords, in collection order. Empty query matches all.
    pub async fn filter(&self, query: &str) -> Vec<Paper> {
        self.papers
            .read()
            .await
            .iter()
            .filter(|p| p.matches_query(query))
            .cloned()
            .collect()
    }

    /// Flip a paper between read and unread, returning the updated paper
    pub async fn toggle_status(&self, id: Uuid) -> Result<Paper> {
        self.update(id, |paper| {
            paper.status = paper.status.toggled();
        })
        .await
    }

    /// Replace a paper's notes
    pub async fn set_notes(&self, id: Uuid, notes: String) -> Result<Paper> {
        self.update(id, |paper| {
            paper.notes = notes;
        })
        .await
    }

    /// Merge an analysis result into a paper (summary replaced wholesale,
    /// keywords appended), returning the updated paper
    pub async fn apply_analysis(
        &self,
        id: Uuid,
        summary: AiSummary,
        gaps: Vec<String>,
        keywords: Vec<String>,
    ) -> Result<Paper> {
        self.update(id, |paper| {
            paper.apply_analysis(summary, gaps, keywords);
        })
        .await
    }

    /// Remove a paper, returning it
    pub async fn remove(&self, id: Uuid) -> Result<Paper> {
        let mut papers = self.papers.write().await;
        let index = papers
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| AppError::PaperNotFound { id: id.to_string() })?;
        Ok(papers.remove(index))
    }

    /// Collection counters
    pub async fn stats(&self) -> LibraryStats {
        let papers = self.papers.read().await;
        LibraryStats {
            total: papers.len(),
            read: papers.iter().filter(|p| p.status == ReadStatus::Read).count(),
            unread: papers.iter().filter(|p| p.status == ReadStatus::Unread).count(),
            analyzed: papers.iter().filter(|p| p.ai_summary.is_some()).count(),
        }
    }

    async fn update(&self, id: Uuid, mutate: impl FnOnce(&mut Paper)) -> Result<Paper> {
        let mut papers = self.papers.write().await;
        let paper = papers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| AppError::PaperNotFound { id: id.to_string() })?;
        mutate(paper);
        paper.updated_at = Utc::now();
        Ok(paper.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_front_orders_newest_first() {
        let library = Library::new();
        let first = Paper::new("First");
        let second = Paper::new("Second");

        library.insert_front(first.clone()).await.unwrap();
        library.insert_front(second.clone()).await.unwrap();

        let papers = library.list().await;
        assert_eq!(papers[0].id, second.id);
        assert_eq!(papers[1].id, first.id);
    }

    #[tokio::test]
    async fn test_duplicate_id_rejected() {
        let library = Library::new();
        let paper = Paper::new("Once");
        library.insert_front(paper.clone()).await.unwrap();

        let err = library.insert_front(paper).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(library.len().await, 1);
    }

    #[tokio::test]
    async fn test_toggle_status_round_trip() {
        let library = Library::with_papers(Paper::samples());
        let id = Uuid::from_u128(3); // unread sample

        let toggled = library.toggle_status(id).await.unwrap();
        assert_eq!(toggled.status, ReadStatus::Read);

        let toggled = library.toggle_status(id).await.unwrap();
        assert_eq!(toggled.status, ReadStatus::Unread);
    }

    #[tokio::test]
    async fn test_mutation_visible_through_lookup() {
        // The "selected" view is derived by id lookup, so a mutation through
        // the library is the only write needed.
        let library = Library::with_papers(Paper::samples());
        let id = Uuid::from_u128(1);

        library.set_notes(id, "revisit methods section".to_string()).await.unwrap();

        let fetched = library.get(id).await.unwrap();
        assert_eq!(fetched.notes, "revisit methods section");
    }

    #[tokio::test]
    async fn test_filter_matches_keywords() {
        let library = Library::with_papers(Paper::samples());

        let hits = library.filter("biomarkers").await;
        assert_eq!(hits.len(), 1);
        assert!(hits[0].title.contains("Biomarkers"));

        let all = library.filter("").await;
        assert_eq!(all.len(), 3);
    }

    #[tokio::test]
    async fn test_stats() {
        let library = Library::with_papers(Paper::samples());
        let stats = library.stats().await;
        assert_eq!(stats.total, 3);
        assert_eq!(stats.read, 2);
        assert_eq!(stats.unread, 1);
        assert_eq!(stats.analyzed, 0);
    }

    #[tokio::test]
    async fn test_remove_and_missing_lookup() {
        let library = Library::with_papers(Paper::samples());
        let id = Uuid::from_u128(2);

        let removed = library.remove(id).await.unwrap();
        assert_eq!(removed.id, id);
        assert_eq!(library.len().await, 2);

        let err = library.get(id).await.unwrap_err();
        assert!(matches!(err, AppError::PaperNotFound { .. }));
    }
}
