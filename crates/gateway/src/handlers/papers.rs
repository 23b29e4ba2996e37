//! Paper management handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use metrics::counter;
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::AppState;
use literatus_common::{
    errors::{AppError, Result},
    library::LibraryStats,
    metrics::METRICS_PREFIX,
    model::Paper,
};

/// Query parameters for listing papers
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    /// Case-insensitive substring filter over title, abstract and keywords
    #[serde(default)]
    pub q: Option<String>,
}

/// Request to add a paper to the library
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePaperRequest {
    #[validate(length(min = 1, max = 1000, message = "Title is required"))]
    pub title: String,

    #[serde(default)]
    pub authors: Vec<String>,

    #[serde(default)]
    pub year: i32,

    #[serde(default)]
    pub journal: String,

    #[serde(default)]
    pub doi: Option<String>,

    #[serde(default, rename = "abstract")]
    pub abstract_text: String,

    #[serde(default)]
    pub keywords: Vec<String>,

    #[serde(default)]
    pub methodology: Vec<String>,

    #[serde(default)]
    pub notes: String,
}

/// Request to replace a paper's notes
#[derive(Debug, Deserialize)]
pub struct SetNotesRequest {
    pub notes: String,
}

/// List papers in collection order, optionally filtered
pub async fn list_papers(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Json<Vec<Paper>> {
    let papers = state.library.filter(query.q.as_deref().unwrap_or("")).await;
    Json(papers)
}

/// Add a paper to the front of the library
pub async fn create_paper(
    State(state): State<AppState>,
    Json(request): Json<CreatePaperRequest>,
) -> Result<(StatusCode, Json<Paper>)> {
    request.validate().map_err(|e| AppError::Validation {
        message: e.to_string(),
        field: Some("title".to_string()),
    })?;

    let mut paper = Paper::new(request.title);
    // A paper always carries at least one author string; without one the
    // first title word stands in.
    paper.authors = if request.authors.is_empty() {
        vec![paper.first_title_word().unwrap_or("Unknown").to_string()]
    } else {
        request.authors
    };
    paper.year = request.year;
    paper.journal = request.journal;
    paper.doi = request.doi.filter(|d| !d.is_empty());
    paper.abstract_text = request.abstract_text;
    paper.keywords = request.keywords;
    paper.methodology = request.methodology;
    paper.notes = request.notes;

    state.library.insert_front(paper.clone()).await?;

    counter!(format!("{}_papers_created_total", METRICS_PREFIX)).increment(1);
    tracing::info!(paper_id = %paper.id, title = %paper.title, "Paper added");

    Ok((StatusCode::CREATED, Json(paper)))
}

/// Get a paper by ID
pub async fn get_paper(
    State(state): State<AppState>,
    Path(paper_id): Path<Uuid>,
) -> Result<Json<Paper>> {
    Ok(Json(state.library.get(paper_id).await?))
}

/// Delete a paper
pub async fn delete_paper(
    State(state): State<AppState>,
    Path(paper_id): Path<Uuid>,
) -> Result<StatusCode> {
    state.library.remove(paper_id).await?;
    tracing::info!(paper_id = %paper_id, "Paper deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Flip a paper between read and unread
pub async fn toggle_status(
    State(state): State<AppState>,
    Path(paper_id): Path<Uuid>,
) -> Result<Json<Paper>> {
    let paper = state.library.toggle_status(paper_id).await?;
    Ok(Json(paper))
}

/// Replace a paper's notes
pub async fn set_notes(
    State(state): State<AppState>,
    Path(paper_id): Path<Uuid>,
    Json(request): Json<SetNotesRequest>,
) -> Result<Json<Paper>> {
    let paper = state.library.set_notes(paper_id, request.notes).await?;
    Ok(Json(paper))
}

/// Collection counters for the sidebar
pub async fn library_stats(State(state): State<AppState>) -> Json<LibraryStats> {
    Json(state.library.stats().await)
}
