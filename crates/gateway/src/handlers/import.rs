//! PDF import handler

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use metrics::counter;
use serde::Deserialize;

use crate::pdf;
use crate::AppState;
use literatus_common::{
    errors::{AppError, Result},
    metrics::METRICS_PREFIX,
    model::Paper,
};

/// Query parameters for the import endpoint
#[derive(Debug, Default, Deserialize)]
pub struct ImportQuery {
    /// Original file name; its stem is the fallback title when the
    /// assistant cannot extract one
    #[serde(default)]
    pub filename: Option<String>,
}

/// Import a paper from an uploaded PDF.
///
/// Extracts the text, asks the assistant to structure it into metadata,
/// and adds the resulting paper to the front of the library. Absent
/// metadata fields fall back to import defaults; extraction of no text at
/// all is an error, not an empty paper.
pub async fn import_paper(
    State(state): State<AppState>,
    Query(query): Query<ImportQuery>,
    body: Bytes,
) -> Result<(StatusCode, Json<Paper>)> {
    if body.is_empty() {
        return Err(AppError::Validation {
            message: "Request body is empty".to_string(),
            field: None,
        });
    }

    let text = pdf::extract_text(&body)?;

    let metadata = state.assistant.extract_metadata(&text).await?;

    let fallback_title = query
        .filename
        .as_deref()
        .map(|name| name.trim_end_matches(".pdf"))
        .filter(|name| !name.is_empty())
        .unwrap_or("Imported Document")
        .to_string();

    let paper = metadata.into_paper(&fallback_title);
    state.library.insert_front(paper.clone()).await?;

    counter!(format!("{}_papers_imported_total", METRICS_PREFIX)).increment(1);
    tracing::info!(
        paper_id = %paper.id,
        title = %paper.title,
        bytes = body.len(),
        "Paper imported from PDF"
    );

    Ok((StatusCode::CREATED, Json(paper)))
}
