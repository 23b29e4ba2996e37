//! Citation export handler

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};
use uuid::Uuid;

use crate::AppState;
use literatus_analysis::{export_file_name, render_citation, CitationFormat};
use literatus_common::errors::{AppError, Result};

/// Export a paper's citation in the requested format.
///
/// The response body is the citation text itself, served as an attachment
/// with a `Surname_Year_FirstTitleWord` file name.
pub async fn export_citation(
    State(state): State<AppState>,
    Path((paper_id, format)): Path<(Uuid, String)>,
) -> Result<impl IntoResponse> {
    let format: CitationFormat = format.parse().map_err(|message| AppError::Validation {
        message,
        field: Some("format".to_string()),
    })?;

    let paper = state.library.get(paper_id).await?;
    let content = render_citation(&paper, format);
    let file_name = export_file_name(&paper, format);

    Ok((
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}\""),
            ),
        ],
        content,
    ))
}
