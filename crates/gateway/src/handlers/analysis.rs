//! AI analysis handler

use axum::{
    extract::{Path, State},
    Json,
};
use metrics::counter;
use uuid::Uuid;

use crate::AppState;
use literatus_analysis::rank_related;
use literatus_common::{
    errors::Result, metrics::METRICS_PREFIX, model::AiSummary, model::Paper,
    RELATED_TITLE_LIMIT,
};

/// Analyze a paper with the configured assistant and merge the result.
///
/// The summary and gaps replace any previous analysis; reported keywords
/// are appended to the paper's keyword list. Related titles are ranked
/// locally by lexical similarity, not taken from the assistant.
pub async fn analyze_paper(
    State(state): State<AppState>,
    Path(paper_id): Path<Uuid>,
) -> Result<Json<Paper>> {
    let paper = state.library.get(paper_id).await?;

    let report = state
        .assistant
        .analyze(&paper.title, &paper.abstract_text)
        .await?;

    let candidates = state.library.list().await;
    let related_titles = rank_related(&paper, &candidates, RELATED_TITLE_LIMIT);

    let summary = AiSummary {
        key_findings: report.key_findings,
        relevance_score: report.relevance_score,
        related_titles,
    };

    let updated = state
        .library
        .apply_analysis(paper_id, summary, report.gaps, report.keywords)
        .await?;

    counter!(format!("{}_papers_analyzed_total", METRICS_PREFIX)).increment(1);
    tracing::info!(
        paper_id = %paper_id,
        provider = state.assistant.provider_name(),
        "Paper analyzed"
    );

    Ok(Json(updated))
}
