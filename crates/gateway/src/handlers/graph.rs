//! Relation graph handler

use axum::{
    extract::{Query, State},
    Json,
};
use std::time::Instant;

use crate::handlers::papers::ListQuery;
use crate::AppState;
use literatus_analysis::{RelationGraph, RelationGraphBuilder};
use literatus_common::{errors::Result, metrics::record_graph_build};

/// Build the relation graph over the (optionally filtered) collection.
///
/// Fewer than two matching papers is reported as an insufficient-papers
/// error rather than an empty graph.
pub async fn relation_graph(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<RelationGraph>> {
    let papers = state.library.filter(query.q.as_deref().unwrap_or("")).await;

    let start = Instant::now();
    let graph = RelationGraphBuilder::new().build(&papers)?;
    record_graph_build(
        start.elapsed().as_secs_f64(),
        graph.nodes.len(),
        graph.edges.len(),
    );

    Ok(Json(graph))
}
