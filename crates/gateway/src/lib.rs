//! Literatus API Gateway
//!
//! The HTTP entry point for the catalogue. Handles:
//! - Paper CRUD, search and read-status tracking
//! - AI-backed analysis and PDF import
//! - Relation graph and citation export endpoints
//! - Observability (logging, metrics, request tracing)

pub mod handlers;
pub mod pdf;

use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use literatus_common::{
    assistant::Assistant, config::AppConfig, library::Library, metrics::RequestMetrics,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub library: Arc<Library>,
    pub assistant: Arc<dyn Assistant>,
}

/// Create the main application router
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Request ID propagation
    let request_id = SetRequestIdLayer::x_request_id(MakeRequestUuid);
    let propagate_id = PropagateRequestIdLayer::x_request_id();

    // API routes
    let api_routes = Router::new()
        // Health endpoints
        .route("/health", get(handlers::health::health))
        .route("/ready", get(handlers::health::ready))
        // Paper endpoints
        .route("/papers", get(handlers::papers::list_papers))
        .route("/papers", post(handlers::papers::create_paper))
        .route("/papers/import", post(handlers::import::import_paper))
        .route("/papers/{id}", get(handlers::papers::get_paper))
        .route("/papers/{id}", delete(handlers::papers::delete_paper))
        .route("/papers/{id}/status", post(handlers::papers::toggle_status))
        .route("/papers/{id}/notes", put(handlers::papers::set_notes))
        // Analysis endpoints
        .route("/papers/{id}/analyze", post(handlers::analysis::analyze_paper))
        // Citation endpoints
        .route(
            "/papers/{id}/citation/{format}",
            get(handlers::citations::export_citation),
        )
        // Graph endpoint
        .route("/graph", get(handlers::graph::relation_graph))
        // Collection stats
        .route("/stats", get(handlers::papers::library_stats));

    // Compose the app
    let max_upload = state.config.server.max_upload_bytes;
    Router::new()
        .nest("/v1", api_routes)
        .layer(axum::middleware::from_fn(track_metrics))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(request_id)
        .layer(propagate_id)
        .layer(DefaultBodyLimit::max(max_upload))
        .with_state(state)
}

/// Record request count and latency for every request
async fn track_metrics(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    let tracker = RequestMetrics::start(&method, &path);
    let response = next.run(request).await;
    tracker.finish(response.status().as_u16());

    response
}
