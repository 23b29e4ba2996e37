//! End-to-end API tests over the in-process router

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use literatus_common::assistant::MockAssistant;
use literatus_common::config::AppConfig;
use literatus_common::library::Library;
use literatus_common::model::Paper;
use literatus_gateway::{create_router, AppState};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

fn app() -> Router {
    create_router(AppState {
        config: Arc::new(AppConfig::default()),
        library: Arc::new(Library::with_papers(Paper::samples())),
        assistant: Arc::new(MockAssistant),
    })
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_list_papers() {
    let response = app().oneshot(get("/v1/papers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let papers = body_json(response).await;
    assert_eq!(papers.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_papers_filtered() {
    let response = app().oneshot(get("/v1/papers?q=biomarkers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let papers = body_json(response).await;
    let papers = papers.as_array().unwrap();
    assert_eq!(papers.len(), 1);
    assert!(papers[0]["title"].as_str().unwrap().contains("Biomarkers"));
}

#[tokio::test]
async fn test_create_paper_with_author_fallback() {
    let app = app();
    let request = post_json(
        "/v1/papers",
        json!({
            "title": "Novel Imaging Methods",
            "year": 2025
        }),
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let paper = body_json(response).await;
    assert_eq!(paper["title"], "Novel Imaging Methods");
    assert_eq!(paper["authors"], json!(["Novel"]));
    assert_eq!(paper["status"], "unread");

    // New papers land at the front of the collection
    let list = body_json(app.oneshot(get("/v1/papers")).await.unwrap()).await;
    assert_eq!(list[0]["title"], "Novel Imaging Methods");
}

#[tokio::test]
async fn test_create_paper_requires_title() {
    let response = app()
        .oneshot(post_json("/v1/papers", json!({ "title": "" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_unknown_paper_is_404() {
    let uri = format!("/v1/papers/{}", Uuid::now_v7());
    let response = app().oneshot(get(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "PAPER_NOT_FOUND");
}

#[tokio::test]
async fn test_toggle_status() {
    let app = app();
    let id = Uuid::from_u128(3); // unread sample

    let response = app
        .clone()
        .oneshot(post_json(&format!("/v1/papers/{id}/status"), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "read");
}

#[tokio::test]
async fn test_set_notes() {
    let app = app();
    let id = Uuid::from_u128(1);

    let request = Request::builder()
        .method("PUT")
        .uri(format!("/v1/papers/{id}/notes"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "notes": "revisit methods" }).to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let fetched = body_json(
        app.oneshot(get(&format!("/v1/papers/{id}"))).await.unwrap(),
    )
    .await;
    assert_eq!(fetched["notes"], "revisit methods");
}

#[tokio::test]
async fn test_delete_paper() {
    let app = app();
    let id = Uuid::from_u128(2);

    let request = Request::builder()
        .method("DELETE")
        .uri(format!("/v1/papers/{id}"))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let list = body_json(app.oneshot(get("/v1/papers")).await.unwrap()).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_analyze_merges_summary_and_keywords() {
    let app = app();
    let id = Uuid::from_u128(1);

    let before = body_json(
        app.clone()
            .oneshot(get(&format!("/v1/papers/{id}")))
            .await
            .unwrap(),
    )
    .await;
    let keywords_before = before["keywords"].as_array().unwrap().len();

    let response = app
        .oneshot(post_json(&format!("/v1/papers/{id}/analyze"), json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let paper = body_json(response).await;
    let summary = &paper["ai_summary"];
    assert_eq!(summary["relevance_score"], 75);
    assert_eq!(summary["key_findings"].as_array().unwrap().len(), 3);
    // Related titles come from local similarity ranking over the library
    assert!(summary["related_titles"].as_array().unwrap().len() <= 3);

    assert_eq!(paper["gaps"].as_array().unwrap().len(), 2);
    // Reported keywords are appended, not merged
    assert_eq!(
        paper["keywords"].as_array().unwrap().len(),
        keywords_before + 5
    );
}

#[tokio::test]
async fn test_citation_export_bibtex() {
    let id = Uuid::from_u128(1);
    let response = app()
        .oneshot(get(&format!("/v1/papers/{id}/citation/bibtex")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(disposition.contains(".bib"));

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let content = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(content.starts_with("@article{"));
}

#[tokio::test]
async fn test_citation_unknown_format_is_400() {
    let id = Uuid::from_u128(1);
    let response = app()
        .oneshot(get(&format!("/v1/papers/{id}/citation/endnote")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_graph_over_samples() {
    let response = app().oneshot(get("/v1/graph")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let graph = body_json(response).await;
    assert_eq!(graph["nodes"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_graph_with_too_few_matches() {
    let response = app().oneshot(get("/v1/graph?q=biomarkers")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "INSUFFICIENT_PAPERS");
}

#[tokio::test]
async fn test_import_rejects_non_pdf() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/papers/import?filename=scan.pdf")
        .header(header::CONTENT_TYPE, "application/pdf")
        .body(Body::from("not a pdf"))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "PDF_PARSE_ERROR");
}

#[tokio::test]
async fn test_import_rejects_empty_body() {
    let request = Request::builder()
        .method("POST")
        .uri("/v1/papers/import")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_stats() {
    let response = app().oneshot(get("/v1/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let stats = body_json(response).await;
    assert_eq!(stats["total"], 3);
    assert_eq!(stats["read"], 2);
    assert_eq!(stats["unread"], 1);
    assert_eq!(stats["analyzed"], 0);
}

#[tokio::test]
async fn test_health() {
    let response = app().oneshot(get("/v1/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}
