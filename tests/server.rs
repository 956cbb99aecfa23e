//! Router tests against the toy dataset.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use flupred::config::Config;
use flupred::dataset::{toy1, Source};
use flupred::server::{build_router, AppState};
use serde_json::Value;
use tempfile::TempDir;
use tower::util::ServiceExt;

fn toy_app(edit: impl FnOnce(&mut Config, &TempDir)) -> (TempDir, axum::Router) {
    let dir = tempfile::tempdir().unwrap();
    toy1::create(&dir.path()).unwrap();
    let mut config = Config { min_cluster_size: 3, ..Config::for_dataset(&dir.path()).unwrap() };
    edit(&mut config, &dir);
    (dir, build_router(AppState::new(config)))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().method("GET").uri(uri).body(Body::empty()).unwrap()
}

async fn body_bytes(body: Body) -> Vec<u8> {
    axum::body::to_bytes(body, usize::MAX).await.unwrap().to_vec()
}

#[tokio::test]
async fn health() {
    let (_dir, app) = toy_app(|_, _| ());
    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_slice(&body_bytes(response.into_body()).await).unwrap();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "flupred");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn payload() {
    let (_dir, app) = toy_app(|_, _| ());
    let response = app.oneshot(get("/api/payload")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_slice(&body_bytes(response.into_body()).await).unwrap();
    assert_eq!(body["summary"]["total"], 11);
    assert_eq!(body["fragments"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn index_page() {
    let (_dir, app) = toy_app(|_, _| ());
    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let html = String::from_utf8(body_bytes(response.into_body()).await).unwrap();
    assert!(html.contains(r#"<div id="coords-0-1" class="chart"></div>"#));
    assert!(html.contains(r#"data-chart="vaccine-effectiveness""#));
}

#[tokio::test]
async fn pipeline_failure_is_500() {
    let (_dir, app) = toy_app(|config, dir| config.vaccines = Source::Path(dir.path().join("missing.yaml")));
    let response = app.oneshot(get("/api/payload")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = serde_json::from_slice(&body_bytes(response.into_body()).await).unwrap();
    assert!(body["error"].as_str().unwrap().starts_with("data unavailable"));
}

#[tokio::test]
async fn unknown_route_is_404() {
    let (_dir, app) = toy_app(|_, _| ());
    let response = app.oneshot(get("/api/nothing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
