//! Integration tests for the HTTP API
//!
//! Each test builds a router over a fresh temp data directory

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use tempfile::TempDir;
use tower::ServiceExt;

use neuroscore::config::AppConfig;
use neuroscore::core::{create_router, create_router_with_updates, NeuroApp};

fn open_test_app() -> (NeuroApp, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = AppConfig {
        data_dir: dir.path().to_string_lossy().into_owned(),
        rng_seed: Some(1),
        ..AppConfig::default()
    };
    (NeuroApp::open(&config).unwrap(), dir)
}

fn create_test_router() -> (Router, TempDir) {
    let (app, dir) = open_test_app();
    (create_router(app), dir)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _dir) = create_test_router();
    let (status, json) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
    assert_eq!(json["records"], 0);
}

#[tokio::test]
async fn test_submit_score_and_history() {
    let (app, _dir) = create_test_router();

    let (status, json) = send(
        &app,
        "POST",
        "/score",
        Some(r#"{"reaction_time_ms": 250, "trial_count": 12, "minutes_since_break": 50, "heart_rate_variability": 70, "trigger": "stroop"}"#),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["record"]["final_score"], 94);
    assert_eq!(json["record"]["trigger"], "stroop");
    assert_eq!(json["reason"], "R101_SCORE_COMPLETE");
    assert_eq!(json["points_earned"], 9);

    let (status, _) = send(&app, "POST", "/score", Some(r#"{"minutes_since_break": 0}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let (status, json) = send(&app, "GET", "/score/history?last=1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["summary"]["count"], 2);
    assert_eq!(json["summary"]["best"], 94);
    assert_eq!(json["records"].as_array().unwrap().len(), 1);
    assert_eq!(json["records"][0]["final_score"], 50);
    assert_eq!(json["records"][0]["trigger"], "api");
}

#[tokio::test]
async fn test_open_requires_points() {
    let (app, _dir) = create_test_router();

    let (status, json) = send(&app, "POST", "/loot-boxes/starter/open", None).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(json["code"], "R203_INSUFFICIENT_POINTS");

    let (status, json) = send(&app, "GET", "/ledger", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total_points"], 0);
}

#[tokio::test]
async fn test_earn_then_open() {
    let (app, _dir) = create_test_router();

    let (status, json) = send(&app, "POST", "/ledger/earn", Some(r#"{"points": 120, "source": "bonus"}"#)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["balance"], 120);

    let (status, json) = send(&app, "POST", "/loot-boxes/starter/open", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["box_id"], "starter");
    assert_eq!(json["price"], 50);
    assert_eq!(json["duplicate"], false);
    assert_eq!(json["balance_after"], 70);
    assert_eq!(json["reason"], "R201_FIRST_UNLOCK");

    let (_, ledger) = send(&app, "GET", "/ledger", None).await;
    assert_eq!(ledger["points_spent"], 50);
    assert_eq!(ledger["unlocked_reward_ids"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_unknown_loot_box() {
    let (app, _dir) = create_test_router();
    let (status, json) = send(&app, "POST", "/loot-boxes/nonexistent/open", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["code"], "R204_UNKNOWN_LOOT_BOX");
}

#[tokio::test]
async fn test_list_loot_boxes() {
    let (app, _dir) = create_test_router();
    let (status, json) = send(&app, "GET", "/loot-boxes", None).await;

    assert_eq!(status, StatusCode::OK);
    let boxes = json.as_array().unwrap();
    assert_eq!(boxes.len(), 2);
    assert!(boxes.iter().any(|b| b["id"] == "starter"));
    assert!(boxes[0]["rewards"].is_array());
}

#[tokio::test]
async fn test_submitted_score_reaches_live_subscribers() {
    let (app, _dir) = open_test_app();
    let (app, updates) = create_router_with_updates(app);
    let mut rx = updates.subscribe();

    let (status, json) = send(&app, "POST", "/score", Some(r#"{"minutes_since_break": 50, "trigger": "stroop"}"#)).await;
    assert_eq!(status, StatusCode::OK);

    let record = rx.try_recv().unwrap();
    assert_eq!(record.id, 1);
    assert_eq!(record.trigger, "stroop");
    assert_eq!(json["record"]["final_score"], record.final_score);

    let (status, _) = send(&app, "POST", "/loot-boxes/starter/open", None).await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert!(rx.try_recv().is_err());
}
