//! HTTP + WebSocket API for the dashboard
//!
//! Endpoints:
//! - GET  /health                - Health check
//! - POST /score                 - Submit a sample, record the score
//! - GET  /score/history?last=N  - Recent records and summary
//! - GET  /ledger                - Points and unlocked rewards
//! - POST /ledger/earn           - Credit points
//! - GET  /loot-boxes            - Catalog
//! - POST /loot-boxes/:id/open   - Buy and open a loot box
//! - WS   /ws                    - Live score records

use axum::{
    extract::{ws::{Message, WebSocket}, Path, Query, State, WebSocketUpgrade},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::{info, warn};

use crate::core::{HistorySummary, NeuroApp, ScoreSubmission};
use crate::types::{LootBox, PlayerLedger, PurchaseReceipt, ScoreRecord, ScoreSample};
use crate::Error;

/// App state
pub struct AppState {
    pub app: RwLock<NeuroApp>,
    pub updates: broadcast::Sender<ScoreRecord>,
}

/// Score submission request
#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    #[serde(flatten)]
    pub sample: ScoreSample,
    pub trigger: Option<String>,
}

/// History query
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub last: Option<usize>,
}

/// History response
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub summary: HistorySummary,
    pub records: Vec<ScoreRecord>,
}

/// Earn points request
#[derive(Debug, Deserialize)]
pub struct EarnRequest {
    pub points: u64,
    pub source: Option<String>,
}

/// Earn points response
#[derive(Debug, Serialize)]
pub struct EarnResponse {
    pub balance: u64,
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub records: usize,
    pub balance: u64,
}

/// Error body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: Option<String>,
    pub error: String,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

fn api_error(err: Error) -> (StatusCode, Json<ErrorResponse>) {
    let status = match err {
        Error::InsufficientPoints { .. } => StatusCode::PAYMENT_REQUIRED,
        Error::UnknownLootBox(_) => StatusCode::NOT_FOUND,
        _ => {
            warn!(error = %err, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let body = ErrorResponse {
        code: err.reason_code().map(|r| r.code().to_string()),
        error: err.to_string(),
    };
    (status, Json(body))
}

/// Create the API router
pub fn create_router(app: NeuroApp) -> Router {
    create_router_with_updates(app).0
}

/// Create the API router along with the sender behind `/ws`.
///
/// Every record accepted by `POST /score` is published on the sender.
pub fn create_router_with_updates(app: NeuroApp) -> (Router, broadcast::Sender<ScoreRecord>) {
    let (updates, _) = broadcast::channel(100);
    let state = Arc::new(AppState {
        app: RwLock::new(app),
        updates: updates.clone(),
    });

    let router = Router::new()
        .route("/health", get(health))
        .route("/score", post(submit_score))
        .route("/score/history", get(get_history))
        .route("/ledger", get(get_ledger))
        .route("/ledger/earn", post(earn_points))
        .route("/loot-boxes", get(list_loot_boxes))
        .route("/loot-boxes/:id/open", post(open_loot_box))
        .route("/ws", get(websocket_handler))
        .with_state(state);
    (router, updates)
}

/// Health check endpoint
async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let app = state.app.read().await;
    Json(HealthResponse {
        status: "ok".to_string(),
        version: crate::VERSION.to_string(),
        records: app.history.len(),
        balance: app.shop.ledger().total_points,
    })
}

/// Score a sample, append it to history and award points
async fn submit_score(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScoreRequest>,
) -> ApiResult<ScoreSubmission> {
    let mut app = state.app.write().await;
    let trigger = req.trigger.as_deref().unwrap_or("api");
    let submission = app.submit_score(&req.sample, trigger).map_err(api_error)?;

    let _ = state.updates.send(submission.record.clone());
    Ok(Json(submission))
}

/// Recent history, oldest first
async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Json<HistoryResponse> {
    let app = state.app.read().await;
    let last = query.last.unwrap_or(app.history.len());
    Json(HistoryResponse {
        summary: app.history.summary(),
        records: app.history.recent(last).into_iter().cloned().collect(),
    })
}

async fn get_ledger(State(state): State<Arc<AppState>>) -> Json<PlayerLedger> {
    let app = state.app.read().await;
    Json(app.shop.ledger().clone())
}

async fn earn_points(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EarnRequest>,
) -> ApiResult<EarnResponse> {
    let mut app = state.app.write().await;
    let source = req.source.as_deref().unwrap_or("api");
    let balance = app.shop.earn(req.points, source).map_err(api_error)?;
    Ok(Json(EarnResponse { balance }))
}

async fn list_loot_boxes(State(state): State<Arc<AppState>>) -> Json<Vec<LootBox>> {
    let app = state.app.read().await;
    Json(app.shop.catalog().boxes().to_vec())
}

/// Buy and open a loot box
async fn open_loot_box(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<PurchaseReceipt> {
    let mut app = state.app.write().await;
    let receipt = app.shop.open_loot_box(&id).map_err(api_error)?;
    Ok(Json(receipt))
}

/// WebSocket handler for live score records
async fn websocket_handler(
    State(state): State<Arc<AppState>>,
    ws: WebSocketUpgrade,
) -> impl IntoResponse {
    let rx = state.updates.subscribe();
    ws.on_upgrade(move |socket| async move {
        handle_websocket(socket, rx).await;
    })
}

async fn handle_websocket(mut socket: WebSocket, mut rx: broadcast::Receiver<ScoreRecord>) {
    while let Ok(record) = rx.recv().await {
        let json = serde_json::to_string(&record).unwrap_or_default();
        if socket.send(Message::Text(json)).await.is_err() {
            break;
        }
    }
}

/// Run the API server
pub async fn run_server(addr: &str, app: NeuroApp) -> std::io::Result<()> {
    let router = create_router(app);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr, "neuroscore API listening");
    println!("🧠 Neuroscore API running on {}", addr);
    println!("  POST /score                - Submit sample");
    println!("  GET  /score/history        - History + summary");
    println!("  GET  /ledger               - Points and unlocks");
    println!("  POST /ledger/earn          - Credit points");
    println!("  GET  /loot-boxes           - Catalog");
    println!("  POST /loot-boxes/:id/open  - Open a loot box");
    println!("  WS   /ws                   - Live scores");
    println!("  GET  /health               - Health check");
    axum::serve(listener, router).await
}
