//! HTTP server mode
//!
//! Routes:
//!
//! - `GET /GET/:channel_id` - YouTube subscriptions of a channel
//! - `GET /api/airtable-data` - Airtable records as chart points
//! - `GET /health`

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::error;

use crate::config::AppConfig;
use crate::engine;
use crate::error::{Error, Result};
use crate::sink::AirtableStore;
use crate::youtube::YoutubeClient;

/// App state shared across handlers
struct AppState {
    config: AppConfig,
}

/// Build the router; clients are created per request from `config`
pub fn router(config: AppConfig) -> Router {
    let state = AppState { config };

    // Allow all origins; the chart frontend is served elsewhere
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/GET/:channel_id", get(subscriptions))
        .route("/api/airtable-data", get(airtable_data))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Start the HTTP server
pub async fn serve(config: AppConfig, port: u16) -> Result<()> {
    let app = router(config);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Starting HTTP server on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::config(format!("Failed to bind to port {port}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| Error::config(format!("Server error: {e}")))?;

    Ok(())
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Subscriptions of one channel
async fn subscriptions(
    State(state): State<Arc<AppState>>,
    Path(channel_id): Path<String>,
) -> Response {
    let result = async {
        let client = YoutubeClient::new(&state.config.youtube)?;
        client.fetch_subscriptions(&channel_id).await
    }
    .await;

    match result {
        Ok(subscriptions) => (StatusCode::OK, Json(subscriptions)).into_response(),
        Err(e) => {
            error!("Failed to fetch subscriptions for {channel_id}: {e}");
            internal_error("Failed to process request")
        }
    }
}

/// Chart points for every Airtable record
async fn airtable_data(State(state): State<Arc<AppState>>) -> Response {
    let result = async {
        let store = AirtableStore::new(&state.config.airtable)?;
        engine::chart_data(&store).await
    }
    .await;

    match result {
        Ok(points) => (StatusCode::OK, Json(points)).into_response(),
        Err(e) => {
            error!("Failed to fetch Airtable data: {e}");
            internal_error("Failed to fetch data from Airtable")
        }
    }
}

fn internal_error(message: &str) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": message })),
    )
        .into_response()
}
