//! HTTP surface: `GET /health` and `POST /bfhl`.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::dispatch::Dispatcher;
use crate::envelope::Envelope;

/// Read-only state shared by every request.
pub struct AppState {
    /// Constant placed in every envelope.
    pub identity: String,
    pub dispatcher: Dispatcher,
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/bfhl", post(bfhl))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl+C.
pub async fn serve(listener: TcpListener, state: Arc<AppState>) -> Result<()> {
    let addr = listener.local_addr().context("listener has no local address")?;
    info!("listening on http://{}", addr);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("shutting down");
        })
        .await
        .context("server error")
}

async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, Json(Envelope::health(&state.identity)))
}

// The body is taken raw so malformed JSON still gets an envelope.
async fn bfhl(State(state): State<Arc<AppState>>, body: Bytes) -> Response {
    match state.dispatcher.dispatch(&body).await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(Envelope::success(&state.identity, outcome)),
        )
            .into_response(),
        Err(e) => (e.status(), Json(Envelope::failure(&state.identity, &e))).into_response(),
    }
}
