//! HTTP surface: `POST /api/send-email` and `GET /healthz`.

use std::{future::Future, sync::Arc};

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;
use tokio::net::TcpListener;

use crate::{
    config::SiteConfig,
    contact::transport::SEND_EMAIL_PATH,
    foundation::error::{SiteError, SiteResult},
    mail::{
        dispatch::{DispatchError, Dispatcher, MSG_SEND_FAILED, MSG_SENT},
        payload::ContactPayload,
    },
};

pub const HEALTH_PATH: &str = "/healthz";
pub const MSG_INVALID_BODY: &str = "Requête invalide";

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Arc<Dispatcher>,
    pub max_body_bytes: usize,
}

impl AppState {
    pub fn new(dispatcher: Dispatcher, max_body_bytes: usize) -> Self {
        Self {
            dispatcher: Arc::new(dispatcher),
            max_body_bytes,
        }
    }

    pub fn from_config(config: &SiteConfig) -> SiteResult<Self> {
        Ok(Self::new(config.dispatcher()?, config.max_body_bytes))
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(SEND_EMAIL_PATH, post(send_email))
        .route(HEALTH_PATH, get(healthz))
        .layer(DefaultBodyLimit::max(state.max_body_bytes))
        .with_state(state)
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

#[tracing::instrument(skip_all)]
pub(crate) async fn send_email(
    State(state): State<AppState>,
    body: Result<Json<ContactPayload>, JsonRejection>,
) -> Response {
    let Json(payload) = match body {
        Ok(body) => body,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "unreadable contact request");
            let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                StatusCode::PAYLOAD_TOO_LARGE
            } else {
                StatusCode::BAD_REQUEST
            };
            return error_response(status, MSG_INVALID_BODY);
        }
    };

    match state.dispatcher.dispatch(&payload).await {
        Ok(receipt) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "message": MSG_SENT,
                "notificationId": receipt.notification_id,
                "autoReplyId": receipt.auto_reply_id,
            })),
        )
            .into_response(),
        Err(err @ DispatchError::InvalidInput(_)) => error_response(err.status(), &err.to_string()),
        Err(err @ DispatchError::Delivery { .. }) => (
            err.status(),
            Json(json!({ "error": MSG_SEND_FAILED, "details": err.to_string() })),
        )
            .into_response(),
    }
}

pub(crate) async fn healthz(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "provider": state.dispatcher.provider_name() }))
}

/// Serve on an already bound listener until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(listener: TcpListener, state: AppState, shutdown: F) -> SiteResult<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener
        .local_addr()
        .map_err(|e| SiteError::config(format!("listener address: {e}")))?;
    tracing::info!(%addr, provider = state.dispatcher.provider_name(), "listening");
    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| SiteError::Other(anyhow::anyhow!("server failed: {e}")))
}

/// Resolves when `signal` fires. A signal that cannot be installed never resolves, so the
/// server keeps running until killed.
pub(crate) async fn shutdown_on<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    match signal.await {
        Ok(()) => tracing::info!("shutdown requested"),
        Err(err) => {
            tracing::error!(error = %err, "cannot listen for ctrl-c; graceful shutdown disabled");
            std::future::pending::<()>().await;
        }
    }
}

/// Bind `config.bind` and serve until Ctrl-C.
pub async fn serve(config: SiteConfig) -> SiteResult<()> {
    let state = AppState::from_config(&config)?;
    let listener = TcpListener::bind(&config.bind)
        .await
        .map_err(|e| SiteError::config(format!("bind {}: {e}", config.bind)))?;
    serve_with_shutdown(listener, state, shutdown_on(tokio::signal::ctrl_c())).await
}

#[cfg(test)]
#[path = "../tests/unit/server/server.rs"]
mod tests;
