//! Relay server - Accepts feedback from the static site and files issues
//!
//! The site cannot hold tracker credentials, so it posts here and the relay
//! creates the issue on its behalf.

use crate::cors::OriginPolicy;
use crate::error::{FeedbackError, Result};
use crate::request::{ErrorBody, FeedbackRequest};
use crate::tracker::IssueTracker;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{header, HeaderValue, Request, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use shared::RelayConfig;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

#[derive(Clone)]
pub struct RelayState {
    pub tracker: Arc<dyn IssueTracker>,
    pub origins: Arc<OriginPolicy>,
}

impl RelayState {
    pub fn new(tracker: Arc<dyn IssueTracker>, origins: OriginPolicy) -> Self {
        Self {
            tracker,
            origins: Arc::new(origins),
        }
    }
}

/// Single endpoint at `/`: POST files an issue, OPTIONS answers preflight
pub fn relay_router(state: RelayState) -> Router {
    Router::new()
        .route(
            "/",
            post(create_issue)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        .layer(middleware::from_fn_with_state(state.clone(), cors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

async fn create_issue(State(state): State<RelayState>, body: Bytes) -> Response {
    let request: FeedbackRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "rejected feedback with malformed body");
            return error(StatusCode::BAD_REQUEST, format!("Invalid JSON body: {}", e));
        }
    };

    let submission = match request.validate() {
        Ok(submission) => submission,
        Err(e) => {
            warn!(field = e.field(), "rejected invalid feedback");
            return error(StatusCode::BAD_REQUEST, e.to_string());
        }
    };

    match state.tracker.create_issue(&submission).await {
        Ok(created) => (StatusCode::CREATED, Json(created)).into_response(),
        Err(e) => {
            warn!(error = %e, "issue tracker failed");
            error(StatusCode::BAD_GATEWAY, format!("Failed to create issue: {}", e))
        }
    }
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn method_not_allowed() -> Response {
    error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Attach CORS headers to every response
async fn cors(State(state): State<RelayState>, request: Request<Body>, next: Next) -> Response {
    let origin = request
        .headers()
        .get(header::ORIGIN)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let mut response = next.run(request).await;
    let allowed = state.origins.allow_origin(origin.as_deref());

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(allowed) {
        headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
    }
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type"),
    );
    headers.insert(header::ACCESS_CONTROL_MAX_AGE, HeaderValue::from_static("86400"));
    headers.insert(header::VARY, HeaderValue::from_static("Origin"));
    response
}

/// Serve the relay until ctrl-c
pub async fn serve(config: &RelayConfig, tracker: Arc<dyn IssueTracker>) -> Result<()> {
    let state = RelayState::new(tracker, OriginPolicy::from_config(config)?);
    let listener = tokio::net::TcpListener::bind(&config.bind).await?;
    let addr = listener.local_addr()?;
    info!(%addr, production_origin = %config.production_origin, "feedback relay listening");

    axum::serve(listener, relay_router(state))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_err() {
                warn!("could not install ctrl-c handler");
                std::future::pending::<()>().await;
            }
            info!("shutting down feedback relay");
        })
        .await
        .map_err(FeedbackError::Io)
}
