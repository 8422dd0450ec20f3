//! Lookup API Server
//!
//! HTTP API through which the browser page submits addresses for lookup.
//! Also serves the page itself and a health endpoint.

use crate::application::{LookupService, ServiceError};
use crate::domain::entities::{ErrorEnvelope, RawInput};
use crate::infrastructure::ShutdownController;
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Browser front end: input form, result table, CSV export.
const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// Lookup request body.
#[derive(Debug, Clone, Deserialize)]
pub struct LookupRequest {
    pub input: RawInput,
}

/// Health response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub max_addresses: usize,
    pub batch_size: usize,
}

/// API Server state.
#[derive(Clone)]
pub struct ApiState {
    pub service: LookupService,
}

impl ApiState {
    pub fn new(service: LookupService) -> Self {
        Self { service }
    }
}

/// API Server for batch lookups.
pub struct ApiServer {
    listen_addr: String,
    state: ApiState,
    body_limit: usize,
    cors_enabled: bool,
    shutdown: ShutdownController,
}

impl ApiServer {
    pub fn new(listen_addr: String, service: LookupService) -> Self {
        Self {
            listen_addr,
            state: ApiState::new(service),
            body_limit: 2 * 1024 * 1024,
            cors_enabled: false,
            shutdown: ShutdownController::new(),
        }
    }

    /// Cap the size of request bodies, in bytes.
    pub fn with_body_limit(mut self, bytes: usize) -> Self {
        self.body_limit = bytes;
        self
    }

    /// Allow cross-origin calls to the API.
    pub fn with_cors(mut self, enabled: bool) -> Self {
        self.cors_enabled = enabled;
        self
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    /// Handle that stops the server when triggered.
    pub fn shutdown_handle(&self) -> ShutdownController {
        self.shutdown.clone()
    }

    /// Build the router with all routes and layers.
    pub fn router(&self) -> Router {
        let router = routes(self.state.clone())
            .layer(DefaultBodyLimit::max(self.body_limit))
            .layer(TraceLayer::new_for_http());

        if self.cors_enabled {
            router.layer(CorsLayer::permissive())
        } else {
            router
        }
    }

    /// Bind the configured address and serve until shutdown is triggered.
    #[cfg_attr(coverage_nightly, coverage(off))]
    pub async fn run(&self) -> anyhow::Result<()> {
        let listener = TcpListener::bind(&self.listen_addr).await?;
        self.serve(listener).await
    }

    /// Serve on an already bound listener until shutdown is triggered.
    ///
    /// Lookups still running at that point are allowed to finish.
    pub async fn serve(&self, listener: TcpListener) -> anyhow::Result<()> {
        tracing::info!("lookup API listening on {}", listener.local_addr()?);

        let shutdown = self.shutdown.clone();
        axum::serve(listener, self.router())
            .with_graceful_shutdown(async move { shutdown.wait().await })
            .await?;

        tracing::info!("lookup API stopped");
        Ok(())
    }
}

fn routes(state: ApiState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route("/api/lookup", post(lookup_handler))
        .with_state(state)
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = if self.is_validation() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };

        let message = self.to_string();
        let envelope = match self {
            ServiceError::NoValidAddresses { rejected } => {
                ErrorEnvelope::new(message).with_rejected(rejected)
            }
            _ => ErrorEnvelope::new(message),
        };

        (status, Json(envelope)).into_response()
    }
}

// Handler functions

async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

async fn health_handler(State(state): State<ApiState>) -> impl IntoResponse {
    let limits = state.service.limits();
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        max_addresses: limits.max_addresses,
        batch_size: limits.batch_size,
    })
}

async fn lookup_handler(
    State(state): State<ApiState>,
    payload: Result<Json<LookupRequest>, JsonRejection>,
) -> Response {
    let Json(req) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            tracing::debug!("malformed lookup request: {}", rejection.body_text());
            let envelope = ErrorEnvelope::new(format!("invalid request: {}", rejection.body_text()));
            return (rejection.status(), Json(envelope)).into_response();
        }
    };

    match state.service.submit(req.input).await {
        Ok(envelope) => Json(envelope).into_response(),
        Err(e) => e.into_response(),
    }
}
