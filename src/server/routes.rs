//! Route handlers for the relay API.
//!
//! Two routes:
//! - GET /       health check, unauthenticated
//! - POST /genie authorized streaming completion
//!
//! The completion route validates in a fixed order: credential present,
//! credential matches, query present. Only then does it open the upstream
//! stream and hand the body off to [`super::streaming::relay_body`].

use std::sync::Arc;

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Map, Value};
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::config::Config;
use crate::relay::client::{CompletionRelay, RelayError};
use crate::server::streaming::relay_body;

/// Application state shared across handlers.
pub struct AppState {
    pub relay: Arc<dyn CompletionRelay>,
    pub config: Arc<Config>,
}

/// Build the axum router with all API routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/genie", post(genie))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ─── Errors ────────────────────────────────────────────────────────────────

/// Client-visible request failures.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Authorization header is required.")]
    MissingCredential,

    #[error("Invalid authorization secret.")]
    InvalidCredential,

    #[error("Query parameter is required.")]
    MissingQuery,

    #[error(transparent)]
    Relay(#[from] RelayError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::MissingCredential | ApiError::InvalidCredential => {
                warn!(error = %self, "Request rejected");
                (StatusCode::UNAUTHORIZED, json!({ "error": self.to_string() }))
            }
            ApiError::MissingQuery => {
                warn!(error = %self, "Request rejected");
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            ApiError::Relay(e) => {
                error!(error = %e, "Error processing query");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({
                        "error": "An error occurred while processing the request.",
                        "details": e.to_string(),
                    }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

// ─── Route Handlers ────────────────────────────────────────────────────────

async fn health() -> &'static str {
    "Hello, World!"
}

async fn genie(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Response, ApiError> {
    let empty = Map::new();
    let fields = body.as_object().unwrap_or(&empty);

    let credential =
        find_credential(&headers, fields).ok_or(ApiError::MissingCredential)?;

    if state.config.auth_secret.as_deref() != Some(credential.as_str()) {
        return Err(ApiError::InvalidCredential);
    }

    let query = fields
        .get("query")
        .and_then(Value::as_str)
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::MissingQuery)?;

    let request_id = Uuid::new_v4().to_string();
    info!(request_id, query, "Processing query");

    let fragments = state.relay.stream_completion(query).await?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain")],
        relay_body(request_id, fragments),
    )
        .into_response())
}

/// Look up the caller's credential: `Authorization` header first (header
/// lookup is case-insensitive by construction), then any body field whose
/// key case-insensitively equals `authorization`.
fn find_credential(headers: &HeaderMap, fields: &Map<String, Value>) -> Option<String> {
    if let Some(value) = headers.get(header::AUTHORIZATION) {
        if let Ok(value) = value.to_str() {
            return Some(value.to_string());
        }
    }

    fields
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case("authorization"))
        .and_then(|(_, value)| value.as_str())
        .map(str::to_string)
}
