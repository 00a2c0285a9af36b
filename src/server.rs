//! HTTP facade: route registration, input-shape checks, and error mapping.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use crate::client::ShareListClient;
use crate::error::RelayError;
use crate::models::{DownloadResponse, ErrorResponse};
use crate::url_parser::{is_share_url, parse_share_link};

/// Per-process state handed to the handlers.
///
/// Cloned per request; nothing in it is mutable across requests.
#[derive(Clone)]
pub struct AppState {
    pub client: ShareListClient,
}

/// Request body for `/api/validate` and `/api/download`.
#[derive(Debug, Deserialize)]
pub struct UrlRequest {
    #[serde(default)]
    url: Option<String>,
}

/// Build the service router with CORS, request tracing, and panic recovery.
pub fn app(state: AppState) -> Router {
    let middleware = ServiceBuilder::new()
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );

    Router::new()
        .route("/", get(service_info).fallback(method_not_allowed))
        .route("/health", get(health).fallback(method_not_allowed))
        .route("/api/validate", post(validate_url).fallback(method_not_allowed))
        .route("/api/download", post(download_file).fallback(method_not_allowed))
        .fallback(not_found)
        .layer(middleware)
        .with_state(state)
}

/// GET / - static service metadata.
async fn service_info() -> Json<serde_json::Value> {
    Json(json!({
        "name": "TeraBox API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "RESTful API for downloading files from TeraBox",
        "endpoints": {
            "/": "API information (GET)",
            "/api/download": "Get download information (POST)",
            "/api/validate": "Validate TeraBox URL (POST)",
            "/health": "Health check (GET)"
        }
    }))
}

/// GET /health - static healthy status.
async fn health() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "message": "API is running"
    }))
}

/// POST /api/validate - check a URL against the share-domain allow-list.
async fn validate_url(body: Result<Json<UrlRequest>, JsonRejection>) -> Response {
    let url = match require_url(body) {
        Ok(url) => url,
        Err(response) => return response,
    };

    let valid = is_share_url(&url);
    let message = if valid {
        "Valid TeraBox URL"
    } else {
        "Invalid TeraBox URL"
    };

    Json(json!({
        "success": true,
        "valid": valid,
        "message": message
    }))
    .into_response()
}

/// POST /api/download - resolve a share link into its file listing.
async fn download_file(
    State(state): State<AppState>,
    body: Result<Json<UrlRequest>, JsonRejection>,
) -> Response {
    let url = match require_url(body) {
        Ok(url) => url,
        Err(response) => return response,
    };

    if !is_share_url(&url) {
        return bad_request(ErrorResponse::new("Invalid TeraBox URL provided"));
    }

    let Some(link) = parse_share_link(&url) else {
        return bad_request(ErrorResponse::from(&RelayError::ExtractionFailed));
    };

    match state.client.fetch_share_list(&link).await {
        Ok(listing) => Json(DownloadResponse::from_listing(&link, listing)).into_response(),
        Err(err) => {
            error!("Share lookup failed for {}: {}", link.surl, err);
            bad_request(ErrorResponse::from(&err))
        }
    }
}

/// Extract the `url` field, mapping each input-shape problem to its 400 body.
fn require_url(body: Result<Json<UrlRequest>, JsonRejection>) -> Result<String, Response> {
    let Json(request) = body.map_err(|_| bad_request(ErrorResponse::new("No JSON data provided")))?;

    match request.url {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(bad_request(ErrorResponse::new("URL parameter is required"))),
    }
}

fn bad_request(body: ErrorResponse) -> Response {
    (StatusCode::BAD_REQUEST, Json(body)).into_response()
}

async fn not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse::new("Endpoint not found")),
    )
        .into_response()
}

async fn method_not_allowed() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(ErrorResponse::new("Method not allowed")),
    )
        .into_response()
}

/// Convert a handler panic into the generic 500 body.
///
/// Best effort only: the details string carries the panic payload when it is
/// a string, never a backtrace.
fn handle_panic(err: Box<dyn std::any::Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    error!("Handler panicked: {}", details);

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse::with_details("Internal server error", details)),
    )
        .into_response()
}
