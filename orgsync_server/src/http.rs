//! Routing and handlers for the uniform collection protocol.
//!
//! The router carries two generic routes (`/api/:collection` and
//! `/api/:collection/:id`) instead of seven hand-written route sets; the
//! registry resolves the collection segment and decides whether the
//! operation exists at all. Append-only collections (donations, expenses,
//! experiences) have no update/delete surface, so those requests get the
//! same 404 an unknown endpoint does. Errors map onto the protocol's status
//! codes with a `{"message"}` body; a per-request failure never takes the
//! process down.

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, put};
use axum::{Json, Router};
use serde_json::{Value, json};

use orgsync::registry::{self, CollectionSpec};
use orgsync::{DocumentStore, SyncError};

/// Placeholder served when no index page is configured.
const FALLBACK_PAGE: &str = "<!doctype html>\n<html><head><title>OrgSync</title></head>\
<body><p>OrgSync API server. The admin console has not been installed.</p></body></html>\n";

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<DocumentStore>,
    /// Main application page served for every non-`/api` path.
    pub index_page: Option<PathBuf>,
}

pub fn build_router(state: AppState) -> Router {
    // Method fallbacks keep the surface uniform: every unmatched request
    // under /api answers 404 JSON, never a bare 405.
    Router::new()
        .route(
            "/api/:collection",
            get(list_collection)
                .post(create_record)
                .fallback(api_endpoint_not_found),
        )
        .route(
            "/api/:collection/:id",
            put(update_record)
                .delete(delete_record)
                .fallback(api_endpoint_not_found),
        )
        .fallback(page_fallback)
        .with_state(state)
}

async fn list_collection(
    State(state): State<AppState>,
    Path(collection): Path<String>,
) -> Response {
    let Some(spec) = registry::find_route(&collection) else {
        return endpoint_not_found();
    };
    Json(state.store.list(spec.kind)).into_response()
}

async fn create_record(
    State(state): State<AppState>,
    Path(collection): Path<String>,
    Json(payload): Json<Value>,
) -> Response {
    let Some(spec) = registry::find_route(&collection) else {
        return endpoint_not_found();
    };
    match state.store.create(spec.kind, &payload) {
        Ok(doc) => (StatusCode::CREATED, Json(doc)).into_response(),
        Err(err) => error_response(&err, spec),
    }
}

async fn update_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
    Json(payload): Json<Value>,
) -> Response {
    let Some(spec) = registry::find_route(&collection) else {
        return endpoint_not_found();
    };
    if spec.append_only {
        return endpoint_not_found();
    }
    match state.store.update(spec.kind, &id, &payload) {
        Ok(doc) => Json(doc).into_response(),
        Err(err) => error_response(&err, spec),
    }
}

async fn delete_record(
    State(state): State<AppState>,
    Path((collection, id)): Path<(String, String)>,
) -> Response {
    let Some(spec) = registry::find_route(&collection) else {
        return endpoint_not_found();
    };
    if spec.append_only {
        return endpoint_not_found();
    }
    match state.store.delete(spec.kind, &id) {
        Ok(()) => Json(json!({"message": format!("{} deleted", spec.label)})).into_response(),
        Err(err) => error_response(&err, spec),
    }
}

/// Any non-API path serves the main application page (client-side routing);
/// anything left under `/api` is an unknown endpoint.
async fn page_fallback(State(state): State<AppState>, uri: Uri) -> Response {
    if uri.path() == "/api" || uri.path().starts_with("/api/") {
        return endpoint_not_found();
    }
    match &state.index_page {
        Some(path) => match tokio::fs::read_to_string(path).await {
            Ok(page) => Html(page).into_response(),
            Err(err) => {
                log::error!("failed to read {}: {err}", path.display());
                let body = Json(json!({"message": "main application page unavailable"}));
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        },
        None => Html(FALLBACK_PAGE).into_response(),
    }
}

async fn api_endpoint_not_found() -> Response {
    endpoint_not_found()
}

fn endpoint_not_found() -> Response {
    let body = Json(json!({"message": "API endpoint not found"}));
    (StatusCode::NOT_FOUND, body).into_response()
}

fn error_response(err: &SyncError, spec: &CollectionSpec) -> Response {
    let (status, message) = match err {
        SyncError::Validation(message) => (StatusCode::BAD_REQUEST, message.clone()),
        SyncError::NotFound(_) => (
            StatusCode::NOT_FOUND,
            format!("{} not found", spec.label),
        ),
        other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
    };
    if status.is_server_error() {
        log::error!("{} request failed: {err}", spec.route);
    } else {
        log::warn!("{} request rejected: {err}", spec.route);
    }
    (status, Json(json!({"message": message}))).into_response()
}
