//! Asset and introspection HTTP surface.
//!
//! Serves the pre-built widget bundles out of the in-memory cache — the
//! request path never touches storage — plus a JSON catalog of the
//! registered widgets for hosts that want to browse before calling.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use crate::bundles::BundleCache;
use crate::registry::ToolRegistry;
use crate::widget::CatalogEntry;

/// Shared state for HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ToolRegistry>,
    pub bundles: Arc<BundleCache>,
}

/// GET /health - liveness check
async fn health_check() -> &'static str {
    "ok"
}

/// GET /widgets - host-facing widget catalog
async fn widget_catalog(State(state): State<AppState>) -> Json<Vec<CatalogEntry>> {
    Json(state.registry.catalog())
}

/// GET /assets/{file} - serve a widget bundle from the cache
async fn get_asset(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    match state.bundles.get_file(&file) {
        Some(bundle) => {
            let mime = mime_guess::from_path(&file).first_or_octet_stream();
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, mime.as_ref())],
                bundle.html.clone(),
            )
                .into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// Create the asset/introspection router.
pub fn router(registry: Arc<ToolRegistry>, bundles: Arc<BundleCache>) -> Router {
    let state = AppState { registry, bundles };

    Router::new()
        .route("/health", get(health_check))
        .route("/widgets", get(widget_catalog))
        .route("/assets/{file}", get(get_asset))
        .with_state(state)
}
