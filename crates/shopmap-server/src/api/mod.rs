mod sitemap;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use shopmap_core::SitemapSettings;
use shopmap_sitemap::RenderError;
use shopmap_storefront::StorefrontClient;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::middleware::{http_span, request_id};

/// Shared, immutable per-process state handed to every request.
///
/// Pagination state is not kept here; each request creates its own cursors.
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<StorefrontClient>,
    pub settings: Arc<SitemapSettings>,
    pub language: Arc<str>,
    /// Fixed origin for generated URLs. When `None`, the origin is derived
    /// from the request's `Host` and `X-Forwarded-Proto` headers.
    pub public_base_url: Option<Arc<str>>,
}

impl AppState {
    pub fn new(
        source: StorefrontClient,
        settings: SitemapSettings,
        language: impl Into<Arc<str>>,
        public_base_url: Option<String>,
    ) -> Self {
        Self {
            source: Arc::new(source),
            settings: Arc::new(settings),
            language: language.into(),
            public_base_url: public_base_url.map(Into::into),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
}

/// JSON error body for failures after the storefront fetch has completed.
#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta {
                request_id: request_id.into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_render_error(request_id: String, error: &RenderError) -> ApiError {
    tracing::error!(error = %error, "failed to render sitemap document");
    ApiError::new(request_id, "internal_error", "failed to render sitemap")
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/sitemap.xml", get(sitemap::sitemap_root))
        .route("/sitemap/{file}", get(sitemap::sitemap_chunk))
        .route("/health", get(health))
        .layer(
            ServiceBuilder::new()
                .layer(axum::middleware::from_fn(request_id))
                .layer(TraceLayer::new_for_http().make_span_with(http_span)),
        )
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(HealthData { status: "ok" })
}
