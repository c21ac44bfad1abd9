// src/presentation/http/routes.rs
use crate::presentation::http::state::HttpState;
use crate::presentation::http::{
    controllers::{categories, post_versions, posts},
    openapi::{self, StatusResponse},
};
use axum::{
    Extension, Json, Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    routing::{get, patch, post, put},
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

/// Router-level knobs that come from configuration.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            allowed_origins: Vec::new(),
            max_upload_bytes: 6 * 1024 * 1024,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    if origins.is_empty() {
        return layer.allow_origin(Any);
    }

    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(%origin, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(parsed))
}

pub fn build_router(state: HttpState, options: RouterOptions) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/v1/openapi.json", get(openapi::serve_openapi))
        .route(
            "/api/v1/post-versions",
            get(post_versions::list_post_versions).post(post_versions::create_draft),
        )
        .route("/api/v1/post-versions/submit", post(post_versions::submit_new))
        .route(
            "/api/v1/post-versions/{id}",
            get(post_versions::get_post_version).patch(post_versions::update_draft),
        )
        .route("/api/v1/post-versions/{id}/submit", patch(post_versions::submit))
        .route(
            "/api/v1/post-versions/{id}/assigned-moderator",
            put(post_versions::assign_moderator),
        )
        .route(
            "/api/v1/post-versions/{id}/request-changes",
            patch(post_versions::request_changes),
        )
        .route("/api/v1/post-versions/{id}/accept", patch(post_versions::accept))
        .route("/api/v1/post-versions/{id}/reject", patch(post_versions::reject))
        .route(
            "/api/v1/users/{id}/post-versions",
            get(post_versions::list_user_post_versions),
        )
        .route("/api/v1/users/{id}/posts", get(posts::list_user_posts))
        .route(
            "/api/v1/post-categories",
            get(categories::list_post_categories),
        )
        .route("/api/v1/posts", get(posts::list_posts))
        .route("/api/v1/posts/{slug}", get(posts::get_post_by_slug))
        .layer(DefaultBodyLimit::max(options.max_upload_bytes))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&options.allowed_origins))
        .layer(Extension(state))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health check.", body = StatusResponse)
    ),
    security(()),
    tag = "System"
)]
pub async fn health() -> Json<StatusResponse> {
    Json(StatusResponse {
        status: "ok".into(),
    })
}
