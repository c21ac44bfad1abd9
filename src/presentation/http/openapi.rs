// src/presentation/http/openapi.rs
use axum::Json;
use serde::{Deserialize, Serialize};
use std::{env, fs::File, io::BufWriter, path::Path};
use utoipa::openapi::{
    Components,
    security::{Http, HttpAuthScheme, SecurityScheme},
    server::Server,
};
use utoipa::{Modify, OpenApi, ToSchema};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusResponse {
    pub status: String,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        super::routes::health,
        crate::presentation::http::controllers::post_versions::create_draft,
        crate::presentation::http::controllers::post_versions::submit_new,
        crate::presentation::http::controllers::post_versions::list_post_versions,
        crate::presentation::http::controllers::post_versions::get_post_version,
        crate::presentation::http::controllers::post_versions::update_draft,
        crate::presentation::http::controllers::post_versions::submit,
        crate::presentation::http::controllers::post_versions::assign_moderator,
        crate::presentation::http::controllers::post_versions::request_changes,
        crate::presentation::http::controllers::post_versions::accept,
        crate::presentation::http::controllers::post_versions::reject,
        crate::presentation::http::controllers::post_versions::list_user_post_versions,
        crate::presentation::http::controllers::posts::list_user_posts,
        crate::presentation::http::controllers::categories::list_post_categories,
        crate::presentation::http::controllers::posts::list_posts,
        crate::presentation::http::controllers::posts::get_post_by_slug
    ),
    components(
        schemas(
            StatusResponse,
            crate::presentation::http::error::ErrorResponse,
            crate::presentation::http::controllers::post_versions::PostVersionListParams,
            crate::presentation::http::controllers::post_versions::PostVersionListResponse,
            crate::presentation::http::controllers::post_versions::AssignModeratorRequest,
            crate::presentation::http::controllers::post_versions::PostVersionFormSchema,
            crate::application::dto::PostVersionDto,
            crate::application::dto::PostVersionActionDto,
            crate::application::dto::PostVersionDetailDto,
            crate::application::dto::PostDto,
            crate::application::dto::CategoryDto,
            crate::presentation::http::controllers::posts::PostListParams,
            crate::presentation::http::controllers::posts::PostListResponse,
            crate::presentation::http::controllers::categories::CategoryListResponse,
            crate::domain::post_version::PostVersionStatus,
            crate::domain::post_version::PostVersionActionType
        )
    ),
    tags(
        (name = "PostVersions", description = "Authoring and reading post versions"),
        (name = "Moderation", description = "Reviewer transitions"),
        (name = "Posts", description = "Published posts and their categories"),
        (name = "System", description = "System level endpoints")
    ),
    modifiers(&ApiDocCustomizer),
    security(("bearerAuth" = [])),
    info(
        title = "Pressroom API",
        description = "Post-version moderation service",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;

struct ApiDocCustomizer;

impl Modify for ApiDocCustomizer {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Components::default);
        let mut http = Http::new(HttpAuthScheme::Bearer);
        http.bearer_format = Some("Biscuit".into());
        components.add_security_scheme("bearerAuth", SecurityScheme::Http(http));

        let url = env::var("PUBLIC_API_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| "http://localhost:8080".to_string());
        openapi.servers = Some(vec![Server::new(url)]);
    }
}

pub async fn serve_openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

pub fn write_openapi_snapshot() -> std::io::Result<()> {
    let spec = ApiDoc::openapi();
    let output_path =
        env::var("OPENAPI_SNAPSHOT_PATH").unwrap_or_else(|_| "spec/openapi.json".to_string());
    let path = Path::new(&output_path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(writer, &spec)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn documents_every_workflow_route() {
        let doc = ApiDoc::openapi();
        for path in [
            "/health",
            "/api/v1/post-versions",
            "/api/v1/post-versions/submit",
            "/api/v1/post-versions/{id}",
            "/api/v1/post-versions/{id}/submit",
            "/api/v1/post-versions/{id}/assigned-moderator",
            "/api/v1/post-versions/{id}/request-changes",
            "/api/v1/post-versions/{id}/accept",
            "/api/v1/post-versions/{id}/reject",
            "/api/v1/users/{id}/post-versions",
            "/api/v1/users/{id}/posts",
            "/api/v1/post-categories",
            "/api/v1/posts",
            "/api/v1/posts/{slug}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "{path} is undocumented");
        }
    }
}
