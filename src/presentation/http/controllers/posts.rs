use crate::application::{
    dto::PostDto,
    queries::posts::{GetPostBySlugQuery, ListPostsQuery, ListUserPostsQuery},
};
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Path, Query},
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PostListParams {
    /// Only posts whose current version is in this category.
    #[serde(default)]
    pub category_slug: Option<String>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct UserPostListParams {
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostListResponse {
    pub items: Vec<PostDto>,
}

#[utoipa::path(
    get,
    path = "/api/v1/posts",
    params(PostListParams),
    responses(
        (status = 200, description = "Published posts, newest first.", body = PostListResponse),
        (status = 422, description = "Unknown category.", body = ErrorResponse)
    ),
    security(()),
    tag = "Posts"
)]
pub async fn list_posts(
    Extension(state): Extension<HttpState>,
    Query(params): Query<PostListParams>,
) -> HttpResult<Json<PostListResponse>> {
    let items = state
        .services
        .post_queries
        .list_posts(ListPostsQuery {
            category_slug: params.category_slug,
            limit: params.limit,
        })
        .await
        .into_http()?;
    Ok(Json(PostListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/v1/posts/{slug}",
    params(("slug" = String, Path, description = "Public post slug")),
    responses(
        (status = 200, description = "Published post with its current version.", body = PostDto),
        (status = 404, description = "No such post.", body = ErrorResponse)
    ),
    security(()),
    tag = "Posts"
)]
pub async fn get_post_by_slug(
    Extension(state): Extension<HttpState>,
    Path(slug): Path<String>,
) -> HttpResult<Json<PostDto>> {
    state
        .services
        .post_queries
        .get_post_by_slug(GetPostBySlugQuery { slug })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/posts",
    params(("id" = i64, Path, description = "Author id"), UserPostListParams),
    responses(
        (status = 200, description = "Published posts the user contributed to.", body = PostListResponse),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 404, description = "Invalid user id.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Posts"
)]
pub async fn list_user_posts(
    Extension(state): Extension<HttpState>,
    Authenticated(_user): Authenticated,
    Path(author_id): Path<i64>,
    Query(params): Query<UserPostListParams>,
) -> HttpResult<Json<PostListResponse>> {
    let items = state
        .services
        .post_queries
        .list_user_posts(ListUserPostsQuery {
            author_id,
            limit: params.limit,
        })
        .await
        .into_http()?;
    Ok(Json(PostListResponse { items }))
}
