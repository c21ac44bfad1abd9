// src/presentation/http/controllers/post_versions.rs
use crate::application::{
    commands::post_versions::{
        AcceptCommand, AssignModeratorCommand, RejectCommand, RequestChangesCommand,
    },
    dto::{PostVersionDetailDto, PostVersionDto},
    queries::post_versions::{
        GetPostVersionQuery, ListPostVersionsQuery, ListUserPostVersionsQuery,
    },
};
use crate::domain::post_version::PostVersionStatus;
use crate::presentation::http::error::{ErrorResponse, HttpResult, IntoHttpResult};
use crate::presentation::http::extractors::Authenticated;
use crate::presentation::http::forms::PostVersionForm;
use crate::presentation::http::state::HttpState;
use axum::{
    Extension, Json,
    extract::{Multipart, Path, Query},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PostVersionListParams {
    /// Defaults to `pending`.
    #[serde(default)]
    pub status: Option<PostVersionStatus>,
    #[serde(default)]
    pub limit: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PostVersionListResponse {
    pub items: Vec<PostVersionDto>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AssignModeratorRequest {
    pub moderator_id: i64,
}

/// Multipart fields understood by the post-version endpoints. Which ones are
/// required depends on the endpoint.
#[allow(dead_code)]
#[derive(ToSchema)]
pub struct PostVersionFormSchema {
    pub category_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub cover: Option<Vec<u8>>,
    /// `request-changes` only.
    pub message: Option<String>,
    /// `reject` only.
    pub reason: Option<String>,
    /// `accept` only.
    pub slug: Option<String>,
}

#[utoipa::path(
    post,
    path = "/api/v1/post-versions",
    request_body(content = PostVersionFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Draft created.", body = PostVersionDto),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 404, description = "Unknown category.", body = ErrorResponse),
        (status = 422, description = "Invalid fields.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "PostVersions"
)]
pub async fn create_draft(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    multipart: Multipart,
) -> HttpResult<(StatusCode, Json<PostVersionDto>)> {
    let command = PostVersionForm::read(multipart).await?.into_new_command()?;
    state
        .services
        .post_version_commands
        .create_draft(&user, command)
        .await
        .into_http()
        .map(|dto| (StatusCode::CREATED, Json(dto)))
}

#[utoipa::path(
    post,
    path = "/api/v1/post-versions/submit",
    request_body(content = PostVersionFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Submitted for review.", body = PostVersionDto),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 404, description = "Unknown category.", body = ErrorResponse),
        (status = 422, description = "Invalid fields.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "PostVersions"
)]
pub async fn submit_new(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    multipart: Multipart,
) -> HttpResult<(StatusCode, Json<PostVersionDto>)> {
    let command = PostVersionForm::read(multipart).await?.into_new_command()?;
    state
        .services
        .post_version_commands
        .submit_new(&user, command)
        .await
        .into_http()
        .map(|dto| (StatusCode::CREATED, Json(dto)))
}

#[utoipa::path(
    get,
    path = "/api/v1/post-versions",
    params(PostVersionListParams),
    responses(
        (status = 200, description = "Post versions in one status.", body = PostVersionListResponse),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 403, description = "Moderators only.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "PostVersions"
)]
pub async fn list_post_versions(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Query(params): Query<PostVersionListParams>,
) -> HttpResult<Json<PostVersionListResponse>> {
    let items = state
        .services
        .post_version_queries
        .list_post_versions(
            &user,
            ListPostVersionsQuery {
                status: params.status,
                limit: params.limit,
            },
        )
        .await
        .into_http()?;
    Ok(Json(PostVersionListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/v1/users/{id}/post-versions",
    params(("id" = i64, Path, description = "Author id"), PostVersionListParams),
    responses(
        (status = 200, description = "The author's post versions.", body = PostVersionListResponse),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 403, description = "Not your versions.", body = ErrorResponse),
        (status = 404, description = "Unknown user.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "PostVersions"
)]
pub async fn list_user_post_versions(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(author_id): Path<i64>,
    Query(params): Query<PostVersionListParams>,
) -> HttpResult<Json<PostVersionListResponse>> {
    let items = state
        .services
        .post_version_queries
        .list_user_post_versions(
            &user,
            ListUserPostVersionsQuery {
                author_id,
                status: params.status,
                limit: params.limit,
            },
        )
        .await
        .into_http()?;
    Ok(Json(PostVersionListResponse { items }))
}

#[utoipa::path(
    get,
    path = "/api/v1/post-versions/{id}",
    params(("id" = i64, Path, description = "Post version id")),
    responses(
        (status = 200, description = "Post version with its review log.", body = PostVersionDetailDto),
        (status = 401, description = "Unauthorized.", body = ErrorResponse),
        (status = 404, description = "Not found.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "PostVersions"
)]
pub async fn get_post_version(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
) -> HttpResult<Json<PostVersionDetailDto>> {
    state
        .services
        .post_version_queries
        .get_post_version(&user, GetPostVersionQuery { id })
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/v1/post-versions/{id}",
    params(("id" = i64, Path, description = "Post version id")),
    request_body(content = PostVersionFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Draft updated.", body = PostVersionDto),
        (status = 403, description = "Not the author.", body = ErrorResponse),
        (status = 404, description = "Not found.", body = ErrorResponse),
        (status = 409, description = "Not a draft.", body = ErrorResponse),
        (status = 422, description = "Invalid fields.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "PostVersions"
)]
pub async fn update_draft(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> HttpResult<Json<PostVersionDto>> {
    let changes = PostVersionForm::read(multipart).await?.changes()?;
    state
        .services
        .post_version_commands
        .update_draft(&user, id, changes)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/v1/post-versions/{id}/submit",
    params(("id" = i64, Path, description = "Post version id")),
    request_body(content = PostVersionFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Draft submitted for review.", body = PostVersionDto),
        (status = 403, description = "Not the author.", body = ErrorResponse),
        (status = 404, description = "Not found.", body = ErrorResponse),
        (status = 409, description = "Not a draft.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "PostVersions"
)]
pub async fn submit(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> HttpResult<Json<PostVersionDto>> {
    let changes = PostVersionForm::read(multipart).await?.changes()?;
    state
        .services
        .post_version_commands
        .submit(&user, id, changes)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    put,
    path = "/api/v1/post-versions/{id}/assigned-moderator",
    params(("id" = i64, Path, description = "Post version id")),
    request_body = AssignModeratorRequest,
    responses(
        (status = 200, description = "Moderator assigned.", body = PostVersionDto),
        (status = 403, description = "Moderators only.", body = ErrorResponse),
        (status = 404, description = "Unknown version or moderator.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn assign_moderator(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    Json(payload): Json<AssignModeratorRequest>,
) -> HttpResult<Json<PostVersionDto>> {
    state
        .services
        .post_version_commands
        .assign_moderator(
            &user,
            id,
            AssignModeratorCommand {
                moderator_id: payload.moderator_id,
            },
        )
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/v1/post-versions/{id}/request-changes",
    params(("id" = i64, Path, description = "Post version id")),
    request_body(content = PostVersionFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Returned to the author as a draft.", body = PostVersionDto),
        (status = 403, description = "Moderators only.", body = ErrorResponse),
        (status = 409, description = "Not pending.", body = ErrorResponse),
        (status = 422, description = "Invalid fields.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn request_changes(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> HttpResult<Json<PostVersionDto>> {
    let mut form = PostVersionForm::read(multipart).await?;
    let command = RequestChangesCommand {
        changes: form.changes()?,
        message: form.message.unwrap_or_default(),
    };
    state
        .services
        .post_version_commands
        .request_changes(&user, id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/v1/post-versions/{id}/accept",
    params(("id" = i64, Path, description = "Post version id")),
    request_body(content = PostVersionFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Accepted and published.", body = PostVersionDto),
        (status = 403, description = "Moderators only.", body = ErrorResponse),
        (status = 409, description = "Not pending, or slug taken.", body = ErrorResponse),
        (status = 422, description = "Invalid fields.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn accept(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> HttpResult<Json<PostVersionDto>> {
    let mut form = PostVersionForm::read(multipart).await?;
    let command = AcceptCommand {
        changes: form.changes()?,
        slug: form.slug,
    };
    state
        .services
        .post_version_commands
        .accept(&user, id, command)
        .await
        .into_http()
        .map(Json)
}

#[utoipa::path(
    patch,
    path = "/api/v1/post-versions/{id}/reject",
    params(("id" = i64, Path, description = "Post version id")),
    request_body(content = PostVersionFormSchema, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Rejected.", body = PostVersionDto),
        (status = 403, description = "Moderators only.", body = ErrorResponse),
        (status = 409, description = "Not pending.", body = ErrorResponse),
        (status = 422, description = "Invalid fields.", body = ErrorResponse)
    ),
    security(("bearerAuth" = [])),
    tag = "Moderation"
)]
pub async fn reject(
    Extension(state): Extension<HttpState>,
    Authenticated(user): Authenticated,
    Path(id): Path<i64>,
    multipart: Multipart,
) -> HttpResult<Json<PostVersionDto>> {
    let mut form = PostVersionForm::read(multipart).await?;
    let command = RejectCommand {
        changes: form.changes()?,
        reason: form.reason.unwrap_or_default(),
    };
    state
        .services
        .post_version_commands
        .reject(&user, id, command)
        .await
        .into_http()
        .map(Json)
}
