use crate::application::dto::CategoryDto;
use crate::presentation::http::error::{HttpResult, IntoHttpResult};
use crate::presentation::http::state::HttpState;
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CategoryListResponse {
    pub items: Vec<CategoryDto>,
}

#[utoipa::path(
    get,
    path = "/api/v1/post-categories",
    responses(
        (status = 200, description = "Categories a post version may use.", body = CategoryListResponse)
    ),
    security(()),
    tag = "Posts"
)]
pub async fn list_post_categories(
    Extension(state): Extension<HttpState>,
) -> HttpResult<Json<CategoryListResponse>> {
    let items = state
        .services
        .category_queries
        .list_categories()
        .await
        .into_http()?;
    Ok(Json(CategoryListResponse { items }))
}
