use crate::domain::category::CategoryId;
use crate::domain::errors::DomainResult;
use crate::domain::post::entity::Post;
use crate::domain::post::value_objects::{PostId, PostSlug};
use crate::domain::user::UserId;
use async_trait::async_trait;

/// Selection of published posts, newest `updated_at` first.
#[derive(Debug, Clone)]
pub struct PostFilter {
    /// Category of the current accepted version.
    pub category_id: Option<CategoryId>,
    /// Posts with at least one version written by this user.
    pub author_id: Option<UserId>,
    pub limit: u32,
}

#[async_trait]
pub trait PostReadRepository: Send + Sync {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>>;
    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>>;
    async fn list(&self, filter: PostFilter) -> DomainResult<Vec<Post>>;
}
