// src/domain/post_version/repository.rs
use crate::domain::errors::DomainResult;
use crate::domain::post::{NewPost, Post, PostId, PostSlug};
use crate::domain::post_version::action::{NewPostVersionAction, PostVersionAction};
use crate::domain::post_version::entity::{NewPostVersion, PostVersion};
use crate::domain::post_version::value_objects::{PostVersionId, PostVersionStatus};
use crate::domain::user::UserId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct PostVersionFilter {
    pub status: PostVersionStatus,
    pub author_id: Option<UserId>,
    /// Order by `updated_at` ascending instead of descending.
    pub oldest_first: bool,
    pub limit: u32,
}

#[async_trait]
pub trait PostVersionReadRepository: Send + Sync {
    async fn find_by_id(&self, id: PostVersionId) -> DomainResult<Option<PostVersion>>;
    async fn list(&self, filter: PostVersionFilter) -> DomainResult<Vec<PostVersion>>;
    /// Most recently accepted version of a post.
    async fn find_current_for_post(&self, post_id: PostId) -> DomainResult<Option<PostVersion>>;
    /// Current accepted version of each listed post, in no particular order.
    async fn list_current_for_posts(&self, post_ids: &[PostId]) -> DomainResult<Vec<PostVersion>>;
    /// Review log of a version, oldest entry first.
    async fn list_actions(&self, id: PostVersionId) -> DomainResult<Vec<PostVersionAction>>;
}

/// One atomic unit of workflow work. Dropping it without `commit` discards
/// every change made through it.
#[async_trait]
pub trait WorkflowTransaction: Send {
    /// Load a version and hold it exclusively until the transaction ends.
    async fn lock_version(&mut self, id: PostVersionId) -> DomainResult<Option<PostVersion>>;
    async fn insert_version(&mut self, version: NewPostVersion) -> DomainResult<PostVersion>;
    async fn save_version(&mut self, version: &PostVersion) -> DomainResult<()>;
    async fn find_post_by_slug(&mut self, slug: &PostSlug) -> DomainResult<Option<Post>>;
    async fn insert_post(&mut self, post: NewPost) -> DomainResult<Post>;
    async fn touch_post(&mut self, id: PostId, now: DateTime<Utc>) -> DomainResult<()>;
    async fn append_action(&mut self, action: NewPostVersionAction)
    -> DomainResult<PostVersionAction>;
    async fn commit(self: Box<Self>) -> DomainResult<()>;
}

#[async_trait]
pub trait WorkflowStore: Send + Sync {
    async fn begin(&self) -> DomainResult<Box<dyn WorkflowTransaction>>;
}
