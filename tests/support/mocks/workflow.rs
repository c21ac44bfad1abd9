// tests/support/mocks/workflow.rs
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pressroom::domain::{
    errors::{DomainError, DomainResult},
    post::{NewPost, Post, PostFilter, PostId, PostReadRepository, PostSlug},
    post_version::{
        NewPostVersion, NewPostVersionAction, PostVersion, PostVersionAction, PostVersionActionId,
        PostVersionFilter, PostVersionId, PostVersionReadRepository, PostVersionStatus,
        WorkflowStore, WorkflowTransaction,
    },
};
use std::{collections::BTreeMap, sync::Arc};
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone, Default)]
pub struct WorkflowState {
    pub versions: BTreeMap<i64, PostVersion>,
    pub posts: BTreeMap<i64, Post>,
    pub actions: Vec<PostVersionAction>,
}

impl WorkflowState {
    fn next_id<T>(map: &BTreeMap<i64, T>) -> i64 {
        map.keys().next_back().map_or(1, |last| last + 1)
    }
}

/// Transactional store over a single mutex. A transaction holds the lock for
/// its whole life and works on a copy that `commit` swaps in, so dropping it
/// discards everything and racing transitions are serialized.
#[derive(Clone, Default)]
pub struct InMemoryWorkflowStore {
    state: Arc<Mutex<WorkflowState>>,
}

impl InMemoryWorkflowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Put a version straight into committed state.
    pub async fn seed_version(&self, version: PostVersion) {
        let mut state = self.state.lock().await;
        state.versions.insert(i64::from(version.id), version);
    }

    pub async fn seed_post(&self, post: Post) {
        let mut state = self.state.lock().await;
        state.posts.insert(i64::from(post.id), post);
    }

    pub async fn snapshot(&self) -> WorkflowState {
        self.state.lock().await.clone()
    }

    pub async fn version(&self, id: i64) -> Option<PostVersion> {
        self.state.lock().await.versions.get(&id).cloned()
    }

    pub async fn actions_of(&self, id: i64) -> Vec<PostVersionAction> {
        self.state
            .lock()
            .await
            .actions
            .iter()
            .filter(|action| i64::from(action.version_id) == id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl WorkflowStore for InMemoryWorkflowStore {
    async fn begin(&self) -> DomainResult<Box<dyn WorkflowTransaction>> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        let staged = guard.clone();
        Ok(Box::new(InMemoryTransaction { guard, staged }))
    }
}

struct InMemoryTransaction {
    guard: OwnedMutexGuard<WorkflowState>,
    staged: WorkflowState,
}

#[async_trait]
impl WorkflowTransaction for InMemoryTransaction {
    async fn lock_version(&mut self, id: PostVersionId) -> DomainResult<Option<PostVersion>> {
        Ok(self.staged.versions.get(&i64::from(id)).cloned())
    }

    async fn insert_version(&mut self, version: NewPostVersion) -> DomainResult<PostVersion> {
        let id = WorkflowState::next_id(&self.staged.versions);
        let stored = PostVersion {
            id: PostVersionId::new(id)?,
            post_id: None,
            author_id: Some(version.author_id),
            assigned_moderator_id: None,
            category_id: version.category_id,
            title: version.title,
            description: version.description,
            content: version.content,
            cover: version.cover,
            status: version.status,
            created_at: version.created_at,
            updated_at: version.created_at,
        };
        self.staged.versions.insert(id, stored.clone());
        Ok(stored)
    }

    async fn save_version(&mut self, version: &PostVersion) -> DomainResult<()> {
        match self.staged.versions.get_mut(&i64::from(version.id)) {
            Some(slot) => {
                *slot = version.clone();
                Ok(())
            }
            None => Err(DomainError::NotFound(format!(
                "post version {} not found",
                version.id
            ))),
        }
    }

    async fn find_post_by_slug(&mut self, slug: &PostSlug) -> DomainResult<Option<Post>> {
        Ok(self
            .staged
            .posts
            .values()
            .find(|post| post.slug == *slug)
            .cloned())
    }

    async fn insert_post(&mut self, post: NewPost) -> DomainResult<Post> {
        if self.staged.posts.values().any(|p| p.slug == post.slug) {
            return Err(DomainError::Conflict(format!(
                "slug '{}' is already taken",
                post.slug
            )));
        }
        let id = WorkflowState::next_id(&self.staged.posts);
        let stored = Post {
            id: PostId::new(id)?,
            slug: post.slug,
            created_at: post.created_at,
            updated_at: post.created_at,
        };
        self.staged.posts.insert(id, stored.clone());
        Ok(stored)
    }

    async fn touch_post(&mut self, id: PostId, now: DateTime<Utc>) -> DomainResult<()> {
        self.staged
            .posts
            .get_mut(&i64::from(id))
            .map(|post| post.touch(now))
            .ok_or_else(|| DomainError::NotFound(format!("post {} not found", i64::from(id))))
    }

    async fn append_action(
        &mut self,
        action: NewPostVersionAction,
    ) -> DomainResult<PostVersionAction> {
        let id = self.staged.actions.len() as i64 + 1;
        let stored = PostVersionAction {
            id: PostVersionActionId(id),
            version_id: action.version_id,
            user_id: action.user_id,
            kind: action.kind,
            created_at: action.created_at,
        };
        self.staged.actions.push(stored.clone());
        Ok(stored)
    }

    async fn commit(self: Box<Self>) -> DomainResult<()> {
        let Self { mut guard, staged } = *self;
        *guard = staged;
        Ok(())
    }
}

fn current_version(state: &WorkflowState, post_id: PostId) -> Option<&PostVersion> {
    state
        .versions
        .values()
        .rev()
        .find(|v| v.post_id == Some(post_id) && v.status == PostVersionStatus::Accepted)
}

#[async_trait]
impl PostVersionReadRepository for InMemoryWorkflowStore {
    async fn find_by_id(&self, id: PostVersionId) -> DomainResult<Option<PostVersion>> {
        Ok(self.version(i64::from(id)).await)
    }

    async fn list(&self, filter: PostVersionFilter) -> DomainResult<Vec<PostVersion>> {
        let state = self.state.lock().await;
        let mut versions: Vec<PostVersion> = state
            .versions
            .values()
            .filter(|v| v.status == filter.status)
            .filter(|v| filter.author_id.is_none_or(|author| v.author_id == Some(author)))
            .cloned()
            .collect();

        versions.sort_by_key(|v| (v.updated_at, i64::from(v.id)));
        if !filter.oldest_first {
            versions.reverse();
        }
        versions.truncate(filter.limit as usize);
        Ok(versions)
    }

    async fn find_current_for_post(&self, post_id: PostId) -> DomainResult<Option<PostVersion>> {
        let state = self.state.lock().await;
        Ok(current_version(&state, post_id).cloned())
    }

    async fn list_current_for_posts(&self, post_ids: &[PostId]) -> DomainResult<Vec<PostVersion>> {
        let state = self.state.lock().await;
        Ok(post_ids
            .iter()
            .filter_map(|post_id| current_version(&state, *post_id).cloned())
            .collect())
    }

    async fn list_actions(&self, id: PostVersionId) -> DomainResult<Vec<PostVersionAction>> {
        Ok(self.actions_of(i64::from(id)).await)
    }
}

#[async_trait]
impl PostReadRepository for InMemoryWorkflowStore {
    async fn find_by_id(&self, id: PostId) -> DomainResult<Option<Post>> {
        Ok(self.state.lock().await.posts.get(&i64::from(id)).cloned())
    }

    async fn find_by_slug(&self, slug: &PostSlug) -> DomainResult<Option<Post>> {
        Ok(self
            .state
            .lock()
            .await
            .posts
            .values()
            .find(|post| post.slug == *slug)
            .cloned())
    }

    async fn list(&self, filter: PostFilter) -> DomainResult<Vec<Post>> {
        let state = self.state.lock().await;
        let mut posts: Vec<Post> = state
            .posts
            .values()
            .filter(|post| {
                filter.category_id.is_none_or(|category| {
                    current_version(&state, post.id).is_some_and(|v| v.category_id == category)
                })
            })
            .filter(|post| {
                filter.author_id.is_none_or(|author| {
                    state
                        .versions
                        .values()
                        .any(|v| v.post_id == Some(post.id) && v.author_id == Some(author))
                })
            })
            .cloned()
            .collect();

        posts.sort_by_key(|post| (post.updated_at, i64::from(post.id)));
        posts.reverse();
        posts.truncate(filter.limit as usize);
        Ok(posts)
    }
}
