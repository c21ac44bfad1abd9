use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    application::{
        dto::{PostDto, PostVersionDto},
        error::{ApplicationError, ApplicationResult, FieldErrors},
        queries::clamp_limit,
    },
    domain::{
        category::CategoryRepository,
        post::{Post, PostFilter, PostId, PostReadRepository, PostSlug},
        post_version::PostVersionReadRepository,
        user::UserId,
    },
};

pub struct GetPostBySlugQuery {
    pub slug: String,
}

#[derive(Debug, Clone, Default)]
pub struct ListPostsQuery {
    pub category_slug: Option<String>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ListUserPostsQuery {
    pub author_id: i64,
    pub limit: Option<u32>,
}

/// Public read side of published posts.
pub struct PostQueryService {
    posts: Arc<dyn PostReadRepository>,
    versions: Arc<dyn PostVersionReadRepository>,
    categories: Arc<dyn CategoryRepository>,
}

impl PostQueryService {
    pub fn new(
        posts: Arc<dyn PostReadRepository>,
        versions: Arc<dyn PostVersionReadRepository>,
        categories: Arc<dyn CategoryRepository>,
    ) -> Self {
        Self {
            posts,
            versions,
            categories,
        }
    }

    pub async fn get_post_by_slug(&self, query: GetPostBySlugQuery) -> ApplicationResult<PostDto> {
        let not_found = || ApplicationError::not_found(format!("post '{}' not found", query.slug));

        let slug = PostSlug::new(query.slug.clone()).map_err(|_| not_found())?;
        let post = self.posts.find_by_slug(&slug).await?.ok_or_else(not_found)?;
        let current = self
            .versions
            .find_current_for_post(post.id)
            .await?
            .ok_or_else(not_found)?;

        Ok(PostDto::from_parts(
            post,
            PostVersionDto::for_viewer(current, false),
        ))
    }

    /// Published posts, most recently updated first, optionally narrowed to
    /// the category of their current version.
    pub async fn list_posts(&self, query: ListPostsQuery) -> ApplicationResult<Vec<PostDto>> {
        let category_id = match query.category_slug.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(slug) => match self.categories.find_by_slug(slug).await? {
                Some(category) => Some(category.id),
                None => {
                    let mut errors = FieldErrors::new();
                    errors.add("category_slug", format!("unknown category '{slug}'"));
                    return Err(ApplicationError::InvalidInput(errors));
                }
            },
        };

        let posts = self
            .posts
            .list(PostFilter {
                category_id,
                author_id: None,
                limit: clamp_limit(query.limit),
            })
            .await?;
        self.with_current_versions(posts).await
    }

    /// Published posts the user has written at least one version of.
    pub async fn list_user_posts(
        &self,
        query: ListUserPostsQuery,
    ) -> ApplicationResult<Vec<PostDto>> {
        let author_id = UserId::new(query.author_id).map_err(|_| {
            ApplicationError::not_found(format!("user {} not found", query.author_id))
        })?;

        let posts = self
            .posts
            .list(PostFilter {
                category_id: None,
                author_id: Some(author_id),
                limit: clamp_limit(query.limit),
            })
            .await?;
        self.with_current_versions(posts).await
    }

    async fn with_current_versions(&self, posts: Vec<Post>) -> ApplicationResult<Vec<PostDto>> {
        let ids: Vec<PostId> = posts.iter().map(|post| post.id).collect();
        let mut current: HashMap<PostId, _> = self
            .versions
            .list_current_for_posts(&ids)
            .await?
            .into_iter()
            .filter_map(|version| version.post_id.map(|post_id| (post_id, version)))
            .collect();

        // A post is only public through an accepted version.
        Ok(posts
            .into_iter()
            .filter_map(|post| {
                let version = current.remove(&post.id)?;
                Some(PostDto::from_parts(
                    post,
                    PostVersionDto::for_viewer(version, false),
                ))
            })
            .collect())
    }
}
