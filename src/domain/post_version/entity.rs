// src/domain/post_version/entity.rs
use crate::domain::category::CategoryId;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::PostId;
use crate::domain::post_version::value_objects::{
    CoverPath, PostVersionContent, PostVersionDescription, PostVersionId, PostVersionStatus,
    PostVersionTitle,
};
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};

/// A submitted revision of an article moving through review.
#[derive(Debug, Clone)]
pub struct PostVersion {
    pub id: PostVersionId,
    pub post_id: Option<PostId>,
    pub author_id: Option<UserId>,
    pub assigned_moderator_id: Option<UserId>,
    pub category_id: CategoryId,
    pub title: PostVersionTitle,
    pub description: PostVersionDescription,
    pub content: PostVersionContent,
    pub cover: CoverPath,
    pub status: PostVersionStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostVersion {
    pub fn is_authored_by(&self, user_id: UserId) -> bool {
        self.author_id == Some(user_id)
    }

    pub fn ensure_status(&self, expected: PostVersionStatus) -> DomainResult<()> {
        if self.status == expected {
            Ok(())
        } else {
            Err(DomainError::invalid_transition(self.status, expected))
        }
    }

    /// Overwrite the fields present in `changes`; absent fields keep their
    /// values. Status is not touched.
    pub fn apply_changes(&mut self, changes: PostVersionChanges) {
        let PostVersionChanges {
            category_id,
            title,
            description,
            content,
            cover,
        } = changes;

        if let Some(category_id) = category_id {
            self.category_id = category_id;
        }
        if let Some(title) = title {
            self.title = title;
        }
        if let Some(description) = description {
            self.description = description;
        }
        if let Some(content) = content {
            self.content = content;
        }
        if let Some(cover) = cover {
            self.cover = cover;
        }
    }

    pub fn update_draft(
        &mut self,
        changes: PostVersionChanges,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.ensure_status(PostVersionStatus::Draft)?;
        self.apply_changes(changes);
        self.updated_at = now;
        Ok(())
    }

    pub fn submit(&mut self, now: DateTime<Utc>) -> DomainResult<()> {
        self.transition(PostVersionStatus::Pending, now)
    }

    pub fn request_changes(&mut self, moderator: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        self.transition(PostVersionStatus::Draft, now)?;
        self.assigned_moderator_id = Some(moderator);
        Ok(())
    }

    pub fn accept(
        &mut self,
        moderator: UserId,
        post_id: PostId,
        now: DateTime<Utc>,
    ) -> DomainResult<()> {
        self.ensure_status(PostVersionStatus::Pending)?;
        self.link_post(post_id)?;
        self.transition(PostVersionStatus::Accepted, now)?;
        self.assigned_moderator_id = Some(moderator);
        Ok(())
    }

    pub fn reject(&mut self, moderator: UserId, now: DateTime<Utc>) -> DomainResult<()> {
        self.transition(PostVersionStatus::Rejected, now)?;
        self.assigned_moderator_id = Some(moderator);
        Ok(())
    }

    /// Ownership bookkeeping only: status and `updated_at` stay as they are.
    pub fn assign_moderator(&mut self, moderator: UserId) {
        self.assigned_moderator_id = Some(moderator);
    }

    fn link_post(&mut self, post_id: PostId) -> DomainResult<()> {
        match self.post_id {
            None => {
                self.post_id = Some(post_id);
                Ok(())
            }
            Some(existing) if existing == post_id => Ok(()),
            Some(existing) => Err(DomainError::Validation(format!(
                "post version {} already belongs to post {}",
                self.id,
                i64::from(existing)
            ))),
        }
    }

    fn transition(&mut self, next: PostVersionStatus, now: DateTime<Utc>) -> DomainResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::invalid_transition(
                self.status,
                next.predecessor(),
            ));
        }
        self.status = next;
        self.updated_at = now;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct NewPostVersion {
    pub author_id: UserId,
    pub category_id: CategoryId,
    pub title: PostVersionTitle,
    pub description: PostVersionDescription,
    pub content: PostVersionContent,
    pub cover: CoverPath,
    pub status: PostVersionStatus,
    pub created_at: DateTime<Utc>,
}

/// Partial edit of a post version. `None` means "leave as is".
#[derive(Debug, Clone, Default)]
pub struct PostVersionChanges {
    pub category_id: Option<CategoryId>,
    pub title: Option<PostVersionTitle>,
    pub description: Option<PostVersionDescription>,
    pub content: Option<PostVersionContent>,
    pub cover: Option<CoverPath>,
}

impl PostVersionChanges {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: PostVersionTitle) -> Self {
        self.title = Some(title);
        self
    }

    pub fn with_cover(mut self, cover: CoverPath) -> Self {
        self.cover = Some(cover);
        self
    }
}
