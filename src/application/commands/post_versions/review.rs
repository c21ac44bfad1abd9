// src/application/commands/post_versions/review.rs
use super::{
    PostVersionCommandService, capability::ensure_reviewer, input::PostVersionChangesCommand,
};
use crate::{
    application::{
        dto::{AuthenticatedUser, PostVersionDto},
        error::{ApplicationError, ApplicationResult, FieldErrors},
    },
    domain::{
        post::{NewPost, PostSlug},
        post_version::{
            NewPostVersionAction, PostVersion, PostVersionActionKind, PostVersionId,
            PostVersionStatus, WorkflowTransaction,
        },
    },
};

#[derive(Debug, Clone, Default)]
pub struct RequestChangesCommand {
    pub changes: PostVersionChangesCommand,
    pub message: String,
}

#[derive(Debug, Clone, Default)]
pub struct AcceptCommand {
    pub changes: PostVersionChangesCommand,
    /// Public slug for a post created by this acceptance. Ignored when the
    /// version already belongs to a post.
    pub slug: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RejectCommand {
    pub changes: PostVersionChangesCommand,
    pub reason: String,
}

impl PostVersionCommandService {
    /// Send a pending version back to its author as a draft.
    pub async fn request_changes(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: RequestChangesCommand,
    ) -> ApplicationResult<PostVersionDto> {
        ensure_reviewer(actor)?;
        let id = Self::parse_id(id)?;

        let mut errors = FieldErrors::new();
        let kind = errors.check(
            "message",
            PostVersionActionKind::request_changes(command.message),
        );
        let pending = self.check_changes(command.changes, errors).await?;
        let kind = kind.ok_or_else(|| ApplicationError::validation("message is required"))?;

        let (mut tx, mut version) = self.open_pending(id).await?;
        let changes = self.materialize(pending).await?;
        let now = self.clock.now();
        version.apply_changes(changes);
        version.request_changes(actor.id, now)?;

        self.finish_review(tx.as_mut(), actor, &version, kind.clone())
            .await?;
        self.commit(tx, actor, &version, kind.action_type().as_str())
            .await?;
        Ok(PostVersionDto::for_viewer(version, true))
    }

    /// Publish a pending version. The first acceptance of a lineage creates
    /// its post; later ones only refresh the post's timestamp.
    pub async fn accept(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: AcceptCommand,
    ) -> ApplicationResult<PostVersionDto> {
        ensure_reviewer(actor)?;
        let id = Self::parse_id(id)?;

        let mut errors = FieldErrors::new();
        let slug = command
            .slug
            .filter(|slug| !slug.is_empty())
            .and_then(|slug| errors.check("slug", PostSlug::new(slug)));
        let pending = self.check_changes(command.changes, errors).await?;

        let (mut tx, mut version) = self.open_pending(id).await?;
        let changes = self.materialize(pending).await?;
        let now = self.clock.now();
        version.apply_changes(changes);

        let post_id = match version.post_id {
            Some(post_id) => {
                tx.touch_post(post_id, now).await?;
                post_id
            }
            None => {
                let slug = self
                    .slug_service
                    .resolve(tx.as_mut(), slug, &version.title, now)
                    .await?;
                tx.insert_post(NewPost::new(slug, now)).await?.id
            }
        };
        version.accept(actor.id, post_id, now)?;

        let kind = PostVersionActionKind::Accept;
        self.finish_review(tx.as_mut(), actor, &version, kind.clone())
            .await?;
        self.commit(tx, actor, &version, kind.action_type().as_str())
            .await?;
        Ok(PostVersionDto::for_viewer(version, true))
    }

    pub async fn reject(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: RejectCommand,
    ) -> ApplicationResult<PostVersionDto> {
        ensure_reviewer(actor)?;
        let id = Self::parse_id(id)?;

        let mut errors = FieldErrors::new();
        let kind = errors.check("reason", PostVersionActionKind::reject(command.reason));
        let pending = self.check_changes(command.changes, errors).await?;
        let kind = kind.ok_or_else(|| ApplicationError::validation("reason is required"))?;

        let (mut tx, mut version) = self.open_pending(id).await?;
        let changes = self.materialize(pending).await?;
        let now = self.clock.now();
        version.apply_changes(changes);
        version.reject(actor.id, now)?;

        self.finish_review(tx.as_mut(), actor, &version, kind.clone())
            .await?;
        self.commit(tx, actor, &version, kind.action_type().as_str())
            .await?;
        Ok(PostVersionDto::for_viewer(version, true))
    }

    async fn open_pending(
        &self,
        id: PostVersionId,
    ) -> ApplicationResult<(Box<dyn WorkflowTransaction>, PostVersion)> {
        let mut tx = self.store.begin().await?;
        let version = self.lock_existing(tx.as_mut(), id).await?;
        version.ensure_status(PostVersionStatus::Pending)?;
        Ok((tx, version))
    }

    async fn finish_review(
        &self,
        tx: &mut dyn WorkflowTransaction,
        actor: &AuthenticatedUser,
        version: &PostVersion,
        kind: PostVersionActionKind,
    ) -> ApplicationResult<()> {
        tx.save_version(version).await?;
        tx.append_action(NewPostVersionAction::new(
            version.id,
            actor.id,
            kind,
            version.updated_at,
        ))
        .await?;
        Ok(())
    }
}
