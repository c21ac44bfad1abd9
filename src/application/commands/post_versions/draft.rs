// src/application/commands/post_versions/draft.rs
use super::{
    PostVersionCommandService,
    capability::{ensure_author, ensure_capability},
    input::PostVersionChangesCommand,
};
use crate::{
    application::{
        dto::{AuthenticatedUser, PostVersionDto},
        error::{ApplicationResult, FieldErrors},
    },
    domain::post_version::{NewPostVersionAction, PostVersionActionKind, PostVersionStatus},
};

impl PostVersionCommandService {
    /// Edit a draft in place. Status stays `Draft` and nothing is logged.
    pub async fn update_draft(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: PostVersionChangesCommand,
    ) -> ApplicationResult<PostVersionDto> {
        ensure_capability(actor, "create")?;
        let id = Self::parse_id(id)?;
        let pending = self.check_changes(command, FieldErrors::new()).await?;

        let mut tx = self.store.begin().await?;
        let mut version = self.lock_existing(tx.as_mut(), id).await?;
        ensure_author(actor, &version)?;
        version.ensure_status(PostVersionStatus::Draft)?;

        let changes = self.materialize(pending).await?;
        version.update_draft(changes, self.clock.now())?;
        tx.save_version(&version).await?;

        self.commit(tx, actor, &version, "update_draft").await?;
        Ok(PostVersionDto::for_viewer(version, actor.is_reviewer()))
    }

    /// Queue an existing draft for review, applying any last edits first.
    pub async fn submit(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: PostVersionChangesCommand,
    ) -> ApplicationResult<PostVersionDto> {
        ensure_capability(actor, "create")?;
        let id = Self::parse_id(id)?;
        let pending = self.check_changes(command, FieldErrors::new()).await?;

        let mut tx = self.store.begin().await?;
        let mut version = self.lock_existing(tx.as_mut(), id).await?;
        ensure_author(actor, &version)?;
        version.ensure_status(PostVersionStatus::Draft)?;

        let changes = self.materialize(pending).await?;
        let now = self.clock.now();
        version.apply_changes(changes);
        version.submit(now)?;
        tx.save_version(&version).await?;

        let kind = PostVersionActionKind::Submit;
        let action = kind.action_type().as_str();
        tx.append_action(NewPostVersionAction::new(version.id, actor.id, kind, now))
            .await?;

        self.commit(tx, actor, &version, action).await?;
        Ok(PostVersionDto::for_viewer(version, actor.is_reviewer()))
    }
}
