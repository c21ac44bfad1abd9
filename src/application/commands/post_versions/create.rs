// src/application/commands/post_versions/create.rs
use super::{
    PostVersionCommandService,
    capability::ensure_capability,
    input::{CheckedFields, NewPostVersionCommand},
};
use crate::{
    application::{
        dto::{AuthenticatedUser, PostVersionDto},
        error::{ApplicationError, ApplicationResult, FieldErrors},
    },
    domain::post_version::{
        NewPostVersion, NewPostVersionAction, PostVersionActionKind, PostVersionStatus,
    },
};

impl PostVersionCommandService {
    /// Start a new submission as a private draft. Drafts leave no log entry.
    pub async fn create_draft(
        &self,
        actor: &AuthenticatedUser,
        command: NewPostVersionCommand,
    ) -> ApplicationResult<PostVersionDto> {
        self.create(actor, command, PostVersionStatus::Draft).await
    }

    /// Create a submission that goes straight into the review queue.
    pub async fn submit_new(
        &self,
        actor: &AuthenticatedUser,
        command: NewPostVersionCommand,
    ) -> ApplicationResult<PostVersionDto> {
        self.create(actor, command, PostVersionStatus::Pending).await
    }

    async fn create(
        &self,
        actor: &AuthenticatedUser,
        command: NewPostVersionCommand,
        status: PostVersionStatus,
    ) -> ApplicationResult<PostVersionDto> {
        ensure_capability(actor, "create")?;

        let mut errors = FieldErrors::new();
        let checked = CheckedFields::check(command.into(), &mut errors);
        errors.into_result()?;

        let CheckedFields {
            category_id: Some(category_id),
            title: Some(title),
            description: Some(description),
            content: Some(content),
            cover: Some(cover),
        } = checked
        else {
            return Err(ApplicationError::validation(
                "a new post version needs every field",
            ));
        };
        self.ensure_category(category_id).await?;

        let cover = self.store_cover(&cover).await?;
        let now = self.clock.now();

        let mut tx = self.store.begin().await?;
        let version = tx
            .insert_version(NewPostVersion {
                author_id: actor.id,
                category_id,
                title,
                description,
                content,
                cover,
                status,
                created_at: now,
            })
            .await?;

        let action = if status == PostVersionStatus::Pending {
            let kind = PostVersionActionKind::Submit;
            let action = kind.action_type().as_str();
            tx.append_action(NewPostVersionAction::new(version.id, actor.id, kind, now))
                .await?;
            action
        } else {
            "create_draft"
        };

        self.commit(tx, actor, &version, action).await?;
        Ok(PostVersionDto::for_viewer(version, actor.is_reviewer()))
    }
}
