// src/application/commands/post_versions/assign.rs
use super::{PostVersionCommandService, capability::ensure_reviewer};
use crate::{
    application::{
        dto::{AuthenticatedUser, PostVersionDto},
        error::ApplicationResult,
    },
    domain::{
        errors::DomainError,
        post_version::{NewPostVersionAction, PostVersionActionKind},
        user::UserId,
    },
};

#[derive(Debug, Clone, Copy)]
pub struct AssignModeratorCommand {
    pub moderator_id: i64,
}

impl PostVersionCommandService {
    /// Hand a version to a reviewer. Works in any status and leaves both the
    /// status and `updated_at` alone.
    pub async fn assign_moderator(
        &self,
        actor: &AuthenticatedUser,
        id: i64,
        command: AssignModeratorCommand,
    ) -> ApplicationResult<PostVersionDto> {
        ensure_reviewer(actor)?;
        let id = Self::parse_id(id)?;

        let moderator_id = UserId::new(command.moderator_id)
            .map_err(|_| DomainError::ReviewerNotFound(command.moderator_id))?;
        match self.users.find_by_id(moderator_id).await? {
            Some(user) if user.is_reviewer() => {}
            _ => return Err(DomainError::ReviewerNotFound(command.moderator_id).into()),
        }

        let mut tx = self.store.begin().await?;
        let mut version = self.lock_existing(tx.as_mut(), id).await?;
        version.assign_moderator(moderator_id);
        tx.save_version(&version).await?;

        let kind = PostVersionActionKind::AssignModerator { moderator_id };
        let action = kind.action_type().as_str();
        tx.append_action(NewPostVersionAction::new(
            version.id,
            actor.id,
            kind,
            self.clock.now(),
        ))
        .await?;

        self.commit(tx, actor, &version, action).await?;
        Ok(PostVersionDto::for_viewer(version, true))
    }
}
