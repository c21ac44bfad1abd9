// src/application/commands/post_versions/service.rs
use std::sync::Arc;

use tracing::{info, warn};

use super::input::{CheckedFields, PostVersionChangesCommand};
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult, FieldErrors},
        ports::{storage::CoverStorage, time::Clock},
        uploads::CoverImage,
    },
    domain::{
        category::{CategoryId, CategoryRepository},
        post::services::PostSlugService,
        post_version::{
            CoverPath, PostVersion, PostVersionChanges, PostVersionId, WorkflowStore,
            WorkflowTransaction,
        },
        user::UserRepository,
    },
};

pub struct PostVersionCommandService {
    pub(super) store: Arc<dyn WorkflowStore>,
    pub(super) users: Arc<dyn UserRepository>,
    pub(super) categories: Arc<dyn CategoryRepository>,
    pub(super) covers: Arc<dyn CoverStorage>,
    pub(super) slug_service: Arc<PostSlugService>,
    pub(super) clock: Arc<dyn Clock>,
}

/// Edits that passed validation; the cover is kept in memory until the
/// transaction decides the edit may happen.
pub(super) struct PendingChanges {
    pub changes: PostVersionChanges,
    pub cover: Option<CoverImage>,
}

impl PostVersionCommandService {
    pub fn new(
        store: Arc<dyn WorkflowStore>,
        users: Arc<dyn UserRepository>,
        categories: Arc<dyn CategoryRepository>,
        covers: Arc<dyn CoverStorage>,
        slug_service: Arc<PostSlugService>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            users,
            categories,
            covers,
            slug_service,
            clock,
        }
    }

    /// Validate the optional edits and resolve the category, without writing
    /// anything.
    pub(super) async fn check_changes(
        &self,
        command: PostVersionChangesCommand,
        mut errors: FieldErrors,
    ) -> ApplicationResult<PendingChanges> {
        let checked = CheckedFields::check(command, &mut errors);
        errors.into_result()?;

        if let Some(category_id) = checked.category_id {
            self.ensure_category(category_id).await?;
        }

        let mut changes = PostVersionChanges::new();
        changes.category_id = checked.category_id;
        changes.title = checked.title;
        changes.description = checked.description;
        changes.content = checked.content;

        Ok(PendingChanges {
            changes,
            cover: checked.cover,
        })
    }

    pub(super) async fn ensure_category(&self, id: CategoryId) -> ApplicationResult<()> {
        match self.categories.find_by_id(id).await? {
            Some(_) => Ok(()),
            None => Err(ApplicationError::not_found(format!(
                "category {} not found",
                i64::from(id)
            ))),
        }
    }

    /// Write the cover, if any, and fold its path into the edits.
    pub(super) async fn materialize(
        &self,
        pending: PendingChanges,
    ) -> ApplicationResult<PostVersionChanges> {
        let PendingChanges { changes, cover } = pending;
        match cover {
            Some(cover) => Ok(changes.with_cover(self.store_cover(&cover).await?)),
            None => Ok(changes),
        }
    }

    pub(super) async fn store_cover(&self, cover: &CoverImage) -> ApplicationResult<CoverPath> {
        self.covers.store(cover).await.inspect_err(|err| {
            warn!(error = %err, "failed to store cover image");
        })
    }

    pub(super) async fn lock_existing(
        &self,
        tx: &mut dyn WorkflowTransaction,
        id: PostVersionId,
    ) -> ApplicationResult<PostVersion> {
        tx.lock_version(id)
            .await?
            .ok_or_else(|| ApplicationError::not_found(format!("post version {id} not found")))
    }

    pub(super) fn parse_id(id: i64) -> ApplicationResult<PostVersionId> {
        PostVersionId::new(id)
            .map_err(|_| ApplicationError::not_found(format!("post version {id} not found")))
    }

    pub(super) async fn commit(
        &self,
        tx: Box<dyn WorkflowTransaction>,
        actor: &AuthenticatedUser,
        version: &PostVersion,
        action: &str,
    ) -> ApplicationResult<()> {
        tx.commit().await?;
        info!(
            post_version_id = %version.id,
            actor_id = %actor.id,
            action,
            status = %version.status,
            "post version transition committed"
        );
        Ok(())
    }
}
