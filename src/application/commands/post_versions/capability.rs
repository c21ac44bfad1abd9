// src/application/commands/post_versions/capability.rs
use crate::{
    application::{
        dto::AuthenticatedUser,
        error::{ApplicationError, ApplicationResult},
    },
    domain::post_version::{
        PostVersion,
        specifications::{CanEditDraftSpec, CanReviewSpec, RESOURCE},
    },
};

pub(super) fn ensure_capability(actor: &AuthenticatedUser, action: &str) -> ApplicationResult<()> {
    if actor.has_capability(RESOURCE, action) {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "missing capability {RESOURCE}:{action}"
        )))
    }
}

pub(super) fn ensure_reviewer(actor: &AuthenticatedUser) -> ApplicationResult<()> {
    if CanReviewSpec::new(&actor.capabilities).is_satisfied() {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(
            "only moderators may review post versions",
        ))
    }
}

pub(super) fn ensure_author(actor: &AuthenticatedUser, version: &PostVersion) -> ApplicationResult<()> {
    if CanEditDraftSpec::new(&actor.capabilities, version, actor.id).is_satisfied() {
        Ok(())
    } else {
        Err(ApplicationError::forbidden(format!(
            "post version {} belongs to another author",
            version.id
        )))
    }
}
