// src/domain/post_version/specifications.rs
use std::collections::HashSet;

use crate::domain::post_version::action::{PostVersionAction, PostVersionActionType};
use crate::domain::post_version::entity::PostVersion;
use crate::domain::user::value_objects::{Capability, UserId};

pub const RESOURCE: &str = "post_versions";

fn has_capability(capabilities: &HashSet<Capability>, action: &str) -> bool {
    capabilities.iter().any(|cap| cap.matches(RESOURCE, action))
}

pub struct CanReviewSpec<'a> {
    capabilities: &'a HashSet<Capability>,
}

impl<'a> CanReviewSpec<'a> {
    pub fn new(capabilities: &'a HashSet<Capability>) -> Self {
        Self { capabilities }
    }

    pub fn is_satisfied(&self) -> bool {
        has_capability(self.capabilities, "review")
    }
}

pub struct CanViewPostVersionSpec<'a> {
    capabilities: &'a HashSet<Capability>,
    version: &'a PostVersion,
    user_id: UserId,
}

impl<'a> CanViewPostVersionSpec<'a> {
    pub fn new(
        capabilities: &'a HashSet<Capability>,
        version: &'a PostVersion,
        user_id: UserId,
    ) -> Self {
        Self {
            capabilities,
            version,
            user_id,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        has_capability(self.capabilities, "read:any")
            || (has_capability(self.capabilities, "read:own")
                && self.version.is_authored_by(self.user_id))
    }
}

/// Authors edit and submit their own drafts only. Status is checked by the
/// state machine, not here.
pub struct CanEditDraftSpec<'a> {
    capabilities: &'a HashSet<Capability>,
    version: &'a PostVersion,
    user_id: UserId,
}

impl<'a> CanEditDraftSpec<'a> {
    pub fn new(
        capabilities: &'a HashSet<Capability>,
        version: &'a PostVersion,
        user_id: UserId,
    ) -> Self {
        Self {
            capabilities,
            version,
            user_id,
        }
    }

    pub fn is_satisfied(&self) -> bool {
        has_capability(self.capabilities, "create") && self.version.is_authored_by(self.user_id)
    }
}

/// Shape the review log for a viewer. Reviewers see everything. Everyone else
/// loses moderator assignments entirely and the actor of every action except
/// submissions.
pub fn visible_actions(actions: Vec<PostVersionAction>, reviewer: bool) -> Vec<PostVersionAction> {
    if reviewer {
        return actions;
    }

    actions
        .into_iter()
        .filter(|action| action.kind.action_type() != PostVersionActionType::AssignModerator)
        .map(|mut action| {
            if action.kind.action_type() != PostVersionActionType::Submit {
                action.user_id = None;
            }
            action
        })
        .collect()
}
