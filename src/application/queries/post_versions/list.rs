use super::PostVersionQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, PostVersionDto},
        error::{ApplicationError, ApplicationResult},
        queries::clamp_limit,
    },
    domain::{
        post_version::{PostVersionFilter, PostVersionStatus, specifications::CanReviewSpec},
        user::UserId,
    },
};

/// Review queue listing. `status` defaults to `Pending`.
#[derive(Debug, Clone, Default)]
pub struct ListPostVersionsQuery {
    pub status: Option<PostVersionStatus>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct ListUserPostVersionsQuery {
    pub author_id: i64,
    pub status: Option<PostVersionStatus>,
    pub limit: Option<u32>,
}

impl PostVersionQueryService {
    /// Reviewer-only. The pending queue is served oldest first so nothing
    /// waits forever; finished statuses are served newest first.
    pub async fn list_post_versions(
        &self,
        actor: &AuthenticatedUser,
        query: ListPostVersionsQuery,
    ) -> ApplicationResult<Vec<PostVersionDto>> {
        if !CanReviewSpec::new(&actor.capabilities).is_satisfied() {
            return Err(ApplicationError::forbidden(
                "only moderators may list post versions",
            ));
        }

        let status = query.status.unwrap_or(PostVersionStatus::Pending);
        let versions = self
            .read_repo
            .list(PostVersionFilter {
                status,
                author_id: None,
                oldest_first: status == PostVersionStatus::Pending,
                limit: clamp_limit(query.limit),
            })
            .await?;

        Ok(versions
            .into_iter()
            .map(|version| PostVersionDto::for_viewer(version, true))
            .collect())
    }

    /// An author's own versions, newest first. Reviewers may list anyone's.
    pub async fn list_user_post_versions(
        &self,
        actor: &AuthenticatedUser,
        query: ListUserPostVersionsQuery,
    ) -> ApplicationResult<Vec<PostVersionDto>> {
        let reviewer = actor.is_reviewer();
        let author_id = UserId::new(query.author_id)
            .map_err(|_| ApplicationError::not_found(format!("user {} not found", query.author_id)))?;

        if author_id != actor.id {
            if !reviewer {
                return Err(ApplicationError::forbidden(format!(
                    "post versions of user {author_id} are not available to you"
                )));
            }
            if self.users.find_by_id(author_id).await?.is_none() {
                return Err(ApplicationError::not_found(format!(
                    "user {author_id} not found"
                )));
            }
        }

        let versions = self
            .read_repo
            .list(PostVersionFilter {
                status: query.status.unwrap_or(PostVersionStatus::Pending),
                author_id: Some(author_id),
                oldest_first: false,
                limit: clamp_limit(query.limit),
            })
            .await?;

        Ok(versions
            .into_iter()
            .map(|version| PostVersionDto::for_viewer(version, reviewer))
            .collect())
    }
}
