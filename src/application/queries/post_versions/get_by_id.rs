use super::PostVersionQueryService;
use crate::{
    application::{
        dto::{AuthenticatedUser, PostVersionActionDto, PostVersionDetailDto, PostVersionDto},
        error::{ApplicationError, ApplicationResult},
    },
    domain::post_version::{
        PostVersionId,
        specifications::{CanViewPostVersionSpec, visible_actions},
    },
};

pub struct GetPostVersionQuery {
    pub id: i64,
}

impl PostVersionQueryService {
    /// A version and its review log, trimmed to what the viewer may see.
    /// Versions the viewer may not open are reported as missing.
    pub async fn get_post_version(
        &self,
        actor: &AuthenticatedUser,
        query: GetPostVersionQuery,
    ) -> ApplicationResult<PostVersionDetailDto> {
        let not_found = || ApplicationError::not_found(format!("post version {} not found", query.id));

        let id = PostVersionId::new(query.id).map_err(|_| not_found())?;
        let version = self.read_repo.find_by_id(id).await?.ok_or_else(not_found)?;

        if !CanViewPostVersionSpec::new(&actor.capabilities, &version, actor.id).is_satisfied() {
            return Err(not_found());
        }

        let reviewer = actor.is_reviewer();
        let actions = visible_actions(self.read_repo.list_actions(id).await?, reviewer)
            .into_iter()
            .map(PostVersionActionDto::from)
            .collect();

        Ok(PostVersionDetailDto {
            version: PostVersionDto::for_viewer(version, reviewer),
            actions,
        })
    }
}
