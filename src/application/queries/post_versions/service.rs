use std::sync::Arc;

use crate::domain::{post_version::PostVersionReadRepository, user::UserRepository};

pub struct PostVersionQueryService {
    pub(super) read_repo: Arc<dyn PostVersionReadRepository>,
    pub(super) users: Arc<dyn UserRepository>,
}

impl PostVersionQueryService {
    pub fn new(
        read_repo: Arc<dyn PostVersionReadRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self { read_repo, users }
    }
}
