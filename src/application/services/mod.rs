// src/application/services/mod.rs
use std::sync::Arc;

use crate::{
    application::{
        ApplicationResult,
        commands::post_versions::PostVersionCommandService,
        dto::AuthenticatedUser,
        ports::{security::TokenManager, storage::CoverStorage, time::Clock, util::SlugGenerator},
        queries::{
            categories::CategoryQueryService, post_versions::PostVersionQueryService,
            posts::PostQueryService,
        },
    },
    domain::{
        category::CategoryRepository,
        post::{PostReadRepository, services::PostSlugService},
        post_version::{PostVersionReadRepository, WorkflowStore},
        user::UserRepository,
    },
};

/// Every adapter the application layer needs, bundled so that wiring in
/// `main` and in tests reads the same.
pub struct ServiceDependencies {
    pub users: Arc<dyn UserRepository>,
    pub categories: Arc<dyn CategoryRepository>,
    pub posts: Arc<dyn PostReadRepository>,
    pub post_versions: Arc<dyn PostVersionReadRepository>,
    pub workflow: Arc<dyn WorkflowStore>,
    pub covers: Arc<dyn CoverStorage>,
    pub token_manager: Arc<dyn TokenManager>,
    pub clock: Arc<dyn Clock>,
    pub slugger: Arc<dyn SlugGenerator>,
}

pub struct ApplicationServices {
    pub post_version_commands: Arc<PostVersionCommandService>,
    pub post_version_queries: Arc<PostVersionQueryService>,
    pub post_queries: Arc<PostQueryService>,
    pub category_queries: Arc<CategoryQueryService>,
    token_manager: Arc<dyn TokenManager>,
}

impl ApplicationServices {
    pub fn new(deps: ServiceDependencies) -> Self {
        let ServiceDependencies {
            users,
            categories,
            posts,
            post_versions,
            workflow,
            covers,
            token_manager,
            clock,
            slugger,
        } = deps;

        let slug_service = Arc::new(PostSlugService::new(slugger));

        let post_version_commands = Arc::new(PostVersionCommandService::new(
            workflow,
            Arc::clone(&users),
            Arc::clone(&categories),
            covers,
            slug_service,
            clock,
        ));

        let post_version_queries = Arc::new(PostVersionQueryService::new(
            Arc::clone(&post_versions),
            users,
        ));
        let post_queries = Arc::new(PostQueryService::new(
            posts,
            post_versions,
            Arc::clone(&categories),
        ));
        let category_queries = Arc::new(CategoryQueryService::new(categories));

        Self {
            post_version_commands,
            post_version_queries,
            post_queries,
            category_queries,
            token_manager,
        }
    }

    pub fn token_manager(&self) -> Arc<dyn TokenManager> {
        Arc::clone(&self.token_manager)
    }

    pub async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        self.token_manager.authenticate(token).await
    }
}
