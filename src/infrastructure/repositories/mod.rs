// src/infrastructure/repositories/mod.rs
mod error;
mod postgres_category;
mod postgres_post;
mod postgres_post_version;
mod postgres_user;
mod postgres_workflow;
mod rows;

pub use error::map_sqlx;
pub use postgres_category::PostgresCategoryRepository;
pub use postgres_post::PostgresPostReadRepository;
pub use postgres_post_version::PostgresPostVersionReadRepository;
pub use postgres_user::PostgresUserRepository;
pub use postgres_workflow::{PostgresWorkflowStore, PostgresWorkflowTransaction};
