// src/domain/errors.rs
use crate::domain::post_version::PostVersionStatus;
use thiserror::Error;

pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("post version is {current}, but this action requires it to be {expected}")]
    InvalidTransition {
        current: PostVersionStatus,
        expected: PostVersionStatus,
    },
    #[error("no moderator exists with id {0}")]
    ReviewerNotFound(i64),
    #[error("persistence error: {0}")]
    Persistence(String),
}

impl DomainError {
    pub fn invalid_transition(current: PostVersionStatus, expected: PostVersionStatus) -> Self {
        Self::InvalidTransition { current, expected }
    }
}
