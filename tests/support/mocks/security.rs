// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::Duration;
use pressroom::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::TokenManager,
};
use pressroom::domain::user::{Role, UserId};

use super::time::fixed_now;

pub const AUTHOR_TOKEN: &str = "author-token";
pub const OTHER_AUTHOR_TOKEN: &str = "other-author-token";
pub const MODERATOR_TOKEN: &str = "moderator-token";
pub const ADMIN_TOKEN: &str = "admin-token";

/// Users 1..=4 match the seeded `InMemoryUserRepo`.
pub fn actor(id: i64, username: &str, role: Role) -> AuthenticatedUser {
    let subject = TokenSubject::for_role(
        UserId::new(id).expect("invalid user id"),
        username,
        role,
    );
    let now = fixed_now();
    AuthenticatedUser {
        id: subject.user_id,
        username: subject.username,
        role: subject.role,
        capabilities: subject.capabilities,
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}

pub fn author() -> AuthenticatedUser {
    actor(1, "author", Role::User)
}

pub fn moderator() -> AuthenticatedUser {
    actor(2, "moderator", Role::Moderator)
}

pub fn admin() -> AuthenticatedUser {
    actor(3, "admin", Role::Admin)
}

pub fn other_author() -> AuthenticatedUser {
    actor(4, "other", Role::User)
}

#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, _subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        Err(ApplicationError::infrastructure("not implemented"))
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            AUTHOR_TOKEN => Ok(author()),
            OTHER_AUTHOR_TOKEN => Ok(other_author()),
            MODERATOR_TOKEN => Ok(moderator()),
            ADMIN_TOKEN => Ok(admin()),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}
