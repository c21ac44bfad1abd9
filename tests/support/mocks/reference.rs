// tests/support/mocks/reference.rs
use async_trait::async_trait;
use pressroom::domain::{
    category::{Category, CategoryId, CategoryRepository},
    errors::DomainResult,
    user::{Role, User, UserId, UserRepository, Username},
};

use super::time::fixed_now;

/// Users 1 (author), 2 (moderator), 3 (admin) and 4 (second author).
#[derive(Clone, Debug, Default)]
pub struct InMemoryUserRepo;

#[async_trait]
impl UserRepository for InMemoryUserRepo {
    async fn find_by_id(&self, id: UserId) -> DomainResult<Option<User>> {
        let (username, role) = match i64::from(id) {
            1 => ("author", Role::User),
            2 => ("moderator", Role::Moderator),
            3 => ("admin", Role::Admin),
            4 => ("other", Role::User),
            _ => return Ok(None),
        };
        Ok(Some(User {
            id,
            username: Username::new(username)?,
            role,
            created_at: fixed_now(),
        }))
    }
}

/// Categories 1 (`news`) and 2 (`tech`).
#[derive(Clone, Debug, Default)]
pub struct InMemoryCategoryRepo;

impl InMemoryCategoryRepo {
    fn all() -> Vec<Category> {
        [(1, "news", "News"), (2, "tech", "Tech")]
            .into_iter()
            .map(|(id, slug, name)| Category {
                id: CategoryId(id),
                slug: slug.into(),
                name: name.into(),
            })
            .collect()
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepo {
    async fn find_by_id(&self, id: CategoryId) -> DomainResult<Option<Category>> {
        Ok(Self::all().into_iter().find(|category| category.id == id))
    }

    async fn find_by_slug(&self, slug: &str) -> DomainResult<Option<Category>> {
        Ok(Self::all().into_iter().find(|category| category.slug == slug))
    }

    async fn list(&self) -> DomainResult<Vec<Category>> {
        Ok(Self::all())
    }
}
