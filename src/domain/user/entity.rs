// src/domain/user/entity.rs
use crate::domain::user::value_objects::{Role, UserId, Username};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: Username,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_reviewer(&self) -> bool {
        self.role.is_reviewer()
    }
}
