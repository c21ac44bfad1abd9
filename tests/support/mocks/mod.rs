// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod reference;
pub mod security;
pub mod storage;
pub mod time;
pub mod workflow;

pub use reference::{InMemoryCategoryRepo, InMemoryUserRepo};
pub use security::{
    ADMIN_TOKEN, AUTHOR_TOKEN, DummyTokenManager, MODERATOR_TOKEN, OTHER_AUTHOR_TOKEN, actor,
    admin, author, moderator, other_author,
};
pub use storage::{FailingCoverStorage, InMemoryCoverStorage};
pub use time::{StepClock, fixed_now};
pub use workflow::InMemoryWorkflowStore;
