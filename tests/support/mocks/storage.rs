// tests/support/mocks/storage.rs
use async_trait::async_trait;
use pressroom::application::{
    ApplicationResult, error::ApplicationError, ports::storage::CoverStorage, uploads::CoverImage,
};
use pressroom::domain::post_version::CoverPath;
use std::sync::Mutex;

/// Keeps every stored cover path in memory.
#[derive(Debug, Default)]
pub struct InMemoryCoverStorage {
    stored: Mutex<Vec<String>>,
}

impl InMemoryCoverStorage {
    pub fn stored(&self) -> Vec<String> {
        self.stored.lock().expect("cover storage poisoned").clone()
    }
}

#[async_trait]
impl CoverStorage for InMemoryCoverStorage {
    async fn store(&self, cover: &CoverImage) -> ApplicationResult<CoverPath> {
        let mut stored = self.stored.lock().expect("cover storage poisoned");
        let path = format!(
            "images/cover-{}.{}",
            stored.len() + 1,
            cover.format().extension()
        );
        stored.push(path.clone());
        Ok(CoverPath::new(path)?)
    }
}

#[derive(Debug, Default)]
pub struct FailingCoverStorage;

#[async_trait]
impl CoverStorage for FailingCoverStorage {
    async fn store(&self, _cover: &CoverImage) -> ApplicationResult<CoverPath> {
        Err(ApplicationError::infrastructure("disk full"))
    }
}
