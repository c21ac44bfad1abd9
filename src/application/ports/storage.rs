// src/application/ports/storage.rs
use crate::application::{ApplicationResult, uploads::CoverImage};
use crate::domain::post_version::CoverPath;
use async_trait::async_trait;

/// Blob store for cover images. A version row only ever references a path
/// returned by a successful `store`.
#[async_trait]
pub trait CoverStorage: Send + Sync {
    async fn store(&self, cover: &CoverImage) -> ApplicationResult<CoverPath>;
}
