// src/infrastructure/storage.rs
use crate::application::{
    ApplicationResult, error::ApplicationError, ports::storage::CoverStorage, uploads::CoverImage,
};
use crate::domain::post_version::CoverPath;
use async_trait::async_trait;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tokio::{fs, task};
use tracing::debug;

/// Public prefix under which stored covers are referenced.
pub const COVER_PREFIX: &str = "images";

/// Writes covers into `<root>/images`, named by the BLAKE3 hash of their
/// bytes. Identical uploads share one file.
#[derive(Debug, Clone)]
pub struct LocalCoverStorage {
    dir: PathBuf,
}

impl LocalCoverStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            dir: root.into().join(COVER_PREFIX),
        }
    }

    fn file_name(cover: &CoverImage) -> String {
        let hash = blake3::hash(cover.bytes());
        format!("{}.{}", hash.to_hex(), cover.format().extension())
    }
}

/// Writes through a temp file private to this call, then renames it into place.
fn write_atomically(dir: &Path, target: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut file = tempfile::Builder::new()
        .prefix(".cover-")
        .suffix(".part")
        .tempfile_in(dir)?;
    file.write_all(bytes)?;
    file.persist(target).map_err(|err| err.error)?;
    Ok(())
}

#[async_trait]
impl CoverStorage for LocalCoverStorage {
    async fn store(&self, cover: &CoverImage) -> ApplicationResult<CoverPath> {
        let name = Self::file_name(cover);
        let target = self.dir.join(&name);

        fs::create_dir_all(&self.dir).await.map_err(|err| {
            ApplicationError::infrastructure(format!(
                "cannot create cover directory {}: {err}",
                self.dir.display()
            ))
        })?;

        if fs::try_exists(&target).await.unwrap_or(false) {
            debug!(file = %name, "cover already stored");
        } else {
            let dir = self.dir.clone();
            let bytes = cover.bytes().clone();
            task::spawn_blocking(move || write_atomically(&dir, &target, &bytes))
                .await
                .map_err(|err| {
                    ApplicationError::infrastructure(format!("cover writer failed: {err}"))
                })?
                .map_err(|err| {
                    ApplicationError::infrastructure(format!("cannot write cover: {err}"))
                })?;
        }

        Ok(CoverPath::new(format!("{COVER_PREFIX}/{name}"))?)
    }
}
