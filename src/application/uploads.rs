// src/application/uploads.rs
use crate::domain::errors::{DomainError, DomainResult};
use bytes::Bytes;
use image::{ImageFormat, ImageReader};
use std::io::Cursor;

pub const MAX_COVER_BYTES: usize = 5 * 1024 * 1024;
pub const MIN_COVER_WIDTH: u32 = 768;
pub const MIN_COVER_HEIGHT: u32 = 432;

/// Raw cover file as received from a client.
#[derive(Debug, Clone)]
pub struct CoverUpload {
    pub file_name: Option<String>,
    pub bytes: Bytes,
}

impl CoverUpload {
    pub fn new(file_name: Option<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name,
            bytes: bytes.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverFormat {
    Jpeg,
    Png,
}

impl CoverFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            CoverFormat::Jpeg => "jpg",
            CoverFormat::Png => "png",
        }
    }
}

/// A cover that passed size, format and dimension checks. The format is
/// sniffed from the bytes, never taken from the file name.
#[derive(Debug, Clone)]
pub struct CoverImage {
    bytes: Bytes,
    format: CoverFormat,
    width: u32,
    height: u32,
}

impl CoverImage {
    pub fn validate(upload: CoverUpload) -> DomainResult<Self> {
        let CoverUpload { bytes, .. } = upload;

        if bytes.is_empty() {
            return Err(DomainError::Validation("cover file is empty".into()));
        }
        if bytes.len() > MAX_COVER_BYTES {
            return Err(DomainError::Validation(format!(
                "cover must not exceed {} KiB",
                MAX_COVER_BYTES / 1024
            )));
        }

        let reader = ImageReader::new(Cursor::new(bytes.as_ref()))
            .with_guessed_format()
            .map_err(|err| DomainError::Validation(format!("unreadable cover: {err}")))?;

        let format = match reader.format() {
            Some(ImageFormat::Jpeg) => CoverFormat::Jpeg,
            Some(ImageFormat::Png) => CoverFormat::Png,
            _ => {
                return Err(DomainError::Validation(
                    "cover must be a JPEG or PNG image".into(),
                ));
            }
        };

        let (width, height) = reader
            .into_dimensions()
            .map_err(|err| DomainError::Validation(format!("unreadable cover: {err}")))?;

        if width < MIN_COVER_WIDTH || height < MIN_COVER_HEIGHT {
            return Err(DomainError::Validation(format!(
                "cover must be at least {MIN_COVER_WIDTH}x{MIN_COVER_HEIGHT} pixels, got {width}x{height}"
            )));
        }

        Ok(Self {
            bytes,
            format,
            width,
            height,
        })
    }

    pub fn bytes(&self) -> &Bytes {
        &self.bytes
    }

    pub fn format(&self) -> CoverFormat {
        self.format
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}
