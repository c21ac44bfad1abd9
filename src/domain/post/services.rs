// src/domain/post/services.rs
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::application::ports::util::SlugGenerator;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post::value_objects::{MAX_SLUG_CHARS, PostSlug};
use crate::domain::post_version::{PostVersionTitle, WorkflowTransaction};

/// Domain service deciding the slug of a post at the moment its first version
/// is accepted.
pub struct PostSlugService {
    generator: Arc<dyn SlugGenerator>,
}

impl PostSlugService {
    pub fn new(generator: Arc<dyn SlugGenerator>) -> Self {
        Self { generator }
    }

    /// An explicit slug is used verbatim and must be free. Without one the
    /// slug is derived from the title, shortened to fit and suffixed with a
    /// counter until free.
    pub async fn resolve(
        &self,
        tx: &mut dyn WorkflowTransaction,
        requested: Option<PostSlug>,
        title: &PostVersionTitle,
        now: DateTime<Utc>,
    ) -> DomainResult<PostSlug> {
        if let Some(slug) = requested {
            if tx.find_post_by_slug(&slug).await?.is_some() {
                return Err(DomainError::Conflict(format!(
                    "slug '{slug}' is already taken"
                )));
            }
            return Ok(slug);
        }

        let base = self.generator.slugify(title.as_str());
        let base_slug = if base.is_empty() {
            format!("post-{}", now.timestamp())
        } else {
            base
        };

        let mut candidate = fit_slug(&base_slug, "");
        let mut counter = 1u64;

        loop {
            let slug = PostSlug::new(candidate)?;
            if tx.find_post_by_slug(&slug).await?.is_none() {
                return Ok(slug);
            }
            candidate = fit_slug(&base_slug, &format!("-{counter}"));
            counter += 1;
        }
    }
}

/// Shorten `base` so that `base + suffix` stays within the slug limit,
/// cutting at a word boundary when there is one.
fn fit_slug(base: &str, suffix: &str) -> String {
    let room = MAX_SLUG_CHARS.saturating_sub(suffix.len());
    if base.chars().count() <= room {
        return format!("{base}{suffix}");
    }

    let cut: String = base.chars().take(room).collect();
    let at_boundary = base.chars().nth(room) == Some('-');
    let head = match cut.rfind('-') {
        Some(idx) if !at_boundary && idx > 0 => &cut[..idx],
        _ => cut.as_str(),
    };
    let head = head.trim_end_matches('-');
    let head = if head.is_empty() { cut.as_str() } else { head };

    format!("{head}{suffix}")
}
