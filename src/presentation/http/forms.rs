// src/presentation/http/forms.rs
use crate::application::{
    commands::post_versions::{NewPostVersionCommand, PostVersionChangesCommand},
    error::{ApplicationError, FieldErrors},
    uploads::CoverUpload,
};
use axum::extract::Multipart;

use super::error::{HttpError, HttpResult};

/// Fields accepted by the multipart post-version endpoints. Text fields that
/// are absent stay `None`; unknown fields are ignored.
#[derive(Debug, Default)]
pub struct PostVersionForm {
    pub category_id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub cover: Option<CoverUpload>,
    pub message: Option<String>,
    pub reason: Option<String>,
    pub slug: Option<String>,
}

impl PostVersionForm {
    pub async fn read(mut multipart: Multipart) -> HttpResult<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|err| HttpError::bad_request(err.to_string()))?
        {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            if name == "cover" {
                let file_name = field.file_name().map(str::to_owned);
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|err| HttpError::bad_request(err.to_string()))?;
                form.cover = Some(CoverUpload::new(file_name, bytes));
                continue;
            }

            let slot = match name.as_str() {
                "category_id" => &mut form.category_id,
                "title" => &mut form.title,
                "description" => &mut form.description,
                "content" => &mut form.content,
                "message" => &mut form.message,
                "reason" => &mut form.reason,
                "slug" => &mut form.slug,
                _ => continue,
            };
            let value = field
                .text()
                .await
                .map_err(|err| HttpError::bad_request(err.to_string()))?;
            *slot = Some(value);
        }

        Ok(form)
    }

    /// Optional edits carried by the form.
    pub fn changes(&mut self) -> HttpResult<PostVersionChangesCommand> {
        let mut errors = FieldErrors::new();
        let category_id = self.category_id.take().and_then(|raw| {
            raw.trim().parse::<i64>().map_or_else(
                |_| {
                    errors.add("category_id", "category_id must be an integer");
                    None
                },
                Some,
            )
        });
        errors
            .into_result()
            .map_err(HttpError::from_error)?;

        Ok(PostVersionChangesCommand {
            category_id,
            title: self.title.take(),
            description: self.description.take(),
            content: self.content.take(),
            cover: self.cover.take(),
        })
    }

    pub fn into_new_command(mut self) -> HttpResult<NewPostVersionCommand> {
        let changes = self.changes()?;
        let mut builder = NewPostVersionCommand::builder();
        if let Some(category_id) = changes.category_id {
            builder = builder.category_id(category_id);
        }
        if let Some(title) = changes.title {
            builder = builder.title(title);
        }
        if let Some(description) = changes.description {
            builder = builder.description(description);
        }
        if let Some(content) = changes.content {
            builder = builder.content(content);
        }
        if let Some(cover) = changes.cover {
            builder = builder.cover(cover);
        }
        builder
            .build()
            .map_err(|errors| HttpError::from_error(ApplicationError::InvalidInput(errors)))
    }
}
