// src/application/commands/post_versions/input.rs
use crate::{
    application::{
        error::FieldErrors,
        uploads::{CoverImage, CoverUpload},
    },
    domain::{
        category::CategoryId,
        post_version::{PostVersionContent, PostVersionDescription, PostVersionTitle},
    },
};

/// Fields of a brand new submission. Every field is required.
#[derive(Debug, Clone)]
pub struct NewPostVersionCommand {
    pub category_id: i64,
    pub title: String,
    pub description: String,
    pub content: String,
    pub cover: CoverUpload,
}

impl NewPostVersionCommand {
    pub fn builder() -> NewPostVersionCommandBuilder {
        NewPostVersionCommandBuilder::default()
    }
}

#[derive(Default)]
pub struct NewPostVersionCommandBuilder {
    category_id: Option<i64>,
    title: Option<String>,
    description: Option<String>,
    content: Option<String>,
    cover: Option<CoverUpload>,
}

impl NewPostVersionCommandBuilder {
    pub fn category_id(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn cover(mut self, cover: CoverUpload) -> Self {
        self.cover = Some(cover);
        self
    }

    /// Missing fields are reported together, keyed by field name.
    pub fn build(self) -> Result<NewPostVersionCommand, FieldErrors> {
        let mut errors = FieldErrors::new();
        for (field, missing) in [
            ("category_id", self.category_id.is_none()),
            ("title", self.title.is_none()),
            ("description", self.description.is_none()),
            ("content", self.content.is_none()),
            ("cover", self.cover.is_none()),
        ] {
            if missing {
                errors.add(field, format!("{field} is required"));
            }
        }

        match (
            self.category_id,
            self.title,
            self.description,
            self.content,
            self.cover,
        ) {
            (Some(category_id), Some(title), Some(description), Some(content), Some(cover)) => {
                Ok(NewPostVersionCommand {
                    category_id,
                    title,
                    description,
                    content,
                    cover,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Optional edits carried by draft updates and every reviewer transition.
#[derive(Debug, Clone, Default)]
pub struct PostVersionChangesCommand {
    pub category_id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub content: Option<String>,
    pub cover: Option<CoverUpload>,
}

impl PostVersionChangesCommand {
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn with_cover(mut self, cover: CoverUpload) -> Self {
        self.cover = Some(cover);
        self
    }
}

/// Field values after syntax checks. Nothing here has touched storage yet.
pub(super) struct CheckedFields {
    pub category_id: Option<CategoryId>,
    pub title: Option<PostVersionTitle>,
    pub description: Option<PostVersionDescription>,
    pub content: Option<PostVersionContent>,
    pub cover: Option<CoverImage>,
}

impl CheckedFields {
    pub(super) fn check(command: PostVersionChangesCommand, errors: &mut FieldErrors) -> Self {
        Self {
            category_id: command
                .category_id
                .and_then(|id| errors.check("category_id", CategoryId::new(id))),
            title: command
                .title
                .and_then(|v| errors.check("title", PostVersionTitle::new(v))),
            description: command
                .description
                .and_then(|v| errors.check("description", PostVersionDescription::new(v))),
            content: command
                .content
                .and_then(|v| errors.check("content", PostVersionContent::new(v))),
            cover: command
                .cover
                .and_then(|v| errors.check("cover", CoverImage::validate(v))),
        }
    }
}

impl From<NewPostVersionCommand> for PostVersionChangesCommand {
    fn from(command: NewPostVersionCommand) -> Self {
        Self {
            category_id: Some(command.category_id),
            title: Some(command.title),
            description: Some(command.description),
            content: Some(command.content),
            cover: Some(command.cover),
        }
    }
}
