// src/domain/post_version/value_objects.rs
use crate::domain::errors::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use utoipa::ToSchema;

pub const MAX_TITLE_CHARS: usize = 150;
pub const MAX_DESCRIPTION_CHARS: usize = 255;
pub const MAX_CONTENT_CHARS: usize = 65_535;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostVersionId(pub i64);

impl PostVersionId {
    pub fn new(id: i64) -> DomainResult<Self> {
        if id <= 0 {
            Err(DomainError::Validation(
                "post version id must be positive".into(),
            ))
        } else {
            Ok(Self(id))
        }
    }
}

impl From<PostVersionId> for i64 {
    fn from(value: PostVersionId) -> Self {
        value.0
    }
}

impl fmt::Display for PostVersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Review status of a single post version.
///
/// `Draft` and `Pending` are working states; `Accepted` and `Rejected` end the
/// life of that version. The stored representation is a small integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PostVersionStatus {
    Draft,
    Pending,
    Accepted,
    Rejected,
}

impl PostVersionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn as_i16(&self) -> i16 {
        match self {
            Self::Draft => 0,
            Self::Pending => 1,
            Self::Accepted => 2,
            Self::Rejected => 3,
        }
    }

    /// The only status a version may move into `self` from.
    pub fn predecessor(&self) -> PostVersionStatus {
        match self {
            Self::Draft => Self::Pending,
            Self::Pending => Self::Draft,
            Self::Accepted | Self::Rejected => Self::Pending,
        }
    }

    pub fn can_transition_to(&self, next: PostVersionStatus) -> bool {
        next.predecessor() == *self
    }
}

impl TryFrom<i16> for PostVersionStatus {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Draft),
            1 => Ok(Self::Pending),
            2 => Ok(Self::Accepted),
            3 => Ok(Self::Rejected),
            other => Err(DomainError::Validation(format!(
                "unknown post version status {other}"
            ))),
        }
    }
}

impl FromStr for PostVersionStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "rejected" => Ok(Self::Rejected),
            other => Err(DomainError::Validation(format!(
                "unknown post version status '{other}'"
            ))),
        }
    }
}

impl fmt::Display for PostVersionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn bounded_text(value: String, field: &str, max_chars: usize) -> DomainResult<String> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} cannot be empty")));
    }
    if value.chars().count() > max_chars {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max_chars} characters"
        )));
    }
    Ok(value)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostVersionTitle(String);

impl PostVersionTitle {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        bounded_text(value.into(), "title", MAX_TITLE_CHARS).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for PostVersionTitle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostVersionDescription(String);

impl PostVersionDescription {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        bounded_text(value.into(), "description", MAX_DESCRIPTION_CHARS).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostVersionContent(String);

impl PostVersionContent {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        bounded_text(value.into(), "content", MAX_CONTENT_CHARS).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Relative path of a stored cover image, e.g. `images/<hash>.png`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverPath(String);

impl CoverPath {
    pub fn new(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::Validation("cover path cannot be empty".into()));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_storage_encoding() {
        for (code, status) in [
            (0, PostVersionStatus::Draft),
            (1, PostVersionStatus::Pending),
            (2, PostVersionStatus::Accepted),
            (3, PostVersionStatus::Rejected),
        ] {
            assert_eq!(status.as_i16(), code);
            assert_eq!(PostVersionStatus::try_from(code).unwrap(), status);
        }
        assert!(PostVersionStatus::try_from(4).is_err());
    }

    #[test]
    fn transition_table_is_closed() {
        use PostVersionStatus::*;
        let allowed = [
            (Draft, Pending),
            (Pending, Draft),
            (Pending, Accepted),
            (Pending, Rejected),
        ];
        for from in [Draft, Pending, Accepted, Rejected] {
            for to in [Draft, Pending, Accepted, Rejected] {
                assert_eq!(
                    from.can_transition_to(to),
                    allowed.contains(&(from, to)),
                    "{from} -> {to}"
                );
            }
        }
    }

    #[test]
    fn terminal_states_have_no_exit() {
        use PostVersionStatus::*;
        for terminal in [Accepted, Rejected] {
            for to in [Draft, Pending, Accepted, Rejected] {
                assert!(!terminal.can_transition_to(to));
            }
        }
    }

    #[test]
    fn title_length_is_counted_in_characters() {
        let cyrillic = "ж".repeat(MAX_TITLE_CHARS);
        assert!(PostVersionTitle::new(cyrillic).is_ok());
        assert!(PostVersionTitle::new("a".repeat(MAX_TITLE_CHARS + 1)).is_err());
        assert!(PostVersionTitle::new("   ").is_err());
    }

    #[test]
    fn description_and_content_limits() {
        assert!(PostVersionDescription::new("d".repeat(MAX_DESCRIPTION_CHARS)).is_ok());
        assert!(PostVersionDescription::new("d".repeat(MAX_DESCRIPTION_CHARS + 1)).is_err());
        assert!(PostVersionContent::new("c".repeat(MAX_CONTENT_CHARS)).is_ok());
        assert!(PostVersionContent::new("c".repeat(MAX_CONTENT_CHARS + 1)).is_err());
    }
}
