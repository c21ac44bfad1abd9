// src/domain/post_version/action.rs
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::post_version::value_objects::PostVersionId;
use crate::domain::user::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PostVersionActionType {
    Submit,
    RequestChanges,
    Accept,
    Reject,
    AssignModerator,
}

impl PostVersionActionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Submit => "submit",
            Self::RequestChanges => "request_changes",
            Self::Accept => "accept",
            Self::Reject => "reject",
            Self::AssignModerator => "assign_moderator",
        }
    }

    pub fn as_i16(&self) -> i16 {
        match self {
            Self::Submit => 0,
            Self::RequestChanges => 1,
            Self::Accept => 2,
            Self::Reject => 3,
            Self::AssignModerator => 4,
        }
    }
}

impl TryFrom<i16> for PostVersionActionType {
    type Error = DomainError;

    fn try_from(value: i16) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Submit),
            1 => Ok(Self::RequestChanges),
            2 => Ok(Self::Accept),
            3 => Ok(Self::Reject),
            4 => Ok(Self::AssignModerator),
            other => Err(DomainError::Validation(format!(
                "unknown post version action type {other}"
            ))),
        }
    }
}

impl fmt::Display for PostVersionActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
struct MessageDetails {
    message: String,
}

#[derive(Deserialize)]
struct ReasonDetails {
    reason: String,
}

#[derive(Deserialize)]
struct ModeratorDetails {
    moderator_id: i64,
}

/// What happened to a post version, together with the payload that belongs to
/// that kind of action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostVersionActionKind {
    Submit,
    RequestChanges { message: String },
    Accept,
    Reject { reason: String },
    AssignModerator { moderator_id: UserId },
}

impl PostVersionActionKind {
    pub fn request_changes(message: impl Into<String>) -> DomainResult<Self> {
        let message = message.into();
        if message.trim().is_empty() {
            return Err(DomainError::Validation("message cannot be empty".into()));
        }
        Ok(Self::RequestChanges { message })
    }

    pub fn reject(reason: impl Into<String>) -> DomainResult<Self> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(DomainError::Validation("reason cannot be empty".into()));
        }
        Ok(Self::Reject { reason })
    }

    pub fn action_type(&self) -> PostVersionActionType {
        match self {
            Self::Submit => PostVersionActionType::Submit,
            Self::RequestChanges { .. } => PostVersionActionType::RequestChanges,
            Self::Accept => PostVersionActionType::Accept,
            Self::Reject { .. } => PostVersionActionType::Reject,
            Self::AssignModerator { .. } => PostVersionActionType::AssignModerator,
        }
    }

    /// JSON stored in the `details` column.
    pub fn details(&self) -> Value {
        match self {
            Self::Submit | Self::Accept => json!({}),
            Self::RequestChanges { message } => json!({ "message": message }),
            Self::Reject { reason } => json!({ "reason": reason }),
            Self::AssignModerator { moderator_id } => {
                json!({ "moderator_id": i64::from(*moderator_id) })
            }
        }
    }

    pub fn from_stored(action_type: PostVersionActionType, details: Value) -> DomainResult<Self> {
        let malformed = |err: serde_json::Error| {
            DomainError::Persistence(format!("malformed {action_type} details: {err}"))
        };

        match action_type {
            PostVersionActionType::Submit => Ok(Self::Submit),
            PostVersionActionType::Accept => Ok(Self::Accept),
            PostVersionActionType::RequestChanges => {
                let d: MessageDetails = serde_json::from_value(details).map_err(malformed)?;
                Ok(Self::RequestChanges { message: d.message })
            }
            PostVersionActionType::Reject => {
                let d: ReasonDetails = serde_json::from_value(details).map_err(malformed)?;
                Ok(Self::Reject { reason: d.reason })
            }
            PostVersionActionType::AssignModerator => {
                let d: ModeratorDetails = serde_json::from_value(details).map_err(malformed)?;
                Ok(Self::AssignModerator {
                    moderator_id: UserId::new(d.moderator_id)?,
                })
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PostVersionActionId(pub i64);

impl From<PostVersionActionId> for i64 {
    fn from(value: PostVersionActionId) -> Self {
        value.0
    }
}

/// One entry of the append-only review log.
#[derive(Debug, Clone)]
pub struct PostVersionAction {
    pub id: PostVersionActionId,
    pub version_id: PostVersionId,
    pub user_id: Option<UserId>,
    pub kind: PostVersionActionKind,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewPostVersionAction {
    pub version_id: PostVersionId,
    pub user_id: Option<UserId>,
    pub kind: PostVersionActionKind,
    pub created_at: DateTime<Utc>,
}

impl NewPostVersionAction {
    pub fn new(
        version_id: PostVersionId,
        user_id: UserId,
        kind: PostVersionActionKind,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            version_id,
            user_id: Some(user_id),
            kind,
            created_at,
        }
    }
}
