pub mod action;
pub mod entity;
pub mod repository;
pub mod specifications;
pub mod value_objects;

pub use action::{
    NewPostVersionAction, PostVersionAction, PostVersionActionId, PostVersionActionKind,
    PostVersionActionType,
};
pub use entity::{NewPostVersion, PostVersion, PostVersionChanges};
pub use repository::{
    PostVersionFilter, PostVersionReadRepository, WorkflowStore, WorkflowTransaction,
};
pub use value_objects::{
    CoverPath, PostVersionContent, PostVersionDescription, PostVersionId, PostVersionStatus,
    PostVersionTitle,
};
