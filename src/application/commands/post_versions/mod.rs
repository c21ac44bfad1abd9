// src/application/commands/post_versions/mod.rs
mod assign;
mod capability;
mod create;
mod draft;
mod input;
mod review;
mod service;

pub use assign::AssignModeratorCommand;
pub use input::{
    NewPostVersionCommand, NewPostVersionCommandBuilder, PostVersionChangesCommand,
};
pub use review::{AcceptCommand, RejectCommand, RequestChangesCommand};
pub use service::PostVersionCommandService;
