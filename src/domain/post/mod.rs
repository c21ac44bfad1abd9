pub mod entity;
pub mod repository;
pub mod services;
pub mod value_objects;

pub use entity::{NewPost, Post};
pub use repository::{PostFilter, PostReadRepository};
pub use value_objects::{PostId, PostSlug};
