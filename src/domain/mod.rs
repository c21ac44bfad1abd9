pub mod category;
pub mod errors;
pub mod post;
pub mod post_version;
pub mod user;
